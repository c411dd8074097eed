//! Note Entity
//!
//! An uploaded study document tied to a subject and semester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub subject: u32,
    pub subject_name: String,
    pub semester: u8,
    pub description: String,
    /// Relative media path of the stored PDF ("/media/notes/...")
    pub file_url: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub uploaded_by: Option<u32>,
    pub uploaded_by_name: Option<String>,
    pub is_verified: bool,
}

impl Entity for Note {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
