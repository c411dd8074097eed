//! Syllabus Entity
//!
//! A versioned curriculum document for a subject. At most one syllabus
//! per subject carries is_current; marking one current unmarks the rest
//! (enforced in the repository).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllabus {
    pub id: u32,
    pub subject: u32,
    pub subject_name: String,
    pub file_url: Option<String>,
    /// Free-form version label ("2021", "rev-2")
    pub version: String,
    pub is_current: bool,
    pub is_active: bool,
    pub description: String,
    pub uploaded_by: Option<u32>,
    pub upload_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub view_count: u32,
    pub download_count: u32,
}

impl Entity for Syllabus {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
