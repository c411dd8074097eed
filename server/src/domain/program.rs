//! Program Entity
//!
//! An academic degree track (e.g. BCA). Subjects hang off a program per
//! semester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: u32,
    pub name: String,
    /// URL slug, derived from the name on create
    pub slug: String,
    pub description: String,
    pub duration_years: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn new(id: u32, name: String, slug: String) -> Self {
        Self {
            id,
            name,
            slug,
            description: String::new(),
            duration_years: 4,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Program {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_defaults() {
        let p = Program::new(1, "BCA".to_string(), "bca".to_string());
        assert_eq!(p.id(), 1);
        assert_eq!(p.duration_years, 4);
        assert!(p.is_active);
    }
}
