//! Subject Entity
//!
//! A course offered within a specific program and semester. The
//! (code, program, semester) triple is unique.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Programs run for at most eight semesters
pub const MAX_SEMESTER: u8 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: u32,
    /// Course code like "CSC101"
    pub code: String,
    pub name: String,
    pub program: u32,
    /// Denormalized for list payloads
    pub program_name: String,
    pub semester: u8,
    pub credit_hours: u8,
    pub is_active: bool,
}

impl Subject {
    /// Semester values live in 1..=MAX_SEMESTER
    pub fn validate_semester(semester: u8) -> DomainResult<()> {
        if (1..=MAX_SEMESTER).contains(&semester) {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(format!(
                "Semester must be between 1 and {}",
                MAX_SEMESTER
            )))
        }
    }
}

impl Entity for Subject {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_bounds() {
        assert!(Subject::validate_semester(1).is_ok());
        assert!(Subject::validate_semester(8).is_ok());
        assert!(Subject::validate_semester(0).is_err());
        assert!(Subject::validate_semester(9).is_err());
    }
}
