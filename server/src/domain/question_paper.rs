//! Question Paper Entity
//!
//! A past exam paper for a subject/year/semester, moderated before it
//! becomes publicly visible. Keyed by UUID.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Papers older than this are rejected on upload
pub const MIN_PAPER_YEAR: u16 = 2000;

/// Moderation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Pending => "PENDING",
            PaperStatus::Verified => "VERIFIED",
            PaperStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "VERIFIED" => PaperStatus::Verified,
            "REJECTED" => PaperStatus::Rejected,
            _ => PaperStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub id: String,
    pub subject: u32,
    pub subject_name: String,
    pub year: u16,
    pub semester: u8,
    pub file_url: Option<String>,
    pub status: PaperStatus,
    pub uploaded_by: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_date: Option<DateTime<Utc>>,
    pub view_count: u32,
    pub download_count: u32,
}

impl QuestionPaper {
    pub fn validate_year(year: u16) -> DomainResult<()> {
        let current = Utc::now().year() as u16;
        if year < MIN_PAPER_YEAR || year > current {
            return Err(DomainError::InvalidInput(format!(
                "Year must be between {} and {}",
                MIN_PAPER_YEAR, current
            )));
        }
        Ok(())
    }
}

impl Entity for QuestionPaper {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(PaperStatus::from_str("VERIFIED"), PaperStatus::Verified);
        assert_eq!(PaperStatus::from_str("garbage"), PaperStatus::Pending);
        assert_eq!(PaperStatus::Rejected.as_str(), "REJECTED");
    }

    #[test]
    fn test_year_bounds() {
        assert!(QuestionPaper::validate_year(1999).is_err());
        assert!(QuestionPaper::validate_year(2020).is_ok());
        assert!(QuestionPaper::validate_year(3000).is_err());
    }
}
