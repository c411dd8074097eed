//! Repository Layer
//!
//! SQLite-backed data access. All repositories share one connection
//! behind an async mutex; each owns the SQL for its aggregate.

mod college_repo;
mod db;
mod event_repo;
mod note_repo;
mod program_repo;
mod question_paper_repo;
mod subject_repo;
mod syllabus_repo;
mod todo_repo;
mod token_repo;
mod traits;
mod user_repo;

#[cfg(test)]
mod tests;

pub use college_repo::CollegeRepository;
pub use db::{open_db, seed_demo_data, SharedConn};
pub use event_repo::EventRepository;
pub use note_repo::{NoteFilter, NoteRepository};
pub use program_repo::ProgramRepository;
pub use question_paper_repo::QuestionPaperRepository;
pub use subject_repo::SubjectRepository;
pub use syllabus_repo::SyllabusRepository;
pub use todo_repo::TodoRepository;
pub use token_repo::{TokenKind, TokenRepository};
pub use traits::{Repository, SearchableRepository};
pub use user_repo::{PendingRegistration, UserRepository};

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Map rusqlite failures, surfacing constraint violations as conflicts
pub(crate) fn sql_err(e: rusqlite::Error) -> DomainError {
    if let rusqlite::Error::SqliteFailure(failure, ref msg) = e {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            let detail = msg.clone().unwrap_or_else(|| "constraint violation".to_string());
            return DomainError::Conflict(detail);
        }
    }
    DomainError::Internal(e.to_string())
}

/// Timestamps live in TEXT columns as RFC 3339
pub(crate) fn parse_ts(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

pub(crate) fn parse_ts_opt(s: Option<String>) -> Option<DateTime<Utc>> {
    s.map(parse_ts)
}

/// String-list columns are stored as JSON arrays
pub(crate) fn parse_list(s: String) -> Vec<String> {
    serde_json::from_str(&s).unwrap_or_default()
}

pub(crate) fn list_to_json(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}
