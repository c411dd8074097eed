//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no knowledge of HTTP or SQL.

mod college;
mod entity;
mod event;
mod note;
mod program;
mod question_paper;
mod slug;
mod subject;
mod syllabus;
mod todo;
mod user;
pub mod validation;

pub use college::{College, InstitutionType};
pub use entity::{DomainError, DomainResult, Entity};
pub use event::{Event, EventType};
pub use note::Note;
pub use program::Program;
pub use question_paper::{PaperStatus, QuestionPaper, MIN_PAPER_YEAR};
pub use slug::slugify;
pub use subject::{Subject, MAX_SEMESTER};
pub use syllabus::Syllabus;
pub use todo::{Comment, Priority, SubTask, Todo};
pub use user::{NewUser, ProfilePatch, User};
