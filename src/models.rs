//! Frontend Models
//!
//! Serde mirrors of the REST resources, plus the pagination envelope
//! and the token pair the auth endpoints return.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Programs run for at most eight semesters
pub const MAX_SEMESTER: u8 = 8;

/// `{count, next, previous, results}` envelope used by list endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub duration_years: u8,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub program: u32,
    pub program_name: String,
    pub semester: u8,
    pub credit_hours: u8,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub subject: u32,
    pub subject_name: String,
    pub semester: u8,
    pub description: String,
    pub file_url: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub uploaded_by_name: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllabus {
    pub id: u32,
    pub subject: u32,
    pub subject_name: String,
    pub file_url: Option<String>,
    pub version: String,
    pub is_current: bool,
    pub description: String,
    pub upload_date: DateTime<Utc>,
    pub view_count: u32,
    pub download_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub id: String,
    pub subject: u32,
    pub subject_name: String,
    pub year: u16,
    pub semester: u8,
    pub file_url: Option<String>,
    pub status: String,
    pub view_count: u32,
    pub download_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub established_year: Option<u16>,
    pub location: String,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub website: String,
    pub affiliation: String,
    pub accreditation: String,
    pub institution_type: String,
    pub rating: f64,
    pub facilities: Vec<String>,
    pub courses_offered: Vec<String>,
    pub description: String,
    pub scholarships_available: bool,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    /// Display time like "10:00 AM"
    pub time: String,
    pub location: String,
    pub event_type: String,
    pub description: String,
    pub speaker: Option<String>,
    pub registration_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: u32,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    pub content: String,
    pub user: u32,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// The todo wire format keeps the camelCase names the backend exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: String,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    pub category: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
    pub phone_number: Option<String>,
    pub college: Option<String>,
    pub semester: Option<u8>,
    pub bio: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

impl User {
    /// Name shown in the navbar and on comments
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name).trim().to_string();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

/// One semester block of `/api/programs/{id}/subjects/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SemesterBlock {
    pub semester: u8,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgramSubjects {
    pub program: Program,
    pub semesters: Vec<SemesterBlock>,
}

/// Grouped payload of `/api/search/?q=`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub notes: Vec<Note>,
    pub subjects: Vec<Subject>,
    pub colleges: Vec<College>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.subjects.is_empty() && self.colleges.is_empty()
    }
}
