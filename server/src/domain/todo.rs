//! Todo Entity
//!
//! Per-user task list with nested subtasks and comments. The wire format
//! keeps the camelCase field names the web client was built against
//! (dueDate, isCompleted, createdAt, lastModified).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    pub id: u32,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    pub content: String,
    pub user: u32,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    pub category: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
    /// Ownership is checked server-side and never exposed on the wire
    #[serde(skip)]
    pub owner: Option<u32>,
    pub subtasks: Vec<SubTask>,
    pub comments: Vec<Comment>,
}

impl Todo {
    /// Completed-subtask ratio for the progress bar, 0.0 when empty
    pub fn subtask_progress(&self) -> f32 {
        if self.subtasks.is_empty() {
            return 0.0;
        }
        let done = self.subtasks.iter().filter(|s| s.is_completed).count();
        done as f32 / self.subtasks.len() as f32
    }
}

impl Entity for Todo {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_todo() -> Todo {
        Todo {
            id: 1,
            title: "Revise unit 3".to_string(),
            description: String::new(),
            priority: Priority::High,
            due_date: None,
            category: "study".to_string(),
            is_completed: false,
            created_at: Utc::now(),
            last_modified: Utc::now(),
            owner: Some(7),
            subtasks: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_priority_roundtrip() {
        assert_eq!(Priority::from_str("high"), Priority::High);
        assert_eq!(Priority::from_str("nonsense"), Priority::Medium);
        assert_eq!(Priority::Low.as_str(), "low");
    }

    #[test]
    fn test_subtask_progress() {
        let mut todo = make_todo();
        assert_eq!(todo.subtask_progress(), 0.0);
        todo.subtasks.push(SubTask {
            id: 1,
            title: "read notes".to_string(),
            is_completed: true,
            created_at: Utc::now(),
        });
        todo.subtasks.push(SubTask {
            id: 2,
            title: "solve paper".to_string(),
            is_completed: false,
            created_at: Utc::now(),
        });
        assert_eq!(todo.subtask_progress(), 0.5);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::to_string(&make_todo()).expect("serialize");
        assert!(json.contains("\"isCompleted\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"lastModified\""));
        assert!(!json.contains("\"is_completed\""));
    }
}
