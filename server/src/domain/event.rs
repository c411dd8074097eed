//! Event Entity
//!
//! Career events (seminars, workshops, competitions, webinars) shown on
//! the careers page, ordered by date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    #[default]
    Seminar,
    Workshop,
    Competition,
    Webinar,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Seminar => "SEMINAR",
            EventType::Workshop => "WORKSHOP",
            EventType::Competition => "COMPETITION",
            EventType::Webinar => "WEBINAR",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "WORKSHOP" => EventType::Workshop,
            "COMPETITION" => EventType::Competition,
            "WEBINAR" => EventType::Webinar,
            _ => EventType::Seminar,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    /// Display time like "10:00 AM"
    pub time: String,
    pub location: String,
    pub event_type: EventType,
    pub description: String,
    pub speaker: Option<String>,
    pub registration_required: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Event {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_roundtrip() {
        assert_eq!(EventType::from_str("WEBINAR"), EventType::Webinar);
        assert_eq!(EventType::from_str(""), EventType::Seminar);
        assert_eq!(EventType::Competition.as_str(), "COMPETITION");
    }
}
