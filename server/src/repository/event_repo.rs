//! Event Repository
//!
//! Career events ordered by date. The careers page asks for upcoming
//! events, optionally narrowed to one type.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Event, EventType};

use super::traits::Repository;
use super::{parse_ts, sql_err, SharedConn};

const COLUMNS: &str = "id, title, date, time, location, event_type, description, speaker,
            registration_required, created_at";

pub struct EventRepository {
    conn: SharedConn,
}

impl EventRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    /// Events on or after today, soonest first
    pub async fn list_upcoming(&self, event_type: Option<EventType>) -> DomainResult<Vec<Event>> {
        let today = chrono::Utc::now().date_naive().to_string();
        self.list_where(Some(&today), event_type).await
    }

    pub async fn list_by_type(&self, event_type: EventType) -> DomainResult<Vec<Event>> {
        self.list_where(None, Some(event_type)).await
    }

    async fn list_where(
        &self,
        not_before: Option<&str>,
        event_type: Option<EventType>,
    ) -> DomainResult<Vec<Event>> {
        let conn = self.conn.lock().await;
        let mut sql = format!("SELECT {COLUMNS} FROM events WHERE 1 = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(date) = not_before {
            args.push(Box::new(date.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", args.len()));
        }
        if let Some(kind) = event_type {
            args.push(Box::new(kind.as_str()));
            sql.push_str(&format!(" AND event_type = ?{}", args.len()));
        }
        sql.push_str(" ORDER BY date, time");

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_event)
            .map_err(sql_err)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row.map_err(sql_err)?);
        }
        Ok(events)
    }
}

#[async_trait]
impl Repository<Event> for EventRepository {
    async fn create(&self, entity: &Event) -> DomainResult<Event> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO events (title, date, time, location, event_type, description, speaker,
             registration_required, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entity.title,
                entity.date.to_string(),
                entity.time,
                entity.location,
                entity.event_type.as_str(),
                entity.description,
                entity.speaker,
                entity.registration_required,
                now.to_rfc3339()
            ],
        )
        .map_err(sql_err)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = now;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Event>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM events WHERE id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_event).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Event>> {
        self.list_where(None, None).await
    }

    async fn update(&self, entity: &Event) -> DomainResult<Event> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE events SET title = ?1, date = ?2, time = ?3, location = ?4,
                 event_type = ?5, description = ?6, speaker = ?7, registration_required = ?8
                 WHERE id = ?9",
                params![
                    entity.title,
                    entity.date.to_string(),
                    entity.time,
                    entity.location,
                    entity.event_type.as_str(),
                    entity.description,
                    entity.speaker,
                    entity.registration_required,
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Event {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM events WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    let date: String = row.get(2)?;
    let event_type: String = row.get(5)?;
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        date: date.parse().unwrap_or_default(),
        time: row.get(3)?,
        location: row.get(4)?,
        event_type: EventType::from_str(&event_type),
        description: row.get(6)?,
        speaker: row.get(7)?,
        registration_required: row.get(8)?,
        created_at: parse_ts(row.get(9)?),
    })
}
