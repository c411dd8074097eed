//! Note Repository
//!
//! Study notes with subject and uploader joins. Listing supports the
//! filter/search/ordering combinations the notes page sends.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Note};

use super::traits::{Repository, SearchableRepository};
use super::{parse_ts, sql_err, SharedConn};

const SELECT: &str = "SELECT n.id, n.title, n.subject_id, s.name, n.semester, n.description,
            n.file_path, n.upload_date, n.uploaded_by, u.first_name, u.last_name, u.username,
            n.is_verified
     FROM notes n
     JOIN subjects s ON s.id = n.subject_id
     LEFT JOIN users u ON u.id = n.uploaded_by";

/// Query parameters accepted by the notes listing
#[derive(Debug, Default, Clone)]
pub struct NoteFilter {
    pub subject: Option<u32>,
    pub semester: Option<u8>,
    pub is_verified: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

pub struct NoteRepository {
    conn: SharedConn,
}

impl NoteRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn list_filtered(&self, filter: &NoteFilter) -> DomainResult<Vec<Note>> {
        let conn = self.conn.lock().await;

        let mut sql = format!("{SELECT} WHERE 1 = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(subject) = filter.subject {
            args.push(Box::new(subject));
            sql.push_str(&format!(" AND n.subject_id = ?{}", args.len()));
        }
        if let Some(semester) = filter.semester {
            args.push(Box::new(semester));
            sql.push_str(&format!(" AND n.semester = ?{}", args.len()));
        }
        if let Some(verified) = filter.is_verified {
            args.push(Box::new(verified));
            sql.push_str(&format!(" AND n.is_verified = ?{}", args.len()));
        }
        if let Some(q) = &filter.search {
            args.push(Box::new(format!("%{}%", q)));
            let idx = args.len();
            sql.push_str(&format!(
                " AND (n.title LIKE ?{idx} OR s.name LIKE ?{idx} OR n.description LIKE ?{idx})"
            ));
        }
        sql.push_str(order_clause(filter.ordering.as_deref()));

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_note)
            .map_err(sql_err)?;
        let mut notes = Vec::new();
        for row in rows {
            notes.push(row.map_err(sql_err)?);
        }
        Ok(notes)
    }

    /// Stored media path for the download handler
    pub async fn file_path(&self, id: u32) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT file_path FROM notes WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DomainError::NotFound(format!("Note {} not found", id))
            }
            other => sql_err(other),
        })
    }
}

#[async_trait]
impl Repository<Note> for NoteRepository {
    async fn create(&self, entity: &Note) -> DomainResult<Note> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        let file_path = entity.file_url.as_deref().map(strip_media_prefix);
        conn.execute(
            "INSERT INTO notes (title, subject_id, semester, description, file_path,
             upload_date, uploaded_by, is_verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entity.title,
                entity.subject,
                entity.semester,
                entity.description,
                file_path,
                now.to_rfc3339(),
                entity.uploaded_by,
                entity.is_verified
            ],
        )
        .map_err(sql_err)?;

        let id = conn.last_insert_rowid() as u32;
        drop(conn);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal("Created note vanished".into()))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Note>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT} WHERE n.id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_note).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Note>> {
        self.list_filtered(&NoteFilter::default()).await
    }

    async fn update(&self, entity: &Note) -> DomainResult<Note> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE notes SET title = ?1, semester = ?2, description = ?3, is_verified = ?4
                 WHERE id = ?5",
                params![
                    entity.title,
                    entity.semester,
                    entity.description,
                    entity.is_verified,
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Note {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Note> for NoteRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Note>> {
        self.list_filtered(&NoteFilter {
            search: Some(query.to_string()),
            ..NoteFilter::default()
        })
        .await
    }
}

/// Whitelisted ordering values; anything else falls back to newest first
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("upload_date") => " ORDER BY n.upload_date",
        Some("title") => " ORDER BY n.title",
        Some("-title") => " ORDER BY n.title DESC",
        Some("semester") => " ORDER BY n.semester, n.upload_date DESC",
        Some("-semester") => " ORDER BY n.semester DESC, n.upload_date DESC",
        _ => " ORDER BY n.upload_date DESC",
    }
}

fn strip_media_prefix(url: &str) -> String {
    url.strip_prefix("/media/").unwrap_or(url).to_string()
}

fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    let file_path: Option<String> = row.get(6)?;
    let first: Option<String> = row.get(9)?;
    let last: Option<String> = row.get(10)?;
    let username: Option<String> = row.get(11)?;
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        subject: row.get(2)?,
        subject_name: row.get(3)?,
        semester: row.get(4)?,
        description: row.get(5)?,
        file_url: file_path.map(|p| format!("/media/{}", p)),
        upload_date: parse_ts(row.get(7)?),
        uploaded_by: row.get(8)?,
        uploaded_by_name: display_name(first, last, username),
        is_verified: row.get(12)?,
    })
}

fn display_name(first: Option<String>, last: Option<String>, username: Option<String>) -> Option<String> {
    let full = format!(
        "{} {}",
        first.unwrap_or_default(),
        last.unwrap_or_default()
    );
    let full = full.trim();
    if !full.is_empty() {
        return Some(full.to_string());
    }
    username
}
