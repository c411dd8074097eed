//! Syllabus Repository
//!
//! Versioned curriculum documents. Marking a version current clears the
//! flag on every other syllabus of the same subject, inside one
//! transaction.

use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Syllabus};

use super::{parse_ts, sql_err, SharedConn};

const SELECT: &str = "SELECT sy.id, sy.subject_id, s.name, sy.file_path, sy.version, sy.is_current,
            sy.is_active, sy.description, sy.uploaded_by, sy.upload_date, sy.last_updated,
            sy.view_count, sy.download_count
     FROM syllabus sy JOIN subjects s ON s.id = sy.subject_id";

pub struct SyllabusRepository {
    conn: SharedConn,
}

impl SyllabusRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn create(&self, entity: &Syllabus) -> DomainResult<Syllabus> {
        // The transaction borrows the connection and is not Send, so it
        // lives in a block that ends before the next await.
        let id = {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction().map_err(sql_err)?;
            let now = chrono::Utc::now().to_rfc3339();

            if entity.is_current {
                tx.execute(
                    "UPDATE syllabus SET is_current = 0 WHERE subject_id = ?1",
                    params![entity.subject],
                )
                .map_err(sql_err)?;
            }

            let file_path = entity
                .file_url
                .as_deref()
                .map(|u| u.strip_prefix("/media/").unwrap_or(u).to_string());
            tx.execute(
                "INSERT INTO syllabus (subject_id, file_path, version, is_current, is_active,
                 description, uploaded_by, upload_date, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    entity.subject,
                    file_path,
                    entity.version,
                    entity.is_current,
                    entity.is_active,
                    entity.description,
                    entity.uploaded_by,
                    now
                ],
            )
            .map_err(sql_err)?;
            let id = tx.last_insert_rowid() as u32;
            tx.commit().map_err(sql_err)?;
            id
        };

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal("Created syllabus vanished".into()))
    }

    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<Syllabus>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT} WHERE sy.id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_syllabus).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    /// Active syllabi, current versions first, newest upload next
    pub async fn list(&self, subject: Option<u32>) -> DomainResult<Vec<Syllabus>> {
        let conn = self.conn.lock().await;
        let mut sql = format!("{SELECT} WHERE sy.is_active = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(subject_id) = subject {
            args.push(Box::new(subject_id));
            sql.push_str(&format!(" AND sy.subject_id = ?{}", args.len()));
        }
        sql.push_str(" ORDER BY sy.is_current DESC, sy.upload_date DESC");

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_syllabus)
            .map_err(sql_err)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(sql_err)?);
        }
        Ok(result)
    }

    pub async fn increment_view(&self, id: u32) -> DomainResult<()> {
        self.bump(id, "view_count").await
    }

    pub async fn increment_download(&self, id: u32) -> DomainResult<()> {
        self.bump(id, "download_count").await
    }

    async fn bump(&self, id: u32, column: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                &format!("UPDATE syllabus SET {column} = {column} + 1 WHERE id = ?1"),
                params![id],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Syllabus {} not found", id)));
        }
        Ok(())
    }

    pub async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM syllabus WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

fn row_to_syllabus(row: &rusqlite::Row) -> rusqlite::Result<Syllabus> {
    let file_path: Option<String> = row.get(3)?;
    Ok(Syllabus {
        id: row.get(0)?,
        subject: row.get(1)?,
        subject_name: row.get(2)?,
        file_url: file_path.map(|p| format!("/media/{}", p)),
        version: row.get(4)?,
        is_current: row.get(5)?,
        is_active: row.get(6)?,
        description: row.get(7)?,
        uploaded_by: row.get(8)?,
        upload_date: parse_ts(row.get(9)?),
        last_updated: parse_ts(row.get(10)?),
        view_count: row.get(11)?,
        download_count: row.get(12)?,
    })
}
