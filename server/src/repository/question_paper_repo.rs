//! Question Paper Repository
//!
//! UUID-keyed exam papers, unique per (subject, year, semester), listed
//! newest year first.

use rusqlite::params;

use crate::domain::{DomainError, DomainResult, PaperStatus, QuestionPaper};

use super::{parse_ts, parse_ts_opt, sql_err, SharedConn};

const SELECT: &str = "SELECT qp.id, qp.subject_id, s.name, qp.year, qp.semester, qp.file_path,
            qp.status, qp.uploaded_by, qp.created_at, qp.updated_at, qp.verified_date,
            qp.view_count, qp.download_count
     FROM question_papers qp JOIN subjects s ON s.id = qp.subject_id";

pub struct QuestionPaperRepository {
    conn: SharedConn,
}

impl QuestionPaperRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn create(&self, entity: &QuestionPaper) -> DomainResult<QuestionPaper> {
        QuestionPaper::validate_year(entity.year)?;
        let conn = self.conn.lock().await;
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let file_path = entity
            .file_url
            .as_deref()
            .map(|u| u.strip_prefix("/media/").unwrap_or(u).to_string());
        conn.execute(
            "INSERT INTO question_papers (id, subject_id, year, semester, file_path, status,
             uploaded_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                id,
                entity.subject,
                entity.year,
                entity.semester,
                file_path,
                entity.status.as_str(),
                entity.uploaded_by,
                now
            ],
        )
        .map_err(|e| match sql_err(e) {
            DomainError::Conflict(_) => DomainError::Conflict(
                "A question paper for this subject, year and semester already exists".into(),
            ),
            other => other,
        })?;
        drop(conn);

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::Internal("Created question paper vanished".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<QuestionPaper>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT} WHERE qp.id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_paper).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    /// Papers ordered by -year then semester; both filters optional
    pub async fn list(&self, subject: Option<u32>, year: Option<u16>) -> DomainResult<Vec<QuestionPaper>> {
        let conn = self.conn.lock().await;
        let mut sql = format!("{SELECT} WHERE 1 = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(subject_id) = subject {
            args.push(Box::new(subject_id));
            sql.push_str(&format!(" AND qp.subject_id = ?{}", args.len()));
        }
        if let Some(y) = year {
            args.push(Box::new(y));
            sql.push_str(&format!(" AND qp.year = ?{}", args.len()));
        }
        sql.push_str(" ORDER BY qp.year DESC, qp.semester");

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_paper)
            .map_err(sql_err)?;
        let mut papers = Vec::new();
        for row in rows {
            papers.push(row.map_err(sql_err)?);
        }
        Ok(papers)
    }

    pub async fn increment_download(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE question_papers SET download_count = download_count + 1 WHERE id = ?1",
                params![id],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Question paper {} not found", id)));
        }
        Ok(())
    }

    pub async fn file_path(&self, id: &str) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT file_path FROM question_papers WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DomainError::NotFound(format!("Question paper {} not found", id))
            }
            other => sql_err(other),
        })
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM question_papers WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

fn row_to_paper(row: &rusqlite::Row) -> rusqlite::Result<QuestionPaper> {
    let file_path: Option<String> = row.get(5)?;
    let status: String = row.get(6)?;
    Ok(QuestionPaper {
        id: row.get(0)?,
        subject: row.get(1)?,
        subject_name: row.get(2)?,
        year: row.get(3)?,
        semester: row.get(4)?,
        file_url: file_path.map(|p| format!("/media/{}", p)),
        status: PaperStatus::from_str(&status),
        uploaded_by: row.get(7)?,
        created_at: parse_ts(row.get(8)?),
        updated_at: parse_ts(row.get(9)?),
        verified_date: parse_ts_opt(row.get(10)?),
        view_count: row.get(11)?,
        download_count: row.get(12)?,
    })
}
