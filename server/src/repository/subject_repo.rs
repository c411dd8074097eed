//! Subject Repository
//!
//! Subjects always join their program for the denormalized program_name
//! the list payloads carry. The (code, program, semester) triple is
//! unique.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Subject};

use super::traits::{Repository, SearchableRepository};
use super::{sql_err, SharedConn};

const SELECT: &str = "SELECT s.id, s.code, s.name, s.program_id, p.name, s.semester, s.credit_hours, s.is_active
     FROM subjects s JOIN programs p ON p.id = s.program_id";

pub struct SubjectRepository {
    conn: SharedConn,
}

impl SubjectRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    /// Filtered listing for /api/subjects/
    pub async fn list_filtered(
        &self,
        program: Option<u32>,
        semester: Option<u8>,
        search: Option<&str>,
    ) -> DomainResult<Vec<Subject>> {
        let conn = self.conn.lock().await;

        let mut sql = format!("{SELECT} WHERE s.is_active = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(pid) = program {
            args.push(Box::new(pid));
            sql.push_str(&format!(" AND s.program_id = ?{}", args.len()));
        }
        if let Some(sem) = semester {
            args.push(Box::new(sem));
            sql.push_str(&format!(" AND s.semester = ?{}", args.len()));
        }
        if let Some(q) = search {
            args.push(Box::new(format!("%{}%", q)));
            let idx = args.len();
            sql.push_str(&format!(" AND (s.name LIKE ?{idx} OR s.code LIKE ?{idx})"));
        }
        sql.push_str(" ORDER BY s.semester, s.code");

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_subject)
            .map_err(sql_err)?;
        let mut subjects = Vec::new();
        for row in rows {
            subjects.push(row.map_err(sql_err)?);
        }
        Ok(subjects)
    }

    /// All of a program's subjects grouped by semester, ascending
    pub async fn grouped_by_semester(&self, program_id: u32) -> DomainResult<Vec<(u8, Vec<Subject>)>> {
        let subjects = self.list_filtered(Some(program_id), None, None).await?;
        let mut groups: Vec<(u8, Vec<Subject>)> = Vec::new();
        for subject in subjects {
            match groups.last_mut() {
                Some((sem, bucket)) if *sem == subject.semester => bucket.push(subject),
                _ => groups.push((subject.semester, vec![subject])),
            }
        }
        Ok(groups)
    }

    pub async fn exists(&self, id: u32) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        let count: u32 = conn
            .query_row("SELECT COUNT(*) FROM subjects WHERE id = ?1", params![id], |row| row.get(0))
            .map_err(sql_err)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl Repository<Subject> for SubjectRepository {
    async fn create(&self, entity: &Subject) -> DomainResult<Subject> {
        Subject::validate_semester(entity.semester)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO subjects (code, name, program_id, semester, credit_hours, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entity.code,
                entity.name,
                entity.program,
                entity.semester,
                entity.credit_hours,
                entity.is_active
            ],
        )
        .map_err(|e| match sql_err(e) {
            DomainError::Conflict(_) => DomainError::Conflict(
                "Subject with this code already exists for this program and semester".into(),
            ),
            other => other,
        })?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Subject>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{SELECT} WHERE s.id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_subject).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Subject>> {
        self.list_filtered(None, None, None).await
    }

    async fn update(&self, entity: &Subject) -> DomainResult<Subject> {
        Subject::validate_semester(entity.semester)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE subjects SET code = ?1, name = ?2, program_id = ?3, semester = ?4,
                 credit_hours = ?5, is_active = ?6 WHERE id = ?7",
                params![
                    entity.code,
                    entity.name,
                    entity.program,
                    entity.semester,
                    entity.credit_hours,
                    entity.is_active,
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Subject {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM subjects WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Subject> for SubjectRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Subject>> {
        self.list_filtered(None, None, Some(query)).await
    }
}

fn row_to_subject(row: &rusqlite::Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        program: row.get(3)?,
        program_name: row.get(4)?,
        semester: row.get(5)?,
        credit_hours: row.get(6)?,
        is_active: row.get(7)?,
    })
}
