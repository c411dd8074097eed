//! Program Repository
//!
//! CRUD over the programs table. Slugs are unique; inserting a
//! duplicate surfaces as a Conflict.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Program};

use super::traits::Repository;
use super::{parse_ts, sql_err, SharedConn};

const COLUMNS: &str = "id, name, slug, description, duration_years, is_active, created_at";

pub struct ProgramRepository {
    conn: SharedConn,
}

impl ProgramRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Program>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM programs WHERE slug = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![slug], row_to_program).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    /// Active programs in name order (the browse grid)
    pub async fn list_active(&self) -> DomainResult<Vec<Program>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM programs WHERE is_active = 1 ORDER BY name"
            ))
            .map_err(sql_err)?;
        let rows = stmt.query_map([], row_to_program).map_err(sql_err)?;
        let mut programs = Vec::new();
        for row in rows {
            programs.push(row.map_err(sql_err)?);
        }
        Ok(programs)
    }
}

#[async_trait]
impl Repository<Program> for ProgramRepository {
    async fn create(&self, entity: &Program) -> DomainResult<Program> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO programs (name, slug, description, duration_years, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entity.name,
                entity.slug,
                entity.description,
                entity.duration_years,
                entity.is_active,
                now.to_rfc3339()
            ],
        )
        .map_err(|e| match sql_err(e) {
            DomainError::Conflict(_) => {
                DomainError::Conflict("Program with this slug already exists".into())
            }
            other => other,
        })?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = now;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Program>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM programs WHERE id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_program).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Program>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM programs ORDER BY name"))
            .map_err(sql_err)?;
        let rows = stmt.query_map([], row_to_program).map_err(sql_err)?;
        let mut programs = Vec::new();
        for row in rows {
            programs.push(row.map_err(sql_err)?);
        }
        Ok(programs)
    }

    async fn update(&self, entity: &Program) -> DomainResult<Program> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE programs SET name = ?1, slug = ?2, description = ?3,
                 duration_years = ?4, is_active = ?5 WHERE id = ?6",
                params![
                    entity.name,
                    entity.slug,
                    entity.description,
                    entity.duration_years,
                    entity.is_active,
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Program {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM programs WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

fn row_to_program(row: &rusqlite::Row) -> rusqlite::Result<Program> {
    Ok(Program {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        duration_years: row.get(4)?,
        is_active: row.get(5)?,
        created_at: parse_ts(row.get(6)?),
    })
}
