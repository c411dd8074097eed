//! College Repository
//!
//! Directory of affiliated institutions, sorted by rating then name.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{College, DomainError, DomainResult, InstitutionType};

use super::traits::{Repository, SearchableRepository};
use super::{list_to_json, parse_list, parse_ts, sql_err, SharedConn};

const COLUMNS: &str = "id, name, slug, established_year, location, address, contact, email,
            website, affiliation, accreditation, institution_type, rating, total_students,
            facilities, courses_offered, logo, image, description, achievements,
            scholarships_available, is_active, is_featured, created_at, updated_at";

pub struct CollegeRepository {
    conn: SharedConn,
}

impl CollegeRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    /// Active colleges, optionally filtered by a name/location search
    pub async fn list_filtered(
        &self,
        search: Option<&str>,
        featured_only: bool,
    ) -> DomainResult<Vec<College>> {
        let conn = self.conn.lock().await;
        let mut sql = format!("SELECT {COLUMNS} FROM colleges WHERE is_active = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if featured_only {
            sql.push_str(" AND is_featured = 1");
        }
        if let Some(q) = search {
            args.push(Box::new(format!("%{}%", q)));
            let idx = args.len();
            sql.push_str(&format!(
                " AND (name LIKE ?{idx} OR location LIKE ?{idx} OR affiliation LIKE ?{idx})"
            ));
        }
        sql.push_str(" ORDER BY rating DESC, name");

        let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())), row_to_college)
            .map_err(sql_err)?;
        let mut colleges = Vec::new();
        for row in rows {
            colleges.push(row.map_err(sql_err)?);
        }
        Ok(colleges)
    }
}

#[async_trait]
impl Repository<College> for CollegeRepository {
    async fn create(&self, entity: &College) -> DomainResult<College> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO colleges (name, slug, established_year, location, address, contact,
             email, website, affiliation, accreditation, institution_type, rating,
             total_students, facilities, courses_offered, logo, image, description,
             achievements, scholarships_available, is_active, is_featured, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20, ?21, ?22, ?23, ?23)",
            params![
                entity.name,
                entity.slug,
                entity.established_year,
                entity.location,
                entity.address,
                entity.contact,
                entity.email,
                entity.website,
                entity.affiliation,
                entity.accreditation,
                entity.institution_type.as_str(),
                entity.rating,
                entity.total_students,
                list_to_json(&entity.facilities),
                list_to_json(&entity.courses_offered),
                entity.logo,
                entity.image,
                entity.description,
                entity.achievements,
                entity.scholarships_available,
                entity.is_active,
                entity.is_featured,
                now.to_rfc3339()
            ],
        )
        .map_err(|e| match sql_err(e) {
            DomainError::Conflict(_) => {
                DomainError::Conflict("College with this slug already exists".into())
            }
            other => other,
        })?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = now;
        created.updated_at = now;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<College>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM colleges WHERE id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_college).map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<College>> {
        self.list_filtered(None, false).await
    }

    async fn update(&self, entity: &College) -> DomainResult<College> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        let changed = conn
            .execute(
                "UPDATE colleges SET name = ?1, location = ?2, address = ?3, contact = ?4,
                 email = ?5, website = ?6, affiliation = ?7, accreditation = ?8,
                 institution_type = ?9, rating = ?10, total_students = ?11, facilities = ?12,
                 courses_offered = ?13, description = ?14, achievements = ?15,
                 scholarships_available = ?16, is_active = ?17, is_featured = ?18,
                 updated_at = ?19 WHERE id = ?20",
                params![
                    entity.name,
                    entity.location,
                    entity.address,
                    entity.contact,
                    entity.email,
                    entity.website,
                    entity.affiliation,
                    entity.accreditation,
                    entity.institution_type.as_str(),
                    entity.rating,
                    entity.total_students,
                    list_to_json(&entity.facilities),
                    list_to_json(&entity.courses_offered),
                    entity.description,
                    entity.achievements,
                    entity.scholarships_available,
                    entity.is_active,
                    entity.is_featured,
                    now.to_rfc3339(),
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("College {} not found", entity.id)));
        }
        let mut updated = entity.clone();
        updated.updated_at = now;
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM colleges WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<College> for CollegeRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<College>> {
        self.list_filtered(Some(query), false).await
    }
}

fn row_to_college(row: &rusqlite::Row) -> rusqlite::Result<College> {
    let institution_type: String = row.get(11)?;
    Ok(College {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        established_year: row.get(3)?,
        location: row.get(4)?,
        address: row.get(5)?,
        contact: row.get(6)?,
        email: row.get(7)?,
        website: row.get(8)?,
        affiliation: row.get(9)?,
        accreditation: row.get(10)?,
        institution_type: InstitutionType::from_str(&institution_type),
        rating: row.get(12)?,
        total_students: row.get(13)?,
        facilities: parse_list(row.get(14)?),
        courses_offered: parse_list(row.get(15)?),
        logo: row.get(16)?,
        image: row.get(17)?,
        description: row.get(18)?,
        achievements: row.get(19)?,
        scholarships_available: row.get(20)?,
        is_active: row.get(21)?,
        is_featured: row.get(22)?,
        created_at: parse_ts(row.get(23)?),
        updated_at: parse_ts(row.get(24)?),
    })
}
