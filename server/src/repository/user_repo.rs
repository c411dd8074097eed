//! User Repository
//!
//! Accounts, pending OTP registrations and password-reset tokens. The
//! password hash is read only by the credential helpers; the User
//! entity never carries it.

use rusqlite::params;

use crate::domain::{DomainError, DomainResult, NewUser, ProfilePatch, User};

use super::{list_to_json, parse_list, parse_ts, sql_err, SharedConn};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, is_verified, phone_number,
            college, semester, bio, interests, skills, facebook_url, twitter_url, linkedin_url,
            github_url, date_joined";

/// A registration waiting for OTP confirmation
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub otp_code: String,
    pub otp_expires_at: chrono::DateTime<chrono::Utc>,
}

pub struct UserRepository {
    conn: SharedConn,
}

impl UserRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new: &NewUser) -> DomainResult<User> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO users (username, email, password_hash, first_name, last_name,
             is_verified, date_joined)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.username,
                new.email,
                new.password_hash,
                new.first_name,
                new.last_name,
                new.is_verified,
                now.to_rfc3339()
            ],
        )
        .map_err(|e| match sql_err(e) {
            DomainError::Conflict(detail) => {
                if detail.contains("email") {
                    DomainError::Conflict("A user with this email already exists".into())
                } else {
                    DomainError::Conflict("A user with this username already exists".into())
                }
            }
            other => other,
        })?;
        let id = conn.last_insert_rowid() as u32;
        drop(conn);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal("Created user vanished".into()))
    }

    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;
        find_where(&conn, "id = ?1", params![id])
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;
        find_where(&conn, "email = ?1", params![email])
    }

    /// (id, password_hash) for the login check
    pub async fn credentials_by_email(&self, email: &str) -> DomainResult<Option<(u32, String)>> {
        let conn = self.conn.lock().await;
        let result = conn.query_row(
            "SELECT id, password_hash FROM users WHERE email = ?1",
            params![email],
            |row| Ok((row.get(0)?, row.get(1)?)),
        );
        match result {
            Ok(pair) => Ok(Some(pair)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(sql_err(e)),
        }
    }

    pub async fn email_taken(&self, email: &str) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        let count: u32 = conn
            .query_row("SELECT COUNT(*) FROM users WHERE email = ?1", params![email], |row| {
                row.get(0)
            })
            .map_err(sql_err)?;
        Ok(count > 0)
    }

    pub async fn username_taken(&self, username: &str) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        let count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .map_err(sql_err)?;
        Ok(count > 0)
    }

    /// Merge the patch onto the stored profile and persist
    pub async fn update_profile(&self, id: u32, patch: &ProfilePatch) -> DomainResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;

        let merged = User {
            first_name: patch.first_name.clone().unwrap_or(existing.first_name),
            last_name: patch.last_name.clone().unwrap_or(existing.last_name),
            phone_number: patch.phone_number.clone().or(existing.phone_number),
            college: patch.college.clone().or(existing.college),
            semester: patch.semester.or(existing.semester),
            bio: patch.bio.clone().unwrap_or(existing.bio),
            interests: patch.interests.clone().unwrap_or(existing.interests),
            skills: patch.skills.clone().unwrap_or(existing.skills),
            facebook_url: patch.facebook_url.clone().or(existing.facebook_url),
            twitter_url: patch.twitter_url.clone().or(existing.twitter_url),
            linkedin_url: patch.linkedin_url.clone().or(existing.linkedin_url),
            github_url: patch.github_url.clone().or(existing.github_url),
            ..existing
        };

        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, phone_number = ?3, college = ?4,
             semester = ?5, bio = ?6, interests = ?7, skills = ?8, facebook_url = ?9,
             twitter_url = ?10, linkedin_url = ?11, github_url = ?12 WHERE id = ?13",
            params![
                merged.first_name,
                merged.last_name,
                merged.phone_number,
                merged.college,
                merged.semester,
                merged.bio,
                list_to_json(&merged.interests),
                list_to_json(&merged.skills),
                merged.facebook_url,
                merged.twitter_url,
                merged.linkedin_url,
                merged.github_url,
                id
            ],
        )
        .map_err(sql_err)?;
        Ok(merged)
    }

    pub async fn set_password(&self, id: u32, password_hash: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE users SET password_hash = ?1 WHERE id = ?2",
                params![password_hash, id],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pending registrations (OTP flow)
    // ------------------------------------------------------------------

    /// Insert or replace the pending registration for an email
    pub async fn upsert_pending(&self, pending: &PendingRegistration) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO pending_registrations
             (email, username, password_hash, first_name, last_name, otp_code, otp_expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(email) DO UPDATE SET
             username = ?2, password_hash = ?3, first_name = ?4, last_name = ?5,
             otp_code = ?6, otp_expires_at = ?7",
            params![
                pending.email,
                pending.username,
                pending.password_hash,
                pending.first_name,
                pending.last_name,
                pending.otp_code,
                pending.otp_expires_at.to_rfc3339(),
                chrono::Utc::now().to_rfc3339()
            ],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    pub async fn find_pending(&self, email: &str) -> DomainResult<Option<PendingRegistration>> {
        let conn = self.conn.lock().await;
        let result = conn.query_row(
            "SELECT email, username, password_hash, first_name, last_name, otp_code, otp_expires_at
             FROM pending_registrations WHERE email = ?1",
            params![email],
            |row| {
                Ok(PendingRegistration {
                    email: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    first_name: row.get(3)?,
                    last_name: row.get(4)?,
                    otp_code: row.get(5)?,
                    otp_expires_at: parse_ts(row.get(6)?),
                })
            },
        );
        match result {
            Ok(pending) => Ok(Some(pending)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(sql_err(e)),
        }
    }

    pub async fn update_pending_otp(
        &self,
        email: &str,
        otp_code: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE pending_registrations SET otp_code = ?1, otp_expires_at = ?2 WHERE email = ?3",
                params![otp_code, expires_at.to_rfc3339(), email],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("No pending registration found".into()));
        }
        Ok(())
    }

    pub async fn delete_pending(&self, email: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM pending_registrations WHERE email = ?1", params![email])
            .map_err(sql_err)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Password resets
    // ------------------------------------------------------------------

    pub async fn create_reset(
        &self,
        user_id: u32,
        token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO password_resets (user_id, token_hash, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                token_hash,
                expires_at.to_rfc3339(),
                chrono::Utc::now().to_rfc3339()
            ],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    /// Consume a reset token, returning its user when valid and unused
    pub async fn take_valid_reset(&self, token_hash: &str) -> DomainResult<Option<u32>> {
        let conn = self.conn.lock().await;
        let result = conn.query_row(
            "SELECT id, user_id, expires_at FROM password_resets
             WHERE token_hash = ?1 AND used = 0",
            params![token_hash],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?, row.get::<_, String>(2)?)),
        );
        let (reset_id, user_id, expires_at) = match result {
            Ok(tuple) => tuple,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(sql_err(e)),
        };

        if parse_ts(expires_at) < chrono::Utc::now() {
            return Ok(None);
        }
        conn.execute("UPDATE password_resets SET used = 1 WHERE id = ?1", params![reset_id])
            .map_err(sql_err)?;
        Ok(Some(user_id))
    }
}

// Runs under the connection lock; rusqlite statements and `params!`
// values are not Send and must not be held across an await.
fn find_where(
    conn: &rusqlite::Connection,
    clause: &str,
    args: impl rusqlite::Params,
) -> DomainResult<Option<User>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}"))
        .map_err(sql_err)?;
    let mut rows = stmt.query_map(args, row_to_user).map_err(sql_err)?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(sql_err)?)),
        None => Ok(None),
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        is_verified: row.get(5)?,
        phone_number: row.get(6)?,
        college: row.get(7)?,
        semester: row.get(8)?,
        bio: row.get(9)?,
        interests: parse_list(row.get(10)?),
        skills: parse_list(row.get(11)?),
        facebook_url: row.get(12)?,
        twitter_url: row.get(13)?,
        linkedin_url: row.get(14)?,
        github_url: row.get(15)?,
        date_joined: parse_ts(row.get(16)?),
    })
}
