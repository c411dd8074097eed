//! Token Repository
//!
//! Opaque bearer tokens stored as SHA-256 hashes with kind and expiry.
//! Refresh rotation revokes the old token in the same call that mints
//! the replacement.

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::domain::DomainResult;

use super::{parse_ts, sql_err, SharedConn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

pub struct TokenRepository {
    conn: SharedConn,
}

impl TokenRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        user_id: u32,
        token_hash: &str,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO auth_tokens (user_id, token_hash, kind, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                token_hash,
                kind.as_str(),
                expires_at.to_rfc3339(),
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    /// User id behind a live token of the given kind, if any
    pub async fn find_valid(&self, token_hash: &str, kind: TokenKind) -> DomainResult<Option<u32>> {
        let conn = self.conn.lock().await;
        let result = conn.query_row(
            "SELECT user_id, expires_at FROM auth_tokens
             WHERE token_hash = ?1 AND kind = ?2 AND revoked = 0",
            params![token_hash, kind.as_str()],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)),
        );
        let (user_id, expires_at) = match result {
            Ok(tuple) => tuple,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(sql_err(e)),
        };
        if parse_ts(expires_at) < Utc::now() {
            return Ok(None);
        }
        Ok(Some(user_id))
    }

    pub async fn revoke(&self, token_hash: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE auth_tokens SET revoked = 1 WHERE token_hash = ?1",
            params![token_hash],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    /// Drop tokens past their expiry; called opportunistically on login
    pub async fn purge_expired(&self) -> DomainResult<usize> {
        let conn = self.conn.lock().await;
        let removed = conn
            .execute(
                "DELETE FROM auth_tokens WHERE expires_at < ?1",
                params![Utc::now().to_rfc3339()],
            )
            .map_err(sql_err)?;
        Ok(removed)
    }
}
