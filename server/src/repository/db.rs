//! Database Connection and Setup
//!
//! Opens the SQLite database, applies the schema and hands out the
//! shared connection the repositories run on. rusqlite is synchronous,
//! so everything here runs before the server starts serving.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{DomainError, DomainResult};

/// Shared connection handle used by all repositories
pub type SharedConn = Arc<Mutex<Connection>>;

/// Open (creating if needed) and migrate the database
pub fn open_db(path: &Path) -> DomainResult<SharedConn> {
    let conn = Connection::open(path)
        .map_err(|e| DomainError::Internal(format!("Failed to open database: {}", e)))?;

    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            duration_years INTEGER NOT NULL DEFAULT 4,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            program_id INTEGER NOT NULL REFERENCES programs(id),
            semester INTEGER NOT NULL,
            credit_hours INTEGER NOT NULL DEFAULT 3,
            is_active INTEGER NOT NULL DEFAULT 1,
            UNIQUE(code, program_id, semester)
        );
        CREATE INDEX IF NOT EXISTS idx_subjects_program ON subjects(program_id, semester);

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            is_verified INTEGER NOT NULL DEFAULT 0,
            phone_number TEXT,
            college TEXT,
            semester INTEGER,
            bio TEXT NOT NULL DEFAULT '',
            interests TEXT NOT NULL DEFAULT '[]',
            skills TEXT NOT NULL DEFAULT '[]',
            facebook_url TEXT,
            twitter_url TEXT,
            linkedin_url TEXT,
            github_url TEXT,
            date_joined TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            subject_id INTEGER NOT NULL REFERENCES subjects(id),
            semester INTEGER NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            file_path TEXT,
            upload_date TEXT NOT NULL,
            uploaded_by INTEGER REFERENCES users(id),
            is_verified INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_notes_subject ON notes(subject_id);

        CREATE TABLE IF NOT EXISTS syllabus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL REFERENCES subjects(id),
            file_path TEXT,
            version TEXT NOT NULL DEFAULT '1.0',
            is_current INTEGER NOT NULL DEFAULT 1,
            is_active INTEGER NOT NULL DEFAULT 1,
            description TEXT NOT NULL DEFAULT '',
            uploaded_by INTEGER REFERENCES users(id),
            upload_date TEXT NOT NULL,
            last_updated TEXT NOT NULL,
            view_count INTEGER NOT NULL DEFAULT 0,
            download_count INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_syllabus_subject ON syllabus(subject_id);

        CREATE TABLE IF NOT EXISTS question_papers (
            id TEXT PRIMARY KEY,
            subject_id INTEGER NOT NULL REFERENCES subjects(id),
            year INTEGER NOT NULL,
            semester INTEGER NOT NULL,
            file_path TEXT,
            status TEXT NOT NULL DEFAULT 'PENDING',
            uploaded_by INTEGER REFERENCES users(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            verified_date TEXT,
            view_count INTEGER NOT NULL DEFAULT 0,
            download_count INTEGER NOT NULL DEFAULT 0,
            UNIQUE(subject_id, year, semester)
        );
        CREATE INDEX IF NOT EXISTS idx_papers_subject ON question_papers(subject_id);

        CREATE TABLE IF NOT EXISTS colleges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            established_year INTEGER,
            location TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            contact TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            affiliation TEXT NOT NULL DEFAULT '',
            accreditation TEXT NOT NULL DEFAULT '',
            institution_type TEXT NOT NULL DEFAULT 'private',
            rating REAL NOT NULL DEFAULT 0,
            total_students INTEGER,
            facilities TEXT NOT NULL DEFAULT '[]',
            courses_offered TEXT NOT NULL DEFAULT '[]',
            logo TEXT,
            image TEXT,
            description TEXT NOT NULL DEFAULT '',
            achievements TEXT NOT NULL DEFAULT '',
            scholarships_available INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_featured INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            event_type TEXT NOT NULL DEFAULT 'SEMINAR',
            description TEXT NOT NULL DEFAULT '',
            speaker TEXT,
            registration_required INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            priority TEXT NOT NULL DEFAULT 'medium',
            due_date TEXT,
            category TEXT NOT NULL DEFAULT '',
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            last_modified TEXT NOT NULL,
            owner_id INTEGER NOT NULL REFERENCES users(id)
        );
        CREATE INDEX IF NOT EXISTS idx_todos_owner ON todos(owner_id);

        CREATE TABLE IF NOT EXISTS subtasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            todo_id INTEGER NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS todo_comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            todo_id INTEGER NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id),
            user_name TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS auth_tokens (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            token_hash TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            revoked INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pending_registrations (
            email TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            otp_code TEXT NOT NULL,
            otp_expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS password_resets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            token_hash TEXT NOT NULL UNIQUE,
            expires_at TEXT NOT NULL,
            used INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );",
    )
    .map_err(|e| DomainError::Internal(format!("Migration failed: {}", e)))?;

    Ok(())
}

/// Insert a starter program and subject catalogue on an empty database.
/// Dev convenience only; callers gate this on debug mode.
pub fn seed_demo_data(conn: &Connection) -> DomainResult<()> {
    let count: u32 = conn
        .query_row("SELECT COUNT(*) FROM programs", [], |row| row.get(0))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    info!("Empty database, seeding demo catalogue");
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO programs (name, slug, description, duration_years, created_at)
         VALUES ('BCA', 'bca', 'Bachelor of Computer Applications', 4, ?1)",
        [&now],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;
    let program_id = conn.last_insert_rowid();

    let subjects: [(&str, &str, u8, u8); 6] = [
        ("CSC101", "Computer Fundamentals", 1, 4),
        ("MTH104", "Mathematics I", 1, 3),
        ("ENG105", "English I", 1, 3),
        ("CSC151", "C Programming", 2, 4),
        ("CSC201", "Data Structures and Algorithms", 3, 3),
        ("CSC251", "Database Management Systems", 4, 3),
    ];
    for (code, name, semester, credits) in subjects {
        conn.execute(
            "INSERT INTO subjects (code, name, program_id, semester, credit_hours)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![code, name, program_id, semester, credits],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    }

    Ok(())
}
