//! Todo Repository
//!
//! Owner-scoped task lists with nested subtasks and comments. Every
//! mutation refreshes last_modified on the parent todo.

use rusqlite::{params, Connection};

use crate::domain::{Comment, DomainError, DomainResult, Priority, SubTask, Todo};

use super::{parse_ts, parse_ts_opt, sql_err, SharedConn};

const TODO_COLUMNS: &str = "id, title, description, priority, due_date, category, is_completed,
            created_at, last_modified, owner_id";

pub struct TodoRepository {
    conn: SharedConn,
}

impl TodoRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    /// All of a user's todos, newest first, with subtasks and comments
    pub async fn list_for_owner(&self, owner: u32) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos WHERE owner_id = ?1 ORDER BY created_at DESC"
            ))
            .map_err(sql_err)?;
        let rows = stmt.query_map(params![owner], row_to_todo).map_err(sql_err)?;

        let mut todos = Vec::new();
        for row in rows {
            let mut todo = row.map_err(sql_err)?;
            load_children(&conn, &mut todo).map_err(sql_err)?;
            todos.push(todo);
        }
        Ok(todos)
    }

    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))
            .map_err(sql_err)?;
        let mut rows = stmt.query_map(params![id], row_to_todo).map_err(sql_err)?;
        match rows.next() {
            Some(row) => {
                let mut todo = row.map_err(sql_err)?;
                load_children(&conn, &mut todo).map_err(sql_err)?;
                Ok(Some(todo))
            }
            None => Ok(None),
        }
    }

    pub async fn create(&self, entity: &Todo, owner: u32) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO todos (title, description, priority, due_date, category, is_completed,
             created_at, last_modified, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?8)",
            params![
                entity.title,
                entity.description,
                entity.priority.as_str(),
                entity.due_date.map(|d| d.to_rfc3339()),
                entity.category,
                entity.is_completed,
                now.to_rfc3339(),
                owner
            ],
        )
        .map_err(sql_err)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = now;
        created.last_modified = now;
        created.owner = Some(owner);
        created.subtasks = Vec::new();
        created.comments = Vec::new();
        Ok(created)
    }

    pub async fn update(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        let changed = conn
            .execute(
                "UPDATE todos SET title = ?1, description = ?2, priority = ?3, due_date = ?4,
                 category = ?5, is_completed = ?6, last_modified = ?7 WHERE id = ?8",
                params![
                    entity.title,
                    entity.description,
                    entity.priority.as_str(),
                    entity.due_date.map(|d| d.to_rfc3339()),
                    entity.category,
                    entity.is_completed,
                    now.to_rfc3339(),
                    entity.id
                ],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Todo {} not found", entity.id)));
        }
        let mut updated = entity.clone();
        updated.last_modified = now;
        Ok(updated)
    }

    pub async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM todos WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }

    pub async fn add_subtask(&self, todo_id: u32, title: &str) -> DomainResult<SubTask> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO subtasks (todo_id, title, created_at) VALUES (?1, ?2, ?3)",
            params![todo_id, title, now.to_rfc3339()],
        )
        .map_err(sql_err)?;
        touch(&conn, todo_id).map_err(sql_err)?;
        Ok(SubTask {
            id: conn.last_insert_rowid() as u32,
            title: title.to_string(),
            is_completed: false,
            created_at: now,
        })
    }

    /// Flip a subtask's completion; None when the subtask is not on this todo
    pub async fn toggle_subtask(&self, todo_id: u32, subtask_id: u32) -> DomainResult<Option<SubTask>> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE subtasks SET is_completed = NOT is_completed
                 WHERE id = ?1 AND todo_id = ?2",
                params![subtask_id, todo_id],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Ok(None);
        }
        touch(&conn, todo_id).map_err(sql_err)?;

        let subtask = conn
            .query_row(
                "SELECT id, title, is_completed, created_at FROM subtasks WHERE id = ?1",
                params![subtask_id],
                row_to_subtask,
            )
            .map_err(sql_err)?;
        Ok(Some(subtask))
    }

    /// Remove a subtask; false when it is not on this todo
    pub async fn delete_subtask(&self, todo_id: u32, subtask_id: u32) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "DELETE FROM subtasks WHERE id = ?1 AND todo_id = ?2",
                params![subtask_id, todo_id],
            )
            .map_err(sql_err)?;
        if changed > 0 {
            touch(&conn, todo_id).map_err(sql_err)?;
        }
        Ok(changed > 0)
    }

    pub async fn add_comment(
        &self,
        todo_id: u32,
        user: u32,
        user_name: &str,
        content: &str,
    ) -> DomainResult<Comment> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now();
        conn.execute(
            "INSERT INTO todo_comments (todo_id, content, user_id, user_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![todo_id, content, user, user_name, now.to_rfc3339()],
        )
        .map_err(sql_err)?;
        touch(&conn, todo_id).map_err(sql_err)?;
        Ok(Comment {
            id: conn.last_insert_rowid() as u32,
            content: content.to_string(),
            user,
            user_name: user_name.to_string(),
            created_at: now,
        })
    }

    pub async fn find_comment(&self, todo_id: u32, comment_id: u32) -> DomainResult<Option<Comment>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, content, user_id, user_name, created_at FROM todo_comments
                 WHERE id = ?1 AND todo_id = ?2",
            )
            .map_err(sql_err)?;
        let mut rows = stmt
            .query_map(params![comment_id, todo_id], row_to_comment)
            .map_err(sql_err)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(sql_err)?)),
            None => Ok(None),
        }
    }

    pub async fn delete_comment(&self, todo_id: u32, comment_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM todo_comments WHERE id = ?1 AND todo_id = ?2",
            params![comment_id, todo_id],
        )
        .map_err(sql_err)?;
        touch(&conn, todo_id).map_err(sql_err)?;
        Ok(())
    }
}

fn touch(conn: &Connection, todo_id: u32) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE todos SET last_modified = ?1 WHERE id = ?2",
        params![chrono::Utc::now().to_rfc3339(), todo_id],
    )
}

fn load_children(conn: &Connection, todo: &mut Todo) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, title, is_completed, created_at FROM subtasks
         WHERE todo_id = ?1 ORDER BY created_at",
    )?;
    todo.subtasks = stmt
        .query_map(params![todo.id], row_to_subtask)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT id, content, user_id, user_name, created_at FROM todo_comments
         WHERE todo_id = ?1 ORDER BY created_at",
    )?;
    todo.comments = stmt
        .query_map(params![todo.id], row_to_comment)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(())
}

fn row_to_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    let priority: String = row.get(3)?;
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: Priority::from_str(&priority),
        due_date: parse_ts_opt(row.get(4)?),
        category: row.get(5)?,
        is_completed: row.get(6)?,
        created_at: parse_ts(row.get(7)?),
        last_modified: parse_ts(row.get(8)?),
        owner: row.get(9)?,
        subtasks: Vec::new(),
        comments: Vec::new(),
    })
}

fn row_to_subtask(row: &rusqlite::Row) -> rusqlite::Result<SubTask> {
    Ok(SubTask {
        id: row.get(0)?,
        title: row.get(1)?,
        is_completed: row.get(2)?,
        created_at: parse_ts(row.get(3)?),
    })
}

fn row_to_comment(row: &rusqlite::Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        content: row.get(1)?,
        user: row.get(2)?,
        user_name: row.get(3)?,
        created_at: parse_ts(row.get(4)?),
    })
}
