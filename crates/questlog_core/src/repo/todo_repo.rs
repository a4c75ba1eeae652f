//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD APIs over the `todos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every query is scoped by `subject_id`; a todo owned by another account
//!   behaves exactly like a missing one (`TodoNotFound`).
//! - Write paths call `Todo::validate()` before SQL mutations.
//! - Deletion is a hard delete; todos keep no tombstones.

use crate::model::todo::{Todo, TodoDate, TodoId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    subject_id,
    date,
    text,
    completed,
    xp_awarded,
    created_at,
    updated_at
FROM todos";

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    fn get_todo(&self, subject_id: &str, id: TodoId) -> RepoResult<Option<Todo>>;
    fn update_todo(&self, todo: &Todo) -> RepoResult<()>;
    fn delete_todo(&self, subject_id: &str, id: TodoId) -> RepoResult<()>;
    fn list_todos(&self, subject_id: &str, date: &TodoDate) -> RepoResult<Vec<Todo>>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        todo.validate()?;

        self.conn.execute(
            "INSERT INTO todos (
                uuid,
                subject_id,
                date,
                text,
                completed,
                xp_awarded,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                todo.uuid.to_string(),
                todo.subject_id.as_str(),
                todo.date.as_str(),
                todo.text.as_str(),
                bool_to_int(todo.completed),
                bool_to_int(todo.xp_awarded),
                todo.created_at,
                todo.updated_at,
            ],
        )?;

        Ok(todo.uuid)
    }

    fn get_todo(&self, subject_id: &str, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL}
             WHERE uuid = ?1
               AND subject_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), subject_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                date = ?1,
                text = ?2,
                completed = ?3,
                xp_awarded = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5
               AND subject_id = ?6;",
            params![
                todo.date.as_str(),
                todo.text.as_str(),
                bool_to_int(todo.completed),
                bool_to_int(todo.xp_awarded),
                todo.uuid.to_string(),
                todo.subject_id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TodoNotFound(todo.uuid));
        }

        Ok(())
    }

    fn delete_todo(&self, subject_id: &str, id: TodoId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM todos WHERE uuid = ?1 AND subject_id = ?2;",
            params![id.to_string(), subject_id],
        )?;

        if changed == 0 {
            return Err(RepoError::TodoNotFound(id));
        }

        Ok(())
    }

    fn list_todos(&self, subject_id: &str, date: &TodoDate) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL}
             WHERE subject_id = ?1
               AND date = ?2
             ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query(params![subject_id, date.as_str()])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in todos.uuid"))
    })?;

    let date_text: String = row.get("date")?;
    let date = TodoDate::parse(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in todos.date"))
    })?;

    let todo = Todo {
        uuid,
        subject_id: row.get("subject_id")?,
        date,
        text: row.get("text")?,
        completed: int_to_bool(row.get("completed")?, "todos.completed")?,
        xp_awarded: int_to_bool(row.get("xp_awarded")?, "todos.xp_awarded")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    todo.validate()?;
    Ok(todo)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
