//! SQLite-based local storage.
//!
//! Provides persistent storage for:
//! - Daily plans (one row per task)
//! - Focus sessions
//! - Lifetime progress (single row)
//! - Key-value store for preferences, energy and CLI state

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use super::prefs::KeyValueStore;
use crate::error::{CoreError, DatabaseError};
use crate::plan::{Task, TaskStatus};
use crate::session::{EndReason, FocusSession, UserProgress};

/// SQLite database for plans, sessions and progress.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/neurostudy.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("neurostudy.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_tasks (
                id                TEXT PRIMARY KEY,
                task_date         TEXT NOT NULL,
                title             TEXT NOT NULL,
                subject           TEXT NOT NULL,
                chapter_id        TEXT,
                estimated_minutes INTEGER NOT NULL,
                status            TEXT NOT NULL DEFAULT 'pending',
                order_index       INTEGER NOT NULL,
                micro_steps       TEXT NOT NULL DEFAULT '[]',
                current_step      INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS focus_sessions (
                id              TEXT PRIMARY KEY,
                task_id         TEXT,
                planned_minutes INTEGER NOT NULL,
                started_at      TEXT NOT NULL,
                ended_at        TEXT,
                actual_minutes  INTEGER,
                completed       INTEGER NOT NULL DEFAULT 0,
                end_reason      TEXT,
                xp_earned       INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS user_progress (
                id                       INTEGER PRIMARY KEY CHECK (id = 1),
                total_xp                 INTEGER NOT NULL DEFAULT 0,
                current_streak           INTEGER NOT NULL DEFAULT 0,
                longest_streak           INTEGER NOT NULL DEFAULT 0,
                total_focused_minutes    INTEGER NOT NULL DEFAULT 0,
                total_sessions_completed INTEGER NOT NULL DEFAULT 0,
                chapters_completed       INTEGER NOT NULL DEFAULT 0,
                badges                   TEXT NOT NULL DEFAULT '[]',
                last_session_date        TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_daily_tasks_date ON daily_tasks(task_date, order_index);
            CREATE INDEX IF NOT EXISTS idx_focus_sessions_started_at ON focus_sessions(started_at);",
        )?;
        Ok(())
    }

    // ── Daily tasks ──────────────────────────────────────────────────

    /// Replace the plan for `date` with `tasks`.
    pub fn replace_tasks(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), CoreError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM daily_tasks WHERE task_date = ?1",
            params![date.to_string()],
        )?;
        for task in tasks {
            upsert_task(&tx, task)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn save_task(&self, task: &Task) -> Result<(), CoreError> {
        upsert_task(&self.conn, task)
    }

    pub fn delete_task(&self, id: &str) -> Result<bool, CoreError> {
        let n = self
            .conn
            .execute("DELETE FROM daily_tasks WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    pub fn tasks_for(&self, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_date, title, subject, chapter_id, estimated_minutes,
                    status, order_index, micro_steps, current_step
             FROM daily_tasks
             WHERE task_date = ?1
             ORDER BY order_index",
        )?;
        let rows = stmt.query_map(params![date.to_string()], task_columns)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(decode_task(row?)?);
        }
        Ok(tasks)
    }

    pub fn task(&self, id: &str) -> Result<Option<Task>, CoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, task_date, title, subject, chapter_id, estimated_minutes,
                        status, order_index, micro_steps, current_step
                 FROM daily_tasks WHERE id = ?1",
                params![id],
                task_columns,
            )
            .optional()?;
        row.map(decode_task).transpose()
    }

    // ── Focus sessions ───────────────────────────────────────────────

    pub fn save_session(&self, session: &FocusSession) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO focus_sessions
                (id, task_id, planned_minutes, started_at, ended_at, actual_minutes,
                 completed, end_reason, xp_earned)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                session.id,
                session.task_id,
                session.planned_minutes,
                session.started_at.to_rfc3339(),
                session.ended_at.map(|t| t.to_rfc3339()),
                session.actual_minutes,
                session.completed,
                session.end_reason.map(|r| r.as_str()),
                session.xp_earned,
            ],
        )?;
        Ok(())
    }

    /// Most recent sessions first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<FocusSession>, CoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, planned_minutes, started_at, ended_at, actual_minutes,
                    completed, end_reason, xp_earned
             FROM focus_sessions
             ORDER BY started_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<u32>>(5)?,
                row.get::<_, bool>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, u32>(8)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, task_id, planned, started, ended, actual, completed, reason, xp) = row?;
            let end_reason = reason
                .map(|r| r.parse::<EndReason>())
                .transpose()
                .map_err(|message| corrupt("focus_sessions", message))?;
            sessions.push(FocusSession {
                id,
                task_id,
                planned_minutes: planned,
                started_at: parse_timestamp(&started)?,
                ended_at: ended.as_deref().map(parse_timestamp).transpose()?,
                actual_minutes: actual,
                completed,
                end_reason,
                xp_earned: xp,
            });
        }
        Ok(sessions)
    }

    // ── Progress ─────────────────────────────────────────────────────

    pub fn load_progress(&self) -> Result<UserProgress, CoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT total_xp, current_streak, longest_streak, total_focused_minutes,
                        total_sessions_completed, chapters_completed, badges, last_session_date
                 FROM user_progress WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, u32>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, Option<String>>(7)?,
                    ))
                },
            )
            .optional()?;

        let Some((xp, streak, longest, minutes, sessions, chapters, badges, last)) = row else {
            return Ok(UserProgress::default());
        };
        Ok(UserProgress {
            total_xp: xp.max(0) as u64,
            current_streak: streak,
            longest_streak: longest,
            total_focused_minutes: minutes.max(0) as u64,
            total_sessions_completed: sessions.max(0) as u64,
            chapters_completed: chapters,
            badges: serde_json::from_str(&badges)
                .map_err(|e| corrupt("user_progress", e.to_string()))?,
            last_session_date: last.as_deref().map(parse_date).transpose()?,
        })
    }

    pub fn save_progress(&self, progress: &UserProgress) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO user_progress
                (id, total_xp, current_streak, longest_streak, total_focused_minutes,
                 total_sessions_completed, chapters_completed, badges, last_session_date)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                progress.total_xp as i64,
                progress.current_streak,
                progress.longest_streak,
                progress.total_focused_minutes as i64,
                progress.total_sessions_completed as i64,
                progress.chapters_completed,
                serde_json::to_string(&progress.badges)?,
                progress.last_session_date.map(|d| d.to_string()),
            ],
        )?;
        Ok(())
    }

    // ── Key-value ────────────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.kv_get(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        Ok(self.kv_set(key, value)?)
    }
}

type TaskColumns = (String, String, String, String, Option<String>, u32, String, u32, String, i64);

fn task_columns(row: &Row<'_>) -> rusqlite::Result<TaskColumns> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn decode_task(cols: TaskColumns) -> Result<Task, CoreError> {
    let (id, date, title, subject, chapter_id, minutes, status, order_index, steps, current) = cols;
    let status = status.parse::<TaskStatus>().map_err(|m| corrupt("daily_tasks", m))?;
    let micro_steps: Vec<String> =
        serde_json::from_str(&steps).map_err(|e| corrupt("daily_tasks", e.to_string()))?;
    Ok(Task {
        id,
        date: parse_date(&date)?,
        title,
        subject,
        chapter_id,
        estimated_minutes: minutes,
        status,
        order_index,
        micro_steps,
        current_step: current.max(0) as usize,
    })
}

fn upsert_task(conn: &Connection, task: &Task) -> Result<(), CoreError> {
    conn.execute(
        "INSERT OR REPLACE INTO daily_tasks
            (id, task_date, title, subject, chapter_id, estimated_minutes,
             status, order_index, micro_steps, current_step)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            task.id,
            task.date.to_string(),
            task.title,
            task.subject,
            task.chapter_id,
            task.estimated_minutes,
            task.status.as_str(),
            task.order_index,
            serde_json::to_string(&task.micro_steps)?,
            task.current_step as i64,
        ],
    )?;
    Ok(())
}

fn corrupt(table: &str, message: impl Into<String>) -> CoreError {
    DatabaseError::CorruptRow {
        table: table.into(),
        message: message.into(),
    }
    .into()
}

fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    s.parse::<NaiveDate>()
        .map_err(|e| corrupt("date", format!("{s}: {e}")))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt("timestamp", format!("{s}: {e}")))
}
