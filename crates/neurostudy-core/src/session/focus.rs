//! Focus session lifecycle and XP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::plan::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Completed,
    UserStopped,
    /// The student switched away while the timer was running.
    TabLeft,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Completed => "completed",
            EndReason::UserStopped => "user_stopped",
            EndReason::TabLeft => "tab_left",
        }
    }

    /// Line shown on the session-end screen.
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::Completed => "Great focus session!",
            EndReason::UserStopped => "You stopped the session early.",
            EndReason::TabLeft => "Focus was interrupted when you left the page.",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(EndReason::Completed),
            "user_stopped" => Ok(EndReason::UserStopped),
            "tab_left" => Ok(EndReason::TabLeft),
            other => Err(format!("unknown end reason: {other}")),
        }
    }
}

/// One focus session, optionally tied to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    /// `None` for a quick session.
    pub task_id: Option<String>,
    pub planned_minutes: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub actual_minutes: Option<u32>,
    pub completed: bool,
    pub end_reason: Option<EndReason>,
    pub xp_earned: u32,
}

/// Result of finalizing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session_id: String,
    pub task_id: Option<String>,
    pub completed: bool,
    pub reason: EndReason,
    pub planned_minutes: u32,
    pub actual_minutes: u32,
    pub xp_earned: u32,
}

impl SessionOutcome {
    /// Mark the session's task completed. Returns whether the task changed.
    pub fn apply_to_task(&self, task: &mut Task) -> bool {
        if !self.completed || self.task_id.as_deref() != Some(task.id.as_str()) {
            return false;
        }
        task.status = TaskStatus::Completed;
        true
    }
}

impl FocusSession {
    pub fn start(task_id: Option<String>, planned_minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            task_id,
            planned_minutes,
            started_at: now,
            ended_at: None,
            actual_minutes: None,
            completed: false,
            end_reason: None,
            xp_earned: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Close the session. A session ends exactly once.
    ///
    /// Actual minutes are whole minutes since start. XP equals the planned
    /// minutes for a completed session and zero otherwise.
    pub fn finalize(
        &mut self,
        reason: EndReason,
        now: DateTime<Utc>,
    ) -> Result<SessionOutcome, ValidationError> {
        if !self.is_open() {
            return Err(ValidationError::SessionAlreadyEnded(self.id.clone()));
        }

        let completed = reason == EndReason::Completed;
        let actual = (now - self.started_at).num_minutes().max(0) as u32;
        let xp = if completed { self.planned_minutes } else { 0 };

        self.ended_at = Some(now);
        self.actual_minutes = Some(actual);
        self.completed = completed;
        self.end_reason = Some(reason);
        self.xp_earned = xp;

        tracing::info!(
            session = %self.id,
            %reason,
            actual_minutes = actual,
            xp,
            "focus session finalized"
        );

        Ok(SessionOutcome {
            session_id: self.id.clone(),
            task_id: self.task_id.clone(),
            completed,
            reason,
            planned_minutes: self.planned_minutes,
            actual_minutes: actual,
            xp_earned: xp,
        })
    }
}
