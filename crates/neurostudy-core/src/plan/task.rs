//! Daily study tasks and list operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// A study task planned for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub subject: String,
    pub chapter_id: Option<String>,
    pub estimated_minutes: u32,
    pub status: TaskStatus,
    pub order_index: u32,
    pub micro_steps: Vec<String>,
    /// Index of the micro-step being worked on.
    pub current_step: usize,
}

impl Task {
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        subject: impl Into<String>,
        estimated_minutes: u32,
        micro_steps: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title: title.into(),
            subject: subject.into(),
            chapter_id: None,
            estimated_minutes,
            status: TaskStatus::Pending,
            order_index: 0,
            micro_steps,
            current_step: 0,
        }
    }

    pub fn with_chapter(mut self, chapter_id: impl Into<String>) -> Self {
        self.chapter_id = Some(chapter_id.into());
        self
    }

    pub fn current_micro_step(&self) -> Option<&str> {
        self.micro_steps.get(self.current_step).map(String::as_str)
    }

    /// Move to the next micro-step. Stops on the last one.
    pub fn advance_step(&mut self) -> bool {
        if self.current_step + 1 < self.micro_steps.len() {
            self.current_step += 1;
            true
        } else {
            false
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

fn position(tasks: &[Task], id: &str) -> Result<usize, ValidationError> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| ValidationError::NotFound {
            kind: "task".into(),
            id: id.into(),
        })
}

fn renumber(tasks: &mut [Task]) {
    for (i, task) in tasks.iter_mut().enumerate() {
        task.order_index = i as u32;
    }
}

/// Swap a task with its neighbour. Returns `false` at either end of the list.
pub fn move_task(tasks: &mut [Task], id: &str, direction: MoveDirection) -> Result<bool, ValidationError> {
    let idx = position(tasks, id)?;
    let target = match direction {
        MoveDirection::Up if idx > 0 => idx - 1,
        MoveDirection::Down if idx + 1 < tasks.len() => idx + 1,
        _ => return Ok(false),
    };
    tasks.swap(idx, target);
    renumber(tasks);
    Ok(true)
}

pub fn remove_task(tasks: &mut Vec<Task>, id: &str) -> Result<Task, ValidationError> {
    let idx = position(tasks, id)?;
    let removed = tasks.remove(idx);
    renumber(tasks);
    Ok(removed)
}

/// Split into (not yet completed, completed), keeping order.
pub fn partition(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| !t.is_completed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(n: usize) -> Vec<Task> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut out: Vec<Task> = (0..n)
            .map(|i| Task::new(date, format!("T{i}"), "Science", 25, vec!["a".into(), "b".into()]))
            .collect();
        renumber(&mut out);
        out
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn move_up_and_down() {
        let mut list = tasks(3);
        let id = list[1].id.clone();
        assert!(move_task(&mut list, &id, MoveDirection::Up).unwrap());
        assert_eq!(titles(&list), ["T1", "T0", "T2"]);
        assert_eq!(list[0].order_index, 0);
        assert_eq!(list[1].order_index, 1);

        assert!(move_task(&mut list, &id, MoveDirection::Down).unwrap());
        assert_eq!(titles(&list), ["T0", "T1", "T2"]);
    }

    #[test]
    fn move_at_ends_is_a_no_op() {
        let mut list = tasks(2);
        let first = list[0].id.clone();
        let last = list[1].id.clone();
        assert!(!move_task(&mut list, &first, MoveDirection::Up).unwrap());
        assert!(!move_task(&mut list, &last, MoveDirection::Down).unwrap());
        assert_eq!(titles(&list), ["T0", "T1"]);
    }

    #[test]
    fn remove_renumbers() {
        let mut list = tasks(3);
        let id = list[0].id.clone();
        let removed = remove_task(&mut list, &id).unwrap();
        assert_eq!(removed.title, "T0");
        assert_eq!(list[0].order_index, 0);
        assert_eq!(list[1].order_index, 1);
        assert!(matches!(
            remove_task(&mut list, "missing"),
            Err(ValidationError::NotFound { .. })
        ));
    }

    #[test]
    fn advance_stops_on_last_step() {
        let mut list = tasks(1);
        let task = &mut list[0];
        assert_eq!(task.current_micro_step(), Some("a"));
        assert!(task.advance_step());
        assert!(!task.advance_step());
        assert_eq!(task.current_step, 1);
    }

    #[test]
    fn partition_by_completion() {
        let mut list = tasks(3);
        list[1].status = TaskStatus::Completed;
        let (open, done) = partition(&list);
        assert_eq!(open.len(), 2);
        assert_eq!(done[0].title, "T1");
    }
}
