//! Fixed plan for guest use, when there is no catalogue or stored plan.

use chrono::NaiveDate;

use super::micro_steps::generate_micro_steps;
use super::task::{Task, TaskStatus};
use crate::profile::ExperienceProfile;

const DEMO_TASKS: [(&str, &str, &str, u32); 3] = [
    ("1", "Rational Numbers", "Mathematics", 25),
    ("2", "The Tsunami", "English", 20),
    ("3", "Microorganisms", "Science", 25),
];

pub fn demo_plan(date: NaiveDate, profile: &ExperienceProfile) -> Vec<Task> {
    let detailed = profile.micro_steps_granularity.is_detailed();
    DEMO_TASKS
        .iter()
        .take(profile.max_tasks_today)
        .enumerate()
        .map(|(i, (id, title, subject, minutes))| Task {
            id: id.to_string(),
            date,
            title: title.to_string(),
            subject: subject.to_string(),
            chapter_id: None,
            estimated_minutes: *minutes,
            status: TaskStatus::Pending,
            order_index: i as u32,
            micro_steps: generate_micro_steps(title, detailed),
            current_step: 0,
        })
        .collect()
}
