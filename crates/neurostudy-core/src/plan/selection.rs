//! Daily task selection.
//!
//! Subjects are shuffled, one random chapter is picked per subject, and the
//! plan stops at the profile's task limit. A seed makes the plan reproducible.

use chrono::NaiveDate;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use super::micro_steps::generate_micro_steps;
use super::task::Task;
use crate::curriculum::Chapter;
use crate::profile::ExperienceProfile;

pub struct DailyPlanner {
    rng: Mcg128Xsl64,
}

impl DailyPlanner {
    /// Planner seeded from `seed`, or from entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Build today's plan from the subjects and their candidate chapters.
    ///
    /// Subjects with no chapter are skipped without using up a slot.
    pub fn plan(
        &mut self,
        date: NaiveDate,
        subjects: &[String],
        chapters: &[&Chapter],
        profile: &ExperienceProfile,
    ) -> Vec<Task> {
        let mut shuffled: Vec<&String> = subjects.iter().collect();
        shuffled.shuffle(&mut self.rng);

        let mut tasks = Vec::new();
        for subject in shuffled {
            if tasks.len() >= profile.max_tasks_today {
                break;
            }
            let candidates: Vec<&&Chapter> =
                chapters.iter().filter(|c| &c.subject == subject).collect();
            let Some(chapter) = candidates.choose(&mut self.rng) else {
                tracing::debug!(%subject, "no chapters for subject, skipping");
                continue;
            };
            let mut task = task_for_chapter(date, chapter, profile);
            task.order_index = tasks.len() as u32;
            tasks.push(task);
        }

        tracing::info!(%date, count = tasks.len(), limit = profile.max_tasks_today, "generated daily plan");
        tasks
    }
}

/// One pending task for `chapter`, sized and stepped by the profile.
pub fn task_for_chapter(date: NaiveDate, chapter: &Chapter, profile: &ExperienceProfile) -> Task {
    let steps = generate_micro_steps(
        &chapter.title,
        profile.micro_steps_granularity.is_detailed(),
    );
    Task::new(
        date,
        chapter.title.clone(),
        chapter.subject.clone(),
        profile.default_timer_minutes,
        steps,
    )
    .with_chapter(chapter.id.clone())
}
