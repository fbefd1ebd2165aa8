//! Lifetime progress: XP, streaks and badges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::focus::SessionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "first_session")]
    FirstSession,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "hours_5")]
    Hours5,
    #[serde(rename = "chapters_10")]
    Chapters10,
}

impl Badge {
    pub const ALL: [Badge; 5] = [
        Badge::FirstSession,
        Badge::Streak3,
        Badge::Streak7,
        Badge::Hours5,
        Badge::Chapters10,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstSession => "first_session",
            Badge::Streak3 => "streak_3",
            Badge::Streak7 => "streak_7",
            Badge::Hours5 => "hours_5",
            Badge::Chapters10 => "chapters_10",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::FirstSession => "First Step",
            Badge::Streak3 => "3 Day Streak",
            Badge::Streak7 => "Week Warrior",
            Badge::Hours5 => "Five Hours",
            Badge::Chapters10 => "Bookworm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::FirstSession => "Complete your first focus session",
            Badge::Streak3 => "Study 3 days in a row",
            Badge::Streak7 => "Study 7 days in a row",
            Badge::Hours5 => "Accumulate 5 hours of focus time",
            Badge::Chapters10 => "Complete 10 chapters",
        }
    }

    fn earned_by(&self, progress: &UserProgress) -> bool {
        match self {
            Badge::FirstSession => progress.total_sessions_completed >= 1,
            Badge::Streak3 => progress.current_streak >= 3,
            Badge::Streak7 => progress.current_streak >= 7,
            Badge::Hours5 => progress.total_focused_minutes >= 300,
            Badge::Chapters10 => progress.chapters_completed >= 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_xp: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_focused_minutes: u64,
    pub total_sessions_completed: u64,
    pub chapters_completed: u32,
    pub badges: Vec<Badge>,
    pub last_session_date: Option<NaiveDate>,
}

impl UserProgress {
    /// Fold a finished session into the totals.
    ///
    /// Only completed sessions count. Returns badges earned by this session.
    pub fn record_session(
        &mut self,
        outcome: &SessionOutcome,
        date: NaiveDate,
        chapter_task: bool,
    ) -> Vec<Badge> {
        if !outcome.completed {
            return Vec::new();
        }

        self.total_xp += u64::from(outcome.xp_earned);
        self.total_focused_minutes += u64::from(outcome.actual_minutes);
        self.total_sessions_completed += 1;
        if chapter_task {
            self.chapters_completed += 1;
        }

        self.current_streak = match self.last_session_date {
            Some(last) if last == date => self.current_streak.max(1),
            Some(last) if last.succ_opt() == Some(date) => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        if self.last_session_date.map_or(true, |last| date > last) {
            self.last_session_date = Some(date);
        }

        let earned: Vec<Badge> = Badge::ALL
            .into_iter()
            .filter(|b| !self.badges.contains(b) && b.earned_by(self))
            .collect();
        self.badges.extend(earned.iter().copied());
        earned
    }

    /// Streak as it stands on `today`: zero once a full day was missed.
    pub fn streak_on(&self, today: NaiveDate) -> u32 {
        match self.last_session_date {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.current_streak,
            _ => 0,
        }
    }
}

/// `45m`, `2h`, `1h 5m`.
pub fn format_focus_time(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EndReason;

    fn outcome(completed: bool, minutes: u32) -> SessionOutcome {
        SessionOutcome {
            session_id: "s".into(),
            task_id: None,
            completed,
            reason: if completed {
                EndReason::Completed
            } else {
                EndReason::UserStopped
            },
            planned_minutes: minutes,
            actual_minutes: minutes,
            xp_earned: if completed { minutes } else { 0 },
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn first_session_badge_and_totals() {
        let mut p = UserProgress::default();
        let earned = p.record_session(&outcome(true, 25), day(1), false);
        assert_eq!(earned, vec![Badge::FirstSession]);
        assert_eq!(p.total_xp, 25);
        assert_eq!(p.total_sessions_completed, 1);
        assert_eq!(p.current_streak, 1);
    }

    #[test]
    fn incomplete_session_changes_nothing() {
        let mut p = UserProgress::default();
        p.record_session(&outcome(false, 12), day(1), true);
        assert_eq!(p, UserProgress::default());
    }

    #[test]
    fn streak_grows_on_consecutive_days_and_resets_after_gap() {
        let mut p = UserProgress::default();
        p.record_session(&outcome(true, 10), day(1), false);
        p.record_session(&outcome(true, 10), day(1), false);
        assert_eq!(p.current_streak, 1);
        p.record_session(&outcome(true, 10), day(2), false);
        let earned = p.record_session(&outcome(true, 10), day(3), false);
        assert_eq!(p.current_streak, 3);
        assert!(earned.contains(&Badge::Streak3));

        p.record_session(&outcome(true, 10), day(6), false);
        assert_eq!(p.current_streak, 1);
        assert_eq!(p.longest_streak, 3);
    }

    #[test]
    fn five_hours_and_chapters_badges() {
        let mut p = UserProgress::default();
        for _ in 0..9 {
            p.record_session(&outcome(true, 30), day(1), true);
        }
        assert!(!p.badges.contains(&Badge::Hours5));
        let earned = p.record_session(&outcome(true, 30), day(1), true);
        assert!(earned.contains(&Badge::Hours5));
        assert!(earned.contains(&Badge::Chapters10));
        assert_eq!(p.badges.iter().filter(|b| **b == Badge::FirstSession).count(), 1);
    }

    #[test]
    fn streak_lapses_after_missed_day() {
        let mut p = UserProgress::default();
        p.record_session(&outcome(true, 10), day(1), false);
        assert_eq!(p.streak_on(day(2)), 1);
        assert_eq!(p.streak_on(day(3)), 0);
    }

    #[test]
    fn formats_focus_time() {
        assert_eq!(format_focus_time(45), "45m");
        assert_eq!(format_focus_time(120), "2h");
        assert_eq!(format_focus_time(65), "1h 5m");
        assert_eq!(format_focus_time(0), "0m");
    }

    #[test]
    fn badges_serialize_as_ids() {
        assert_eq!(serde_json::to_string(&Badge::Streak7).unwrap(), r#""streak_7""#);
    }
}
