//! Focus sessions: countdown, lifecycle and lifetime progress.

mod focus;
mod progress;
mod timer;

pub use focus::{EndReason, FocusSession, SessionOutcome};
pub use progress::{format_focus_time, Badge, UserProgress};
pub use timer::{FocusTimer, TimerEvent, TimerState, ENDING_SOON_MS, TIMER_CHOICES_MIN};
