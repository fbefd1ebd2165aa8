//! Focus countdown.
//!
//! A wall-clock state machine with no internal thread: the caller passes the
//! current time to every command and calls `tick()` periodically. The whole
//! timer is serializable so the CLI can keep it between invocations.
//!
//! ```text
//! Idle -> Running <-> Paused -> Finished
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::ExperienceProfile;

/// Remaining time at or below which the ending-soon banner shows.
pub const ENDING_SOON_MS: u64 = 60_000;

/// Durations offered before a session starts.
pub const TIMER_CHOICES_MIN: [u32; 3] = [10, 25, 45];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { duration_ms: u64 },
    Paused { remaining_ms: u64 },
    Resumed { remaining_ms: u64 },
    /// Fired once per session, only when the profile asks for the banner.
    EndingSoon { remaining_ms: u64 },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTimer {
    state: TimerState,
    duration_ms: u64,
    remaining_ms: u64,
    /// When the running period last started or was last flushed.
    #[serde(default)]
    last_tick_at: Option<DateTime<Utc>>,
    ending_soon_banner: bool,
    #[serde(default)]
    ending_soon_fired: bool,
}

impl FocusTimer {
    pub fn new(minutes: u32, ending_soon_banner: bool) -> Self {
        let duration_ms = minutes_to_ms(minutes);
        Self {
            state: TimerState::Idle,
            duration_ms,
            remaining_ms: duration_ms,
            last_tick_at: None,
            ending_soon_banner,
            ending_soon_fired: false,
        }
    }

    /// Timer with the profile's default length and banner setting.
    pub fn from_profile(profile: &ExperienceProfile) -> Self {
        Self::new(profile.default_timer_minutes, profile.show_ending_soon_banner)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.duration_ms / 60_000) as u32
    }

    /// Remaining time as of `now`, without mutating the timer.
    pub fn remaining_ms_at(&self, now: DateTime<Utc>) -> u64 {
        match (self.state, self.last_tick_at) {
            (TimerState::Running, Some(since)) => {
                self.remaining_ms.saturating_sub(elapsed_ms(since, now))
            }
            _ => self.remaining_ms,
        }
    }

    /// 0.0 .. 1.0 progress as of `now`.
    pub fn progress_at(&self, now: DateTime<Utc>) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        1.0 - (self.remaining_ms_at(now) as f64 / self.duration_ms as f64)
    }

    /// Whether the ending-soon banner should be visible as of `now`.
    pub fn shows_ending_soon(&self, now: DateTime<Utc>) -> bool {
        let remaining = self.remaining_ms_at(now);
        self.ending_soon_banner
            && matches!(self.state, TimerState::Running | TimerState::Paused)
            && remaining > 0
            && remaining <= ENDING_SOON_MS
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the length. Only allowed before the first start.
    pub fn set_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        if self.state != TimerState::Idle {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "cannot change the length once the session has started".into(),
            });
        }
        if minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "must be at least one minute".into(),
            });
        }
        self.duration_ms = minutes_to_ms(minutes);
        self.remaining_ms = self.duration_ms;
        Ok(())
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_at = Some(now);
                Some(TimerEvent::Started {
                    duration_ms: self.duration_ms,
                })
            }
            TimerState::Paused => self.resume(now),
            TimerState::Running | TimerState::Finished => None,
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        if self.remaining_ms == 0 {
            self.finish();
            return Some(TimerEvent::Completed);
        }
        self.state = TimerState::Paused;
        self.last_tick_at = None;
        Some(TimerEvent::Paused {
            remaining_ms: self.remaining_ms,
        })
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        self.last_tick_at = Some(now);
        Some(TimerEvent::Resumed {
            remaining_ms: self.remaining_ms,
        })
    }

    /// Call periodically while running.
    ///
    /// Returns `Completed` when time runs out and `EndingSoon` the first time
    /// the remaining time drops into the last minute (banner profiles only).
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);

        if self.remaining_ms == 0 {
            self.finish();
            return Some(TimerEvent::Completed);
        }
        if self.ending_soon_banner && !self.ending_soon_fired && self.remaining_ms <= ENDING_SOON_MS {
            self.ending_soon_fired = true;
            return Some(TimerEvent::EndingSoon {
                remaining_ms: self.remaining_ms,
            });
        }
        None
    }

    /// Stop early. The timer cannot be restarted afterwards.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        if self.state == TimerState::Running {
            self.flush_elapsed(now);
        }
        self.finish();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.last_tick_at {
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms(since, now));
            self.last_tick_at = Some(now);
        }
    }

    fn finish(&mut self) {
        self.state = TimerState::Finished;
        self.last_tick_at = None;
    }
}

fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes) * 60_000
}

fn elapsed_ms(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - since).num_milliseconds().max(0) as u64
}
