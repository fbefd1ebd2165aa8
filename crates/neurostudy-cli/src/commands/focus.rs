//! Focus session commands.
//!
//! The running timer and its session are kept in the key-value table between
//! invocations; `status` ticks the timer and finishes the session once time
//! is up.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use neurostudy_core::session::{
    format_focus_time, EndReason, FocusSession, FocusTimer, TimerEvent, TimerState,
};
use neurostudy_core::storage::Database;
use serde::{Deserialize, Serialize};

use super::{mode_state, print_json, resolve_task_id, today, CmdResult};

const ACTIVE_KEY: &str = "focus_active";

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a focus session
    Start {
        /// Task to focus on (omit for a quick session)
        #[arg(long)]
        task: Option<String>,
        /// Length in minutes (defaults to the profile's timer)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Show the running session
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pause the timer
    Pause,
    /// Resume the timer
    Resume,
    /// End the session early
    Stop {
        /// Why the session ended (user_stopped, tab_left)
        #[arg(long, default_value = "user_stopped")]
        reason: EndReason,
    },
}

#[derive(Serialize, Deserialize)]
struct ActiveFocus {
    timer: FocusTimer,
    session: FocusSession,
    task_title: Option<String>,
}

#[derive(Serialize)]
struct StatusView<'a> {
    state: TimerState,
    remaining_ms: u64,
    progress: f64,
    ending_soon: bool,
    task_title: Option<&'a str>,
}

fn load_active(db: &Database) -> Result<Option<ActiveFocus>, Box<dyn std::error::Error>> {
    match db.kv_get(ACTIVE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn save_active(db: &Database, active: &ActiveFocus) -> CmdResult {
    db.kv_set(ACTIVE_KEY, &serde_json::to_string(active)?)?;
    Ok(())
}

fn require_active(db: &Database) -> Result<ActiveFocus, Box<dyn std::error::Error>> {
    load_active(db)?.ok_or_else(|| "no focus session running (start one with `neurostudy focus start`)".into())
}

fn clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn run(action: FocusAction) -> CmdResult {
    let db = Database::open()?;
    let now = Utc::now();

    match action {
        FocusAction::Start { task, minutes } => start(&db, task, minutes, now),
        FocusAction::Status { json } => status(&db, json, now),
        FocusAction::Pause => {
            let mut active = require_active(&db)?;
            match active.timer.pause(now) {
                Some(TimerEvent::Completed) => return finish(&db, active, EndReason::Completed, now),
                Some(TimerEvent::Paused { remaining_ms }) => println!("paused at {}", clock(remaining_ms)),
                _ => println!("timer is not running"),
            }
            save_active(&db, &active)
        }
        FocusAction::Resume => {
            let mut active = require_active(&db)?;
            match active.timer.resume(now) {
                Some(TimerEvent::Resumed { remaining_ms }) => println!("resumed, {} left", clock(remaining_ms)),
                _ => println!("timer is not paused"),
            }
            save_active(&db, &active)
        }
        FocusAction::Stop { reason } => {
            let mut active = require_active(&db)?;
            active.timer.stop(now);
            finish(&db, active, reason, now)
        }
    }
}

fn start(db: &Database, task_id: Option<String>, minutes: Option<u32>, now: DateTime<Utc>) -> CmdResult {
    if load_active(db)?.is_some() {
        return Err("a focus session is already running; stop it first".into());
    }

    let task = match &task_id {
        Some(prefix) => {
            let tasks = db.tasks_for(today())?;
            let id = resolve_task_id(&tasks, prefix)?;
            tasks.into_iter().find(|t| t.id == id)
        }
        None => None,
    };

    let state = mode_state(db);
    let profile = state.profile();
    let mut timer = FocusTimer::from_profile(profile);
    if let Some(m) = minutes.or(task.as_ref().map(|t| t.estimated_minutes)) {
        timer.set_duration(m)?;
    }
    timer.start(now);

    let session = FocusSession::start(task.as_ref().map(|t| t.id.clone()), timer.duration_minutes(), now);
    let active = ActiveFocus {
        timer,
        session,
        task_title: task.map(|t| t.title),
    };
    save_active(db, &active)?;

    tracing::info!(session = %active.session.id, minutes = active.timer.duration_minutes(), "focus session started");
    match &active.task_title {
        Some(title) => println!("focusing on {title} for {} min", active.timer.duration_minutes()),
        None => println!("quick focus for {} min", active.timer.duration_minutes()),
    }
    if profile.untimed {
        println!("(no pressure: the clock is there if you want it)");
    }
    Ok(())
}

fn status(db: &Database, json: bool, now: DateTime<Utc>) -> CmdResult {
    let mut active = require_active(db)?;
    let event = active.timer.tick(now);
    if event == Some(TimerEvent::Completed) {
        return finish(db, active, EndReason::Completed, now);
    }
    save_active(db, &active)?;

    let view = StatusView {
        state: active.timer.state(),
        remaining_ms: active.timer.remaining_ms_at(now),
        progress: active.timer.progress_at(now),
        ending_soon: active.timer.shows_ending_soon(now),
        task_title: active.task_title.as_deref(),
    };
    if json {
        return print_json(&view);
    }

    println!("{:?}: {} left ({:.0}%)", view.state, clock(view.remaining_ms), view.progress * 100.0);
    if let Some(title) = view.task_title {
        println!("task: {title}");
    }
    if view.ending_soon {
        println!("Ending soon: about one minute left.");
    }
    Ok(())
}

/// Finalize the session, update its task and progress, and clear it.
fn finish(db: &Database, mut active: ActiveFocus, reason: EndReason, now: DateTime<Utc>) -> CmdResult {
    let outcome = active.session.finalize(reason, now)?;
    db.save_session(&active.session)?;

    let mut chapter_task = false;
    if let Some(task_id) = &outcome.task_id {
        if let Some(mut task) = db.task(task_id)? {
            chapter_task = task.chapter_id.is_some();
            if outcome.apply_to_task(&mut task) {
                db.save_task(&task)?;
            }
        }
    }

    let mut progress = db.load_progress()?;
    let badges = progress.record_session(&outcome, today(), chapter_task);
    db.save_progress(&progress)?;
    db.kv_delete(ACTIVE_KEY)?;

    println!("{}", reason.message());
    if outcome.completed {
        println!(
            "+{} XP, {} focused",
            outcome.xp_earned,
            format_focus_time(u64::from(outcome.actual_minutes))
        );
    }
    for badge in badges {
        println!("badge earned: {} ({})", badge.name(), badge.description());
    }
    Ok(())
}
