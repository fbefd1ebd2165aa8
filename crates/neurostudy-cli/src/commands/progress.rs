use clap::Subcommand;
use neurostudy_core::session::{format_focus_time, Badge};
use neurostudy_core::storage::Database;

use super::{print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show XP, streaks, focus time and badges
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Number of recent sessions to list
        #[arg(long, default_value = "0")]
        recent: usize,
    },
}

pub fn run(action: ProgressAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        ProgressAction::Show { json, recent } => {
            let progress = db.load_progress()?;
            if json {
                return print_json(&progress);
            }

            println!("XP:             {}", progress.total_xp);
            println!("Streak:         {} days", progress.streak_on(today()));
            println!("Longest streak: {} days", progress.longest_streak);
            println!("Focus time:     {}", format_focus_time(progress.total_focused_minutes));
            println!("Sessions:       {}", progress.total_sessions_completed);
            println!("Chapters:       {}", progress.chapters_completed);
            println!("Badges:");
            for badge in Badge::ALL {
                let mark = if progress.badges.contains(&badge) { "[x]" } else { "[ ]" };
                println!("  {mark} {:<16} {}", badge.name(), badge.description());
            }

            if recent > 0 {
                println!("Recent sessions:");
                for s in db.recent_sessions(recent)? {
                    println!(
                        "  {}  {:>3} min  {}",
                        s.started_at.format("%Y-%m-%d %H:%M"),
                        s.actual_minutes.unwrap_or(0),
                        s.end_reason.map(|r| r.as_str()).unwrap_or("open")
                    );
                }
            }
        }
    }
    Ok(())
}
