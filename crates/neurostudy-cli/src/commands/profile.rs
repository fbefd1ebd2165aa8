//! Experience profile inspection.

use clap::Subcommand;
use neurostudy_core::storage::Database;

use super::{mode_state, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile derived from current modes and energy
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    match action {
        ProfileAction::Show { json } => show(json),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn show(json: bool) -> CmdResult {
    let db = Database::open()?;
    let state = mode_state(&db);
    let profile = state.profile();

    if json {
        return print_json(profile);
    }

    let modes: Vec<&str> = profile.active_modes.iter().map(|m| m.as_str()).collect();
    println!(
        "Modes:            {}",
        if modes.is_empty() { "none".to_string() } else { modes.join(", ") }
    );
    println!("Energy:           {}", state.energy().label());
    println!("Timer:            {} min", profile.default_timer_minutes);
    println!("Tasks today:      {}", profile.max_tasks_today);
    println!("Quick start:      {}", yes_no(profile.show_quick_start));
    println!("Detailed steps:   {}", yes_no(profile.micro_steps_granularity.is_detailed()));
    println!("Ending-soon:      {}", yes_no(profile.show_ending_soon_banner));
    println!("Untimed:          {}", yes_no(profile.untimed));
    println!("Math step mode:   {}", yes_no(profile.math_step_mode));
    println!("Large buttons:    {}", yes_no(profile.large_buttons));
    println!("Reduced choices:  {}", yes_no(profile.reduced_choices));
    println!("Styles:           {}", profile.style.class_names().join(" "));
    println!();
    println!("{}", profile.energy_message);
    Ok(())
}
