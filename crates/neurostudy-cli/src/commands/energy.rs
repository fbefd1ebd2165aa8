//! Daily energy check-in.

use clap::Subcommand;
use neurostudy_core::modes::EnergyLevel;
use neurostudy_core::storage::Database;

use super::{apply_styles, mode_state, CmdResult};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Show today's energy level
    Show,
    /// Set today's energy level (low, normal, high)
    Set { level: EnergyLevel },
}

pub fn run(action: EnergyAction) -> CmdResult {
    let db = Database::open()?;
    let mut state = mode_state(&db);

    match action {
        EnergyAction::Show => {
            println!("{}", state.energy().label());
        }
        EnergyAction::Set { level } => {
            state.set_energy(level);
            let profile = state.profile();
            println!("energy set to {level}");
            println!(
                "{} (timer {} min, up to {} tasks)",
                profile.energy_message, profile.default_timer_minutes, profile.max_tasks_today
            );
            apply_styles(&db, &state)?;
        }
    }
    Ok(())
}
