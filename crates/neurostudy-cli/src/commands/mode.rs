use clap::Subcommand;
use neurostudy_core::modes::SupportMode;
use neurostudy_core::storage::Database;

use super::{apply_styles, mode_state, CmdResult};

#[derive(Subcommand)]
pub enum ModeAction {
    /// List all support modes
    List {
        /// Show each mode's features
        #[arg(long)]
        verbose: bool,
    },
    /// Turn a mode on (e.g. "adhd", "sensory_safe")
    Enable { mode: SupportMode },
    /// Turn a mode off
    Disable { mode: SupportMode },
}

pub fn run(action: ModeAction) -> CmdResult {
    let db = Database::open()?;
    let mut state = mode_state(&db);

    match action {
        ModeAction::List { verbose } => {
            for mode in SupportMode::ALL {
                let info = mode.info();
                let mark = if state.has_mode(mode) { "[x]" } else { "[ ]" };
                println!("{mark} {:<20} {}", mode.as_str(), info.subtitle);
                if verbose {
                    for feature in info.features {
                        println!("      - {feature}");
                    }
                }
            }
        }
        ModeAction::Enable { mode } => {
            state.update_mode(mode, true);
            println!("enabled {mode}");
            apply_styles(&db, &state)?;
        }
        ModeAction::Disable { mode } => {
            state.update_mode(mode, false);
            println!("disabled {mode}");
            apply_styles(&db, &state)?;
        }
    }
    Ok(())
}
