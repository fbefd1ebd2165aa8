use clap::Subcommand;
use neurostudy_core::storage::Database;

use super::{apply_styles, mode_state, print_json, CmdResult};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the stored preference record as JSON
    Show,
    /// Set one preference
    Set {
        /// Field name (e.g. "readingLargeFont", "timer_preset")
        field: String,
        /// New value ("true"/"false", or minutes for the timer preset)
        value: String,
    },
}

pub fn run(action: PrefsAction) -> CmdResult {
    let db = Database::open()?;
    let mut state = mode_state(&db);

    match action {
        PrefsAction::Show => print_json(state.preferences())?,
        PrefsAction::Set { field, value } => {
            let mut prefs = state.preferences().clone();
            prefs.set_field(&field, &value)?;
            state.set_preferences(prefs);
            println!("ok");
            apply_styles(&db, &state)?;
        }
    }
    Ok(())
}
