//! Support modes, daily energy and the user preference record.
//!
//! These are the inputs of the experience profile. Everything here is plain
//! data with lenient parsing: a persisted record written by an older build
//! must still load.

mod energy;
mod preferences;
mod support_mode;

pub use energy::EnergyLevel;
pub use preferences::{TimerPreset, UserPreferences};
pub use support_mode::{SupportMode, SupportModeInfo};
