//! Experience profile: derivation, style tags and the stateful holder.

mod derive;
mod state;
mod style;

pub use derive::{
    derive_profile, ExperienceProfile, MicroStepGranularity, ReadingMode, SensoryMode,
    DEFAULT_ENERGY_MESSAGE, HIGH_ENERGY_MESSAGE, LOW_ENERGY_MESSAGE,
};
pub use state::ModeState;
pub use style::{StyleDiff, StyleReconciler, StyleSet, StyleTag};
