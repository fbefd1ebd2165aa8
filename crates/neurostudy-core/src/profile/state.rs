//! Long-lived holder of preferences, energy and the derived profile.
//!
//! Every change recomputes the profile synchronously before returning, so a
//! reader never sees a profile that disagrees with the inputs. Writes to the
//! store are fire-and-forget: a failure is logged and the in-memory state
//! stays authoritative.

use super::derive::{derive_profile, ExperienceProfile};
use crate::modes::{EnergyLevel, SupportMode, UserPreferences};
use crate::storage::prefs::{load_energy, load_preferences, save_energy, save_preferences};
use crate::storage::KeyValueStore;

pub struct ModeState<S: KeyValueStore> {
    store: S,
    preferences: UserPreferences,
    energy: EnergyLevel,
    profile: ExperienceProfile,
}

impl<S: KeyValueStore> ModeState<S> {
    /// Read both keys from `store`, falling back to defaults.
    pub fn load(store: S) -> Self {
        let preferences = load_preferences(&store);
        let energy = load_energy(&store);
        let profile = derive_profile(&preferences, energy);
        Self {
            store,
            preferences,
            energy,
            profile,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn energy(&self) -> EnergyLevel {
        self.energy
    }

    pub fn profile(&self) -> &ExperienceProfile {
        &self.profile
    }

    pub fn has_mode(&self, mode: SupportMode) -> bool {
        self.preferences.has_mode(mode)
    }

    pub fn set_energy(&mut self, energy: EnergyLevel) {
        self.energy = energy;
        self.recompute();
        if let Err(e) = save_energy(&self.store, energy) {
            tracing::warn!(error = %e, "failed to persist energy level");
        }
    }

    pub fn update_mode(&mut self, mode: SupportMode, enabled: bool) {
        self.update_preferences(|prefs| prefs.set_mode(mode, enabled));
    }

    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        self.update_preferences(|prefs| *prefs = preferences);
    }

    /// Apply `f` to the preferences, then recompute and persist.
    pub fn update_preferences<F>(&mut self, f: F)
    where
        F: FnOnce(&mut UserPreferences),
    {
        f(&mut self.preferences);
        self.recompute();
        if let Err(e) = save_preferences(&self.store, &self.preferences) {
            tracing::warn!(error = %e, "failed to persist preferences");
        }
    }

    fn recompute(&mut self) {
        self.profile = derive_profile(&self.preferences, self.energy);
    }
}
