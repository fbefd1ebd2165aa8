//! Experience profile derivation.
//!
//! `derive_profile` maps (preferences, energy) to the resolved configuration
//! every command reads. It is pure and total: the same inputs always give a
//! field-wise equal profile, and every input combination gives a complete one.
//!
//! Conflicts resolve in a fixed order:
//!
//! ```text
//! timer:  preset -> ADHD forces 25 (unless low energy)
//!                -> low energy / fatigue caps at 15
//!                -> high energy (not fatigued) floors at 45
//! tasks:  5 -> low / fatigue = 2, high = 6 -> autism caps at 3
//! ```

use serde::{Deserialize, Serialize};

use super::style::{StyleSet, StyleTag};
use crate::modes::{EnergyLevel, SupportMode, UserPreferences};

pub const LOW_ENERGY_MESSAGE: &str =
    "Minimum viable progress is enough today. Be gentle with yourself.";
pub const HIGH_ENERGY_MESSAGE: &str = "Feeling energetic! Let's make great progress.";
pub const DEFAULT_ENERGY_MESSAGE: &str = "You've got this!";

const ADHD_TIMER_MIN: u32 = 25;
const LOW_ENERGY_TIMER_CAP_MIN: u32 = 15;
const HIGH_ENERGY_TIMER_FLOOR_MIN: u32 = 45;

const BASE_MAX_TASKS: usize = 5;
const LOW_ENERGY_MAX_TASKS: usize = 2;
const HIGH_ENERGY_MAX_TASKS: usize = 6;
const AUTISM_MAX_TASKS: usize = 3;

/// How finely a task is broken into micro-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroStepGranularity {
    Normal,
    Detailed,
}

impl MicroStepGranularity {
    pub fn is_detailed(&self) -> bool {
        matches!(self, MicroStepGranularity::Detailed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingMode {
    pub large_font: bool,
    pub increased_spacing: bool,
    pub one_section_at_a_time: bool,
    pub highlight_current: bool,
    pub dyslexia_font: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensoryMode {
    pub reduce_motion: bool,
    pub muted_colors: bool,
    pub no_flashing: bool,
}

/// Fully resolved configuration. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceProfile {
    pub default_timer_minutes: u32,
    pub max_tasks_today: usize,
    pub show_quick_start: bool,
    pub micro_steps_granularity: MicroStepGranularity,
    pub show_ending_soon_banner: bool,
    pub untimed: bool,
    pub math_step_mode: bool,
    pub style: StyleSet,
    pub large_buttons: bool,
    pub reduced_choices: bool,
    pub consistent_layout: bool,
    pub reading_mode: ReadingMode,
    pub sensory_mode: SensoryMode,
    pub energy_message: String,
    /// Selected modes, unchanged; the tutor prompt is built from these.
    pub active_modes: Vec<SupportMode>,
}

pub fn derive_profile(preferences: &UserPreferences, energy: EnergyLevel) -> ExperienceProfile {
    let has = |mode| preferences.has_mode(mode);
    let has_dyslexia = has(SupportMode::Dyslexia);
    let has_adhd = has(SupportMode::Adhd);
    let has_autism = has(SupportMode::Autism);
    let has_dyscalculia = has(SupportMode::Dyscalculia);
    let has_sensory = has(SupportMode::SensorySafe);
    let has_motor = has(SupportMode::MotorDifficulties);
    let has_fatigue = has(SupportMode::ChronicFatigue);

    let low = energy == EnergyLevel::Low;
    let high = energy == EnergyLevel::High;
    let drained = low || has_fatigue;

    let mut timer = preferences.timer_preset.minutes();
    if has_adhd && !low {
        timer = ADHD_TIMER_MIN;
    }
    if drained {
        timer = timer.min(LOW_ENERGY_TIMER_CAP_MIN);
    }
    // Fatigue keeps the cap even on a high-energy day.
    if high && !has_fatigue {
        timer = timer.max(HIGH_ENERGY_TIMER_FLOOR_MIN);
    }

    let mut max_tasks = if drained {
        LOW_ENERGY_MAX_TASKS
    } else if high {
        HIGH_ENERGY_MAX_TASKS
    } else {
        BASE_MAX_TASKS
    };
    if has_autism && max_tasks > AUTISM_MAX_TASKS {
        max_tasks = AUTISM_MAX_TASKS;
    }

    let mut style = StyleSet::new();
    if has_sensory || preferences.sensory_reduce_motion {
        style.insert(StyleTag::SensorySafe);
    }
    if has_dyslexia {
        style.insert(StyleTag::DyslexiaMode);
    }
    if has_motor || preferences.motor_large_buttons {
        style.insert(StyleTag::MotorFriendly);
    }
    if has_adhd {
        style.insert(StyleTag::AdhdMode);
    }
    if has_autism {
        style.insert(StyleTag::AutismMode);
    }

    let energy_message = if drained {
        LOW_ENERGY_MESSAGE
    } else if high {
        HIGH_ENERGY_MESSAGE
    } else {
        DEFAULT_ENERGY_MESSAGE
    };

    ExperienceProfile {
        default_timer_minutes: timer,
        max_tasks_today: max_tasks,
        show_quick_start: has_adhd,
        micro_steps_granularity: if has_adhd {
            MicroStepGranularity::Detailed
        } else {
            MicroStepGranularity::Normal
        },
        show_ending_soon_banner: has_autism,
        untimed: has_dyscalculia,
        math_step_mode: has_dyscalculia,
        style,
        large_buttons: has_motor || preferences.motor_large_buttons,
        reduced_choices: has_autism,
        consistent_layout: has_autism,
        reading_mode: ReadingMode {
            large_font: has_dyslexia || preferences.reading_large_font,
            increased_spacing: has_dyslexia || preferences.reading_increased_spacing,
            one_section_at_a_time: has_dyslexia || preferences.reading_one_section_at_a_time,
            highlight_current: preferences.reading_highlight_current,
            dyslexia_font: has_dyslexia,
        },
        sensory_mode: SensoryMode {
            reduce_motion: has_sensory || preferences.sensory_reduce_motion,
            muted_colors: has_sensory,
            no_flashing: has_sensory,
        },
        energy_message: energy_message.to_string(),
        active_modes: preferences.selected_modes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::TimerPreset;

    fn prefs(modes: &[SupportMode], preset: TimerPreset) -> UserPreferences {
        UserPreferences {
            selected_modes: modes.to_vec(),
            timer_preset: preset,
            ..Default::default()
        }
    }

    #[test]
    fn adhd_on_normal_day_gets_quick_start_and_detailed_steps() {
        let p = derive_profile(
            &prefs(&[SupportMode::Adhd], TimerPreset::Short),
            EnergyLevel::Normal,
        );
        assert_eq!(p.default_timer_minutes, 25);
        assert!(p.show_quick_start);
        assert_eq!(p.micro_steps_granularity, MicroStepGranularity::Detailed);
        assert!(p.style.contains(StyleTag::AdhdMode));
    }

    #[test]
    fn fatigue_beats_high_energy() {
        let p = derive_profile(
            &prefs(&[SupportMode::ChronicFatigue], TimerPreset::Deep),
            EnergyLevel::High,
        );
        assert_eq!(p.default_timer_minutes, 15);
        assert_eq!(p.max_tasks_today, 2);
        assert_eq!(p.energy_message, LOW_ENERGY_MESSAGE);
    }

    #[test]
    fn autism_ceiling_applies_after_high_energy_bump() {
        let p = derive_profile(
            &prefs(&[SupportMode::Autism], TimerPreset::Classic),
            EnergyLevel::High,
        );
        assert_eq!(p.max_tasks_today, 3);
        assert_eq!(p.default_timer_minutes, 45);
        assert!(p.show_ending_soon_banner);
        assert!(p.reduced_choices && p.consistent_layout);
    }

    #[test]
    fn adhd_on_low_day_keeps_preset_under_cap() {
        let p = derive_profile(
            &prefs(&[SupportMode::Adhd], TimerPreset::Short),
            EnergyLevel::Low,
        );
        assert_eq!(p.default_timer_minutes, 10);
        assert_eq!(p.max_tasks_today, 2);
    }

    #[test]
    fn defaults_without_modes() {
        let p = derive_profile(&UserPreferences::default(), EnergyLevel::Normal);
        assert_eq!(p.default_timer_minutes, 25);
        assert_eq!(p.max_tasks_today, 5);
        assert!(p.style.is_empty());
        assert_eq!(p.energy_message, DEFAULT_ENERGY_MESSAGE);
        assert_eq!(p.micro_steps_granularity, MicroStepGranularity::Normal);
    }

    #[test]
    fn preferences_alone_set_reading_and_motor_flags() {
        let mut p = UserPreferences::default();
        p.reading_highlight_current = true;
        p.reading_large_font = true;
        p.motor_large_buttons = true;
        p.sensory_reduce_motion = true;
        let profile = derive_profile(&p, EnergyLevel::Normal);
        assert!(profile.reading_mode.large_font);
        assert!(profile.reading_mode.highlight_current);
        assert!(!profile.reading_mode.dyslexia_font);
        assert!(profile.large_buttons);
        assert!(profile.sensory_mode.reduce_motion);
        assert!(!profile.sensory_mode.muted_colors);
        assert!(profile.style.contains(StyleTag::SensorySafe));
        assert!(profile.style.contains(StyleTag::MotorFriendly));
    }

    #[test]
    fn dyslexia_turns_on_all_reading_aids_but_highlight() {
        let p = derive_profile(
            &prefs(&[SupportMode::Dyslexia], TimerPreset::Classic),
            EnergyLevel::Normal,
        );
        assert!(p.reading_mode.large_font);
        assert!(p.reading_mode.increased_spacing);
        assert!(p.reading_mode.one_section_at_a_time);
        assert!(p.reading_mode.dyslexia_font);
        assert!(!p.reading_mode.highlight_current);
    }

    #[test]
    fn dyscalculia_is_untimed_with_math_steps() {
        let p = derive_profile(
            &prefs(&[SupportMode::Dyscalculia], TimerPreset::Classic),
            EnergyLevel::Normal,
        );
        assert!(p.untimed && p.math_step_mode);
    }

    #[test]
    fn active_modes_pass_through_in_order() {
        let modes = [SupportMode::Autism, SupportMode::Dyslexia, SupportMode::Adhd];
        let p = derive_profile(&prefs(&modes, TimerPreset::Classic), EnergyLevel::Normal);
        assert_eq!(p.active_modes, modes.to_vec());
    }
}
