use serde::{Deserialize, Serialize};

use super::SupportMode;

/// Focus-timer preset chosen in settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimerPreset {
    /// Quick focus burst
    Short,
    /// Pomodoro classic
    #[default]
    Classic,
    /// Deep work session
    Deep,
}

impl TimerPreset {
    pub const ALL: [TimerPreset; 3] = [TimerPreset::Short, TimerPreset::Classic, TimerPreset::Deep];

    pub fn minutes(&self) -> u32 {
        match self {
            TimerPreset::Short => 10,
            TimerPreset::Classic => 25,
            TimerPreset::Deep => 45,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TimerPreset::Short => "Quick focus burst",
            TimerPreset::Classic => "Pomodoro classic",
            TimerPreset::Deep => "Deep work session",
        }
    }
}

impl TryFrom<u32> for TimerPreset {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            10 => Ok(TimerPreset::Short),
            25 => Ok(TimerPreset::Classic),
            45 => Ok(TimerPreset::Deep),
            other => Err(format!("timer preset must be 10, 25 or 45 minutes, got {other}")),
        }
    }
}

impl From<TimerPreset> for u32 {
    fn from(preset: TimerPreset) -> Self {
        preset.minutes()
    }
}

/// The persisted preference record.
///
/// Serialized as camelCase JSON; fields missing from a stored record take
/// their defaults, so a partial record merges over the defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    #[serde(deserialize_with = "SupportMode::deserialize_lenient")]
    pub selected_modes: Vec<SupportMode>,
    pub timer_preset: TimerPreset,
    pub reading_large_font: bool,
    pub reading_increased_spacing: bool,
    pub reading_one_section_at_a_time: bool,
    pub reading_highlight_current: bool,
    pub sensory_reduce_motion: bool,
    pub sensory_sound_off: bool,
    pub motor_large_buttons: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            selected_modes: Vec::new(),
            timer_preset: TimerPreset::Classic,
            reading_large_font: false,
            reading_increased_spacing: false,
            reading_one_section_at_a_time: false,
            reading_highlight_current: false,
            sensory_reduce_motion: false,
            sensory_sound_off: true,
            motor_large_buttons: false,
        }
    }
}

impl UserPreferences {
    pub fn has_mode(&self, mode: SupportMode) -> bool {
        self.selected_modes.contains(&mode)
    }

    /// Enable or disable one mode. Enabling twice keeps a single entry.
    pub fn set_mode(&mut self, mode: SupportMode, enabled: bool) {
        if enabled {
            if !self.has_mode(mode) {
                self.selected_modes.push(mode);
            }
        } else {
            self.selected_modes.retain(|m| *m != mode);
        }
    }

    /// Set a flag or the preset by its persisted (camelCase) or snake_case name.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        let parse_bool = |v: &str| {
            v.parse::<bool>()
                .map_err(|_| format!("expected true or false for '{name}', got '{v}'"))
        };
        match name {
            "timerPreset" | "timer_preset" => {
                let minutes: u32 = value
                    .parse()
                    .map_err(|_| format!("expected minutes for '{name}', got '{value}'"))?;
                self.timer_preset = TimerPreset::try_from(minutes)?;
            }
            "readingLargeFont" | "reading_large_font" => self.reading_large_font = parse_bool(value)?,
            "readingIncreasedSpacing" | "reading_increased_spacing" => {
                self.reading_increased_spacing = parse_bool(value)?
            }
            "readingOneSectionAtATime" | "reading_one_section_at_a_time" => {
                self.reading_one_section_at_a_time = parse_bool(value)?
            }
            "readingHighlightCurrent" | "reading_highlight_current" => {
                self.reading_highlight_current = parse_bool(value)?
            }
            "sensoryReduceMotion" | "sensory_reduce_motion" => {
                self.sensory_reduce_motion = parse_bool(value)?
            }
            "sensorySoundOff" | "sensory_sound_off" => self.sensory_sound_off = parse_bool(value)?,
            "motorLargeButtons" | "motor_large_buttons" => {
                self.motor_large_buttons = parse_bool(value)?
            }
            other => return Err(format!("unknown preference: {other}")),
        }
        Ok(())
    }
}
