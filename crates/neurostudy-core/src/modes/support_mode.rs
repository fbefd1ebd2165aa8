use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// An accessibility / learning-need tag. A user may hold any subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportMode {
    Dyslexia,
    Adhd,
    SensorySafe,
    Autism,
    Dyscalculia,
    MotorDifficulties,
    ChronicFatigue,
}

impl SupportMode {
    pub const ALL: [SupportMode; 7] = [
        SupportMode::Dyslexia,
        SupportMode::Adhd,
        SupportMode::SensorySafe,
        SupportMode::Autism,
        SupportMode::Dyscalculia,
        SupportMode::MotorDifficulties,
        SupportMode::ChronicFatigue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportMode::Dyslexia => "dyslexia",
            SupportMode::Adhd => "adhd",
            SupportMode::SensorySafe => "sensory_safe",
            SupportMode::Autism => "autism",
            SupportMode::Dyscalculia => "dyscalculia",
            SupportMode::MotorDifficulties => "motor_difficulties",
            SupportMode::ChronicFatigue => "chronic_fatigue",
        }
    }

    /// Catalogue entry shown during onboarding and in settings.
    pub fn info(&self) -> SupportModeInfo {
        match self {
            SupportMode::Dyslexia => SupportModeInfo {
                label: "Dyslexia",
                subtitle: "Have trouble reading text?",
                description: "Reading feels easier with the right formatting",
                features: &[
                    "Dyslexia-friendly font (OpenDyslexic)",
                    "Wider letter & line spacing",
                    "Shorter line width for easier tracking",
                    "Content shown one section at a time",
                    "Simplified AI tutor explanations",
                ],
            },
            SupportMode::Adhd => SupportModeInfo {
                label: "ADHD",
                subtitle: "Struggle to stay focused or get started?",
                description: "Tools to help you start and maintain focus",
                features: &[
                    "Prominent \"Start 10 min focus\" button",
                    "Tasks broken into micro-steps",
                    "Pomodoro-style focus timers",
                    "Minimal clutter, clear next action",
                    "Streaks & XP for motivation",
                ],
            },
            SupportMode::SensorySafe => SupportModeInfo {
                label: "Sensory Sensitivity",
                subtitle: "Sensitive to light, motion, or stimulation?",
                description: "Includes epilepsy-safe design principles",
                features: &[
                    "No flashing or rapid color changes",
                    "All animations removed",
                    "Soft, muted colors throughout",
                    "No sound or audio alerts",
                    "Calm, static interface",
                ],
            },
            SupportMode::Autism => SupportModeInfo {
                label: "Autism",
                subtitle: "Prefer routine and predictability?",
                description: "Consistent patterns you can rely on",
                features: &[
                    "Fixed, consistent layout positions",
                    "Reduced choices (max 3 tasks)",
                    "No surprise popups or changes",
                    "Smooth, predictable transitions",
                    "Same order every day",
                ],
            },
            SupportMode::Dyscalculia => SupportModeInfo {
                label: "Dyscalculia",
                subtitle: "Math feels overwhelming?",
                description: "Step-by-step math without time pressure",
                features: &[
                    "One math step at a time",
                    "Visual grouping for numbers",
                    "No timed math problems",
                    "Clear step labels (Step 1, Step 2...)",
                    "Simplified number presentation",
                ],
            },
            SupportMode::MotorDifficulties => SupportModeInfo {
                label: "Motor Difficulties",
                subtitle: "Need larger touch targets?",
                description: "Easier to tap, no drag-and-drop",
                features: &[
                    "Extra-large buttons & touch targets",
                    "No drag-and-drop interactions",
                    "Buttons positioned for easy reach",
                    "Simple up/down controls",
                    "No precision movements required",
                ],
            },
            SupportMode::ChronicFatigue => SupportModeInfo {
                label: "Chronic Fatigue / Energy Issues",
                subtitle: "Energy varies day to day?",
                description: "Adapts to how you feel today",
                features: &[
                    "Daily energy check-in",
                    "Fewer tasks on low-energy days",
                    "Shorter default sessions when tired",
                    "\"Minimum viable progress\" messaging",
                    "No guilt, just what works",
                ],
            },
        }
    }

    /// Deserialize a mode list, dropping non-string entries, names this build
    /// does not know, and duplicates. Keeps the derivation total for records written elsewhere.
    pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Vec<SupportMode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
        let mut modes = Vec::with_capacity(raw.len());
        for entry in raw {
            let Some(name) = entry.as_str() else {
                tracing::debug!(%entry, "ignoring non-string support mode");
                continue;
            };
            match name.parse::<SupportMode>() {
                Ok(mode) if !modes.contains(&mode) => modes.push(mode),
                Ok(_) => {}
                Err(_) => tracing::debug!(mode = %name, "ignoring unknown support mode"),
            }
        }
        Ok(modes)
    }
}

impl fmt::Display for SupportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportMode {
    type Err = String;

    /// Accepts the current names and the legacy backend enum names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dyslexia" | "reading_support" => Ok(SupportMode::Dyslexia),
            "adhd" | "focus_support" => Ok(SupportMode::Adhd),
            "sensory_safe" | "sensory" => Ok(SupportMode::SensorySafe),
            "autism" | "routine_low_overwhelm" => Ok(SupportMode::Autism),
            "dyscalculia" | "step_by_step_math" => Ok(SupportMode::Dyscalculia),
            "motor_difficulties" | "motor_friendly" | "motor" => Ok(SupportMode::MotorDifficulties),
            "chronic_fatigue" | "energy_mode" | "fatigue" => Ok(SupportMode::ChronicFatigue),
            other => Err(format!("unknown support mode: '{other}'")),
        }
    }
}

/// Static description of a support mode.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupportModeInfo {
    pub label: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}
