use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Today's self-reported energy.
///
/// Stored under a date-less key, so it carries over to the next day until the
/// user changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    #[default]
    Normal,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Normal, EnergyLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Normal => "normal",
            EnergyLevel::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "Low energy",
            EnergyLevel::Normal => "Normal",
            EnergyLevel::High => "High energy",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "normal" | "medium" => Ok(EnergyLevel::Normal),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level: '{other}' (use low, normal or high)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_normal() {
        assert_eq!(EnergyLevel::default(), EnergyLevel::Normal);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" HIGH ".parse::<EnergyLevel>().unwrap(), EnergyLevel::High);
        assert!("sleepy".parse::<EnergyLevel>().is_err());
    }
}
