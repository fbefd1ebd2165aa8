//! Notes request and response shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::modes::SupportMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Comprehensive,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Brief,
        DetailLevel::Standard,
        DetailLevel::Comprehensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "brief",
            DetailLevel::Standard => "standard",
            DetailLevel::Comprehensive => "comprehensive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "Quick overview",
            DetailLevel::Standard => "Balanced detail",
            DetailLevel::Comprehensive => "Deep analysis",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brief" => Ok(DetailLevel::Brief),
            "standard" => Ok(DetailLevel::Standard),
            "comprehensive" => Ok(DetailLevel::Comprehensive),
            other => Err(format!(
                "unknown detail level '{other}' (expected brief, standard or comprehensive)"
            )),
        }
    }
}

/// Body sent to the notes endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesRequest<'a> {
    pub content: &'a str,
    pub detail_level: DetailLevel,
    pub modes: &'a [SupportMode],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notes {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub main_themes: Vec<String>,
    #[serde(default)]
    pub important_details: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesResult {
    pub summary: String,
    #[serde(default)]
    pub notes: Notes,
}

impl NotesResult {
    /// Named sections in display order, skipping empty ones.
    pub fn sections(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Key Points", self.notes.key_points.as_slice()),
            ("Main Themes", self.notes.main_themes.as_slice()),
            ("Important Details", self.notes.important_details.as_slice()),
            ("Action Items", self.notes.action_items.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }
}
