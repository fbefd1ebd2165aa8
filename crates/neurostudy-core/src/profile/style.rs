//! Style tags and their reconciliation.
//!
//! A profile carries the *desired* tag set as a value. Whatever renders it
//! keeps one `StyleReconciler`, which is the only place tags get applied: it
//! clears every known tag and then adds exactly the desired ones, so a
//! previous profile never leaks tags into the next.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    SensorySafe,
    DyslexiaMode,
    MotorFriendly,
    AdhdMode,
    AutismMode,
}

impl StyleTag {
    pub const ALL: [StyleTag; 5] = [
        StyleTag::SensorySafe,
        StyleTag::DyslexiaMode,
        StyleTag::MotorFriendly,
        StyleTag::AdhdMode,
        StyleTag::AutismMode,
    ];

    pub fn class_name(&self) -> &'static str {
        match self {
            StyleTag::SensorySafe => "sensory-safe",
            StyleTag::DyslexiaMode => "dyslexia-mode",
            StyleTag::MotorFriendly => "motor-friendly",
            StyleTag::AdhdMode => "adhd-mode",
            StyleTag::AutismMode => "autism-mode",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// An idempotent set of style tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(BTreeSet<StyleTag>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: StyleTag) -> bool {
        self.0.insert(tag)
    }

    pub fn contains(&self, tag: StyleTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleTag> + '_ {
        self.0.iter().copied()
    }

    pub fn class_names(&self) -> Vec<&'static str> {
        self.iter().map(|t| t.class_name()).collect()
    }
}

impl FromIterator<StyleTag> for StyleSet {
    fn from_iter<I: IntoIterator<Item = StyleTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDiff {
    pub removed: Vec<StyleTag>,
    pub added: Vec<StyleTag>,
}

impl StyleDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// `+added -removed`, e.g. `+adhd-mode -sensory-safe`.
impl fmt::Display for StyleDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .added
            .iter()
            .map(|t| format!("+{t}"))
            .chain(self.removed.iter().map(|t| format!("-{t}")))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Tracks the tags currently applied to the root view.
#[derive(Debug, Clone, Default)]
pub struct StyleReconciler {
    applied: StyleSet,
}

impl StyleReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from tags applied earlier, e.g. by a previous process.
    pub fn with_applied(applied: StyleSet) -> Self {
        Self { applied }
    }

    pub fn applied(&self) -> &StyleSet {
        &self.applied
    }

    /// Replace the applied tags with `desired`.
    pub fn apply(&mut self, desired: &StyleSet) -> StyleDiff {
        let mut next = self.applied.clone();
        for tag in StyleTag::ALL {
            next.0.remove(&tag);
        }
        for tag in desired.iter() {
            next.insert(tag);
        }

        let diff = StyleDiff {
            removed: self.applied.iter().filter(|t| !next.contains(*t)).collect(),
            added: next.iter().filter(|t| !self.applied.contains(*t)).collect(),
        };
        self.applied = next;
        diff
    }
}
