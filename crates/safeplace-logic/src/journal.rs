//! Journal entries and audio cues, the user-facing side effects of the
//! resolvers.
//!
//! Resolvers never print or play anything themselves. They hand back
//! typed [`JournalEntry`] records and [`SoundCue`]s; the caller forwards
//! them to whatever [`Journal`] / [`AudioCues`] sink it owns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::sounds;

/// Message kinds understood by the journal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JournalKind {
    Movement,
    HpDamage,
    HpRecovery,
    ItemFound,
    ItemUsed,
    ItemAcquired,
    InventoryFull,
    XpGain,
    LevelUp,
    Discovery,
    SystemWarning,
    SkillCheckSuccess,
    SkillCheckFailure,
    ActionSuccess,
    ActionFail,
    RestBlocked,
}

/// One user-facing log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub kind: JournalKind,
    pub text: String,
    /// Free-form payload (`damage`, `item`, `reason`, …) for templating.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl JournalEntry {
    pub fn new(kind: JournalKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attach a context value.
    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.text)
    }
}

/// Named audio cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Error,
    CraftFail,
    CraftSuccess,
}

impl SoundCue {
    /// Identifier passed to the audio player.
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Error => sounds::ERROR,
            SoundCue::CraftFail => sounds::CRAFT_FAIL,
            SoundCue::CraftSuccess => sounds::CRAFT_SUCCESS,
        }
    }
}

/// Sink for journal entries.
pub trait Journal {
    fn record(&mut self, entry: JournalEntry);

    fn record_all(&mut self, entries: impl IntoIterator<Item = JournalEntry>)
    where
        Self: Sized,
    {
        for entry in entries {
            self.record(entry);
        }
    }
}

impl Journal for Vec<JournalEntry> {
    fn record(&mut self, entry: JournalEntry) {
        self.push(entry);
    }
}

/// Sink for audio cues.
pub trait AudioCues {
    fn play(&mut self, cue: SoundCue);
}

impl AudioCues for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}
