// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key-aware note spelling.
//!
//! Maps MIDI note numbers to notated spellings (accidental, octave,
//! pitch class, display name) relative to an estimated key. The same
//! pitch is spelled differently depending on the key signature in
//! force: MIDI 61 is C# in A major but Db in Eb major.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use super::key::{Key, MidiNote, Note};

/// Spelling lookup failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpellingError {
    /// The note is not covered by the table. Upstream note sources are
    /// constrained to valid pitches, so this signals a programming error.
    #[error("midi note {0} is not in the spelling table")]
    UnknownNote(u8),
    /// A table loaded from a file failed validation
    #[error("midi note {midi}: {reason}")]
    InvalidEntry { midi: u8, reason: String },
    /// A table loaded from a file has no entries
    #[error("spelling table is empty")]
    EmptyTable,
}

/// Accidental symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Notation symbol ("" / "#" / "b")
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    /// Parse from a notation symbol
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "" => Some(Accidental::Natural),
            "#" => Some(Accidental::Sharp),
            "b" => Some(Accidental::Flat),
            _ => None,
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for Accidental {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Accidental {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AccidentalVisitor;

        impl Visitor<'_> for AccidentalVisitor {
            type Value = Accidental;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an accidental symbol: \"\", \"#\", or \"b\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Accidental, E> {
                Accidental::from_symbol(v)
                    .ok_or_else(|| E::custom(format!("invalid accidental: {v:?}")))
            }
        }

        deserializer.deserialize_str(AccidentalVisitor)
    }
}

/// One notated spelling of a MIDI note, valid in the keys listed.
///
/// `dpc` is the chromatic degree/pitch class (midi % 12), `octave` uses
/// the MIDI convention (C4 = 60), `name` is the display spelling such
/// as "C#4".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellingContext {
    /// Keys in which this spelling applies
    #[serde(default)]
    pub keys: BTreeSet<Key>,
    /// Degree/pitch class for notation
    pub dpc: u8,
    /// Accidental symbol
    pub acc: Accidental,
    /// Octave (C4 = MIDI 60)
    pub octave: i8,
    /// Display name, e.g. "C#4"
    pub name: String,
}

/// The two candidate spellings of one MIDI note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Default spelling; applies when the estimated key is in its key
    /// set, or when no key is estimated
    pub primary: SpellingContext,
    /// Enharmonic alternative for all other keys
    pub secondary: SpellingContext,
}

/// Per-note, per-key spelling table.
///
/// Read-only after construction; share it behind an `Arc` when several
/// resolvers need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellingTable {
    notes: BTreeMap<MidiNote, NoteEntry>,
}

impl SpellingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
        }
    }

    /// Built-in table covering MIDI 0-127.
    ///
    /// Chromatic notes get a sharp-side primary spelling whose key set
    /// is every sharp-preferring key, with the flat spelling as
    /// secondary. Naturals are spelled the same in every key.
    pub fn standard() -> Self {
        let sharp_keys: BTreeSet<Key> = Key::all().filter(Key::prefers_sharps).collect();
        let flat_keys: BTreeSet<Key> = Key::all().filter(|k| !k.prefers_sharps()).collect();
        let all_keys: BTreeSet<Key> = Key::all().collect();

        let mut notes = BTreeMap::new();
        for midi in 0u8..=127 {
            let note = Note::from_pitch_class(midi % 12);
            let octave = (midi / 12) as i8 - 1;
            let entry = if note.is_natural() {
                let context = SpellingContext {
                    keys: all_keys.clone(),
                    dpc: midi % 12,
                    acc: Accidental::Natural,
                    octave,
                    name: format!("{}{}", note.sharp_name(), octave),
                };
                NoteEntry {
                    primary: context.clone(),
                    secondary: SpellingContext {
                        keys: BTreeSet::new(),
                        ..context
                    },
                }
            } else {
                NoteEntry {
                    primary: SpellingContext {
                        keys: sharp_keys.clone(),
                        dpc: midi % 12,
                        acc: Accidental::Sharp,
                        octave,
                        name: format!("{}{}", note.sharp_name(), octave),
                    },
                    secondary: SpellingContext {
                        keys: flat_keys.clone(),
                        dpc: midi % 12,
                        acc: Accidental::Flat,
                        octave,
                        name: format!("{}{}", note.flat_name(), octave),
                    },
                }
            };
            notes.insert(midi, entry);
        }

        Self { notes }
    }

    /// Resolve the spelling of `midi` under an estimated key.
    ///
    /// With no key estimation the primary spelling always applies.
    /// With a key, the primary applies iff the key is in the primary
    /// context's key set; otherwise the secondary does.
    pub fn resolve(&self, midi: MidiNote, key: Option<&Key>) -> Result<&SpellingContext, SpellingError> {
        let entry = self
            .notes
            .get(&midi)
            .ok_or(SpellingError::UnknownNote(midi))?;
        match key {
            Some(k) if !entry.primary.keys.contains(k) => Ok(&entry.secondary),
            _ => Ok(&entry.primary),
        }
    }

    /// Add or replace the entry for a note
    pub fn insert(&mut self, midi: MidiNote, entry: NoteEntry) {
        self.notes.insert(midi, entry);
    }

    /// Check if a note is covered
    pub fn contains(&self, midi: MidiNote) -> bool {
        self.notes.contains_key(&midi)
    }

    /// Number of covered notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Validate a table loaded from a file.
    ///
    /// Checks that the table is non-empty and that every entry stays
    /// within MIDI range with a non-empty display name.
    pub fn validate(&self) -> Result<(), SpellingError> {
        if self.notes.is_empty() {
            return Err(SpellingError::EmptyTable);
        }
        for (&midi, entry) in &self.notes {
            if midi > 127 {
                return Err(SpellingError::InvalidEntry {
                    midi,
                    reason: "midi number out of range".to_string(),
                });
            }
            for context in [&entry.primary, &entry.secondary] {
                if context.dpc > 11 {
                    return Err(SpellingError::InvalidEntry {
                        midi,
                        reason: format!("dpc {} out of range", context.dpc),
                    });
                }
                if context.name.is_empty() {
                    return Err(SpellingError::InvalidEntry {
                        midi,
                        reason: "empty display name".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Load a spelling table from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read spelling table: {:?}", path.as_ref()))?;
        let table = Self::from_yaml(&contents)?;
        debug!(entries = table.len(), "loaded spelling table");
        Ok(table)
    }

    /// Parse a spelling table from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse spelling table YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize spelling table to YAML")
    }

    /// Save the table to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write spelling table: {:?}", path.as_ref()))
    }
}

impl Default for SpellingTable {
    fn default() -> Self {
        Self::new()
    }
}
