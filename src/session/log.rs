// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session log record types.
//!
//! One `TickRecord` is appended per clock tick; a single
//! `TrailerRecord` describing the session and its participants closes
//! every saved file.

use serde::{Deserialize, Serialize};

use crate::music::{Accidental, Key, MidiNote, SpellingContext};

/// Raw note input for one player on one tick.
///
/// Produced by upstream detection/input logic and consumed immediately;
/// only the annotated copy is ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteObservation {
    /// MIDI note number (0-127)
    pub midi: MidiNote,
    /// Estimated key in force, if any
    pub key_estimation: Option<Key>,
}

impl NoteObservation {
    /// Create a new observation
    pub fn new(midi: MidiNote, key_estimation: Option<Key>) -> Self {
        Self {
            midi,
            key_estimation,
        }
    }
}

/// A note annotated with its spelling under the tick's key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNote {
    /// MIDI note number (0-127)
    pub midi: MidiNote,
    /// Degree/pitch class for notation
    pub dpc: u8,
    /// Accidental symbol
    pub acc: Accidental,
    /// Octave (C4 = MIDI 60)
    pub octave: i8,
    /// Display name, e.g. "C#4"
    pub name: String,
}

impl AnnotatedNote {
    /// Annotate an observation with a resolved spelling
    pub fn new(observation: &NoteObservation, spelling: &SpellingContext) -> Self {
        Self {
            midi: observation.midi,
            dpc: spelling.dpc,
            acc: spelling.acc,
            octave: spelling.octave,
            name: spelling.name.clone(),
        }
    }
}

/// Metronome beep for one tick, recorded verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeepEvent {
    /// Beat position within the bar
    pub beat: u32,
    /// Whether this beat is the accented downbeat
    #[serde(default)]
    pub accent: bool,
}

impl BeepEvent {
    /// Create a new beep event
    pub fn new(beat: u32, accent: bool) -> Self {
        Self { beat, accent }
    }
}

/// Per-tick input: the most recent note from each participant, in the
/// order the sequencer delivers them
#[derive(Debug, Clone, PartialEq)]
pub struct TickInput {
    /// DNN co-player note, carrying the shared key estimation
    pub dnn: NoteObservation,
    /// Human keyboardist note
    pub human: NoteObservation,
    /// Metronome beep
    pub metronome: BeepEvent,
}

/// One appended record per clock tick; immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Human keyboardist, annotated
    pub player1: AnnotatedNote,
    /// DNN co-player, annotated
    pub player2: AnnotatedNote,
    /// Metronome beep
    pub metronome: BeepEvent,
    /// Key estimation shared by both annotations
    pub key: Option<Key>,
}

/// Participant role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Dnn,
    Metronome,
}

/// Display info for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Display name
    pub name: String,
    /// Participant role
    pub kind: PlayerKind,
    /// Free-form description (model name, input device, ...)
    #[serde(default)]
    pub description: Option<String>,
}

impl PlayerInfo {
    /// Create a new player info
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Session summary appended once per save, after all tick records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailerRecord {
    /// Session title
    pub title: String,
    /// The two non-metronome participants
    pub info: ParticipantInfo,
}

/// Participant block of the trailer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub player1: PlayerInfo,
    pub player2: PlayerInfo,
}

/// One element of a saved session file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    Tick(TickRecord),
    Trailer(TrailerRecord),
}

impl LogEntry {
    /// Check if this entry is a trailer
    pub fn is_trailer(&self) -> bool {
        matches!(self, LogEntry::Trailer(_))
    }
}
