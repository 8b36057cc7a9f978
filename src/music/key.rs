// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes, modes, and musical keys.
//!
//! Provides the chromatic note type, major/minor modes, and the `Key`
//! type used to disambiguate note spelling ("A major" spells MIDI 61
//! as C#, "Eb major" spells it as Db).

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse note from string (e.g., "C", "C#", "Db", "F#")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" | "ES" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }

    /// Sharp-side spelling ("C#", "A#")
    pub fn sharp_name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// Flat-side spelling ("Db", "Bb"); naturals are unchanged
    pub fn flat_name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "Db",
            Note::D => "D",
            Note::Ds => "Eb",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "Gb",
            Note::G => "G",
            Note::Gs => "Ab",
            Note::A => "A",
            Note::As => "Bb",
            Note::B => "B",
        }
    }

    /// Whether this pitch class is a natural (white key)
    pub fn is_natural(self) -> bool {
        !matches!(self, Note::Cs | Note::Ds | Note::Fs | Note::Gs | Note::As)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sharp_name())
    }
}

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Parse mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" => Some(Mode::Major),
            "minor" | "min" => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Get a human-readable name for this mode
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A musical key with tonic and mode, e.g. "A major" or "Eb minor".
///
/// Enharmonic tonics collapse to one value ("Eb major" and "D# major"
/// parse to the same key); display picks the conventional spelling for
/// the key's signature side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    root: Note,
    mode: Mode,
}

impl Key {
    /// Create a new key
    pub fn new(root: Note, mode: Mode) -> Self {
        Self { root, mode }
    }

    /// Parse a key from a string like "A major", "Eb major", "F# minor"
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let root = Note::from_str(parts.next()?)?;
        let mode = Mode::from_str(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Key::new(root, mode))
    }

    /// Get the tonic
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether this key's signature spells chromatic notes with sharps.
    ///
    /// Sharp-side majors: C, G, D, A, E, B, F#. Sharp-side minors: A, E,
    /// B, F#, C#, G#. Everything else is flat-side (Db major over C#
    /// major, Eb minor over D# minor at the enharmonic seams).
    pub fn prefers_sharps(&self) -> bool {
        match self.mode {
            Mode::Major => matches!(self.root.pitch_class(), 0 | 2 | 4 | 6 | 7 | 9 | 11),
            Mode::Minor => matches!(self.root.pitch_class(), 1 | 4 | 6 | 8 | 9 | 11),
        }
    }

    /// Conventional tonic spelling for this key ("Eb", not "D#", for
    /// the flat-side keys)
    pub fn tonic_name(&self) -> &'static str {
        if self.prefers_sharps() {
            self.root.sharp_name()
        } else {
            self.root.flat_name()
        }
    }

    /// All 24 major and minor keys
    pub fn all() -> impl Iterator<Item = Key> {
        Note::ALL.iter().flat_map(|&root| {
            [Key::new(root, Mode::Major), Key::new(root, Mode::Minor)]
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_name(), self.mode)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a key name such as \"A major\" or \"Eb minor\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Key::parse(v).ok_or_else(|| E::custom(format!("invalid key name: {v:?}")))
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_pitch_class() {
        assert_eq!(Note::C.pitch_class(), 0);
        assert_eq!(Note::Cs.pitch_class(), 1);
        assert_eq!(Note::B.pitch_class(), 11);
    }

    #[test]
    fn test_note_from_str() {
        assert_eq!(Note::from_str("C"), Some(Note::C));
        assert_eq!(Note::from_str("C#"), Some(Note::Cs));
        assert_eq!(Note::from_str("Db"), Some(Note::Cs));
        assert_eq!(Note::from_str("Eb"), Some(Note::Ds));
        assert_eq!(Note::from_str("X"), None);
    }

    #[test]
    fn test_note_names() {
        assert_eq!(Note::Cs.sharp_name(), "C#");
        assert_eq!(Note::Cs.flat_name(), "Db");
        assert_eq!(Note::G.sharp_name(), "G");
        assert_eq!(Note::G.flat_name(), "G");
    }

    #[test]
    fn test_note_is_natural() {
        assert!(Note::C.is_natural());
        assert!(Note::F.is_natural());
        assert!(!Note::Cs.is_natural());
        assert!(!Note::As.is_natural());
    }

    #[test]
    fn test_key_parse() {
        let key = Key::parse("A major").unwrap();
        assert_eq!(key.root(), Note::A);
        assert_eq!(key.mode(), Mode::Major);

        let key = Key::parse("Eb major").unwrap();
        assert_eq!(key.root(), Note::Ds);
        assert_eq!(key.mode(), Mode::Major);

        assert_eq!(Key::parse("f# minor"), Some(Key::new(Note::Fs, Mode::Minor)));
        assert_eq!(Key::parse("H major"), None);
        assert_eq!(Key::parse("A"), None);
        assert_eq!(Key::parse("A major extra"), None);
    }

    #[test]
    fn test_enharmonic_keys_collapse() {
        assert_eq!(Key::parse("Eb major"), Key::parse("D# major"));
        assert_eq!(Key::parse("C# minor"), Key::parse("Db minor"));
    }

    #[test]
    fn test_prefers_sharps() {
        assert!(Key::parse("A major").unwrap().prefers_sharps());
        assert!(Key::parse("C major").unwrap().prefers_sharps());
        assert!(Key::parse("F# major").unwrap().prefers_sharps());
        assert!(!Key::parse("Eb major").unwrap().prefers_sharps());
        assert!(!Key::parse("F major").unwrap().prefers_sharps());
        assert!(!Key::parse("Db major").unwrap().prefers_sharps());

        assert!(Key::parse("E minor").unwrap().prefers_sharps());
        assert!(Key::parse("C# minor").unwrap().prefers_sharps());
        assert!(!Key::parse("D minor").unwrap().prefers_sharps());
        assert!(!Key::parse("Eb minor").unwrap().prefers_sharps());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::parse("A major").unwrap().to_string(), "A major");
        assert_eq!(Key::parse("D# major").unwrap().to_string(), "Eb major");
        assert_eq!(Key::parse("Gb minor").unwrap().to_string(), "F# minor");
    }

    #[test]
    fn test_key_all() {
        let keys: Vec<Key> = Key::all().collect();
        assert_eq!(keys.len(), 24);
        assert!(keys.contains(&Key::new(Note::C, Mode::Major)));
        assert!(keys.contains(&Key::new(Note::As, Mode::Minor)));
    }

    #[test]
    fn test_key_serde_round_trip() {
        let key = Key::parse("Eb major").unwrap();
        let yaml = serde_yaml::to_string(&key).unwrap();
        assert_eq!(yaml.trim(), "Eb major");

        let parsed: Key = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_key_deserialize_invalid() {
        let result: Result<Key, _> = serde_yaml::from_str("\"not a key\"");
        assert!(result.is_err());
    }
}
