// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for DUET.
//!
//! This module provides pitch classes, musical keys, and the key-aware
//! note spelling table used to annotate recorded notes.

pub mod key;
pub mod spelling;

pub use key::{Key, MidiNote, Mode, Note};
pub use spelling::{Accidental, NoteEntry, SpellingContext, SpellingError, SpellingTable};
