// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! DUET - session recorder for a live human/DNN musical duet.
//!
//! On every clock tick the recorder receives the most recent note from
//! each participant, annotates the two player notes with their spelling
//! under the currently estimated key, and appends one record to the
//! session log. A save trigger persists the log as a uniquely numbered
//! file and starts a fresh one.

pub mod config;
pub mod music;
pub mod session;

pub use config::SessionConfig;
pub use music::{Key, SpellingTable};
pub use session::{SessionRecorder, TickInput};
