// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session recording and persistence.
//!
//! This module provides:
//! - Per-tick record types and the session log
//! - The session recorder (accumulate, annotate, save)
//! - The saved-session file format

pub mod export;
pub mod log;
pub mod recorder;

pub use export::{read_session, session_filename, ExportError, SessionFile, FORMAT_VERSION};
pub use log::{
    AnnotatedNote, BeepEvent, LogEntry, NoteObservation, ParticipantInfo, PlayerInfo, PlayerKind,
    TickInput, TickRecord, TrailerRecord,
};
pub use recorder::{
    RecorderError, RecorderState, SessionInfo, SessionRecorder, StaticSessionInfo,
};
