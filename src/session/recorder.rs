// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session recording.
//!
//! `SessionRecorder` keeps the whole generated result of a duet
//! session: one record per clock tick, appended in sync with the
//! external clock, persisted to a uniquely numbered file on demand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::music::{SpellingError, SpellingTable};

use super::export::{self, ExportError};
use super::log::{
    AnnotatedNote, LogEntry, ParticipantInfo, PlayerInfo, PlayerKind, TickInput, TickRecord,
    TrailerRecord,
};

/// Recorder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// Accepting tick records
    Accumulating,
    /// Serializing the log to disk
    Saving,
}

impl Default for RecorderState {
    fn default() -> Self {
        RecorderState::Accumulating
    }
}

/// Errors from recorder operations
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error(transparent)]
    Spelling(#[from] SpellingError),
    #[error(transparent)]
    Export(#[from] ExportError),
    /// The trailer needs two non-metronome participants
    #[error("expected two non-metronome participants, found {found}")]
    MissingParticipants { found: usize },
    /// Tick delivered while a save is in progress
    #[error("recorder is saving; ticks are only accepted while accumulating")]
    Busy,
}

/// Source of session metadata for the save-time trailer
pub trait SessionInfo {
    /// Current session title
    fn session_title(&self) -> String;
    /// Non-metronome participants, in participant order
    fn participants(&self) -> Vec<PlayerInfo>;
}

/// Plain-data `SessionInfo` implementation.
///
/// Metronome entries in the roster are filtered out of
/// `participants()`, so the full player list can be passed as-is.
#[derive(Debug, Clone)]
pub struct StaticSessionInfo {
    title: String,
    players: Vec<PlayerInfo>,
}

impl StaticSessionInfo {
    /// Create session info from a title and player roster
    pub fn new(title: impl Into<String>, players: Vec<PlayerInfo>) -> Self {
        Self {
            title: title.into(),
            players,
        }
    }
}

impl SessionInfo for StaticSessionInfo {
    fn session_title(&self) -> String {
        self.title.clone()
    }

    fn participants(&self) -> Vec<PlayerInfo> {
        self.players
            .iter()
            .filter(|p| p.kind != PlayerKind::Metronome)
            .cloned()
            .collect()
    }
}

/// Accumulates annotated tick records and persists them on demand.
///
/// The log is exclusively owned: appended to by `tick`, cleared only on
/// the successful edge of `save`. The save counter starts at 1 and is
/// never reset within a session, so repeated saves produce distinct,
/// monotonically numbered files.
pub struct SessionRecorder {
    table: Arc<SpellingTable>,
    info: Box<dyn SessionInfo>,
    output_dir: PathBuf,
    log: Vec<TickRecord>,
    save_counter: u32,
    state: RecorderState,
}

impl SessionRecorder {
    /// Create a new recorder
    pub fn new(
        table: Arc<SpellingTable>,
        output_dir: impl Into<PathBuf>,
        info: Box<dyn SessionInfo>,
    ) -> Self {
        Self {
            table,
            info,
            output_dir: output_dir.into(),
            log: Vec::new(),
            save_counter: 1,
            state: RecorderState::Accumulating,
        }
    }

    /// Current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Counter used for the next save
    pub fn save_counter(&self) -> u32 {
        self.save_counter
    }

    /// Records accumulated since the last save
    pub fn records(&self) -> &[TickRecord] {
        &self.log
    }

    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Output directory for saved files
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Record one clock tick.
    ///
    /// The observations are copied out of `input`; the caller may reuse
    /// or mutate its buffers as soon as the call returns. Both players
    /// are spelled against the key estimation carried by the DNN
    /// observation, and the record lands at the end of the log.
    pub fn tick(&mut self, input: &TickInput) -> Result<(), RecorderError> {
        if self.state != RecorderState::Accumulating {
            return Err(RecorderError::Busy);
        }

        let dnn = input.dnn.clone();
        let human = input.human.clone();
        let key = dnn.key_estimation;

        let player1 = AnnotatedNote::new(&human, self.table.resolve(human.midi, key.as_ref())?);
        let player2 = AnnotatedNote::new(&dnn, self.table.resolve(dnn.midi, key.as_ref())?);

        self.log.push(TickRecord {
            player1,
            player2,
            metronome: input.metronome,
            key,
        });
        Ok(())
    }

    /// Persist the log and start a fresh one.
    ///
    /// Writes every tick record plus a closing trailer to
    /// `generatedDuet<N>.yaml` in the output directory. The log is
    /// cleared and the counter advanced only after the write succeeds;
    /// on failure both are left untouched, so a retry is safe and
    /// cannot duplicate a file.
    pub fn save(&mut self) -> Result<PathBuf, RecorderError> {
        self.state = RecorderState::Saving;
        let result = self.save_log();
        self.state = RecorderState::Accumulating;
        result
    }

    fn save_log(&mut self) -> Result<PathBuf, RecorderError> {
        let participants = self.info.participants();
        let found = participants.len();
        let mut participants = participants.into_iter();
        let (Some(player1), Some(player2)) = (participants.next(), participants.next()) else {
            return Err(RecorderError::MissingParticipants { found });
        };

        let trailer = TrailerRecord {
            title: self.info.session_title(),
            info: ParticipantInfo { player1, player2 },
        };

        // The stored log holds only tick records; the trailer joins the
        // serialized stream as its final element, so a failed write
        // leaves the in-memory log exactly as it was.
        let entries: Vec<LogEntry> = self
            .log
            .iter()
            .cloned()
            .map(LogEntry::Tick)
            .chain(std::iter::once(LogEntry::Trailer(trailer)))
            .collect();

        let path = export::write_session(&self.output_dir, self.save_counter, &entries)?;

        info!(path = %path.display(), records = self.log.len(), "session saved");
        self.log.clear();
        self.save_counter += 1;
        Ok(path)
    }
}
