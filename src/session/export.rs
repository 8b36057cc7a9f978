// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Saved-session file format.
//!
//! Each save produces one versioned YAML document named
//! `generatedDuet<N>.yaml`, holding the tick records in chronological
//! order closed by a single trailer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::log::LogEntry;

/// Format version written to and expected from session files
pub const FORMAT_VERSION: u32 = 1;

/// Errors while writing or reading session files
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize session log")]
    Serialize(#[source] serde_yaml::Error),
    #[error("failed to write session file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read session file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse session file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unsupported session file version {found}, expected {}", FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },
}

/// On-disk shape of one saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Format version
    pub version: u32,
    /// Tick records in call order, then exactly one trailer
    pub entries: Vec<LogEntry>,
}

/// File name for the Nth save of a session
pub fn session_filename(counter: u32) -> String {
    format!("generatedDuet{counter}.yaml")
}

/// Write one session file into `dir`; returns the path written
pub fn write_session(dir: &Path, counter: u32, entries: &[LogEntry]) -> Result<PathBuf, ExportError> {
    let document = SessionFile {
        version: FORMAT_VERSION,
        entries: entries.to_vec(),
    };
    let yaml = serde_yaml::to_string(&document).map_err(ExportError::Serialize)?;

    let path = dir.join(session_filename(counter));
    fs::write(&path, yaml).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Read a session file back, rejecting unknown versions
pub fn read_session<P: AsRef<Path>>(path: P) -> Result<SessionFile, ExportError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SessionFile = serde_yaml::from_str(&contents).map_err(|source| ExportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if file.version != FORMAT_VERSION {
        return Err(ExportError::UnsupportedVersion { found: file.version });
    }
    Ok(file)
}
