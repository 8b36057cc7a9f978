// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for DUET.
//!
//! This module provides the session configuration file: session name,
//! output directory, participant roster, and an optional spelling
//! table override.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::SpellingTable;
use crate::session::{PlayerInfo, PlayerKind, SessionRecorder, StaticSessionInfo};

/// Root configuration for a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Session metadata and settings
    #[serde(default)]
    pub session: SessionSettings,
    /// Participant roster, in participant order
    #[serde(default = "default_players")]
    pub players: Vec<PlayerInfo>,
    /// Spelling table file; the built-in table is used when absent
    #[serde(default)]
    pub table: Option<PathBuf>,
}

impl SessionConfig {
    /// Load a session configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a session configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Resolve the spelling table: the configured file if set, the
    /// built-in standard table otherwise. Loaded tables are validated.
    pub fn spelling_table(&self) -> Result<SpellingTable> {
        match &self.table {
            Some(path) => {
                let table = SpellingTable::load(path)?;
                table
                    .validate()
                    .with_context(|| format!("Invalid spelling table: {path:?}"))?;
                Ok(table)
            }
            None => Ok(SpellingTable::standard()),
        }
    }

    /// Session info source for the save-time trailer
    pub fn info_source(&self) -> StaticSessionInfo {
        StaticSessionInfo::new(self.session.name.clone(), self.players.clone())
    }

    /// Build a recorder from this configuration
    pub fn recorder(&self) -> Result<SessionRecorder> {
        Ok(SessionRecorder::new(
            Arc::new(self.spelling_table()?),
            self.session.output_dir.clone(),
            Box::new(self.info_source()),
        ))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            players: default_players(),
            table: None,
        }
    }
}

/// Session-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Session name, used as the saved-file title
    #[serde(default = "default_session_name")]
    pub name: String,
    /// Directory for saved session files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_session_name() -> String {
    "duet".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_players() -> Vec<PlayerInfo> {
    vec![
        PlayerInfo::new("Keyboard", PlayerKind::Human),
        PlayerInfo::new("DNN", PlayerKind::Dnn),
        PlayerInfo::new("Metronome", PlayerKind::Metronome),
    ]
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            name: default_session_name(),
            output_dir: default_output_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_config() {
        let yaml = r#"
session:
  name: "Morning Duet"
  output_dir: "sessions"

players:
  - name: "Keyboard"
    kind: human
  - name: "DNN"
    kind: dnn
    description: "lstm co-player"
  - name: "Click"
    kind: metronome
"#;

        let config = SessionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.session.name, "Morning Duet");
        assert_eq!(config.session.output_dir, PathBuf::from("sessions"));
        assert_eq!(config.players.len(), 3);
        assert_eq!(config.players[1].kind, PlayerKind::Dnn);
        assert_eq!(
            config.players[1].description.as_deref(),
            Some("lstm co-player")
        );
        assert_eq!(config.table, None);
    }

    #[test]
    fn test_default_values() {
        let config = SessionConfig::from_yaml("session:\n  name: \"Minimal\"\n").unwrap();
        assert_eq!(config.session.name, "Minimal");
        assert_eq!(config.session.output_dir, PathBuf::from("."));
        assert_eq!(config.players.len(), 3);
    }

    #[test]
    fn test_round_trip() {
        let original = SessionConfig {
            session: SessionSettings {
                name: "Round Trip".to_string(),
                output_dir: PathBuf::from("out"),
            },
            players: default_players(),
            table: Some(PathBuf::from("tables/custom.yaml")),
        };

        let yaml = original.to_yaml().unwrap();
        let parsed = SessionConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_spelling_table_defaults_to_standard() {
        let config = SessionConfig::default();
        let table = config.spelling_table().unwrap();
        assert_eq!(table.len(), 128);
    }

    #[test]
    fn test_spelling_table_missing_file_fails() {
        let config = SessionConfig {
            table: Some(PathBuf::from("/nonexistent/table.yaml")),
            ..SessionConfig::default()
        };
        assert!(config.spelling_table().is_err());
    }

    #[test]
    fn test_info_source_filters_metronome() {
        use crate::session::SessionInfo;

        let config = SessionConfig::default();
        let info = config.info_source();
        let participants = info.participants();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].kind, PlayerKind::Human);
        assert_eq!(participants[1].kind, PlayerKind::Dnn);
    }
}
