//! Writes envelopes to timestamped JSON artifacts.
use crate::model::ResultEnvelope;
use chrono::{DateTime, Local};
use lookout_common::LookoutError;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Success,
    Error,
}

/// Outcome of one persist call. `filename` is set even on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    pub status: ArtifactStatus,
    pub filename: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PersistedArtifact {
    pub fn into_result(self) -> Result<PathBuf, LookoutError> {
        match self.status {
            ArtifactStatus::Success => Ok(self.filename),
            ArtifactStatus::Error => Err(LookoutError::Persistence(format!(
                "{}: {}",
                self.filename.display(),
                self.message.unwrap_or_default()
            ))),
        }
    }
}

/// Name of the artifact written at `at`: `<prefix>_<YYYYMMDD_HHMMSS>.json`.
pub fn artifact_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}.json", at.format(TIMESTAMP_FORMAT))
}

pub struct ResultPersister {
    dir: PathBuf,
}

impl ResultPersister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `envelope` as 4-space indented JSON. Never overwrites: a second
    /// call with the same prefix inside one second reports an error.
    pub fn persist(&self, envelope: &ResultEnvelope, prefix: &str) -> PersistedArtifact {
        self.persist_at(envelope, prefix, Local::now())
    }

    pub fn persist_at(
        &self,
        envelope: &ResultEnvelope,
        prefix: &str,
        at: DateTime<Local>,
    ) -> PersistedArtifact {
        let filename = self.dir.join(artifact_name(prefix, at));
        match write_new(&filename, envelope) {
            Ok(()) => {
                tracing::info!("Results saved to {}", filename.display());
                PersistedArtifact {
                    status: ArtifactStatus::Success,
                    filename,
                    message: None,
                }
            }
            Err(e) => {
                tracing::error!("Error saving results to {}: {e}", filename.display());
                PersistedArtifact {
                    status: ArtifactStatus::Error,
                    filename,
                    message: Some(e.to_string()),
                }
            }
        }
    }
}

fn write_new(path: &Path, envelope: &ResultEnvelope) -> io::Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    envelope.serialize(&mut ser)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(&buf)?;
    file.flush()
}
