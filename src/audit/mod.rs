//! Write-only prediction log collaborator.
//!
//! The pipeline appends one record per served prediction,
//! fire-and-forget: a sink failure is logged and never fails the
//! prediction response. Durable storage beyond the JSONL file is an
//! external system's concern.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;

use crate::models::PredictionRecord;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only sink for prediction records.
pub trait PredictionSink: Send + Sync {
    fn append(&self, record: &PredictionRecord) -> Result<(), AuditError>;
}

/// One JSON object per line, flushed per record.
pub struct JsonlPredictionLog {
    file: Mutex<File>,
}

impl JsonlPredictionLog {
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl PredictionSink for JsonlPredictionLog {
    fn append(&self, record: &PredictionRecord) -> Result<(), AuditError> {
        let line = serde_json::to_string(record)?;
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}
