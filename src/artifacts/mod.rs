//! Trained model artifacts: encoder tables, scalers, classifier
//! parameters, decision thresholds, and the trained feature order.
//! Artifacts are produced offline, loaded read-only from disk, and
//! cached process-wide; request handling never mutates them.

pub mod cache;
pub mod encoders;
pub mod model;
pub mod store;

pub use cache::*;
pub use encoders::*;
pub use model::*;
pub use store::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {path} is malformed: {detail}")]
    Malformed { path: PathBuf, detail: String },

    #[error("artifact set for {disease} is inconsistent: {detail}")]
    Inconsistent { disease: String, detail: String },
}
