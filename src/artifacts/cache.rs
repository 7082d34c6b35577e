//! Process-wide artifact cache.
//!
//! Artifacts are loaded lazily on first use and shared immutably for
//! the process lifetime; concurrent requests read without contention
//! beyond a short-lived map lock. Load failures are not cached, so a
//! fixed artifact directory recovers without restart.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::store::{load_artifacts, DiseaseArtifacts};
use super::ArtifactError;
use crate::models::Disease;

pub struct ArtifactCache {
    root: PathBuf,
    loaded: RwLock<HashMap<Disease, Arc<DiseaseArtifacts>>>,
}

impl ArtifactCache {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the artifact set for a disease, loading it on first use.
    pub fn get(&self, disease: Disease) -> Result<Arc<DiseaseArtifacts>, ArtifactError> {
        if let Some(art) = self
            .loaded
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&disease)
        {
            return Ok(Arc::clone(art));
        }

        let art = Arc::new(load_artifacts(&self.root, disease)?);
        tracing::info!(
            disease = %disease.as_str(),
            features = art.feature_order.len(),
            "loaded model artifacts"
        );

        let mut map = self.loaded.write().unwrap_or_else(|e| e.into_inner());
        // A concurrent loader may have won the race; keep the first entry.
        Ok(Arc::clone(
            map.entry(disease).or_insert(art),
        ))
    }
}
