//! Static reference taxonomies and the enrichment join.
//!
//! The distortion and exercise catalogs are built once at startup and shared
//! read-only; concurrent analysis calls never coordinate over them.

mod builtins;
mod types;

use std::collections::HashMap;

use tracing::debug;

pub use builtins::{builtin_distortions, builtin_exercises};
pub use types::{DistortionRecord, EnrichedDistortion, ExerciseRecord};

/// A distortion identifier plus the per-invocation fields supplied by the
/// response normalizer, before the enrichment join.
#[derive(Debug, Clone)]
pub struct RawDistortion {
    pub distortion_id: String,
    pub confidence: f64,
    pub explanation: String,
}

/// Immutable reference-data catalogs with id lookup.
pub struct Catalogs {
    distortions: Vec<DistortionRecord>,
    exercises: Vec<ExerciseRecord>,
    distortion_index: HashMap<String, usize>,
}

impl Catalogs {
    /// Build catalogs from explicit record lists.
    pub fn new(distortions: Vec<DistortionRecord>, exercises: Vec<ExerciseRecord>) -> Self {
        let distortion_index = distortions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        Self {
            distortions,
            exercises,
            distortion_index,
        }
    }

    /// Build catalogs from the built-in reference data.
    pub fn builtin() -> Self {
        Self::new(builtin_distortions(), builtin_exercises())
    }

    /// All distortion records, in canonical order.
    pub fn distortions(&self) -> &[DistortionRecord] {
        &self.distortions
    }

    /// All exercise records.
    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    /// Look up a distortion record by id.
    pub fn distortion(&self, id: &str) -> Option<&DistortionRecord> {
        self.distortion_index.get(id).map(|&i| &self.distortions[i])
    }

    /// Join normalizer output against the distortion catalog.
    ///
    /// Unknown identifiers are dropped, never surfaced: the remote model is
    /// untrusted and an invented id is just noise. Input order is preserved
    /// and confidences are clamped to [0, 1].
    pub fn enrich(&self, raw: &[RawDistortion]) -> Vec<EnrichedDistortion> {
        raw.iter()
            .filter_map(|r| match self.distortion(&r.distortion_id) {
                Some(record) => Some(record.enriched(r.confidence, r.explanation.clone())),
                None => {
                    debug!(distortion_id = %r.distortion_id, "Dropping unknown distortion id");
                    None
                }
            })
            .collect()
    }

    /// Exercise ids helpful for any of the given distortion ids, in catalog
    /// order, deduplicated.
    pub fn exercises_for(&self, distortion_ids: &[&str]) -> Vec<String> {
        self.exercises
            .iter()
            .filter(|e| e.helpful_for.iter().any(|h| distortion_ids.contains(&h.as_str())))
            .map(|e| e.id.clone())
            .collect()
    }
}
