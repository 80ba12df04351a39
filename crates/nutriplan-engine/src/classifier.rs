// ABOUTME: Classifier port and the linear-model adapter loaded from a JSON artifact
// ABOUTME: Scores every label against the feature vector and picks the argmax
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::error::{EngineError, EngineResult};
use crate::features::{FeatureRecord, NUMERIC_FEATURE_COUNT};
use crate::models::MealSlot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Opaque label-prediction capability.
///
/// Wraps a pre-trained, externally supplied model; the engine never inspects
/// it beyond joining the returned label against stored recommendation
/// labels. Implementations are loaded once at process start and shared
/// read-only across requests.
pub trait Classifier: Send + Sync {
    /// Predict a recommendation label for one feature record.
    fn predict(&self, features: &FeatureRecord) -> EngineResult<String>;
}

/// Serialized multi-class linear model.
///
/// One coefficient row per label, covering the numeric feature block
/// followed by a one-hot slot block in `slots` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Recommendation labels, one per coefficient row
    pub labels: Vec<String>,
    /// Slot names defining the one-hot block order
    pub slots: Vec<String>,
    /// Per-label coefficient vectors
    pub coefficients: Vec<Vec<f64>>,
    /// Per-label intercepts
    pub intercepts: Vec<f64>,
}

/// Linear scorer over the fixed feature vector; prediction is the
/// highest-scoring label.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: ModelArtifact,
}

impl LinearClassifier {
    /// Validate artifact dimensions and build the classifier.
    pub fn from_artifact(artifact: ModelArtifact) -> EngineResult<Self> {
        if artifact.labels.is_empty() {
            return Err(EngineError::Model("artifact declares no labels".into()));
        }
        if artifact.coefficients.len() != artifact.labels.len()
            || artifact.intercepts.len() != artifact.labels.len()
        {
            return Err(EngineError::Model(format!(
                "artifact declares {} labels but {} coefficient rows and {} intercepts",
                artifact.labels.len(),
                artifact.coefficients.len(),
                artifact.intercepts.len()
            )));
        }
        let expected = NUMERIC_FEATURE_COUNT + artifact.slots.len();
        if let Some(row) = artifact
            .coefficients
            .iter()
            .find(|row| row.len() != expected)
        {
            return Err(EngineError::Model(format!(
                "coefficient row has {} entries, expected {expected}",
                row.len()
            )));
        }
        for slot in MealSlot::ORDERED {
            if !artifact.slots.iter().any(|s| s == slot.as_str()) {
                return Err(EngineError::Model(format!(
                    "artifact is missing slot '{}'",
                    slot.as_str()
                )));
            }
        }
        Ok(Self { artifact })
    }

    /// Load and validate an artifact from a JSON file.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::Model(format!("failed to read {}: {e}", path.display())))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Model(format!("failed to parse {}: {e}", path.display())))?;
        Self::from_artifact(artifact)
    }

    /// Labels this model can predict.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    fn feature_vector(&self, features: &FeatureRecord) -> Vec<f64> {
        let mut vector = features.numeric_features().to_vec();
        for slot_name in &self.artifact.slots {
            vector.push(f64::from(u8::from(slot_name == features.slot.as_str())));
        }
        vector
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureRecord) -> EngineResult<String> {
        let vector = self.feature_vector(features);
        self.artifact
            .labels
            .iter()
            .zip(&self.artifact.coefficients)
            .zip(&self.artifact.intercepts)
            .map(|((label, row), intercept)| {
                let dot: f64 = row.iter().zip(&vector).map(|(c, x)| c * x).sum();
                (label, dot + intercept)
            })
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(label, _)| label.clone())
            .ok_or_else(|| EngineError::Model("artifact declares no labels".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use crate::models::{Preference, UserProfile};

    fn artifact() -> ModelArtifact {
        // Two labels; "alta" wins whenever the sweet flag is set.
        ModelArtifact {
            labels: vec!["alta".into(), "baja".into()],
            slots: vec!["Desayuno".into(), "Almuerzo".into(), "Merienda".into()],
            coefficients: vec![
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            intercepts: vec![0.1, 0.0],
        }
    }

    fn record(preference: Preference) -> FeatureRecord {
        let profile =
            UserProfile::new(35, 175.0, 175.0, vec!["ninguna".into()], preference, 2).unwrap();
        FeatureBuilder::build(&profile, MealSlot::Lunch)
    }

    #[test]
    fn predicts_argmax_label() {
        let model = LinearClassifier::from_artifact(artifact()).unwrap();
        assert_eq!(model.predict(&record(Preference::Sweet)).unwrap(), "alta");
        assert_eq!(model.predict(&record(Preference::Savory)).unwrap(), "baja");
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let mut bad = artifact();
        bad.coefficients[0].pop();
        assert!(matches!(
            LinearClassifier::from_artifact(bad),
            Err(EngineError::Model(_))
        ));
    }

    #[test]
    fn rejects_missing_slot() {
        let mut bad = artifact();
        bad.slots = vec!["Desayuno".into(), "Almuerzo".into()];
        bad.coefficients = vec![vec![0.0; 9], vec![0.0; 9]];
        assert!(matches!(
            LinearClassifier::from_artifact(bad),
            Err(EngineError::Model(_))
        ));
    }

    #[test]
    fn rejects_empty_label_set() {
        let bad = ModelArtifact {
            labels: vec![],
            slots: vec![],
            coefficients: vec![],
            intercepts: vec![],
        };
        assert!(matches!(
            LinearClassifier::from_artifact(bad),
            Err(EngineError::Model(_))
        ));
    }

    #[test]
    fn artifact_round_trips_through_json() {
        let json = serde_json::to_string(&artifact()).unwrap();
        let parsed: ModelArtifact = serde_json::from_str(&json).unwrap();
        let model = LinearClassifier::from_artifact(parsed).unwrap();
        assert_eq!(model.labels(), ["alta", "baja"]);
    }

    #[test]
    fn loads_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, serde_json::to_string(&artifact()).unwrap()).unwrap();

        let model = LinearClassifier::from_path(&path).unwrap();
        assert_eq!(model.labels(), ["alta", "baja"]);
    }

    #[test]
    fn missing_artifact_file_is_a_model_error() {
        let result = LinearClassifier::from_path(Path::new("/nonexistent/classifier.json"));
        assert!(matches!(result, Err(EngineError::Model(_))));
    }
}
