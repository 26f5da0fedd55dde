//! Machine-learning model registrations.

use super::labels::storage_label;
use super::{JsonObject, MlModelId, ProjectId, RecordDomainError, UnitScore, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

storage_label! {
    /// Whether drift has been detected for a model, stored as `true`/`false`.
    DriftFlag("drift flag") {
        /// Live behaviour diverges from the training baseline.
        #[serde(rename = "true")]
        Detected => "true",
        /// No drift observed.
        #[serde(rename = "false")]
        Clear => "false",
    }
}

impl Default for DriftFlag {
    fn default() -> Self {
        Self::Clear
    }
}

/// Evaluation scores, each in `0..=1` when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    /// Classification accuracy.
    pub accuracy: Option<UnitScore>,
    /// Precision.
    pub precision: Option<UnitScore>,
    /// Recall.
    pub recall: Option<UnitScore>,
    /// Harmonic mean of precision and recall.
    pub f1_score: Option<UnitScore>,
}

/// Experiment-tracking coordinates and descriptive labels of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProvenance {
    /// Training framework (e.g. `pytorch`).
    pub framework: Option<String>,
    /// Problem type (e.g. `classification`).
    pub model_type: Option<String>,
    /// Tracking experiment identifier.
    pub experiment_id: Option<String>,
    /// Tracking run identifier.
    pub run_id: Option<String>,
    /// Location of the stored model artifact.
    pub artifact_uri: Option<String>,
}

/// Draft of a model registration awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMlModel {
    project_id: ProjectId,
    name: String,
    version: String,
    provenance: ModelProvenance,
    scores: ModelScores,
    metadata: Option<JsonObject>,
    registered_at: DateTime<Utc>,
}

impl NewMlModel {
    /// Creates a registration draft stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when `name` or `version` is
    /// blank.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        version: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, RecordDomainError> {
        Ok(Self {
            project_id,
            name: required_text("name", name)?,
            version: required_text("version", version)?,
            provenance: ModelProvenance::default(),
            scores: ModelScores::default(),
            metadata: None,
            registered_at: clock.utc(),
        })
    }

    /// Sets tracking coordinates and labels.
    #[must_use]
    pub fn with_provenance(mut self, provenance: ModelProvenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Sets evaluation scores.
    #[must_use]
    pub const fn with_scores(mut self, scores: ModelScores) -> Self {
        self.scores = scores;
        self
    }

    /// Sets opaque metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: JsonObject) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns tracking coordinates and labels.
    #[must_use]
    pub const fn provenance(&self) -> &ModelProvenance {
        &self.provenance
    }

    /// Returns evaluation scores.
    #[must_use]
    pub const fn scores(&self) -> ModelScores {
        self.scores
    }

    /// Returns opaque metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&JsonObject> {
        self.metadata.as_ref()
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

/// Immutable model registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlModel {
    id: MlModelId,
    project_id: ProjectId,
    name: String,
    version: String,
    #[serde(flatten)]
    provenance: ModelProvenance,
    #[serde(flatten)]
    scores: ModelScores,
    drift_detected: DriftFlag,
    drift_score: Option<f64>,
    registered_at: DateTime<Utc>,
    last_prediction_at: Option<DateTime<Utc>>,
    metadata: Option<JsonObject>,
}

/// Parameter object for reconstructing a persisted model registration.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedMlModelData {
    /// Persisted identifier.
    pub id: MlModelId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Model name.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Tracking coordinates and labels.
    pub provenance: ModelProvenance,
    /// Evaluation scores.
    pub scores: ModelScores,
    /// Drift flag.
    pub drift_detected: DriftFlag,
    /// Drift magnitude.
    pub drift_score: Option<f64>,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Most recent prediction timestamp.
    pub last_prediction_at: Option<DateTime<Utc>>,
    /// Opaque metadata.
    pub metadata: Option<JsonObject>,
}

impl MlModel {
    /// Materializes a draft under a store-assigned identifier.
    ///
    /// New registrations start without drift and without predictions.
    #[must_use]
    pub fn from_new(id: MlModelId, draft: NewMlModel) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            name: draft.name,
            version: draft.version,
            provenance: draft.provenance,
            scores: draft.scores,
            drift_detected: DriftFlag::Clear,
            drift_score: None,
            registered_at: draft.registered_at,
            last_prediction_at: None,
            metadata: draft.metadata,
        }
    }

    /// Reconstructs a registration from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMlModelData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            version: data.version,
            provenance: data.provenance,
            scores: data.scores,
            drift_detected: data.drift_detected,
            drift_score: data.drift_score,
            registered_at: data.registered_at,
            last_prediction_at: data.last_prediction_at,
            metadata: data.metadata,
        }
    }

    /// Returns the registration identifier.
    #[must_use]
    pub const fn id(&self) -> MlModelId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns tracking coordinates and labels.
    #[must_use]
    pub const fn provenance(&self) -> &ModelProvenance {
        &self.provenance
    }

    /// Returns evaluation scores.
    #[must_use]
    pub const fn scores(&self) -> ModelScores {
        self.scores
    }

    /// Returns the drift flag.
    #[must_use]
    pub const fn drift_detected(&self) -> DriftFlag {
        self.drift_detected
    }

    /// Returns the drift magnitude, if measured.
    #[must_use]
    pub const fn drift_score(&self) -> Option<f64> {
        self.drift_score
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the most recent prediction timestamp, if any.
    #[must_use]
    pub const fn last_prediction_at(&self) -> Option<DateTime<Utc>> {
        self.last_prediction_at
    }

    /// Returns opaque metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&JsonObject> {
        self.metadata.as_ref()
    }
}
