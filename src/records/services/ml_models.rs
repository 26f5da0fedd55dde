//! Machine-learning model registration service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        MlModel, MlModelId, ModelProvenance, ModelScores, NewMlModel, PageRequest, ProjectId,
        RecordDomainError, RecordKind, UnitScore, json_object, optional_text,
    },
    ports::MlModelRepository,
};
use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Request payload for registering a model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterMlModelRequest {
    project_id: ProjectId,
    name: String,
    version: String,
    #[serde(default)]
    framework: Option<String>,
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    experiment_id: Option<String>,
    #[serde(default)]
    run_id: Option<String>,
    #[serde(default)]
    artifact_uri: Option<String>,
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    precision: Option<f64>,
    #[serde(default)]
    recall: Option<f64>,
    #[serde(default)]
    f1_score: Option<f64>,
    #[serde(default)]
    metadata: Option<Value>,
}

impl RegisterMlModelRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            version: version.into(),
            framework: None,
            model_type: None,
            experiment_id: None,
            run_id: None,
            artifact_uri: None,
            accuracy: None,
            precision: None,
            recall: None,
            f1_score: None,
            metadata: None,
        }
    }

    /// Sets the training framework.
    #[must_use]
    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    /// Sets the tracking experiment and run identifiers.
    #[must_use]
    pub fn with_tracking(
        mut self,
        experiment_id: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        self.experiment_id = Some(experiment_id.into());
        self.run_id = Some(run_id.into());
        self
    }

    /// Sets the accuracy score.
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Sets the F1 score.
    #[must_use]
    pub const fn with_f1_score(mut self, f1_score: f64) -> Self {
        self.f1_score = Some(f1_score);
        self
    }

    /// Sets opaque metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn scores(&self) -> Result<ModelScores, RecordDomainError> {
        let score =
            |field, value: Option<f64>| value.map(|raw| UnitScore::new(field, raw)).transpose();
        Ok(ModelScores {
            accuracy: score("accuracy", self.accuracy)?,
            precision: score("precision", self.precision)?,
            recall: score("recall", self.recall)?,
            f1_score: score("f1_score", self.f1_score)?,
        })
    }
}

/// Model registration orchestration service.
#[derive(Clone)]
pub struct MlModelService<R, C>
where
    R: MlModelRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MlModelService<R, C>
where
    R: MlModelRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new model registration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a model for an existing project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank names, out-of-range scores, or
    /// non-object metadata, and not-found when the project does not exist.
    pub async fn register(&self, request: RegisterMlModelRequest) -> RecordServiceResult<MlModel> {
        let scores = request.scores()?;
        let provenance = ModelProvenance {
            framework: optional_text(request.framework),
            model_type: optional_text(request.model_type),
            experiment_id: optional_text(request.experiment_id),
            run_id: optional_text(request.run_id),
            artifact_uri: optional_text(request.artifact_uri),
        };
        let mut draft =
            NewMlModel::new(request.project_id, request.name, request.version, &*self.clock)?
                .with_provenance(provenance)
                .with_scores(scores);
        if let Some(metadata) = request.metadata {
            draft = draft.with_metadata(json_object("metadata", metadata)?);
        }

        let model = self.repository.create_ml_model(&draft).await?;
        info!(
            model_id = %model.id(),
            project_id = %model.project_id(),
            model_name = model.name(),
            model_version = model.version(),
            "ml model registered"
        );
        Ok(model)
    }

    /// Fetches a registration.
    ///
    /// # Errors
    ///
    /// Returns not-found when the registration does not exist.
    pub async fn get(&self, id: MlModelId) -> RecordServiceResult<MlModel> {
        let model = self.repository.find_ml_model(id).await?;
        found(model, RecordKind::MlModel, id)
    }

    /// Lists a page of registrations for a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordServiceResult<Vec<MlModel>> {
        Ok(self.repository.list_ml_models(project_id, page).await?)
    }
}
