//! CI/CD pipeline definitions.

use super::labels::storage_label;
use super::{JsonObject, Percentage, PipelineId, ProjectId, RecordDomainError, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

storage_label! {
    /// Kind of automation a pipeline performs.
    PipelineType("pipeline type") {
        /// Continuous integration.
        Ci => "ci",
        /// Continuous delivery.
        Cd => "cd",
        /// Security scanning.
        Security => "security",
        /// Model training or evaluation.
        Ml => "ml",
    }
}

storage_label! {
    /// Execution state of a pipeline.
    PipelineStatus("pipeline status") {
        /// Not running.
        Idle => "idle",
        /// Currently executing.
        Running => "running",
        /// Last run succeeded.
        Success => "success",
        /// Last run failed.
        Failed => "failed",
    }
}

/// Draft of a pipeline definition awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPipeline {
    project_id: ProjectId,
    name: String,
    pipeline_type: PipelineType,
    config: JsonObject,
    created_at: DateTime<Utc>,
}

impl NewPipeline {
    /// Creates a pipeline draft stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when `name` is blank.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        pipeline_type: PipelineType,
        config: JsonObject,
        clock: &impl Clock,
    ) -> Result<Self, RecordDomainError> {
        Ok(Self {
            project_id,
            name: required_text("name", name)?,
            pipeline_type,
            config,
            created_at: clock.utc(),
        })
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pipeline type.
    #[must_use]
    pub const fn pipeline_type(&self) -> PipelineType {
        self.pipeline_type
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &JsonObject {
        &self.config
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Persisted pipeline definition with its run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    id: PipelineId,
    project_id: ProjectId,
    name: String,
    pipeline_type: PipelineType,
    config: JsonObject,
    status: PipelineStatus,
    last_run_at: Option<DateTime<Utc>>,
    last_run_duration: Option<u64>,
    success_rate: Percentage,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedPipelineData {
    /// Persisted identifier.
    pub id: PipelineId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Pipeline name.
    pub name: String,
    /// Pipeline type.
    pub pipeline_type: PipelineType,
    /// Pipeline configuration.
    pub config: JsonObject,
    /// Execution state.
    pub status: PipelineStatus,
    /// Start of the most recent run.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Duration of the most recent run in seconds.
    pub last_run_duration: Option<u64>,
    /// Share of successful runs.
    pub success_rate: Percentage,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Pipeline {
    /// Materializes a draft under a store-assigned identifier.
    ///
    /// New pipelines are idle with a full success rate and no runs.
    #[must_use]
    pub fn from_new(id: PipelineId, draft: NewPipeline) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            name: draft.name,
            pipeline_type: draft.pipeline_type,
            config: draft.config,
            status: PipelineStatus::Idle,
            last_run_at: None,
            last_run_duration: None,
            success_rate: Percentage::FULL,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }

    /// Reconstructs a pipeline from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPipelineData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            pipeline_type: data.pipeline_type,
            config: data.config,
            status: data.status,
            last_run_at: data.last_run_at,
            last_run_duration: data.last_run_duration,
            success_rate: data.success_rate,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the pipeline identifier.
    #[must_use]
    pub const fn id(&self) -> PipelineId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pipeline type.
    #[must_use]
    pub const fn pipeline_type(&self) -> PipelineType {
        self.pipeline_type
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &JsonObject {
        &self.config
    }

    /// Returns the execution state.
    #[must_use]
    pub const fn status(&self) -> PipelineStatus {
        self.status
    }

    /// Returns the start of the most recent run, if any.
    #[must_use]
    pub const fn last_run_at(&self) -> Option<DateTime<Utc>> {
        self.last_run_at
    }

    /// Returns the duration of the most recent run in seconds, if any.
    #[must_use]
    pub const fn last_run_duration(&self) -> Option<u64> {
        self.last_run_duration
    }

    /// Returns the share of successful runs.
    #[must_use]
    pub const fn success_rate(&self) -> Percentage {
        self.success_rate
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
