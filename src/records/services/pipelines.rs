//! Pipeline definition service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        NewPipeline, PageRequest, Pipeline, PipelineId, PipelineType, ProjectId, RecordKind,
        json_object,
    },
    ports::PipelineRepository,
};
use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Request payload for defining a pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePipelineRequest {
    project_id: ProjectId,
    name: String,
    pipeline_type: String,
    config: Value,
}

impl CreatePipelineRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        pipeline_type: impl Into<String>,
        config: Value,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            pipeline_type: pipeline_type.into(),
            config,
        }
    }
}

/// Pipeline orchestration service.
#[derive(Clone)]
pub struct PipelineService<R, C>
where
    R: PipelineRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> PipelineService<R, C>
where
    R: PipelineRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new pipeline service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Defines an idle pipeline for an existing project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, unknown type, or
    /// non-object config, and not-found when the project does not exist.
    pub async fn create(&self, request: CreatePipelineRequest) -> RecordServiceResult<Pipeline> {
        let pipeline_type = PipelineType::try_from(request.pipeline_type.as_str())?;
        let config = json_object("config", request.config)?;
        let draft = NewPipeline::new(
            request.project_id,
            request.name,
            pipeline_type,
            config,
            &*self.clock,
        )?;

        let pipeline = self.repository.create_pipeline(&draft).await?;
        info!(
            pipeline_id = %pipeline.id(),
            project_id = %pipeline.project_id(),
            pipeline_type = %pipeline.pipeline_type(),
            "pipeline created"
        );
        Ok(pipeline)
    }

    /// Fetches a pipeline.
    ///
    /// # Errors
    ///
    /// Returns not-found when the pipeline does not exist.
    pub async fn get(&self, id: PipelineId) -> RecordServiceResult<Pipeline> {
        let pipeline = self.repository.find_pipeline(id).await?;
        found(pipeline, RecordKind::Pipeline, id)
    }

    /// Lists a page of pipelines for a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordServiceResult<Vec<Pipeline>> {
        Ok(self.repository.list_pipelines(project_id, page).await?)
    }
}
