//! Repository port for pipeline definitions.

use super::RecordRepositoryResult;
use crate::records::domain::{NewPipeline, PageRequest, Pipeline, PipelineId, ProjectId};
use async_trait::async_trait;

/// Pipeline persistence contract.
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// Inserts a pipeline after confirming its project exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] for an unknown
    /// project.
    async fn create_pipeline(&self, draft: &NewPipeline) -> RecordRepositoryResult<Pipeline>;

    /// Finds a pipeline by identifier.
    async fn find_pipeline(&self, id: PipelineId) -> RecordRepositoryResult<Option<Pipeline>>;

    /// Returns a page of pipelines for a project in identifier order.
    async fn list_pipelines(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Pipeline>>;
}
