//! Repository port for deployments.

use super::RecordRepositoryResult;
use crate::records::domain::{Deployment, DeploymentId, NewDeployment, PageRequest, ProjectId};
use async_trait::async_trait;

/// Deployment persistence contract.
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Inserts a deployment after confirming its project exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] for an unknown
    /// project; nothing is stored in that case.
    async fn create_deployment(&self, draft: &NewDeployment)
    -> RecordRepositoryResult<Deployment>;

    /// Finds a deployment by identifier.
    async fn find_deployment(&self, id: DeploymentId) -> RecordRepositoryResult<Option<Deployment>>;

    /// Returns a page of deployments in identifier order, optionally for one
    /// project.
    async fn list_deployments(
        &self,
        project_id: Option<ProjectId>,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Deployment>>;

    /// Counts deployments recorded for a project.
    async fn count_deployments(&self, project_id: ProjectId) -> RecordRepositoryResult<u64>;
}
