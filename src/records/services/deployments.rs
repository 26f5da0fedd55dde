//! Deployment recording service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        Deployment, DeploymentId, Environment, NewDeployment, PageRequest, ProjectId, RecordKind,
    },
    ports::DeploymentRepository,
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request payload for recording a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDeploymentRequest {
    project_id: ProjectId,
    version: String,
    environment: String,
    #[serde(default)]
    commit_sha: Option<String>,
    #[serde(default)]
    deployed_by: Option<String>,
}

impl CreateDeploymentRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        version: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            version: version.into(),
            environment: environment.into(),
            commit_sha: None,
            deployed_by: None,
        }
    }

    /// Sets the deployed commit.
    #[must_use]
    pub fn with_commit_sha(mut self, commit_sha: impl Into<String>) -> Self {
        self.commit_sha = Some(commit_sha.into());
        self
    }

    /// Sets who triggered the deployment.
    #[must_use]
    pub fn with_deployed_by(mut self, deployed_by: impl Into<String>) -> Self {
        self.deployed_by = Some(deployed_by.into());
        self
    }
}

/// Deployment orchestration service.
#[derive(Clone)]
pub struct DeploymentService<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DeploymentService<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new deployment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a pending deployment for an existing project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank version or unknown environment,
    /// and not-found when the project does not exist.
    pub async fn create(
        &self,
        request: CreateDeploymentRequest,
    ) -> RecordServiceResult<Deployment> {
        let environment = Environment::try_from(request.environment.as_str())?;
        let draft = NewDeployment::new(
            request.project_id,
            request.version,
            environment,
            &*self.clock,
        )?
        .with_commit_sha(request.commit_sha)
        .with_deployed_by(request.deployed_by);

        let deployment = self.repository.create_deployment(&draft).await?;
        info!(
            deployment_id = %deployment.id(),
            project_id = %deployment.project_id(),
            environment = %deployment.environment(),
            version = deployment.version(),
            "deployment recorded"
        );
        Ok(deployment)
    }

    /// Fetches a deployment.
    ///
    /// # Errors
    ///
    /// Returns not-found when the deployment does not exist.
    pub async fn get(&self, id: DeploymentId) -> RecordServiceResult<Deployment> {
        let deployment = self.repository.find_deployment(id).await?;
        found(deployment, RecordKind::Deployment, id)
    }

    /// Lists a page of deployments, optionally for one project.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list(
        &self,
        project_id: Option<ProjectId>,
        page: PageRequest,
    ) -> RecordServiceResult<Vec<Deployment>> {
        Ok(self.repository.list_deployments(project_id, page).await?)
    }
}
