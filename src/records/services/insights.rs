//! Aggregation views composed from several repositories.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{ProjectId, ProjectMetrics, RecordKind},
    ports::{DeploymentRepository, MetricRepository, ProjectRepository, SbomRepository},
};
use std::sync::Arc;

/// Read-only project summary service.
///
/// Each read is independent, so a view may combine rows from different
/// points in time when writers race with it.
#[derive(Clone)]
pub struct ProjectInsightService<R>
where
    R: ProjectRepository + DeploymentRepository + SbomRepository + MetricRepository,
{
    repository: Arc<R>,
}

impl<R> ProjectInsightService<R>
where
    R: ProjectRepository + DeploymentRepository + SbomRepository + MetricRepository,
{
    /// Creates a new insight service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Summarizes deployments, the latest scan, and the latest metric sample.
    ///
    /// # Errors
    ///
    /// Returns not-found when the project does not exist.
    pub async fn project_metrics(&self, id: ProjectId) -> RecordServiceResult<ProjectMetrics> {
        let project = found(
            self.repository.find_project(id).await?,
            RecordKind::Project,
            id,
        )?;
        let total_deployments = self.repository.count_deployments(id).await?;
        let latest_sbom = self.repository.latest_sbom(id).await?;
        let latest_metric = self.repository.latest_metric(id).await?;

        Ok(ProjectMetrics::compose(
            &project,
            total_deployments,
            latest_sbom.as_ref(),
            latest_metric.as_ref(),
        ))
    }
}
