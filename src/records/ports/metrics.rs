//! Repository port for runtime metric samples.

use super::RecordRepositoryResult;
use crate::records::domain::{Metric, MetricId, NewMetric, PageRequest, ProjectId};
use async_trait::async_trait;

/// Metric persistence contract.
#[async_trait]
pub trait MetricRepository: Send + Sync {
    /// Inserts a sample after confirming its project exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] for an unknown
    /// project.
    async fn create_metric(&self, draft: &NewMetric) -> RecordRepositoryResult<Metric>;

    /// Finds a sample by identifier.
    async fn find_metric(&self, id: MetricId) -> RecordRepositoryResult<Option<Metric>>;

    /// Returns a page of samples for a project, newest `recorded_at` first.
    async fn list_metrics(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Metric>>;

    /// Returns the most recently recorded sample for a project.
    async fn latest_metric(&self, project_id: ProjectId)
    -> RecordRepositoryResult<Option<Metric>>;
}
