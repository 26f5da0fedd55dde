//! Repository port for machine-learning model registrations.

use super::RecordRepositoryResult;
use crate::records::domain::{MlModel, MlModelId, NewMlModel, PageRequest, ProjectId};
use async_trait::async_trait;

/// Model registration persistence contract.
#[async_trait]
pub trait MlModelRepository: Send + Sync {
    /// Inserts a registration after confirming its project exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] for an unknown
    /// project.
    async fn create_ml_model(&self, draft: &NewMlModel) -> RecordRepositoryResult<MlModel>;

    /// Finds a registration by identifier.
    async fn find_ml_model(&self, id: MlModelId) -> RecordRepositoryResult<Option<MlModel>>;

    /// Returns a page of registrations for a project in identifier order.
    async fn list_ml_models(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<MlModel>>;
}
