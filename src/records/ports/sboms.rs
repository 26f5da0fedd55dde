//! Repository port for SBOM scans.

use super::RecordRepositoryResult;
use crate::records::domain::{NewSbom, ProjectId, Sbom, SbomId};
use async_trait::async_trait;

/// SBOM persistence contract.
#[async_trait]
pub trait SbomRepository: Send + Sync {
    /// Inserts a scan after confirming its project exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] for an unknown
    /// project.
    async fn create_sbom(&self, draft: &NewSbom) -> RecordRepositoryResult<Sbom>;

    /// Finds a scan by identifier.
    async fn find_sbom(&self, id: SbomId) -> RecordRepositoryResult<Option<Sbom>>;

    /// Returns every scan for a project, newest `generated_at` first.
    ///
    /// Ties are broken by descending identifier. An unknown project yields an
    /// empty list.
    async fn list_sboms(&self, project_id: ProjectId) -> RecordRepositoryResult<Vec<Sbom>>;

    /// Returns the most recently generated scan for a project.
    async fn latest_sbom(&self, project_id: ProjectId) -> RecordRepositoryResult<Option<Sbom>>;
}
