//! Repository port for projects.

use super::RecordRepositoryResult;
use crate::records::domain::{
    NewProject, PageRequest, Project, ProjectChanges, ProjectId, ProjectName,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Inserts a project and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::DuplicateProjectName`] when the
    /// name is taken.
    async fn create_project(&self, draft: &NewProject) -> RecordRepositoryResult<Project>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> RecordRepositoryResult<Option<Project>>;

    /// Finds a project by its unique name.
    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> RecordRepositoryResult<Option<Project>>;

    /// Returns a page of projects in identifier order.
    async fn list_projects(&self, page: PageRequest) -> RecordRepositoryResult<Vec<Project>>;

    /// Merges sparse changes onto a project atomically.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] when the project is
    /// absent or [`super::RecordRepositoryError::DuplicateProjectName`] when a
    /// rename collides.
    async fn update_project(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Project>;

    /// Deletes a project together with every record that references it.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordRepositoryError::NotFound`] when the project is
    /// absent.
    async fn delete_project(&self, id: ProjectId) -> RecordRepositoryResult<()>;
}
