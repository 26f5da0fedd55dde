//! Project lifecycle service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        NewProject, PageRequest, Project, ProjectChanges, ProjectId, ProjectName, ProjectStatus,
        ProjectType, RecordKind, json_object, optional_text,
    },
    ports::{ProjectRepository, RecordRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProjectRequest {
    name: String,
    project_type: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    repository_url: Option<String>,
    #[serde(default)]
    config: Option<Value>,
}

impl CreateProjectRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, project_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_type: project_type.into(),
            description: None,
            repository_url: None,
            config: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the repository URL.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Sets the configuration payload.
    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Request payload for a sparse project update.
///
/// Absent fields are left untouched. An explicit `null` clears a nullable
/// field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    project_type: Option<String>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    repository_url: Option<Option<String>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    config: Option<Option<Value>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the project type.
    #[must_use]
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the repository URL.
    #[must_use]
    pub fn with_repository_url(mut self, url: Option<String>) -> Self {
        self.repository_url = Some(url);
        self
    }

    /// Changes the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces or clears the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Option<Value>) -> Self {
        self.config = Some(config);
        self
    }

    fn into_changes(self) -> RecordServiceResult<ProjectChanges> {
        let mut changes = ProjectChanges::new();
        if let Some(name) = self.name {
            changes = changes.with_name(ProjectName::new(name)?);
        }
        if let Some(project_type) = self.project_type {
            changes = changes.with_project_type(ProjectType::new(project_type)?);
        }
        if let Some(description) = self.description {
            changes = changes.with_description(optional_text(description));
        }
        if let Some(url) = self.repository_url {
            changes = changes.with_repository_url(optional_text(url));
        }
        if let Some(status) = self.status {
            changes = changes.with_status(ProjectStatus::try_from(status.as_str())?);
        }
        if let Some(config) = self.config {
            let parsed = config.map(|value| json_object("config", value)).transpose()?;
            changes = changes.with_config(parsed);
        }
        Ok(changes)
    }
}

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project in the `initializing` state.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Domain`] for invalid input and a
    /// conflict when the name is already taken.
    pub async fn create(&self, request: CreateProjectRequest) -> RecordServiceResult<Project> {
        let name = ProjectName::new(request.name)?;
        let project_type = ProjectType::new(request.project_type)?;
        let mut draft = NewProject::new(name, project_type, &*self.clock);
        if let Some(description) = optional_text(request.description) {
            draft = draft.with_description(description);
        }
        if let Some(url) = optional_text(request.repository_url) {
            draft = draft.with_repository_url(url);
        }
        if let Some(config) = request.config {
            draft = draft.with_config(json_object("config", config)?);
        }
        if self
            .repository
            .find_project_by_name(draft.name())
            .await?
            .is_some()
        {
            warn!(project_name = %draft.name(), "project name already taken");
            return Err(RecordRepositoryError::DuplicateProjectName(draft.name().clone()).into());
        }

        let project = self.repository.create_project(&draft).await.inspect_err(|err| {
            if let RecordRepositoryError::DuplicateProjectName(taken) = err {
                warn!(project_name = %taken, "project name already taken");
            }
        })?;
        info!(
            project_id = %project.id(),
            project_name = %project.name(),
            project_type = %project.project_type(),
            "project created"
        );
        Ok(project)
    }

    /// Fetches a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::NotFound`] when the project does
    /// not exist.
    pub async fn get(&self, id: ProjectId) -> RecordServiceResult<Project> {
        let project = self.repository.find_project(id).await?;
        found(project, RecordKind::Project, id)
    }

    /// Lists a page of projects.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list(&self, page: PageRequest) -> RecordServiceResult<Vec<Project>> {
        Ok(self.repository.list_projects(page).await?)
    }

    /// Applies a sparse update and refreshes `updated_at`.
    ///
    /// An update without field changes still refreshes the timestamp.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown project, a validation error for
    /// invalid fields, or a conflict when a rename collides.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> RecordServiceResult<Project> {
        let changes = request.into_changes()?;
        if changes.is_empty() {
            debug!(project_id = %id, "project update carries no field changes");
        }
        let project = self
            .repository
            .update_project(id, &changes, self.clock.utc())
            .await?;
        info!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Deletes a project and every record that references it.
    ///
    /// # Errors
    ///
    /// Returns not-found when the project does not exist.
    pub async fn delete(&self, id: ProjectId) -> RecordServiceResult<()> {
        self.repository.delete_project(id).await?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }
}
