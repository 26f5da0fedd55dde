//! Project aggregate, its validated fields, and sparse changes.

use super::labels::storage_label;
use super::{JsonObject, ProjectId, RecordDomainError, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Unique, human-readable project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// The input is trimmed. Names are compared exactly after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyProjectName`] when the value is empty
    /// after trimming, or [`RecordDomainError::ProjectNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(RecordDomainError::EmptyProjectName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(RecordDomainError::ProjectNameTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Template family a project was created from (e.g. `fastapi`, `react`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectType(String);

impl ProjectType {
    /// Creates a validated project type.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordDomainError> {
        required_text("project_type", value).map(Self)
    }

    /// Returns the project type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

storage_label! {
    /// Lifecycle status of a project.
    ProjectStatus("project status") {
        /// Freshly created; scaffolding has not completed.
        Initializing => "initializing",
        /// In normal use.
        Active => "active",
        /// Retained for history only.
        Archived => "archived",
        /// Something went wrong while provisioning.
        Error => "error",
    }
}

/// Draft of a project that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    name: ProjectName,
    project_type: ProjectType,
    description: Option<String>,
    repository_url: Option<String>,
    status: ProjectStatus,
    config: Option<JsonObject>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NewProject {
    /// Creates a project draft with `Initializing` status.
    #[must_use]
    pub fn new(name: ProjectName, project_type: ProjectType, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            name,
            project_type,
            description: None,
            repository_url: None,
            status: ProjectStatus::Initializing,
            config: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the source repository URL.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Sets the opaque project configuration.
    #[must_use]
    pub fn with_config(mut self, config: JsonObject) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project type.
    #[must_use]
    pub const fn project_type(&self) -> &ProjectType {
        &self.project_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the repository URL, if any.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the configuration, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&JsonObject> {
        self.config.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the initial update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    project_type: ProjectType,
    description: Option<String>,
    repository_url: Option<String>,
    status: ProjectStatus,
    config: Option<JsonObject>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted unique name.
    pub name: ProjectName,
    /// Persisted project type.
    pub project_type: ProjectType,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted repository URL.
    pub repository_url: Option<String>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted configuration.
    pub config: Option<JsonObject>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Materializes a draft under a store-assigned identifier.
    #[must_use]
    pub fn from_new(id: ProjectId, draft: NewProject) -> Self {
        Self {
            id,
            name: draft.name,
            project_type: draft.project_type,
            description: draft.description,
            repository_url: draft.repository_url,
            status: draft.status,
            config: draft.config,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            project_type: data.project_type,
            description: data.description,
            repository_url: data.repository_url,
            status: data.status,
            config: data.config,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the unique project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project type.
    #[must_use]
    pub const fn project_type(&self) -> &ProjectType {
        &self.project_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the repository URL, if any.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the configuration, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&JsonObject> {
        self.config.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merges the fields present in `changes` and stamps `updated_at`.
    ///
    /// Fields absent from `changes` keep their current values.
    pub fn apply_changes(&mut self, changes: &ProjectChanges, updated_at: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(project_type) = &changes.project_type {
            self.project_type = project_type.clone();
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(repository_url) = &changes.repository_url {
            self.repository_url.clone_from(repository_url);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(config) = &changes.config {
            self.config.clone_from(config);
        }
        self.updated_at = updated_at;
    }
}

/// Sparse set of project fields to overwrite.
///
/// The outer `Option` records presence; for nullable fields the inner
/// `Option` carries the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    name: Option<ProjectName>,
    project_type: Option<ProjectType>,
    description: Option<Option<String>>,
    repository_url: Option<Option<String>>,
    status: Option<ProjectStatus>,
    config: Option<Option<JsonObject>>,
}

impl ProjectChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: ProjectName) -> Self {
        self.name = Some(name);
        self
    }

    /// Changes the project type.
    #[must_use]
    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
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
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces or clears the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Option<JsonObject>) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the requested new name, if a rename is part of the change.
    #[must_use]
    pub const fn name(&self) -> Option<&ProjectName> {
        self.name.as_ref()
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.project_type.is_none()
            && self.description.is_none()
            && self.repository_url.is_none()
            && self.status.is_none()
            && self.config.is_none()
    }
}
