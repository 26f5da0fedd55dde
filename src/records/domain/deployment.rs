//! Deployment records.

use super::labels::storage_label;
use super::{DeploymentId, ProjectId, RecordDomainError, optional_text, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

storage_label! {
    /// Target environment of a deployment.
    Environment("deployment environment") {
        /// Development.
        Dev => "dev",
        /// Pre-production.
        Staging => "staging",
        /// Production.
        Prod => "prod",
    }
}

storage_label! {
    /// Outcome of a deployment.
    DeploymentStatus("deployment status") {
        /// Recorded but not yet reported on.
        Pending => "pending",
        /// Rolled out successfully.
        Success => "success",
        /// Rollout failed.
        Failed => "failed",
        /// Rolled back to a previous version.
        Rollback => "rollback",
    }
}

/// Draft of a deployment awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeployment {
    project_id: ProjectId,
    version: String,
    environment: Environment,
    commit_sha: Option<String>,
    deployed_by: Option<String>,
    deployed_at: DateTime<Utc>,
}

impl NewDeployment {
    /// Creates a deployment draft stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when `version` is blank.
    pub fn new(
        project_id: ProjectId,
        version: impl Into<String>,
        environment: Environment,
        clock: &impl Clock,
    ) -> Result<Self, RecordDomainError> {
        Ok(Self {
            project_id,
            version: required_text("version", version)?,
            environment,
            commit_sha: None,
            deployed_by: None,
            deployed_at: clock.utc(),
        })
    }

    /// Sets the deployed commit, ignoring blank values.
    #[must_use]
    pub fn with_commit_sha(mut self, commit_sha: Option<String>) -> Self {
        self.commit_sha = optional_text(commit_sha);
        self
    }

    /// Sets who triggered the deployment, ignoring blank values.
    #[must_use]
    pub fn with_deployed_by(mut self, deployed_by: Option<String>) -> Self {
        self.deployed_by = optional_text(deployed_by);
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the deployed version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the deployed commit, if known.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }

    /// Returns who triggered the deployment, if known.
    #[must_use]
    pub fn deployed_by(&self) -> Option<&str> {
        self.deployed_by.as_deref()
    }

    /// Returns the deployment timestamp.
    #[must_use]
    pub const fn deployed_at(&self) -> DateTime<Utc> {
        self.deployed_at
    }
}

/// Immutable deployment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    id: DeploymentId,
    project_id: ProjectId,
    version: String,
    environment: Environment,
    status: DeploymentStatus,
    commit_sha: Option<String>,
    deployed_by: Option<String>,
    deployed_at: DateTime<Utc>,
    duration_seconds: Option<u64>,
    logs: Option<String>,
    error_message: Option<String>,
}

/// Parameter object for reconstructing a persisted deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDeploymentData {
    /// Persisted identifier.
    pub id: DeploymentId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Deployed version.
    pub version: String,
    /// Target environment.
    pub environment: Environment,
    /// Deployment outcome.
    pub status: DeploymentStatus,
    /// Deployed commit.
    pub commit_sha: Option<String>,
    /// Who triggered the deployment.
    pub deployed_by: Option<String>,
    /// Deployment timestamp.
    pub deployed_at: DateTime<Utc>,
    /// Rollout duration.
    pub duration_seconds: Option<u64>,
    /// Captured rollout logs.
    pub logs: Option<String>,
    /// Failure detail.
    pub error_message: Option<String>,
}

impl Deployment {
    /// Materializes a draft under a store-assigned identifier with
    /// `Pending` status.
    #[must_use]
    pub fn from_new(id: DeploymentId, draft: NewDeployment) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            version: draft.version,
            environment: draft.environment,
            status: DeploymentStatus::Pending,
            commit_sha: draft.commit_sha,
            deployed_by: draft.deployed_by,
            deployed_at: draft.deployed_at,
            duration_seconds: None,
            logs: None,
            error_message: None,
        }
    }

    /// Reconstructs a deployment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDeploymentData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            version: data.version,
            environment: data.environment,
            status: data.status,
            commit_sha: data.commit_sha,
            deployed_by: data.deployed_by,
            deployed_at: data.deployed_at,
            duration_seconds: data.duration_seconds,
            logs: data.logs,
            error_message: data.error_message,
        }
    }

    /// Returns the deployment identifier.
    #[must_use]
    pub const fn id(&self) -> DeploymentId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the deployed version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the deployment outcome.
    #[must_use]
    pub const fn status(&self) -> DeploymentStatus {
        self.status
    }

    /// Returns the deployed commit, if known.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }

    /// Returns who triggered the deployment, if known.
    #[must_use]
    pub fn deployed_by(&self) -> Option<&str> {
        self.deployed_by.as_deref()
    }

    /// Returns the deployment timestamp.
    #[must_use]
    pub const fn deployed_at(&self) -> DateTime<Utc> {
        self.deployed_at
    }

    /// Returns the rollout duration in seconds, if reported.
    #[must_use]
    pub const fn duration_seconds(&self) -> Option<u64> {
        self.duration_seconds
    }

    /// Returns captured rollout logs, if any.
    #[must_use]
    pub fn logs(&self) -> Option<&str> {
        self.logs.as_deref()
    }

    /// Returns the failure detail, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
