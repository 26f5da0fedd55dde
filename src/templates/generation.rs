//! Template generation requests.
//!
//! Generation itself is not implemented: a valid request is acknowledged
//! with a `generating` status and nothing further happens.

use super::catalog::find_template;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned while validating a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The target project name is empty after trimming.
    #[error("project_name must not be empty")]
    EmptyProjectName,

    /// The template identifier is empty after trimming.
    #[error("template_id must not be empty")]
    EmptyTemplateId,
}

/// Request to scaffold a project from a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateTemplateRequest {
    project_name: String,
    template_id: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    repository_url: Option<String>,
}

impl GenerateTemplateRequest {
    /// Creates a request for the given project and template.
    #[must_use]
    pub fn new(project_name: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            template_id: template_id.into(),
            features: Vec::new(),
            repository_url: None,
        }
    }

    /// Sets optional features to include.
    #[must_use]
    pub fn with_features(mut self, features: impl IntoIterator<Item = String>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    /// Sets the target repository.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }
}

/// Progress state reported for a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Accepted; generation has not completed.
    Generating,
}

/// Acknowledgement returned for an accepted generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationAck {
    /// Always [`GenerationStatus::Generating`].
    pub status: GenerationStatus,
    /// Target project name.
    pub project_name: String,
    /// Requested template identifier.
    pub template: String,
    /// Target repository, if supplied.
    pub repository_url: Option<String>,
    /// Files produced so far; always empty.
    pub files_generated: Vec<String>,
    /// Human-readable status message.
    pub message: String,
}

/// Validates a request and acknowledges it without generating anything.
///
/// Unknown template identifiers are accepted and logged.
///
/// # Errors
///
/// Returns [`TemplateError`] when the project name or template id is blank.
pub fn request_generation(
    request: GenerateTemplateRequest,
) -> Result<GenerationAck, TemplateError> {
    let project_name = request.project_name.trim().to_owned();
    if project_name.is_empty() {
        return Err(TemplateError::EmptyProjectName);
    }
    let template = request.template_id.trim().to_owned();
    if template.is_empty() {
        return Err(TemplateError::EmptyTemplateId);
    }
    if find_template(&template).is_none() {
        warn!(template_id = %template, "generation requested for unknown template");
    }

    info!(
        project_name = %project_name,
        template_id = %template,
        features = request.features.len(),
        "template generation acknowledged; generation is not implemented"
    );
    Ok(GenerationAck {
        status: GenerationStatus::Generating,
        project_name,
        template,
        repository_url: request.repository_url,
        files_generated: Vec::new(),
        message: "Project generation started".to_owned(),
    })
}
