//! Template catalog handlers.

use crate::api::error::ApiError;
use crate::templates::{
    GenerateTemplateRequest, GenerationAck, TemplateDescriptor, request_generation, templates,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

/// Catalog listing body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCatalog {
    /// Every available template.
    pub templates: &'static [TemplateDescriptor],
}

/// `GET /api/templates`
pub async fn list_templates() -> Json<TemplateCatalog> {
    Json(TemplateCatalog {
        templates: templates(),
    })
}

/// `POST /api/templates/generate`
///
/// # Errors
///
/// Returns [`ApiError`] for a malformed body or blank fields.
pub async fn generate_template(
    payload: Result<Json<GenerateTemplateRequest>, JsonRejection>,
) -> Result<Json<GenerationAck>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(request_generation(request)?))
}
