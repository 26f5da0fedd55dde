//! Project handlers and per-project views.

use super::PageQuery;
use crate::api::{error::ApiError, state::SharedState};
use crate::records::{
    domain::{Metric, Project, ProjectId, ProjectMetrics},
    ports::RecordStore,
    services::{CreateProjectRequest, UpdateProjectRequest},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use mockable::Clock;
use serde::Serialize;

/// Confirmation returned after a project is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
}

/// `POST /api/projects`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid payloads or a taken name.
pub async fn create_project<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<Json<Project>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.projects.create(request).await?))
}

/// `GET /api/projects`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed query parameters or storage failures.
pub async fn list_projects<S, C>(
    State(state): State<SharedState<S, C>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Project>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Query(page) = query?;
    Ok(Json(state.projects.list(page.page()).await?))
}

/// `GET /api/projects/:project_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the project does not exist.
pub async fn get_project<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<Project>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    Ok(Json(state.projects.get(project_id).await?))
}

/// `PUT /api/projects/:project_id`
///
/// # Errors
///
/// Returns [`ApiError`] for unknown projects, invalid fields, or name
/// collisions.
pub async fn update_project<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<Json<Project>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    let Json(request) = payload?;
    Ok(Json(state.projects.update(project_id, request).await?))
}

/// `DELETE /api/projects/:project_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the project does not exist.
pub async fn delete_project<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    state.projects.delete(project_id).await?;
    Ok(Json(DeletedResponse {
        message: "Project deleted successfully",
    }))
}

/// `GET /api/metrics/:project_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the project does not exist.
pub async fn project_metrics<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<ProjectMetrics>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    Ok(Json(state.insights.project_metrics(project_id).await?))
}

/// `GET /api/projects/:project_id/metrics`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed parameters or storage failures.
pub async fn list_metric_samples<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Metric>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    let Query(page) = query?;
    Ok(Json(
        state
            .metrics
            .list_for_project(project_id, page.page())
            .await?,
    ))
}
