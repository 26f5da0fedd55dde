//! Handlers for records that hang off a project.

use super::{DeploymentQuery, ProjectPageQuery};
use crate::api::{error::ApiError, state::SharedState};
use crate::records::{
    domain::{
        Deployment, DeploymentId, Metric, MetricId, MlModel, MlModelId, Pipeline, PipelineId,
        ProjectId, Sbom, SbomId,
    },
    ports::RecordStore,
    services::{
        CreateDeploymentRequest, CreatePipelineRequest, CreateSbomRequest, RecordMetricRequest,
        RegisterMlModelRequest,
    },
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use mockable::Clock;

/// `POST /api/deployments`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid payloads or an unknown project.
pub async fn create_deployment<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<CreateDeploymentRequest>, JsonRejection>,
) -> Result<Json<Deployment>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.deployments.create(request).await?))
}

/// `GET /api/deployments`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed query parameters or storage failures.
pub async fn list_deployments<S, C>(
    State(state): State<SharedState<S, C>>,
    query: Result<Query<DeploymentQuery>, QueryRejection>,
) -> Result<Json<Vec<Deployment>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Query(filter) = query?;
    let (project_id, page) = filter.resolve();
    Ok(Json(state.deployments.list(project_id, page).await?))
}

/// `GET /api/deployments/:deployment_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the deployment does not exist.
pub async fn get_deployment<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<DeploymentId>, PathRejection>,
) -> Result<Json<Deployment>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.deployments.get(id).await?))
}

/// `POST /api/sbom`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid payloads or an unknown project.
pub async fn create_sbom<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<CreateSbomRequest>, JsonRejection>,
) -> Result<Json<Sbom>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.sboms.create(request).await?))
}

/// `GET /api/sbom/:project_id`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed parameters or storage failures.
pub async fn list_project_sboms<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<Vec<Sbom>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(project_id) = path?;
    Ok(Json(state.sboms.list_for_project(project_id).await?))
}

/// `GET /api/sbom/records/:sbom_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the scan does not exist.
pub async fn get_sbom<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<SbomId>, PathRejection>,
) -> Result<Json<Sbom>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.sboms.get(id).await?))
}

/// `POST /api/metrics`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid readings or an unknown project.
pub async fn record_metric<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<RecordMetricRequest>, JsonRejection>,
) -> Result<Json<Metric>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.metrics.record(request).await?))
}

/// `GET /api/metrics/samples/:metric_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the sample does not exist.
pub async fn get_metric<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<MetricId>, PathRejection>,
) -> Result<Json<Metric>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.metrics.get(id).await?))
}

/// `POST /api/ml-models`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid payloads or an unknown project.
pub async fn register_ml_model<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<RegisterMlModelRequest>, JsonRejection>,
) -> Result<Json<MlModel>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.ml_models.register(request).await?))
}

/// `GET /api/ml-models?project_id=`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed query parameters or storage failures.
pub async fn list_ml_models<S, C>(
    State(state): State<SharedState<S, C>>,
    query: Result<Query<ProjectPageQuery>, QueryRejection>,
) -> Result<Json<Vec<MlModel>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Query(filter) = query?;
    let (project_id, page) = filter.resolve();
    Ok(Json(state.ml_models.list_for_project(project_id, page).await?))
}

/// `GET /api/ml-models/:model_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the registration does not exist.
pub async fn get_ml_model<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<MlModelId>, PathRejection>,
) -> Result<Json<MlModel>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.ml_models.get(id).await?))
}

/// `POST /api/pipelines`
///
/// # Errors
///
/// Returns [`ApiError`] for invalid payloads or an unknown project.
pub async fn create_pipeline<S, C>(
    State(state): State<SharedState<S, C>>,
    payload: Result<Json<CreatePipelineRequest>, JsonRejection>,
) -> Result<Json<Pipeline>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.pipelines.create(request).await?))
}

/// `GET /api/pipelines?project_id=`
///
/// # Errors
///
/// Returns [`ApiError`] for malformed query parameters or storage failures.
pub async fn list_pipelines<S, C>(
    State(state): State<SharedState<S, C>>,
    query: Result<Query<ProjectPageQuery>, QueryRejection>,
) -> Result<Json<Vec<Pipeline>>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Query(filter) = query?;
    let (project_id, page) = filter.resolve();
    Ok(Json(state.pipelines.list_for_project(project_id, page).await?))
}

/// `GET /api/pipelines/:pipeline_id`
///
/// # Errors
///
/// Returns [`ApiError`] when the pipeline does not exist.
pub async fn get_pipeline<S, C>(
    State(state): State<SharedState<S, C>>,
    path: Result<Path<PipelineId>, PathRejection>,
) -> Result<Json<Pipeline>, ApiError>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.pipelines.get(id).await?))
}
