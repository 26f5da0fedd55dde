//! Route table for the HTTP surface.

use super::handlers::{self, activity, projects, templates};
use super::middleware::{cors_middleware, request_tracing_middleware};
use super::state::SharedState;
use crate::records::ports::RecordStore;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use mockable::Clock;

/// Builds the application router over shared state.
#[must_use]
pub fn build_router<S, C>(state: SharedState<S, C>) -> Router
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::service_info))
        .route(
            "/api/projects",
            post(projects::create_project::<S, C>).get(projects::list_projects::<S, C>),
        )
        .route(
            "/api/projects/:project_id",
            get(projects::get_project::<S, C>)
                .put(projects::update_project::<S, C>)
                .delete(projects::delete_project::<S, C>),
        )
        .route(
            "/api/projects/:project_id/metrics",
            get(projects::list_metric_samples::<S, C>),
        )
        .route(
            "/api/deployments",
            post(activity::create_deployment::<S, C>).get(activity::list_deployments::<S, C>),
        )
        .route(
            "/api/deployments/:deployment_id",
            get(activity::get_deployment::<S, C>),
        )
        .route("/api/sbom", post(activity::create_sbom::<S, C>))
        .route(
            "/api/sbom/:project_id",
            get(activity::list_project_sboms::<S, C>),
        )
        .route(
            "/api/sbom/records/:sbom_id",
            get(activity::get_sbom::<S, C>),
        )
        .route("/api/metrics", post(activity::record_metric::<S, C>))
        .route(
            "/api/metrics/:project_id",
            get(projects::project_metrics::<S, C>),
        )
        .route(
            "/api/metrics/samples/:metric_id",
            get(activity::get_metric::<S, C>),
        )
        .route(
            "/api/ml-models",
            post(activity::register_ml_model::<S, C>).get(activity::list_ml_models::<S, C>),
        )
        .route(
            "/api/ml-models/:model_id",
            get(activity::get_ml_model::<S, C>),
        )
        .route(
            "/api/pipelines",
            post(activity::create_pipeline::<S, C>).get(activity::list_pipelines::<S, C>),
        )
        .route(
            "/api/pipelines/:pipeline_id",
            get(activity::get_pipeline::<S, C>),
        )
        .route("/api/templates", get(templates::list_templates))
        .route(
            "/api/templates/generate",
            post(templates::generate_template),
        )
        .layer(from_fn(cors_middleware))
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}
