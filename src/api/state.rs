//! Shared application state for HTTP handlers.

use crate::records::{
    ports::RecordStore,
    services::{
        DeploymentService, MetricService, MlModelService, PipelineService, ProjectInsightService,
        ProjectService, SbomService,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Services wired to one record store and clock.
pub struct AppState<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    /// Project lifecycle operations.
    pub projects: ProjectService<S, C>,
    /// Deployment operations.
    pub deployments: DeploymentService<S, C>,
    /// SBOM operations.
    pub sboms: SbomService<S, C>,
    /// Metric sample operations.
    pub metrics: MetricService<S, C>,
    /// Model registration operations.
    pub ml_models: MlModelService<S, C>,
    /// Pipeline operations.
    pub pipelines: PipelineService<S, C>,
    /// Aggregation views.
    pub insights: ProjectInsightService<S>,
}

impl<S, C> AppState<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync + 'static,
{
    /// Builds every service over the shared store and clock.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            deployments: DeploymentService::new(Arc::clone(&store), Arc::clone(&clock)),
            sboms: SbomService::new(Arc::clone(&store), Arc::clone(&clock)),
            metrics: MetricService::new(Arc::clone(&store), Arc::clone(&clock)),
            ml_models: MlModelService::new(Arc::clone(&store), Arc::clone(&clock)),
            pipelines: PipelineService::new(Arc::clone(&store), clock),
            insights: ProjectInsightService::new(store),
        }
    }
}

/// State handle shared by every handler.
pub type SharedState<S, C> = Arc<AppState<S, C>>;
