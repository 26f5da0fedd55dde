//! Application services for record keeping.

mod deployments;
mod error;
mod insights;
mod metrics;
mod ml_models;
mod pipelines;
mod projects;
mod sboms;

pub use deployments::{CreateDeploymentRequest, DeploymentService};
pub use error::{ErrorClass, RecordServiceError, RecordServiceResult};
pub use insights::ProjectInsightService;
pub use metrics::{MetricService, RecordMetricRequest};
pub use ml_models::{MlModelService, RegisterMlModelRequest};
pub use pipelines::{CreatePipelineRequest, PipelineService};
pub use projects::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
pub use sboms::{CreateSbomRequest, SbomService};
