//! Port contracts for record persistence.
//!
//! Each record type has its own repository trait. [`RecordStore`] names the
//! combination a single backing store provides.

mod deployments;
mod error;
mod metrics;
mod ml_models;
mod pipelines;
mod projects;
mod sboms;

pub use deployments::DeploymentRepository;
pub use error::{RecordRepositoryError, RecordRepositoryResult};
pub use metrics::MetricRepository;
pub use ml_models::MlModelRepository;
pub use pipelines::PipelineRepository;
pub use projects::ProjectRepository;
pub use sboms::SbomRepository;

/// A store that persists every record type.
pub trait RecordStore:
    ProjectRepository
    + DeploymentRepository
    + SbomRepository
    + MetricRepository
    + MlModelRepository
    + PipelineRepository
    + 'static
{
}

impl<T> RecordStore for T where
    T: ProjectRepository
        + DeploymentRepository
        + SbomRepository
        + MetricRepository
        + MlModelRepository
        + PipelineRepository
        + 'static
{
}
