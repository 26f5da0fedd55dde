//! Domain model for platform records.
//!
//! Records are created from validated drafts, receive store-assigned
//! identifiers, and are immutable afterwards except for projects, which
//! accept sparse changes.

mod deployment;
mod error;
mod ids;
mod insights;
mod labels;
mod measures;
mod metric;
mod ml_model;
mod page;
mod pipeline;
mod project;
mod sbom;

pub use deployment::{
    Deployment, DeploymentStatus, Environment, NewDeployment, PersistedDeploymentData,
};
pub use error::{ParseLabelError, RecordDomainError};
pub use ids::{DeploymentId, MetricId, MlModelId, PipelineId, ProjectId, RecordKind, SbomId};
pub use insights::{DashboardStats, ProjectMetrics};
pub use measures::{
    JsonObject, Milliseconds, Percentage, SecurityScore, UnitScore, count, finite, json_object,
    non_negative, optional_text, required_text,
};
pub use metric::{Metric, MetricReadings, NewMetric};
pub use ml_model::{
    DriftFlag, MlModel, ModelProvenance, ModelScores, NewMlModel, PersistedMlModelData,
};
pub use page::{DEFAULT_PAGE_LIMIT, PageRequest};
pub use pipeline::{NewPipeline, PersistedPipelineData, Pipeline, PipelineStatus, PipelineType};
pub use project::{
    NewProject, PersistedProjectData, Project, ProjectChanges, ProjectName, ProjectStatus,
    ProjectType,
};
pub use sbom::{DEFAULT_SCAN_TOOL, NewSbom, PersistedSbomData, Sbom, VulnerabilityCounts};
