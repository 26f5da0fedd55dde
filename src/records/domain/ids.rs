//! Storage-assigned identifier types for platform records.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a surrogate key assigned by the store.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw surrogate key.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a project record.
    ProjectId
);
record_id!(
    /// Identifier of a deployment record.
    DeploymentId
);
record_id!(
    /// Identifier of a software bill of materials record.
    SbomId
);
record_id!(
    /// Identifier of a runtime metric sample.
    MetricId
);
record_id!(
    /// Identifier of a registered machine-learning model.
    MlModelId
);
record_id!(
    /// Identifier of an automation pipeline definition.
    PipelineId
);

/// The six record types tracked by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A project.
    Project,
    /// A deployment of a project version.
    Deployment,
    /// A software bill of materials scan.
    Sbom,
    /// A runtime metric sample.
    Metric,
    /// A registered machine-learning model.
    MlModel,
    /// An automation pipeline definition.
    Pipeline,
}

impl RecordKind {
    /// Returns a human-readable record name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Deployment => "deployment",
            Self::Sbom => "sbom",
            Self::Metric => "metric",
            Self::MlModel => "ml model",
            Self::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
