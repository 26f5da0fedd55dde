//! HTTP handlers grouped by resource.

pub mod activity;
pub mod projects;
pub mod templates;

use crate::records::domain::{PageRequest, ProjectId};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Service identity reported at the root path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Liveness label.
    pub status: &'static str,
}

/// Reports service identity.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "NVX29 API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Offset pagination query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    skip: Option<u64>,
    limit: Option<u64>,
}

impl PageQuery {
    /// Resolves the window with defaults applied.
    #[must_use]
    pub fn page(self) -> PageRequest {
        PageRequest::from_optional(self.skip, self.limit)
    }
}

/// Pagination over one project's records.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProjectPageQuery {
    project_id: ProjectId,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl ProjectPageQuery {
    /// Returns the project filter and resolved window.
    #[must_use]
    pub fn resolve(self) -> (ProjectId, PageRequest) {
        (
            self.project_id,
            PageRequest::from_optional(self.skip, self.limit),
        )
    }
}

/// Pagination with an optional project filter.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DeploymentQuery {
    project_id: Option<ProjectId>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl DeploymentQuery {
    /// Returns the optional project filter and resolved window.
    #[must_use]
    pub fn resolve(self) -> (Option<ProjectId>, PageRequest) {
        (
            self.project_id,
            PageRequest::from_optional(self.skip, self.limit),
        )
    }
}
