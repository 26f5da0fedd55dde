//! Read-only aggregation views over project records.

use super::{Metric, Percentage, Project, ProjectId, ProjectStatus, Sbom, SecurityScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-project summary combining deployment, scan, and runtime data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Project being summarized.
    pub project_id: ProjectId,
    /// Current project name.
    pub project_name: String,
    /// Number of deployments recorded for the project.
    pub total_deployments: u64,
    /// Current project status.
    pub status: ProjectStatus,
    /// Score of the most recently generated SBOM, if any.
    pub security_score: Option<SecurityScore>,
    /// Reserved for the most recent deployment timestamp; not yet computed.
    pub last_deployment: Option<DateTime<Utc>>,
    /// CPU usage from the latest metric sample.
    pub cpu_usage: Option<Percentage>,
    /// Memory usage from the latest metric sample.
    pub memory_usage: Option<Percentage>,
    /// Request rate from the latest metric sample, zero when none exists.
    pub requests_per_minute: u64,
}

impl ProjectMetrics {
    /// Assembles the view from independently fetched rows.
    #[must_use]
    pub fn compose(
        project: &Project,
        total_deployments: u64,
        latest_sbom: Option<&Sbom>,
        latest_metric: Option<&Metric>,
    ) -> Self {
        let readings = latest_metric.map(Metric::readings);
        Self {
            project_id: project.id(),
            project_name: project.name().as_str().to_owned(),
            total_deployments,
            status: project.status(),
            security_score: latest_sbom.map(Sbom::security_score),
            last_deployment: None,
            cpu_usage: readings.and_then(|r| r.cpu_usage()),
            memory_usage: readings.and_then(|r| r.memory_usage()),
            requests_per_minute: readings.map_or(0, |r| r.requests_per_minute()),
        }
    }
}

/// Platform-wide summary shape.
///
/// Not computed yet: "active deployment" and "healthy project" lack an
/// agreed definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of projects.
    pub total_projects: u64,
    /// Number of deployments considered active.
    pub active_deployments: u64,
    /// Mean score across each project's latest SBOM.
    pub avg_security_score: f64,
    /// Number of projects considered healthy.
    pub healthy_projects: u64,
    /// Sum of vulnerabilities across latest SBOMs.
    pub total_vulnerabilities: u64,
}
