//! SBOM scan recording service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        NewSbom, ProjectId, RecordKind, Sbom, SbomId, SecurityScore, VulnerabilityCounts, count,
        json_object,
    },
    ports::SbomRepository,
};
use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Request payload for recording a scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateSbomRequest {
    project_id: ProjectId,
    version: String,
    sbom_data: Value,
    #[serde(default)]
    vulnerabilities_count: i64,
    #[serde(default)]
    critical_count: i64,
    #[serde(default)]
    high_count: i64,
    #[serde(default)]
    medium_count: i64,
    #[serde(default)]
    low_count: i64,
    #[serde(default)]
    security_score: Option<f64>,
    #[serde(default)]
    scan_tool: Option<String>,
}

impl CreateSbomRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, version: impl Into<String>, sbom_data: Value) -> Self {
        Self {
            project_id,
            version: version.into(),
            sbom_data,
            vulnerabilities_count: 0,
            critical_count: 0,
            high_count: 0,
            medium_count: 0,
            low_count: 0,
            security_score: None,
            scan_tool: None,
        }
    }

    /// Sets the total vulnerability count.
    #[must_use]
    pub const fn with_vulnerabilities_count(mut self, total: i64) -> Self {
        self.vulnerabilities_count = total;
        self
    }

    /// Sets the per-severity counts.
    #[must_use]
    pub const fn with_severities(
        mut self,
        critical: i64,
        high: i64,
        medium: i64,
        low: i64,
    ) -> Self {
        self.critical_count = critical;
        self.high_count = high;
        self.medium_count = medium;
        self.low_count = low;
        self
    }

    /// Sets the security score.
    #[must_use]
    pub const fn with_security_score(mut self, score: f64) -> Self {
        self.security_score = Some(score);
        self
    }

    /// Sets the scanner name.
    #[must_use]
    pub fn with_scan_tool(mut self, scan_tool: impl Into<String>) -> Self {
        self.scan_tool = Some(scan_tool.into());
        self
    }

    fn counts(&self) -> RecordServiceResult<VulnerabilityCounts> {
        Ok(
            VulnerabilityCounts::with_total(count(
                "vulnerabilities_count",
                self.vulnerabilities_count,
            )?)
            .with_severities(
                count("critical_count", self.critical_count)?,
                count("high_count", self.high_count)?,
                count("medium_count", self.medium_count)?,
                count("low_count", self.low_count)?,
            ),
        )
    }
}

/// SBOM orchestration service.
#[derive(Clone)]
pub struct SbomService<R, C>
where
    R: SbomRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SbomService<R, C>
where
    R: SbomRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new SBOM service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a scan for an existing project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed payloads, counts, or scores,
    /// and not-found when the project does not exist.
    pub async fn create(&self, request: CreateSbomRequest) -> RecordServiceResult<Sbom> {
        let counts = request.counts()?;
        let sbom_data = json_object("sbom_data", request.sbom_data)?;
        let mut draft = NewSbom::new(request.project_id, request.version, sbom_data, &*self.clock)?
            .with_counts(counts);
        if let Some(score) = request.security_score {
            draft = draft.with_security_score(SecurityScore::new(score)?);
        }
        if let Some(scan_tool) = request.scan_tool {
            draft = draft.with_scan_tool(scan_tool)?;
        }

        let sbom = self.repository.create_sbom(&draft).await?;
        info!(
            sbom_id = %sbom.id(),
            project_id = %sbom.project_id(),
            vulnerabilities = sbom.counts().total(),
            "sbom recorded"
        );
        Ok(sbom)
    }

    /// Fetches a scan.
    ///
    /// # Errors
    ///
    /// Returns not-found when the scan does not exist.
    pub async fn get(&self, id: SbomId) -> RecordServiceResult<Sbom> {
        let sbom = self.repository.find_sbom(id).await?;
        found(sbom, RecordKind::Sbom, id)
    }

    /// Lists every scan for a project, newest first.
    ///
    /// An unknown project yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_for_project(&self, project_id: ProjectId) -> RecordServiceResult<Vec<Sbom>> {
        Ok(self.repository.list_sboms(project_id).await?)
    }
}
