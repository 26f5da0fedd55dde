//! Software bill of materials scan records.

use super::{JsonObject, ProjectId, RecordDomainError, SbomId, SecurityScore, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Scanner recorded when the caller does not name one.
pub const DEFAULT_SCAN_TOOL: &str = "trivy";

/// Vulnerability totals reported by a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityCounts {
    #[serde(rename = "vulnerabilities_count")]
    total: u32,
    #[serde(rename = "critical_count")]
    critical: u32,
    #[serde(rename = "high_count")]
    high: u32,
    #[serde(rename = "medium_count")]
    medium: u32,
    #[serde(rename = "low_count")]
    low: u32,
}

impl VulnerabilityCounts {
    /// Creates counts with only the overall total set.
    #[must_use]
    pub const fn with_total(total: u32) -> Self {
        Self {
            total,
            critical: 0,
            high: 0,
            medium: 0,
            low: 0,
        }
    }

    /// Sets the per-severity breakdown.
    #[must_use]
    pub const fn with_severities(
        mut self,
        critical: u32,
        high: u32,
        medium: u32,
        low: u32,
    ) -> Self {
        self.critical = critical;
        self.high = high;
        self.medium = medium;
        self.low = low;
        self
    }

    /// Returns the overall vulnerability count.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.total
    }

    /// Returns the critical-severity count.
    #[must_use]
    pub const fn critical(self) -> u32 {
        self.critical
    }

    /// Returns the high-severity count.
    #[must_use]
    pub const fn high(self) -> u32 {
        self.high
    }

    /// Returns the medium-severity count.
    #[must_use]
    pub const fn medium(self) -> u32 {
        self.medium
    }

    /// Returns the low-severity count.
    #[must_use]
    pub const fn low(self) -> u32 {
        self.low
    }
}

/// Draft of an SBOM awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSbom {
    project_id: ProjectId,
    version: String,
    sbom_data: JsonObject,
    counts: VulnerabilityCounts,
    security_score: SecurityScore,
    scan_tool: String,
    generated_at: DateTime<Utc>,
}

impl NewSbom {
    /// Creates an SBOM draft with zero counts, a clean score, and the
    /// default scanner.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when `version` is blank.
    pub fn new(
        project_id: ProjectId,
        version: impl Into<String>,
        sbom_data: JsonObject,
        clock: &impl Clock,
    ) -> Result<Self, RecordDomainError> {
        Ok(Self {
            project_id,
            version: required_text("version", version)?,
            sbom_data,
            counts: VulnerabilityCounts::default(),
            security_score: SecurityScore::CLEAN,
            scan_tool: DEFAULT_SCAN_TOOL.to_owned(),
            generated_at: clock.utc(),
        })
    }

    /// Sets the vulnerability counts.
    #[must_use]
    pub const fn with_counts(mut self, counts: VulnerabilityCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Sets the security score.
    #[must_use]
    pub const fn with_security_score(mut self, score: SecurityScore) -> Self {
        self.security_score = score;
        self
    }

    /// Sets the scanner name.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyField`] when the name is blank.
    pub fn with_scan_tool(
        mut self,
        scan_tool: impl Into<String>,
    ) -> Result<Self, RecordDomainError> {
        self.scan_tool = required_text("scan_tool", scan_tool)?;
        Ok(self)
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the scanned version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the raw scan payload.
    #[must_use]
    pub const fn sbom_data(&self) -> &JsonObject {
        &self.sbom_data
    }

    /// Returns the vulnerability counts.
    #[must_use]
    pub const fn counts(&self) -> VulnerabilityCounts {
        self.counts
    }

    /// Returns the security score.
    #[must_use]
    pub const fn security_score(&self) -> SecurityScore {
        self.security_score
    }

    /// Returns the scanner name.
    #[must_use]
    pub fn scan_tool(&self) -> &str {
        &self.scan_tool
    }

    /// Returns the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

/// Immutable SBOM record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sbom {
    id: SbomId,
    project_id: ProjectId,
    version: String,
    sbom_data: JsonObject,
    #[serde(flatten)]
    counts: VulnerabilityCounts,
    security_score: SecurityScore,
    scan_tool: String,
    generated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted SBOM.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSbomData {
    /// Persisted identifier.
    pub id: SbomId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Scanned version.
    pub version: String,
    /// Raw scan payload.
    pub sbom_data: JsonObject,
    /// Vulnerability counts.
    pub counts: VulnerabilityCounts,
    /// Security score.
    pub security_score: SecurityScore,
    /// Scanner name.
    pub scan_tool: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

impl Sbom {
    /// Materializes a draft under a store-assigned identifier.
    #[must_use]
    pub fn from_new(id: SbomId, draft: NewSbom) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            version: draft.version,
            sbom_data: draft.sbom_data,
            counts: draft.counts,
            security_score: draft.security_score,
            scan_tool: draft.scan_tool,
            generated_at: draft.generated_at,
        }
    }

    /// Reconstructs an SBOM from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSbomData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            version: data.version,
            sbom_data: data.sbom_data,
            counts: data.counts,
            security_score: data.security_score,
            scan_tool: data.scan_tool,
            generated_at: data.generated_at,
        }
    }

    /// Returns the SBOM identifier.
    #[must_use]
    pub const fn id(&self) -> SbomId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the scanned version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the raw scan payload.
    #[must_use]
    pub const fn sbom_data(&self) -> &JsonObject {
        &self.sbom_data
    }

    /// Returns the vulnerability counts.
    #[must_use]
    pub const fn counts(&self) -> VulnerabilityCounts {
        self.counts
    }

    /// Returns the security score.
    #[must_use]
    pub const fn security_score(&self) -> SecurityScore {
        self.security_score
    }

    /// Returns the scanner name.
    #[must_use]
    pub fn scan_tool(&self) -> &str {
        &self.scan_tool
    }

    /// Returns the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
