//! Runtime metric samples.

use super::{MetricId, Milliseconds, Percentage, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Resource and traffic readings captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReadings {
    cpu_usage: Option<Percentage>,
    memory_usage: Option<Percentage>,
    disk_usage: Option<Percentage>,
    requests_per_minute: u64,
    error_rate: Percentage,
    avg_response_time: Option<Milliseconds>,
}

impl MetricReadings {
    /// Creates empty readings: no resource data, no traffic, zero errors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cpu_usage: None,
            memory_usage: None,
            disk_usage: None,
            requests_per_minute: 0,
            error_rate: Percentage::ZERO,
            avg_response_time: None,
        }
    }

    /// Sets CPU utilisation.
    #[must_use]
    pub const fn with_cpu_usage(mut self, value: Percentage) -> Self {
        self.cpu_usage = Some(value);
        self
    }

    /// Sets memory utilisation.
    #[must_use]
    pub const fn with_memory_usage(mut self, value: Percentage) -> Self {
        self.memory_usage = Some(value);
        self
    }

    /// Sets disk utilisation.
    #[must_use]
    pub const fn with_disk_usage(mut self, value: Percentage) -> Self {
        self.disk_usage = Some(value);
        self
    }

    /// Sets request throughput.
    #[must_use]
    pub const fn with_requests_per_minute(mut self, value: u64) -> Self {
        self.requests_per_minute = value;
        self
    }

    /// Sets the error rate.
    #[must_use]
    pub const fn with_error_rate(mut self, value: Percentage) -> Self {
        self.error_rate = value;
        self
    }

    /// Sets the mean response time.
    #[must_use]
    pub const fn with_avg_response_time(mut self, value: Milliseconds) -> Self {
        self.avg_response_time = Some(value);
        self
    }

    /// Returns CPU utilisation, if sampled.
    #[must_use]
    pub const fn cpu_usage(&self) -> Option<Percentage> {
        self.cpu_usage
    }

    /// Returns memory utilisation, if sampled.
    #[must_use]
    pub const fn memory_usage(&self) -> Option<Percentage> {
        self.memory_usage
    }

    /// Returns disk utilisation, if sampled.
    #[must_use]
    pub const fn disk_usage(&self) -> Option<Percentage> {
        self.disk_usage
    }

    /// Returns request throughput.
    #[must_use]
    pub const fn requests_per_minute(&self) -> u64 {
        self.requests_per_minute
    }

    /// Returns the error rate.
    #[must_use]
    pub const fn error_rate(&self) -> Percentage {
        self.error_rate
    }

    /// Returns the mean response time, if sampled.
    #[must_use]
    pub const fn avg_response_time(&self) -> Option<Milliseconds> {
        self.avg_response_time
    }
}

impl Default for MetricReadings {
    fn default() -> Self {
        Self::new()
    }
}

/// Draft of a metric sample awaiting insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMetric {
    project_id: ProjectId,
    readings: MetricReadings,
    recorded_at: DateTime<Utc>,
}

impl NewMetric {
    /// Creates a sample stamped with the current time.
    #[must_use]
    pub fn new(project_id: ProjectId, readings: MetricReadings, clock: &impl Clock) -> Self {
        Self {
            project_id,
            readings,
            recorded_at: clock.utc(),
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the captured readings.
    #[must_use]
    pub const fn readings(&self) -> &MetricReadings {
        &self.readings
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Immutable metric sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    id: MetricId,
    project_id: ProjectId,
    #[serde(flatten)]
    readings: MetricReadings,
    recorded_at: DateTime<Utc>,
}

impl Metric {
    /// Materializes a draft under a store-assigned identifier.
    #[must_use]
    pub const fn from_new(id: MetricId, draft: NewMetric) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            readings: draft.readings,
            recorded_at: draft.recorded_at,
        }
    }

    /// Reconstructs a sample from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: MetricId,
        project_id: ProjectId,
        readings: MetricReadings,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            readings,
            recorded_at,
        }
    }

    /// Returns the sample identifier.
    #[must_use]
    pub const fn id(&self) -> MetricId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the captured readings.
    #[must_use]
    pub const fn readings(&self) -> &MetricReadings {
        &self.readings
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
