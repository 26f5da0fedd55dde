//! Runtime metric recording service.

use super::error::{RecordServiceResult, found};
use crate::records::{
    domain::{
        Metric, MetricId, MetricReadings, Milliseconds, NewMetric, PageRequest, Percentage,
        ProjectId, RecordDomainError, RecordKind, non_negative,
    },
    ports::MetricRepository,
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Request payload for recording a metric sample.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordMetricRequest {
    project_id: ProjectId,
    #[serde(default)]
    cpu_usage: Option<f64>,
    #[serde(default)]
    memory_usage: Option<f64>,
    #[serde(default)]
    disk_usage: Option<f64>,
    #[serde(default)]
    requests_per_minute: i64,
    #[serde(default)]
    error_rate: Option<f64>,
    #[serde(default)]
    avg_response_time: Option<f64>,
}

impl RecordMetricRequest {
    /// Creates a request with no readings set.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            cpu_usage: None,
            memory_usage: None,
            disk_usage: None,
            requests_per_minute: 0,
            error_rate: None,
            avg_response_time: None,
        }
    }

    /// Sets CPU usage.
    #[must_use]
    pub const fn with_cpu_usage(mut self, value: f64) -> Self {
        self.cpu_usage = Some(value);
        self
    }

    /// Sets memory usage.
    #[must_use]
    pub const fn with_memory_usage(mut self, value: f64) -> Self {
        self.memory_usage = Some(value);
        self
    }

    /// Sets disk usage.
    #[must_use]
    pub const fn with_disk_usage(mut self, value: f64) -> Self {
        self.disk_usage = Some(value);
        self
    }

    /// Sets the request rate.
    #[must_use]
    pub const fn with_requests_per_minute(mut self, value: i64) -> Self {
        self.requests_per_minute = value;
        self
    }

    /// Sets the error rate.
    #[must_use]
    pub const fn with_error_rate(mut self, value: f64) -> Self {
        self.error_rate = Some(value);
        self
    }

    /// Sets the mean response time in milliseconds.
    #[must_use]
    pub const fn with_avg_response_time(mut self, value: f64) -> Self {
        self.avg_response_time = Some(value);
        self
    }

    fn readings(&self) -> Result<MetricReadings, RecordDomainError> {
        let requests = non_negative("requests_per_minute", self.requests_per_minute)?;
        let mut readings = MetricReadings::new().with_requests_per_minute(requests);
        if let Some(value) = self.cpu_usage {
            readings = readings.with_cpu_usage(Percentage::new("cpu_usage", value)?);
        }
        if let Some(value) = self.memory_usage {
            readings = readings.with_memory_usage(Percentage::new("memory_usage", value)?);
        }
        if let Some(value) = self.disk_usage {
            readings = readings.with_disk_usage(Percentage::new("disk_usage", value)?);
        }
        if let Some(value) = self.error_rate {
            readings = readings.with_error_rate(Percentage::new("error_rate", value)?);
        }
        if let Some(value) = self.avg_response_time {
            readings =
                readings.with_avg_response_time(Milliseconds::new("avg_response_time", value)?);
        }
        Ok(readings)
    }
}

/// Metric orchestration service.
#[derive(Clone)]
pub struct MetricService<R, C>
where
    R: MetricRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MetricService<R, C>
where
    R: MetricRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new metric service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a sample for an existing project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range readings and not-found
    /// when the project does not exist.
    pub async fn record(&self, request: RecordMetricRequest) -> RecordServiceResult<Metric> {
        let readings = request.readings()?;
        let draft = NewMetric::new(request.project_id, readings, &*self.clock);
        let metric = self.repository.create_metric(&draft).await?;
        debug!(metric_id = %metric.id(), project_id = %metric.project_id(), "metric recorded");
        Ok(metric)
    }

    /// Fetches a sample.
    ///
    /// # Errors
    ///
    /// Returns not-found when the sample does not exist.
    pub async fn get(&self, id: MetricId) -> RecordServiceResult<Metric> {
        let metric = self.repository.find_metric(id).await?;
        found(metric, RecordKind::Metric, id)
    }

    /// Lists a page of samples for a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::RecordServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordServiceResult<Vec<Metric>> {
        Ok(self.repository.list_metrics(project_id, page).await?)
    }
}
