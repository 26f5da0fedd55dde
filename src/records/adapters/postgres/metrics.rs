//! Metric sample persistence on `PostgreSQL`.

use super::{
    models::{MetricRow, NewMetricRow},
    schema::metrics,
    store::{
        PostgresRecordStore, from_bigint, map_child_insert_error, page_bound, require_project,
        to_bigint,
    },
};
use crate::records::{
    domain::{
        Metric, MetricId, MetricReadings, Milliseconds, NewMetric, PageRequest, Percentage,
        ProjectId, RecordDomainError,
    },
    ports::{MetricRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl MetricRepository for PostgresRecordStore {
    async fn create_metric(&self, draft: &NewMetric) -> RecordRepositoryResult<Metric> {
        let project_id = draft.project_id();
        let readings = draft.readings();
        let new_row = NewMetricRow {
            project_id: project_id.value(),
            cpu_usage: readings.cpu_usage().map(Percentage::value),
            memory_usage: readings.memory_usage().map(Percentage::value),
            disk_usage: readings.disk_usage().map(Percentage::value),
            requests_per_minute: to_bigint(readings.requests_per_minute())?,
            error_rate: readings.error_rate().value(),
            avg_response_time: readings.avg_response_time().map(Milliseconds::value),
            recorded_at: draft.recorded_at(),
        };

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                require_project(tx, project_id)?;
                let row = diesel::insert_into(metrics::table)
                    .values(&new_row)
                    .returning(MetricRow::as_returning())
                    .get_result::<MetricRow>(tx)
                    .map_err(|err| map_child_insert_error(err, project_id))?;
                row_to_metric(&row)
            })
        })
        .await
    }

    async fn find_metric(&self, id: MetricId) -> RecordRepositoryResult<Option<Metric>> {
        self.run_blocking(move |connection| {
            let row = metrics::table
                .filter(metrics::id.eq(id.value()))
                .select(MetricRow::as_select())
                .first::<MetricRow>(connection)
                .optional()?;
            row.as_ref().map(row_to_metric).transpose()
        })
        .await
    }

    async fn list_metrics(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Metric>> {
        self.run_blocking(move |connection| {
            let rows = metrics::table
                .filter(metrics::project_id.eq(project_id.value()))
                .order((metrics::recorded_at.desc(), metrics::id.desc()))
                .offset(page_bound(page.skip()))
                .limit(page_bound(page.limit()))
                .select(MetricRow::as_select())
                .load::<MetricRow>(connection)?;
            rows.iter().map(row_to_metric).collect()
        })
        .await
    }

    async fn latest_metric(&self, project_id: ProjectId) -> RecordRepositoryResult<Option<Metric>> {
        self.run_blocking(move |connection| {
            let row = metrics::table
                .filter(metrics::project_id.eq(project_id.value()))
                .order((metrics::recorded_at.desc(), metrics::id.desc()))
                .select(MetricRow::as_select())
                .first::<MetricRow>(connection)
                .optional()?;
            row.as_ref().map(row_to_metric).transpose()
        })
        .await
    }
}

fn percentage(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<Percentage>, RecordDomainError> {
    value.map(|raw| Percentage::new(field, raw)).transpose()
}

fn decode_readings(row: &MetricRow) -> Result<MetricReadings, RecordDomainError> {
    let mut readings = MetricReadings::new()
        .with_error_rate(Percentage::new("error_rate", row.error_rate)?);
    if let Some(cpu) = percentage("cpu_usage", row.cpu_usage)? {
        readings = readings.with_cpu_usage(cpu);
    }
    if let Some(memory) = percentage("memory_usage", row.memory_usage)? {
        readings = readings.with_memory_usage(memory);
    }
    if let Some(disk) = percentage("disk_usage", row.disk_usage)? {
        readings = readings.with_disk_usage(disk);
    }
    if let Some(latency) = row.avg_response_time {
        let latency = Milliseconds::new("avg_response_time", latency)?;
        readings = readings.with_avg_response_time(latency);
    }
    Ok(readings)
}

fn row_to_metric(row: &MetricRow) -> RecordRepositoryResult<Metric> {
    let requests_per_minute = from_bigint(row.requests_per_minute)?;
    let readings = decode_readings(row)
        .map_err(RecordRepositoryError::invalid_persisted_data)?
        .with_requests_per_minute(requests_per_minute);

    Ok(Metric::from_persisted(
        MetricId::new(row.id),
        ProjectId::new(row.project_id),
        readings,
        row.recorded_at,
    ))
}
