//! Pipeline persistence on `PostgreSQL`.

use super::{
    models::{NewPipelineRow, PipelineRow},
    schema::pipelines,
    store::{
        PostgresRecordStore, from_bigint, map_child_insert_error, page_bound, require_project,
    },
};
use crate::records::{
    domain::{
        NewPipeline, PageRequest, Percentage, PersistedPipelineData, Pipeline, PipelineId,
        PipelineStatus, PipelineType, ProjectId, json_object,
    },
    ports::{PipelineRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::Value;

#[async_trait]
impl PipelineRepository for PostgresRecordStore {
    async fn create_pipeline(&self, draft: &NewPipeline) -> RecordRepositoryResult<Pipeline> {
        let project_id = draft.project_id();
        let new_row = NewPipelineRow {
            project_id: project_id.value(),
            name: draft.name().to_owned(),
            pipeline_type: draft.pipeline_type().as_str().to_owned(),
            status: PipelineStatus::Idle.as_str().to_owned(),
            config: Value::Object(draft.config().clone()),
            success_rate: Percentage::FULL.value(),
            created_at: draft.created_at(),
            updated_at: draft.created_at(),
        };

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                require_project(tx, project_id)?;
                let row = diesel::insert_into(pipelines::table)
                    .values(&new_row)
                    .returning(PipelineRow::as_returning())
                    .get_result::<PipelineRow>(tx)
                    .map_err(|err| map_child_insert_error(err, project_id))?;
                row_to_pipeline(row)
            })
        })
        .await
    }

    async fn find_pipeline(&self, id: PipelineId) -> RecordRepositoryResult<Option<Pipeline>> {
        self.run_blocking(move |connection| {
            let row = pipelines::table
                .filter(pipelines::id.eq(id.value()))
                .select(PipelineRow::as_select())
                .first::<PipelineRow>(connection)
                .optional()?;
            row.map(row_to_pipeline).transpose()
        })
        .await
    }

    async fn list_pipelines(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Pipeline>> {
        self.run_blocking(move |connection| {
            let rows = pipelines::table
                .filter(pipelines::project_id.eq(project_id.value()))
                .order(pipelines::id.asc())
                .offset(page_bound(page.skip()))
                .limit(page_bound(page.limit()))
                .select(PipelineRow::as_select())
                .load::<PipelineRow>(connection)?;
            rows.into_iter().map(row_to_pipeline).collect()
        })
        .await
    }
}

fn row_to_pipeline(row: PipelineRow) -> RecordRepositoryResult<Pipeline> {
    let pipeline_type = PipelineType::try_from(row.pipeline_type.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let status = PipelineStatus::try_from(row.status.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let config =
        json_object("config", row.config).map_err(RecordRepositoryError::invalid_persisted_data)?;
    let success_rate = Percentage::new("success_rate", row.success_rate)
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let last_run_duration = row.last_run_duration.map(from_bigint).transpose()?;

    Ok(Pipeline::from_persisted(PersistedPipelineData {
        id: PipelineId::new(row.id),
        project_id: ProjectId::new(row.project_id),
        name: row.name,
        pipeline_type,
        config,
        status,
        last_run_at: row.last_run_at,
        last_run_duration,
        success_rate,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
