//! Deployment persistence on `PostgreSQL`.

use super::{
    models::{DeploymentRow, NewDeploymentRow},
    schema::deployments,
    store::{
        PostgresRecordStore, from_bigint, map_child_insert_error, page_bound, require_project,
    },
};
use crate::records::{
    domain::{
        Deployment, DeploymentId, DeploymentStatus, Environment, NewDeployment, PageRequest,
        PersistedDeploymentData, ProjectId,
    },
    ports::{DeploymentRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl DeploymentRepository for PostgresRecordStore {
    async fn create_deployment(&self, draft: &NewDeployment) -> RecordRepositoryResult<Deployment> {
        let project_id = draft.project_id();
        let new_row = NewDeploymentRow {
            project_id: project_id.value(),
            version: draft.version().to_owned(),
            environment: draft.environment().as_str().to_owned(),
            status: DeploymentStatus::Pending.as_str().to_owned(),
            commit_sha: draft.commit_sha().map(str::to_owned),
            deployed_by: draft.deployed_by().map(str::to_owned),
            deployed_at: draft.deployed_at(),
        };

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                require_project(tx, project_id)?;
                let row = diesel::insert_into(deployments::table)
                    .values(&new_row)
                    .returning(DeploymentRow::as_returning())
                    .get_result::<DeploymentRow>(tx)
                    .map_err(|err| map_child_insert_error(err, project_id))?;
                row_to_deployment(row)
            })
        })
        .await
    }

    async fn find_deployment(
        &self,
        id: DeploymentId,
    ) -> RecordRepositoryResult<Option<Deployment>> {
        self.run_blocking(move |connection| {
            let row = deployments::table
                .filter(deployments::id.eq(id.value()))
                .select(DeploymentRow::as_select())
                .first::<DeploymentRow>(connection)
                .optional()?;
            row.map(row_to_deployment).transpose()
        })
        .await
    }

    async fn list_deployments(
        &self,
        project_id: Option<ProjectId>,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Deployment>> {
        self.run_blocking(move |connection| {
            let mut query = deployments::table.into_boxed();
            if let Some(wanted) = project_id {
                query = query.filter(deployments::project_id.eq(wanted.value()));
            }
            let rows = query
                .order(deployments::id.asc())
                .offset(page_bound(page.skip()))
                .limit(page_bound(page.limit()))
                .select(DeploymentRow::as_select())
                .load::<DeploymentRow>(connection)?;
            rows.into_iter().map(row_to_deployment).collect()
        })
        .await
    }

    async fn count_deployments(&self, project_id: ProjectId) -> RecordRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total: i64 = deployments::table
                .filter(deployments::project_id.eq(project_id.value()))
                .count()
                .get_result(connection)?;
            from_bigint(total)
        })
        .await
    }
}

fn row_to_deployment(row: DeploymentRow) -> RecordRepositoryResult<Deployment> {
    let environment = Environment::try_from(row.environment.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let status = DeploymentStatus::try_from(row.status.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let duration_seconds = row.duration_seconds.map(from_bigint).transpose()?;

    Ok(Deployment::from_persisted(PersistedDeploymentData {
        id: DeploymentId::new(row.id),
        project_id: ProjectId::new(row.project_id),
        version: row.version,
        environment,
        status,
        commit_sha: row.commit_sha,
        deployed_by: row.deployed_by,
        deployed_at: row.deployed_at,
        duration_seconds,
        logs: row.logs,
        error_message: row.error_message,
    }))
}
