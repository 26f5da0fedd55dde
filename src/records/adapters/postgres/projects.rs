//! Project persistence on `PostgreSQL`.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
    store::{PostgresRecordStore, page_bound},
};
use crate::records::{
    domain::{
        NewProject, PageRequest, PersistedProjectData, Project, ProjectChanges, ProjectId,
        ProjectName, ProjectStatus, ProjectType, RecordKind, json_object,
    },
    ports::{ProjectRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

const PROJECT_NAME_INDEX: &str = "idx_projects_name";

#[async_trait]
impl ProjectRepository for PostgresRecordStore {
    async fn create_project(&self, draft: &NewProject) -> RecordRepositoryResult<Project> {
        let name = draft.name().clone();
        let new_row = to_new_row(draft);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| map_name_violation(err, &name))?;
            row_to_project(row)
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> RecordRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.value()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> RecordRepositoryResult<Option<Project>> {
        let wanted = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::name.eq(&wanted))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_projects(&self, page: PageRequest) -> RecordRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::id.asc())
                .offset(page_bound(page.skip()))
                .limit(page_bound(page.limit()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Project> {
        let owned_changes = changes.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                let current = projects::table
                    .filter(projects::id.eq(id.value()))
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first::<ProjectRow>(tx)
                    .optional()?
                    .ok_or_else(|| RecordRepositoryError::not_found(RecordKind::Project, id))?;

                let mut project = row_to_project(current)?;
                project.apply_changes(&owned_changes, updated_at);

                let row = diesel::update(projects::table.filter(projects::id.eq(id.value())))
                    .set(&to_changeset(&project))
                    .returning(ProjectRow::as_returning())
                    .get_result::<ProjectRow>(tx)
                    .map_err(|err| map_name_violation(err, project.name()))?;
                row_to_project(row)
            })
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> RecordRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.filter(projects::id.eq(id.value())))
                .execute(connection)?;
            if deleted == 0 {
                return Err(RecordRepositoryError::not_found(RecordKind::Project, id));
            }
            Ok(())
        })
        .await
    }
}

fn map_name_violation(err: DieselError, name: &ProjectName) -> RecordRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info.constraint_name() == Some(PROJECT_NAME_INDEX) =>
        {
            RecordRepositoryError::DuplicateProjectName(name.clone())
        }
        other => RecordRepositoryError::persistence(other),
    }
}

fn to_new_row(draft: &NewProject) -> NewProjectRow {
    NewProjectRow {
        name: draft.name().as_str().to_owned(),
        project_type: draft.project_type().as_str().to_owned(),
        description: draft.description().map(str::to_owned),
        repository_url: draft.repository_url().map(str::to_owned),
        status: draft.status().as_str().to_owned(),
        config: draft.config().cloned().map(Value::Object),
        created_at: draft.created_at(),
        updated_at: draft.updated_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().as_str().to_owned(),
        project_type: project.project_type().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        repository_url: project.repository_url().map(str::to_owned),
        status: project.status().as_str().to_owned(),
        config: project.config().cloned().map(Value::Object),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> RecordRepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(RecordRepositoryError::invalid_persisted_data)?;
    let project_type =
        ProjectType::new(row.project_type).map_err(RecordRepositoryError::invalid_persisted_data)?;
    let status = ProjectStatus::try_from(row.status.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let config = row
        .config
        .map(|value| json_object("config", value))
        .transpose()
        .map_err(RecordRepositoryError::invalid_persisted_data)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(row.id),
        name,
        project_type,
        description: row.description,
        repository_url: row.repository_url,
        status,
        config,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
