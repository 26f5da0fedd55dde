//! SBOM persistence on `PostgreSQL`.

use super::{
    models::{NewSbomRow, SbomRow},
    schema::sboms,
    store::{PostgresRecordStore, map_child_insert_error, require_project},
};
use crate::records::{
    domain::{
        NewSbom, PersistedSbomData, ProjectId, Sbom, SbomId, SecurityScore, VulnerabilityCounts,
        json_object,
    },
    ports::{RecordRepositoryError, RecordRepositoryResult, SbomRepository},
};
use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::Value;

#[async_trait]
impl SbomRepository for PostgresRecordStore {
    async fn create_sbom(&self, draft: &NewSbom) -> RecordRepositoryResult<Sbom> {
        let project_id = draft.project_id();
        let new_row = to_new_row(draft)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                require_project(tx, project_id)?;
                let row = diesel::insert_into(sboms::table)
                    .values(&new_row)
                    .returning(SbomRow::as_returning())
                    .get_result::<SbomRow>(tx)
                    .map_err(|err| map_child_insert_error(err, project_id))?;
                row_to_sbom(row)
            })
        })
        .await
    }

    async fn find_sbom(&self, id: SbomId) -> RecordRepositoryResult<Option<Sbom>> {
        self.run_blocking(move |connection| {
            let row = sboms::table
                .filter(sboms::id.eq(id.value()))
                .select(SbomRow::as_select())
                .first::<SbomRow>(connection)
                .optional()?;
            row.map(row_to_sbom).transpose()
        })
        .await
    }

    async fn list_sboms(&self, project_id: ProjectId) -> RecordRepositoryResult<Vec<Sbom>> {
        self.run_blocking(move |connection| {
            let rows = sboms::table
                .filter(sboms::project_id.eq(project_id.value()))
                .order((sboms::generated_at.desc(), sboms::id.desc()))
                .select(SbomRow::as_select())
                .load::<SbomRow>(connection)?;
            rows.into_iter().map(row_to_sbom).collect()
        })
        .await
    }

    async fn latest_sbom(&self, project_id: ProjectId) -> RecordRepositoryResult<Option<Sbom>> {
        self.run_blocking(move |connection| {
            let row = sboms::table
                .filter(sboms::project_id.eq(project_id.value()))
                .order((sboms::generated_at.desc(), sboms::id.desc()))
                .select(SbomRow::as_select())
                .first::<SbomRow>(connection)
                .optional()?;
            row.map(row_to_sbom).transpose()
        })
        .await
    }
}

fn to_column(count: u32) -> RecordRepositoryResult<i32> {
    i32::try_from(count).map_err(RecordRepositoryError::persistence)
}

fn from_column(count: i32) -> RecordRepositoryResult<u32> {
    u32::try_from(count).map_err(RecordRepositoryError::invalid_persisted_data)
}

fn to_new_row(draft: &NewSbom) -> RecordRepositoryResult<NewSbomRow> {
    let counts = draft.counts();
    Ok(NewSbomRow {
        project_id: draft.project_id().value(),
        version: draft.version().to_owned(),
        sbom_data: Value::Object(draft.sbom_data().clone()),
        vulnerabilities_count: to_column(counts.total())?,
        critical_count: to_column(counts.critical())?,
        high_count: to_column(counts.high())?,
        medium_count: to_column(counts.medium())?,
        low_count: to_column(counts.low())?,
        security_score: draft.security_score().value(),
        generated_at: draft.generated_at(),
        scan_tool: draft.scan_tool().to_owned(),
    })
}

fn row_to_sbom(row: SbomRow) -> RecordRepositoryResult<Sbom> {
    let sbom_data = json_object("sbom_data", row.sbom_data)
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let counts = VulnerabilityCounts::with_total(from_column(row.vulnerabilities_count)?)
        .with_severities(
            from_column(row.critical_count)?,
            from_column(row.high_count)?,
            from_column(row.medium_count)?,
            from_column(row.low_count)?,
        );
    let security_score = SecurityScore::new(row.security_score)
        .map_err(RecordRepositoryError::invalid_persisted_data)?;

    Ok(Sbom::from_persisted(PersistedSbomData {
        id: SbomId::new(row.id),
        project_id: ProjectId::new(row.project_id),
        version: row.version,
        sbom_data,
        counts,
        security_score,
        scan_tool: row.scan_tool,
        generated_at: row.generated_at,
    }))
}
