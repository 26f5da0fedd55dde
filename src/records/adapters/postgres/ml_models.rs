//! Model registration persistence on `PostgreSQL`.

use super::{
    models::{MlModelRow, NewMlModelRow},
    schema::ml_models,
    store::{PostgresRecordStore, map_child_insert_error, page_bound, require_project},
};
use crate::records::{
    domain::{
        DriftFlag, MlModel, MlModelId, ModelProvenance, ModelScores, NewMlModel, PageRequest,
        PersistedMlModelData, ProjectId, RecordDomainError, UnitScore, finite, json_object,
    },
    ports::{MlModelRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::Value;

#[async_trait]
impl MlModelRepository for PostgresRecordStore {
    async fn create_ml_model(&self, draft: &NewMlModel) -> RecordRepositoryResult<MlModel> {
        let project_id = draft.project_id();
        let new_row = to_new_row(draft);

        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx| {
                require_project(tx, project_id)?;
                let row = diesel::insert_into(ml_models::table)
                    .values(&new_row)
                    .returning(MlModelRow::as_returning())
                    .get_result::<MlModelRow>(tx)
                    .map_err(|err| map_child_insert_error(err, project_id))?;
                row_to_model(row)
            })
        })
        .await
    }

    async fn find_ml_model(&self, id: MlModelId) -> RecordRepositoryResult<Option<MlModel>> {
        self.run_blocking(move |connection| {
            let row = ml_models::table
                .filter(ml_models::id.eq(id.value()))
                .select(MlModelRow::as_select())
                .first::<MlModelRow>(connection)
                .optional()?;
            row.map(row_to_model).transpose()
        })
        .await
    }

    async fn list_ml_models(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<MlModel>> {
        self.run_blocking(move |connection| {
            let rows = ml_models::table
                .filter(ml_models::project_id.eq(project_id.value()))
                .order(ml_models::id.asc())
                .offset(page_bound(page.skip()))
                .limit(page_bound(page.limit()))
                .select(MlModelRow::as_select())
                .load::<MlModelRow>(connection)?;
            rows.into_iter().map(row_to_model).collect()
        })
        .await
    }
}

fn to_new_row(draft: &NewMlModel) -> NewMlModelRow {
    let provenance = draft.provenance().clone();
    let scores = draft.scores();
    NewMlModelRow {
        project_id: draft.project_id().value(),
        name: draft.name().to_owned(),
        version: draft.version().to_owned(),
        framework: provenance.framework,
        model_type: provenance.model_type,
        experiment_id: provenance.experiment_id,
        run_id: provenance.run_id,
        artifact_uri: provenance.artifact_uri,
        accuracy: scores.accuracy.map(UnitScore::value),
        precision: scores.precision.map(UnitScore::value),
        recall: scores.recall.map(UnitScore::value),
        f1_score: scores.f1_score.map(UnitScore::value),
        drift_detected: DriftFlag::Clear.as_str().to_owned(),
        registered_at: draft.registered_at(),
        metadata: draft.metadata().cloned().map(Value::Object),
    }
}

fn unit_score(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<UnitScore>, RecordDomainError> {
    value.map(|raw| UnitScore::new(field, raw)).transpose()
}

fn decode_scores(row: &MlModelRow) -> Result<ModelScores, RecordDomainError> {
    Ok(ModelScores {
        accuracy: unit_score("accuracy", row.accuracy)?,
        precision: unit_score("precision", row.precision)?,
        recall: unit_score("recall", row.recall)?,
        f1_score: unit_score("f1_score", row.f1_score)?,
    })
}

fn row_to_model(row: MlModelRow) -> RecordRepositoryResult<MlModel> {
    let scores = decode_scores(&row).map_err(RecordRepositoryError::invalid_persisted_data)?;
    let drift_detected = DriftFlag::try_from(row.drift_detected.as_str())
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let drift_score = row
        .drift_score
        .map(|raw| finite("drift_score", raw))
        .transpose()
        .map_err(RecordRepositoryError::invalid_persisted_data)?;
    let metadata = row
        .metadata
        .map(|value| json_object("metadata", value))
        .transpose()
        .map_err(RecordRepositoryError::invalid_persisted_data)?;

    Ok(MlModel::from_persisted(PersistedMlModelData {
        id: MlModelId::new(row.id),
        project_id: ProjectId::new(row.project_id),
        name: row.name,
        version: row.version,
        provenance: ModelProvenance {
            framework: row.framework,
            model_type: row.model_type,
            experiment_id: row.experiment_id,
            run_id: row.run_id,
            artifact_uri: row.artifact_uri,
        },
        scores,
        drift_detected,
        drift_score,
        registered_at: row.registered_at,
        last_prediction_at: row.last_prediction_at,
        metadata,
    }))
}
