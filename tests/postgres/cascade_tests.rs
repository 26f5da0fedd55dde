//! Foreign-key checks and cascading deletion for [`PostgresRecordStore`].

use crate::postgres::helpers::{PgContext, pg_context};
use mockable::DefaultClock;
use nvx29::records::{
    domain::{
        Environment, JsonObject, MetricReadings, NewDeployment, NewMetric, NewMlModel,
        NewPipeline, NewSbom, PageRequest, PipelineType, ProjectId, RecordKind,
    },
    ports::{
        DeploymentRepository, MetricRepository, MlModelRepository, PipelineRepository,
        ProjectRepository, RecordRepositoryError, SbomRepository,
    },
};
use rstest::rstest;

fn is_missing_project<T>(result: &Result<T, RecordRepositoryError>) -> bool {
    matches!(
        result,
        Err(RecordRepositoryError::NotFound {
            kind: RecordKind::Project,
            ..
        })
    )
}

#[rstest]
fn child_insert_for_unknown_project_is_not_found(#[from(pg_context)] context: PgContext) {
    let clock = DefaultClock;
    let ghost = ProjectId::new(i64::MAX);

    let deployment = NewDeployment::new(ghost, "1.0", Environment::Dev, &clock).expect("draft");
    let sbom = NewSbom::new(ghost, "1.0", JsonObject::new(), &clock).expect("draft");
    let pipeline =
        NewPipeline::new(ghost, "build", PipelineType::Security, JsonObject::new(), &clock)
            .expect("draft");

    assert!(is_missing_project(
        &context.rt.block_on(context.store.create_deployment(&deployment))
    ));
    assert!(is_missing_project(
        &context.rt.block_on(context.store.create_sbom(&sbom))
    ));
    assert!(is_missing_project(
        &context.rt.block_on(context.store.create_pipeline(&pipeline))
    ));
}

#[rstest]
fn deleting_project_cascades(#[from(pg_context)] context: PgContext) {
    let clock = DefaultClock;
    let project = context.seed_project("cascade").expect("seed project");
    let rt = &context.rt;
    let store = &context.store;

    let deployment = rt
        .block_on(store.create_deployment(
            &NewDeployment::new(project.id(), "1.0", Environment::Prod, &clock).expect("draft"),
        ))
        .expect("deployment");
    let sbom = rt
        .block_on(store.create_sbom(
            &NewSbom::new(project.id(), "1.0", JsonObject::new(), &clock).expect("draft"),
        ))
        .expect("sbom");
    let metric = rt
        .block_on(store.create_metric(&NewMetric::new(
            project.id(),
            MetricReadings::new(),
            &clock,
        )))
        .expect("metric");
    let model = rt
        .block_on(store.create_ml_model(
            &NewMlModel::new(project.id(), "churn", "1", &clock).expect("draft"),
        ))
        .expect("model");
    let pipeline = rt
        .block_on(store.create_pipeline(
            &NewPipeline::new(project.id(), "build", PipelineType::Ci, JsonObject::new(), &clock)
                .expect("draft"),
        ))
        .expect("pipeline");

    rt.block_on(store.delete_project(project.id()))
        .expect("delete");

    assert!(rt.block_on(store.find_project(project.id())).expect("lookup").is_none());
    assert!(rt.block_on(store.find_deployment(deployment.id())).expect("lookup").is_none());
    assert!(rt.block_on(store.find_sbom(sbom.id())).expect("lookup").is_none());
    assert!(rt.block_on(store.find_metric(metric.id())).expect("lookup").is_none());
    assert!(rt.block_on(store.find_ml_model(model.id())).expect("lookup").is_none());
    assert!(rt.block_on(store.find_pipeline(pipeline.id())).expect("lookup").is_none());
    assert!(
        rt.block_on(store.list_metrics(project.id(), PageRequest::default()))
            .expect("listing")
            .is_empty()
    );
}

#[rstest]
fn second_delete_is_not_found(#[from(pg_context)] context: PgContext) {
    let project = context.seed_project("twice").expect("seed project");
    context
        .rt
        .block_on(context.store.delete_project(project.id()))
        .expect("first delete");

    let again = context.rt.block_on(context.store.delete_project(project.id()));
    assert!(is_missing_project(&again));
}
