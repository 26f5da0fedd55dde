//! Existence checks and cascading deletion for [`InMemoryRecordStore`].

use crate::in_memory::helpers::{BoxError, clock, runtime, seed_project, store};
use mockable::DefaultClock;
use nvx29::records::{
    adapters::memory::InMemoryRecordStore,
    domain::{
        DeploymentId, Environment, JsonObject, MetricId, MetricReadings, MlModelId,
        NewDeployment, NewMetric, NewMlModel, NewPipeline, NewSbom, PageRequest, PipelineId,
        PipelineType, ProjectId, RecordKind, SbomId,
    },
    ports::{
        DeploymentRepository, MetricRepository, MlModelRepository, PipelineRepository,
        ProjectRepository, RecordRepositoryError, SbomRepository,
    },
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Identifiers of one child of each kind.
struct Children {
    deployment: DeploymentId,
    sbom: SbomId,
    metric: MetricId,
    ml_model: MlModelId,
    pipeline: PipelineId,
}

fn seed_children(
    rt: &Runtime,
    store: &InMemoryRecordStore,
    clock: &DefaultClock,
    project_id: ProjectId,
) -> Result<Children, BoxError> {
    let deployment = NewDeployment::new(project_id, "1.0", Environment::Prod, clock)?;
    let sbom = NewSbom::new(project_id, "1.0", JsonObject::new(), clock)?;
    let metric = NewMetric::new(project_id, MetricReadings::new(), clock);
    let ml_model = NewMlModel::new(project_id, "churn", "1", clock)?;
    let pipeline =
        NewPipeline::new(project_id, "build", PipelineType::Ci, JsonObject::new(), clock)?;

    Ok(Children {
        deployment: rt.block_on(store.create_deployment(&deployment))?.id(),
        sbom: rt.block_on(store.create_sbom(&sbom))?.id(),
        metric: rt.block_on(store.create_metric(&metric))?.id(),
        ml_model: rt.block_on(store.create_ml_model(&ml_model))?.id(),
        pipeline: rt.block_on(store.create_pipeline(&pipeline))?.id(),
    })
}

fn child_presence(
    rt: &Runtime,
    store: &InMemoryRecordStore,
    children: &Children,
) -> Result<[bool; 5], BoxError> {
    Ok([
        rt.block_on(store.find_deployment(children.deployment))?.is_some(),
        rt.block_on(store.find_sbom(children.sbom))?.is_some(),
        rt.block_on(store.find_metric(children.metric))?.is_some(),
        rt.block_on(store.find_ml_model(children.ml_model))?.is_some(),
        rt.block_on(store.find_pipeline(children.pipeline))?.is_some(),
    ])
}

fn is_missing_project<T>(result: &Result<T, RecordRepositoryError>) -> bool {
    matches!(
        result,
        Err(RecordRepositoryError::NotFound {
            kind: RecordKind::Project,
            ..
        })
    )
}

/// Every child type refuses an unknown project.
#[rstest]
fn child_creates_require_existing_project(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let ghost = ProjectId::new(404);

    let deployment = NewDeployment::new(ghost, "1.0", Environment::Dev, &clock).expect("draft");
    let sbom = NewSbom::new(ghost, "1.0", JsonObject::new(), &clock).expect("draft");
    let metric = NewMetric::new(ghost, MetricReadings::new(), &clock);
    let ml_model = NewMlModel::new(ghost, "churn", "1", &clock).expect("draft");
    let pipeline = NewPipeline::new(ghost, "build", PipelineType::Ml, JsonObject::new(), &clock)
        .expect("draft");

    assert!(is_missing_project(&rt.block_on(store.create_deployment(&deployment))));
    assert!(is_missing_project(&rt.block_on(store.create_sbom(&sbom))));
    assert!(is_missing_project(&rt.block_on(store.create_metric(&metric))));
    assert!(is_missing_project(&rt.block_on(store.create_ml_model(&ml_model))));
    assert!(is_missing_project(&rt.block_on(store.create_pipeline(&pipeline))));
}

/// Deleting a project removes every child and leaves other projects alone.
#[rstest]
fn delete_cascades_to_all_children(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let doomed = seed_project(&rt, &store, "alpha").expect("seed project");
    let survivor = seed_project(&rt, &store, "beta").expect("seed project");
    let doomed_children = seed_children(&rt, &store, &clock, doomed.id()).expect("seed children");
    let surviving_children =
        seed_children(&rt, &store, &clock, survivor.id()).expect("seed children");

    rt.block_on(store.delete_project(doomed.id()))
        .expect("delete should succeed");

    assert_eq!(
        child_presence(&rt, &store, &doomed_children).expect("lookups"),
        [false; 5]
    );
    assert_eq!(
        child_presence(&rt, &store, &surviving_children).expect("lookups"),
        [true; 5]
    );
    assert_eq!(
        rt.block_on(store.count_deployments(doomed.id())).expect("count"),
        0
    );
    assert!(
        rt.block_on(store.list_sboms(doomed.id()))
            .expect("listing")
            .is_empty()
    );
    assert!(
        rt.block_on(store.list_pipelines(doomed.id(), PageRequest::default()))
            .expect("listing")
            .is_empty()
    );
}

/// Children cannot be attached after their project is deleted.
#[rstest]
fn deleted_project_rejects_new_children(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");
    rt.block_on(store.delete_project(project.id()))
        .expect("delete should succeed");

    let draft =
        NewDeployment::new(project.id(), "2.0", Environment::Staging, &clock).expect("draft");
    assert!(is_missing_project(&rt.block_on(store.create_deployment(&draft))));
}

/// Deployment counts are per project.
#[rstest]
fn deployment_counts_are_scoped(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let alpha = seed_project(&rt, &store, "alpha").expect("seed project");
    let beta = seed_project(&rt, &store, "beta").expect("seed project");
    for (project_id, version) in [(alpha.id(), "1"), (alpha.id(), "2"), (beta.id(), "1")] {
        let draft =
            NewDeployment::new(project_id, version, Environment::Prod, &clock).expect("draft");
        rt.block_on(store.create_deployment(&draft)).expect("deployment");
    }

    assert_eq!(rt.block_on(store.count_deployments(alpha.id())).expect("count"), 2);
    assert_eq!(rt.block_on(store.count_deployments(beta.id())).expect("count"), 1);
    assert_eq!(
        rt.block_on(store.count_deployments(ProjectId::new(99))).expect("count"),
        0
    );
}
