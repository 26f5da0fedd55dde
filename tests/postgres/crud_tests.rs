//! Round-trip tests for [`PostgresRecordStore`].

use crate::postgres::helpers::{PgContext, pg_context, unique_name};
use chrono::Duration;
use nvx29::records::{
    domain::{
        DeploymentStatus, DriftFlag, Environment, JsonObject, MetricReadings, ModelProvenance,
        ModelScores, NewDeployment, NewMetric, NewMlModel, NewPipeline, NewProject, NewSbom,
        PageRequest, Percentage, PipelineStatus, PipelineType, ProjectChanges, ProjectName,
        ProjectStatus, ProjectType, SecurityScore,
        UnitScore, VulnerabilityCounts, json_object,
    },
    ports::{
        DeploymentRepository, MetricRepository, MlModelRepository, PipelineRepository,
        ProjectRepository, SbomRepository,
    },
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn project_round_trips_through_storage(#[from(pg_context)] context: PgContext) {
    let created = context.seed_project("crud").expect("seed project");

    let fetched = context
        .rt
        .block_on(context.store.find_project(created.id()))
        .expect("lookup")
        .expect("project should exist");
    assert_eq!(fetched.name(), created.name());
    assert_eq!(fetched.status(), ProjectStatus::Initializing);
    assert_eq!(fetched.created_at(), fetched.updated_at());

    let by_name = context
        .rt
        .block_on(context.store.find_project_by_name(created.name()))
        .expect("lookup");
    assert_eq!(by_name.map(|p| p.id()), Some(created.id()));
}

#[rstest]
fn sparse_update_persists(#[from(pg_context)] context: PgContext) {
    let created = context.seed_project("update").expect("seed project");
    let later = created.updated_at() + Duration::minutes(1);
    let config = json_object("config", json!({"replicas": 3})).expect("object");

    let changes = ProjectChanges::new()
        .with_status(ProjectStatus::Active)
        .with_description(Some("now live".to_owned()))
        .with_config(Some(config.clone()));
    let updated = context
        .rt
        .block_on(context.store.update_project(created.id(), &changes, later))
        .expect("update should succeed");

    assert_eq!(updated.status(), ProjectStatus::Active);
    assert_eq!(updated.description(), Some("now live"));
    assert_eq!(updated.config(), Some(&config));
    assert_eq!(updated.name(), created.name());
    assert!(updated.updated_at() > updated.created_at());

    let cleared = context
        .rt
        .block_on(context.store.update_project(
            created.id(),
            &ProjectChanges::new().with_config(None),
            later + Duration::minutes(1),
        ))
        .expect("update should succeed");
    assert_eq!(cleared.config(), None);
    assert_eq!(cleared.description(), Some("now live"));
}

#[rstest]
fn child_records_round_trip(#[from(pg_context)] context: PgContext) {
    let clock = DefaultClock;
    let project = context.seed_project("children").expect("seed project");
    let rt = &context.rt;
    let store = &context.store;

    let deployment_draft = NewDeployment::new(project.id(), "1.0", Environment::Prod, &clock)
        .expect("draft")
        .with_commit_sha(Some("abc123".to_owned()));
    let deployment = rt
        .block_on(store.create_deployment(&deployment_draft))
        .expect("deployment");
    assert_eq!(deployment.status(), DeploymentStatus::Pending);
    assert_eq!(
        rt.block_on(store.find_deployment(deployment.id())).expect("lookup"),
        Some(deployment.clone())
    );

    let sbom_draft = NewSbom::new(
        project.id(),
        "1.0",
        json_object("sbom_data", json!({"components": [{"name": "openssl"}]})).expect("object"),
        &clock,
    )
    .expect("draft")
    .with_counts(VulnerabilityCounts::with_total(4).with_severities(1, 1, 1, 1))
    .with_security_score(SecurityScore::new(61.5).expect("score"));
    let sbom = rt.block_on(store.create_sbom(&sbom_draft)).expect("sbom");
    assert_eq!(rt.block_on(store.find_sbom(sbom.id())).expect("lookup"), Some(sbom));

    let readings = MetricReadings::new()
        .with_cpu_usage(Percentage::new("cpu_usage", 33.0).expect("percentage"))
        .with_requests_per_minute(250);
    let metric = rt
        .block_on(store.create_metric(&NewMetric::new(project.id(), readings, &clock)))
        .expect("metric");
    assert_eq!(
        rt.block_on(store.latest_metric(project.id())).expect("lookup"),
        Some(metric)
    );

    let model_draft = NewMlModel::new(project.id(), "churn", "2", &clock)
        .expect("draft")
        .with_provenance(ModelProvenance {
            framework: Some("xgboost".to_owned()),
            ..ModelProvenance::default()
        })
        .with_scores(ModelScores {
            accuracy: Some(UnitScore::new("accuracy", 0.91).expect("score")),
            ..ModelScores::default()
        })
        .with_metadata(JsonObject::new());
    let model = rt.block_on(store.create_ml_model(&model_draft)).expect("model");
    assert_eq!(model.drift_detected(), DriftFlag::Clear);
    assert_eq!(
        rt.block_on(store.list_ml_models(project.id(), PageRequest::default()))
            .expect("listing"),
        vec![model]
    );

    let pipeline_draft = NewPipeline::new(
        project.id(),
        "release",
        PipelineType::Cd,
        json_object("config", json!({"stages": 2})).expect("object"),
        &clock,
    )
    .expect("draft");
    let pipeline = rt
        .block_on(store.create_pipeline(&pipeline_draft))
        .expect("pipeline");
    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert_eq!(pipeline.success_rate(), Percentage::FULL);
    assert_eq!(
        rt.block_on(store.find_pipeline(pipeline.id())).expect("lookup"),
        Some(pipeline)
    );
}

#[rstest]
fn deployment_filter_and_count_agree(#[from(pg_context)] context: PgContext) {
    let clock = DefaultClock;
    let project = context.seed_project("count").expect("seed project");
    for version in ["1", "2", "3"] {
        let draft =
            NewDeployment::new(project.id(), version, Environment::Staging, &clock).expect("draft");
        context
            .rt
            .block_on(context.store.create_deployment(&draft))
            .expect("deployment");
    }

    let listed = context
        .rt
        .block_on(
            context
                .store
                .list_deployments(Some(project.id()), PageRequest::new(1, 10)),
        )
        .expect("listing");
    let versions: Vec<_> = listed.iter().map(|d| d.version()).collect();
    assert_eq!(versions, ["2", "3"]);
    assert_eq!(
        context
            .rt
            .block_on(context.store.count_deployments(project.id()))
            .expect("count"),
        3
    );
}

#[rstest]
fn long_free_text_fields_are_stored_in_full(#[from(pg_context)] context: PgContext) {
    let clock = DefaultClock;
    let rt = &context.rt;
    let store = &context.store;
    let long_type = "t".repeat(150);
    let long_version = "v".repeat(300);
    let long_url = format!("https://git.example.com/{}", "r".repeat(2100));

    let project_draft = NewProject::new(
        ProjectName::new(unique_name("long")).expect("name"),
        ProjectType::new(long_type.clone()).expect("project type"),
        &clock,
    )
    .with_repository_url(long_url.clone());
    let project = rt
        .block_on(store.create_project(&project_draft))
        .expect("long project fields should be stored");
    assert_eq!(project.project_type().as_str(), long_type);
    assert_eq!(project.repository_url(), Some(long_url.as_str()));

    let deployment_draft =
        NewDeployment::new(project.id(), long_version.clone(), Environment::Dev, &clock)
            .expect("draft")
            .with_commit_sha(Some("c".repeat(300)))
            .with_deployed_by(Some("d".repeat(300)));
    let deployment = rt
        .block_on(store.create_deployment(&deployment_draft))
        .expect("long deployment fields should be stored");
    assert_eq!(deployment.version(), long_version);

    let sbom_draft = NewSbom::new(project.id(), long_version.clone(), JsonObject::new(), &clock)
        .expect("draft")
        .with_scan_tool("s".repeat(150))
        .expect("scan tool");
    let sbom = rt
        .block_on(store.create_sbom(&sbom_draft))
        .expect("long scan tool should be stored");
    assert_eq!(sbom.scan_tool().len(), 150);

    let model_draft = NewMlModel::new(project.id(), "m".repeat(300), long_version, &clock)
        .expect("draft")
        .with_provenance(ModelProvenance {
            framework: Some("f".repeat(150)),
            artifact_uri: Some(long_url),
            ..ModelProvenance::default()
        });
    let model = rt
        .block_on(store.create_ml_model(&model_draft))
        .expect("long model fields should be stored");
    assert_eq!(model.name().len(), 300);

    let pipeline_draft = NewPipeline::new(
        project.id(),
        "p".repeat(300),
        PipelineType::Ci,
        JsonObject::new(),
        &clock,
    )
    .expect("draft");
    let pipeline = rt
        .block_on(store.create_pipeline(&pipeline_draft))
        .expect("long pipeline name should be stored");
    assert_eq!(pipeline.name().len(), 300);
}
