//! Project lifecycle tests for [`InMemoryRecordStore`].

use crate::in_memory::helpers::{clock, project_draft, runtime, seed_project, store};
use chrono::Duration;
use mockable::DefaultClock;
use nvx29::records::{
    adapters::memory::InMemoryRecordStore,
    domain::{PageRequest, ProjectChanges, ProjectId, ProjectName, ProjectStatus, RecordKind},
    ports::{ProjectRepository, RecordRepositoryError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Identifiers are assigned sequentially from one.
#[rstest]
fn identifiers_are_sequential(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let first = seed_project(&rt, &store, "alpha").expect("first project");
    let second = seed_project(&rt, &store, "beta").expect("second project");

    assert_eq!(first.id(), ProjectId::new(1));
    assert_eq!(second.id(), ProjectId::new(2));
    assert_eq!(first.status(), ProjectStatus::Initializing);
}

/// Names are unique after trimming.
#[rstest]
fn trimmed_duplicate_name_is_rejected(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    seed_project(&rt, &store, "alpha").expect("first project");

    let draft = project_draft("  alpha ", &clock).expect("valid draft");
    let result = rt.block_on(store.create_project(&draft));

    assert!(
        matches!(
            result,
            Err(RecordRepositoryError::DuplicateProjectName(ref name)) if name.as_str() == "alpha"
        ),
        "duplicate name should be rejected, got {result:?}"
    );
}

/// Projects can be found by name and the lookup follows renames.
#[rstest]
fn lookup_by_name_follows_renames(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");
    let renamed = ProjectName::new("omega").expect("valid name");

    let changes = ProjectChanges::new().with_name(renamed.clone());
    let later = project.updated_at() + Duration::seconds(1);
    rt.block_on(store.update_project(project.id(), &changes, later))
        .expect("rename should succeed");

    let old = rt
        .block_on(store.find_project_by_name(&ProjectName::new("alpha").expect("valid name")))
        .expect("lookup");
    let new = rt
        .block_on(store.find_project_by_name(&renamed))
        .expect("lookup");

    assert!(old.is_none());
    assert_eq!(new.map(|p| p.id()), Some(project.id()));
}

/// Updates persist and keep the creation timestamp.
#[rstest]
fn update_persists_changes(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");
    let later = project.updated_at() + Duration::minutes(3);

    let changes = ProjectChanges::new()
        .with_status(ProjectStatus::Archived)
        .with_repository_url(Some("https://git.example/alpha".to_owned()));
    rt.block_on(store.update_project(project.id(), &changes, later))
        .expect("update should succeed");

    let stored = rt
        .block_on(store.find_project(project.id()))
        .expect("lookup")
        .expect("project should exist");
    assert_eq!(stored.status(), ProjectStatus::Archived);
    assert_eq!(stored.repository_url(), Some("https://git.example/alpha"));
    assert_eq!(stored.created_at(), project.created_at());
    assert_eq!(stored.updated_at(), later);
}

/// Updating or deleting a missing project reports it by kind and id.
#[rstest]
fn missing_project_operations_fail(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let missing = ProjectId::new(77);

    let update = rt.block_on(store.update_project(
        missing,
        &ProjectChanges::new().with_status(ProjectStatus::Active),
        chrono::Utc::now(),
    ));
    let delete = rt.block_on(store.delete_project(missing));

    for result in [update.map(|_| ()), delete] {
        assert!(matches!(
            result,
            Err(RecordRepositoryError::NotFound {
                kind: RecordKind::Project,
                id: 77
            })
        ));
    }
}

/// Listing honours skip and limit over id order.
#[rstest]
#[case(0, 100, &["a", "b", "c", "d"])]
#[case(1, 2, &["b", "c"])]
#[case(3, 5, &["d"])]
#[case(4, 1, &[])]
#[case(0, 0, &[])]
fn list_applies_window(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
    #[case] skip: u64,
    #[case] limit: u64,
    #[case] expected: &[&str],
) {
    let rt = runtime.expect("runtime creation");
    for name in ["a", "b", "c", "d"] {
        seed_project(&rt, &store, name).expect("seed project");
    }

    let page = rt
        .block_on(store.list_projects(PageRequest::new(skip, limit)))
        .expect("listing");
    let names: Vec<_> = page.iter().map(|p| p.name().as_str()).collect();

    assert_eq!(names, expected);
}

/// Deleting a project frees its name without reusing its identifier.
#[rstest]
fn deletion_frees_name_but_not_id(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let original = seed_project(&rt, &store, "alpha").expect("seed project");

    rt.block_on(store.delete_project(original.id()))
        .expect("delete should succeed");
    let recreated = seed_project(&rt, &store, "alpha").expect("recreate project");

    assert_eq!(recreated.id(), ProjectId::new(2));
}
