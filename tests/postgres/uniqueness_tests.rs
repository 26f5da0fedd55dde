//! Project name uniqueness for [`PostgresRecordStore`].

use crate::postgres::helpers::{PgContext, pg_context, project_draft, unique_name};
use nvx29::records::{
    domain::ProjectChanges,
    ports::{ProjectRepository, RecordRepositoryError},
};
use rstest::rstest;

#[rstest]
fn duplicate_name_is_rejected(#[from(pg_context)] context: PgContext) {
    let name = unique_name("dup");
    let draft = project_draft(&name).expect("draft");
    context
        .rt
        .block_on(context.store.create_project(&draft))
        .expect("first insert");

    let result = context.rt.block_on(context.store.create_project(&draft));

    assert!(
        matches!(
            result,
            Err(RecordRepositoryError::DuplicateProjectName(ref taken)) if taken.as_str() == name
        ),
        "expected duplicate name error, got {result:?}"
    );
}

#[rstest]
fn rename_onto_taken_name_is_rejected(#[from(pg_context)] context: PgContext) {
    let first = context.seed_project("taken").expect("seed project");
    let second = context.seed_project("mover").expect("seed project");

    let changes = ProjectChanges::new().with_name(first.name().clone());
    let result = context.rt.block_on(context.store.update_project(
        second.id(),
        &changes,
        second.updated_at(),
    ));
    assert!(matches!(
        result,
        Err(RecordRepositoryError::DuplicateProjectName(_))
    ));

    let unchanged = context
        .rt
        .block_on(context.store.find_project(second.id()))
        .expect("lookup")
        .expect("project should exist");
    assert_eq!(unchanged.name(), second.name());
}

#[rstest]
fn deleted_name_can_be_reused(#[from(pg_context)] context: PgContext) {
    let original = context.seed_project("reuse").expect("seed project");
    context
        .rt
        .block_on(context.store.delete_project(original.id()))
        .expect("delete");

    let draft = project_draft(original.name().as_str()).expect("draft");
    let recreated = context
        .rt
        .block_on(context.store.create_project(&draft))
        .expect("name should be free again");

    assert!(recreated.id() > original.id());
}
