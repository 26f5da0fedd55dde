//! Shared test helpers for `PostgreSQL` integration tests.

use super::cluster::shared_cluster;
use mockable::DefaultClock;
use nvx29::records::{
    adapters::postgres::{PostgresRecordStore, build_pool},
    domain::{NewProject, Project, ProjectName, ProjectType},
    ports::ProjectRepository,
};
use rstest::fixture;
use std::sync::Mutex;
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use super::cluster::BoxError;

/// Environment variable naming an external test database.
///
/// When unset, tests run against the embedded cluster.
pub const DATABASE_URL_VAR: &str = "NVX29_TEST_DATABASE_URL";

/// Database created on the embedded cluster for these tests.
pub const TEST_DATABASE: &str = "nvx29_test";

static SCHEMA_APPLIED: Mutex<bool> = Mutex::new(false);

/// Store and runtime shared by one test.
pub struct PgContext {
    /// Store connected to the test database.
    pub store: PostgresRecordStore,
    /// Runtime used to drive async store calls.
    pub rt: Runtime,
}

impl PgContext {
    /// Stores a project whose name starts with `prefix` and ends with a
    /// random suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the insert fails.
    pub fn seed_project(&self, prefix: &str) -> Result<Project, BoxError> {
        let draft = project_draft(&unique_name(prefix))?;
        Ok(self.rt.block_on(self.store.create_project(&draft))?)
    }
}

/// Returns a project name that is unique across test runs.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Builds a project draft stamped with the wall clock.
///
/// # Errors
///
/// Returns an error if the name is invalid.
pub fn project_draft(name: &str) -> Result<NewProject, BoxError> {
    Ok(NewProject::new(
        ProjectName::new(name)?,
        ProjectType::new("fastapi")?,
        &DefaultClock,
    ))
}

fn connect(url: &str) -> Result<PgContext, BoxError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let store = PostgresRecordStore::new(build_pool(url, 4)?);

    let mut applied = SCHEMA_APPLIED.lock().map_err(|err| err.to_string())?;
    if !*applied {
        rt.block_on(store.ensure_schema())?;
        *applied = true;
    }
    drop(applied);

    Ok(PgContext { store, rt })
}

fn database_url() -> Result<String, BoxError> {
    if let Ok(url) = std::env::var(DATABASE_URL_VAR) {
        return Ok(url);
    }
    let cluster = shared_cluster();
    cluster.ensure_database(TEST_DATABASE)?;
    Ok(cluster.database_url(TEST_DATABASE))
}

/// Connects to the test database with the schema applied.
///
/// Uses `NVX29_TEST_DATABASE_URL` when set and the embedded cluster
/// otherwise.
///
/// # Panics
///
/// Panics when no database can be prepared.
#[fixture]
pub fn pg_context() -> PgContext {
    match database_url().and_then(|url| connect(&url)) {
        Ok(context) => context,
        Err(err) => panic!("failed to prepare test database: {err}"),
    }
}
