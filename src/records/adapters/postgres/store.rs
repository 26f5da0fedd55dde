//! Connection handling shared by the `PostgreSQL` record adapters.

use super::schema::projects;
use crate::records::{
    domain::{ProjectId, RecordKind},
    ports::{RecordRepositoryError, RecordRepositoryResult},
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type for record adapters.
pub type RecordPgPool = Pool<ConnectionManager<PgConnection>>;

/// Table definitions applied at startup.
const PLATFORM_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_platform_tables/up.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<RecordPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Creates any missing platform tables and indexes.
///
/// Every statement is `IF NOT EXISTS`, so repeated calls are harmless.
///
/// # Errors
///
/// Returns the underlying Diesel error when a statement fails.
pub fn apply_schema(connection: &mut PgConnection) -> Result<(), DieselError> {
    connection.batch_execute(PLATFORM_SCHEMA_SQL)
}

/// `PostgreSQL`-backed implementation of every record repository port.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: RecordPgPool,
}

impl PostgresRecordStore {
    /// Creates a store from a `PostgreSQL` pool.
    #[must_use]
    pub const fn new(pool: RecordPgPool) -> Self {
        Self { pool }
    }

    /// Applies the platform schema using a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] when no connection is
    /// available or a statement fails.
    pub async fn ensure_schema(&self) -> RecordRepositoryResult<()> {
        self.run_blocking(|connection| {
            apply_schema(connection).map_err(RecordRepositoryError::persistence)
        })
        .await
    }

    pub(super) async fn run_blocking<F, T>(&self, operation: F) -> RecordRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RecordRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RecordRepositoryError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(RecordRepositoryError::persistence)?
    }
}

impl From<DieselError> for RecordRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Fails with `NotFound` unless the project row exists.
///
/// The row is share-locked so a concurrent delete cannot orphan the child
/// inserted in the same transaction.
pub(super) fn require_project(
    connection: &mut PgConnection,
    project_id: ProjectId,
) -> RecordRepositoryResult<()> {
    let found = projects::table
        .filter(projects::id.eq(project_id.value()))
        .select(projects::id)
        .for_share()
        .first::<i64>(connection)
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RecordRepositoryError::not_found(RecordKind::Project, project_id)),
    }
}

/// Maps a child insert failure, treating a dangling project key as absent.
pub(super) fn map_child_insert_error(
    err: DieselError,
    project_id: ProjectId,
) -> RecordRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            RecordRepositoryError::not_found(RecordKind::Project, project_id)
        }
        other => RecordRepositoryError::persistence(other),
    }
}

/// Converts an unsigned domain quantity into a `BIGINT` column value.
pub(super) fn to_bigint(value: u64) -> RecordRepositoryResult<i64> {
    i64::try_from(value).map_err(RecordRepositoryError::persistence)
}

/// Converts a `BIGINT` column value into an unsigned domain quantity.
pub(super) fn from_bigint(value: i64) -> RecordRepositoryResult<u64> {
    u64::try_from(value).map_err(RecordRepositoryError::invalid_persisted_data)
}

/// Converts a page window bound into a `LIMIT`/`OFFSET` value.
pub(super) fn page_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
