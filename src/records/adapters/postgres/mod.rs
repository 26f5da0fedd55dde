//! `PostgreSQL` adapters for platform record persistence.

mod deployments;
mod metrics;
mod ml_models;
mod models;
mod pipelines;
mod projects;
mod sboms;
mod schema;
mod store;

pub use store::{PostgresRecordStore, RecordPgPool, apply_schema, build_pool};
