//! NVX29: record-keeping API for an internal developer platform.
//!
//! The crate stores projects together with their deployments, SBOM scans,
//! runtime metric samples, registered ML models, and pipeline definitions,
//! and serves them over a JSON HTTP API.
//!
//! # Architecture
//!
//! Records follow hexagonal architecture principles:
//!
//! - **Domain**: validated record types with no infrastructure dependencies
//! - **Ports**: repository traits per record kind
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`records`]: record domain, repositories, and services
//! - [`templates`]: static project template catalogue and generation stub
//! - [`api`]: axum router, handlers, and error mapping
//! - [`config`]: environment configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod api;
pub mod config;
pub mod records;
pub mod telemetry;
pub mod templates;
