//! Platform record keeping.
//!
//! Tracks projects and the deployments, SBOM scans, runtime metrics, model
//! registrations, and pipelines recorded against them. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
