//! Thread-safe in-memory record store.
//!
//! Mirrors the relational behaviour of the `PostgreSQL` adapter: per-table
//! identifier sequences, unique project names, project existence checks on
//! child inserts, and cascading project deletion.

mod activity;
mod projects;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::records::{
    domain::{
        Deployment, DeploymentId, Metric, MetricId, MlModel, MlModelId, Pipeline, PipelineId,
        Project, ProjectId, ProjectName, RecordKind, Sbom, SbomId,
    },
    ports::{RecordRepositoryError, RecordRepositoryResult},
};

/// In-memory implementation of every record repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    projects: BTreeMap<ProjectId, Project>,
    name_index: HashMap<ProjectName, ProjectId>,
    deployments: BTreeMap<DeploymentId, Deployment>,
    sboms: BTreeMap<SbomId, Sbom>,
    metrics: BTreeMap<MetricId, Metric>,
    ml_models: BTreeMap<MlModelId, MlModel>,
    pipelines: BTreeMap<PipelineId, Pipeline>,
    sequences: HashMap<RecordKind, i64>,
}

impl StoreState {
    fn next_id(&mut self, kind: RecordKind) -> i64 {
        let last = self.sequences.entry(kind).or_insert(0);
        *last += 1;
        *last
    }

    fn require_project(&self, id: ProjectId) -> RecordRepositoryResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(RecordRepositoryError::not_found(RecordKind::Project, id))
        }
    }
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RecordRepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|err| {
            RecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RecordRepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|err| {
            RecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}
