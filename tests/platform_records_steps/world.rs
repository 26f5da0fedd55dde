//! Shared world state for platform record BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use nvx29::api::AppState;
use nvx29::records::{
    adapters::memory::InMemoryRecordStore,
    domain::{Deployment, Project},
    services::RecordServiceError,
};
use nvx29::templates::{GenerationAck, TemplateDescriptor, TemplateError};
use rstest::fixture;

/// Services wired to one in-memory store.
pub type TestState = AppState<InMemoryRecordStore, DefaultClock>;

/// Scenario world for platform record behaviour tests.
pub struct PlatformWorld {
    pub state: TestState,
    pub project: Option<Project>,
    pub deployment: Option<Deployment>,
    pub last_create_result: Option<Result<Project, RecordServiceError>>,
    pub catalogue: Vec<TemplateDescriptor>,
    pub generation: Option<Result<GenerationAck, TemplateError>>,
}

impl PlatformWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::new(Arc::new(InMemoryRecordStore::new()), Arc::new(DefaultClock)),
            project: None,
            deployment: None,
            last_create_result: None,
            catalogue: Vec::new(),
            generation: None,
        }
    }

    /// Returns the project created by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for PlatformWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlatformWorld {
    PlatformWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
