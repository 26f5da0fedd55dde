//! Project operations for the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::InMemoryRecordStore;
use crate::records::{
    domain::{
        NewProject, PageRequest, Project, ProjectChanges, ProjectId, ProjectName, RecordKind,
    },
    ports::{ProjectRepository, RecordRepositoryError, RecordRepositoryResult},
};

#[async_trait]
impl ProjectRepository for InMemoryRecordStore {
    async fn create_project(&self, draft: &NewProject) -> RecordRepositoryResult<Project> {
        let mut state = self.write()?;
        if state.name_index.contains_key(draft.name()) {
            return Err(RecordRepositoryError::DuplicateProjectName(
                draft.name().clone(),
            ));
        }
        let id = ProjectId::new(state.next_id(RecordKind::Project));
        let project = Project::from_new(id, draft.clone());
        state.name_index.insert(project.name().clone(), id);
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: ProjectId) -> RecordRepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> RecordRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state
            .name_index
            .get(name)
            .and_then(|id| state.projects.get(id))
            .cloned())
    }

    async fn list_projects(&self, page: PageRequest) -> RecordRepositoryResult<Vec<Project>> {
        Ok(page.apply(self.read()?.projects.values().cloned()))
    }

    async fn update_project(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Project> {
        let mut state = self.write()?;
        let mut project = state
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| RecordRepositoryError::not_found(RecordKind::Project, id))?;

        if let Some(new_name) = changes.name() {
            let taken = state
                .name_index
                .get(new_name)
                .is_some_and(|owner| *owner != id);
            if taken {
                return Err(RecordRepositoryError::DuplicateProjectName(
                    new_name.clone(),
                ));
            }
        }

        let old_name = project.name().clone();
        project.apply_changes(changes, updated_at);
        state.name_index.remove(&old_name);
        state.name_index.insert(project.name().clone(), id);
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: ProjectId) -> RecordRepositoryResult<()> {
        let mut state = self.write()?;
        let project = state
            .projects
            .remove(&id)
            .ok_or_else(|| RecordRepositoryError::not_found(RecordKind::Project, id))?;
        state.name_index.remove(project.name());
        state.deployments.retain(|_, row| row.project_id() != id);
        state.sboms.retain(|_, row| row.project_id() != id);
        state.metrics.retain(|_, row| row.project_id() != id);
        state.ml_models.retain(|_, row| row.project_id() != id);
        state.pipelines.retain(|_, row| row.project_id() != id);
        Ok(())
    }
}
