//! Child record operations for the in-memory store.

use async_trait::async_trait;
use std::cmp::Reverse;

use super::InMemoryRecordStore;
use crate::records::{
    domain::{
        Deployment, DeploymentId, Metric, MetricId, MlModel, MlModelId, NewDeployment,
        NewMetric, NewMlModel, NewPipeline, NewSbom, PageRequest, Pipeline, PipelineId,
        ProjectId, RecordKind, Sbom, SbomId,
    },
    ports::{
        DeploymentRepository, MetricRepository, MlModelRepository, PipelineRepository,
        RecordRepositoryResult, SbomRepository,
    },
};

#[async_trait]
impl DeploymentRepository for InMemoryRecordStore {
    async fn create_deployment(&self, draft: &NewDeployment) -> RecordRepositoryResult<Deployment> {
        let mut state = self.write()?;
        state.require_project(draft.project_id())?;
        let id = DeploymentId::new(state.next_id(RecordKind::Deployment));
        let deployment = Deployment::from_new(id, draft.clone());
        state.deployments.insert(id, deployment.clone());
        Ok(deployment)
    }

    async fn find_deployment(
        &self,
        id: DeploymentId,
    ) -> RecordRepositoryResult<Option<Deployment>> {
        Ok(self.read()?.deployments.get(&id).cloned())
    }

    async fn list_deployments(
        &self,
        project_id: Option<ProjectId>,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Deployment>> {
        let state = self.read()?;
        let rows = state
            .deployments
            .values()
            .filter(|row| project_id.is_none_or(|wanted| row.project_id() == wanted))
            .cloned();
        Ok(page.apply(rows))
    }

    async fn count_deployments(&self, project_id: ProjectId) -> RecordRepositoryResult<u64> {
        let state = self.read()?;
        let total = state
            .deployments
            .values()
            .filter(|row| row.project_id() == project_id)
            .count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl SbomRepository for InMemoryRecordStore {
    async fn create_sbom(&self, draft: &NewSbom) -> RecordRepositoryResult<Sbom> {
        let mut state = self.write()?;
        state.require_project(draft.project_id())?;
        let id = SbomId::new(state.next_id(RecordKind::Sbom));
        let sbom = Sbom::from_new(id, draft.clone());
        state.sboms.insert(id, sbom.clone());
        Ok(sbom)
    }

    async fn find_sbom(&self, id: SbomId) -> RecordRepositoryResult<Option<Sbom>> {
        Ok(self.read()?.sboms.get(&id).cloned())
    }

    async fn list_sboms(&self, project_id: ProjectId) -> RecordRepositoryResult<Vec<Sbom>> {
        let state = self.read()?;
        let mut rows: Vec<Sbom> = state
            .sboms
            .values()
            .filter(|row| row.project_id() == project_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.generated_at(), row.id())));
        Ok(rows)
    }

    async fn latest_sbom(&self, project_id: ProjectId) -> RecordRepositoryResult<Option<Sbom>> {
        let state = self.read()?;
        Ok(state
            .sboms
            .values()
            .filter(|row| row.project_id() == project_id)
            .max_by_key(|row| (row.generated_at(), row.id()))
            .cloned())
    }
}

#[async_trait]
impl MetricRepository for InMemoryRecordStore {
    async fn create_metric(&self, draft: &NewMetric) -> RecordRepositoryResult<Metric> {
        let mut state = self.write()?;
        state.require_project(draft.project_id())?;
        let id = MetricId::new(state.next_id(RecordKind::Metric));
        let metric = Metric::from_new(id, *draft);
        state.metrics.insert(id, metric.clone());
        Ok(metric)
    }

    async fn find_metric(&self, id: MetricId) -> RecordRepositoryResult<Option<Metric>> {
        Ok(self.read()?.metrics.get(&id).cloned())
    }

    async fn list_metrics(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Metric>> {
        let state = self.read()?;
        let mut rows: Vec<Metric> = state
            .metrics
            .values()
            .filter(|row| row.project_id() == project_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.recorded_at(), row.id())));
        Ok(page.apply(rows))
    }

    async fn latest_metric(&self, project_id: ProjectId) -> RecordRepositoryResult<Option<Metric>> {
        let state = self.read()?;
        Ok(state
            .metrics
            .values()
            .filter(|row| row.project_id() == project_id)
            .max_by_key(|row| (row.recorded_at(), row.id()))
            .cloned())
    }
}

#[async_trait]
impl MlModelRepository for InMemoryRecordStore {
    async fn create_ml_model(&self, draft: &NewMlModel) -> RecordRepositoryResult<MlModel> {
        let mut state = self.write()?;
        state.require_project(draft.project_id())?;
        let id = MlModelId::new(state.next_id(RecordKind::MlModel));
        let model = MlModel::from_new(id, draft.clone());
        state.ml_models.insert(id, model.clone());
        Ok(model)
    }

    async fn find_ml_model(&self, id: MlModelId) -> RecordRepositoryResult<Option<MlModel>> {
        Ok(self.read()?.ml_models.get(&id).cloned())
    }

    async fn list_ml_models(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<MlModel>> {
        let state = self.read()?;
        let rows = state
            .ml_models
            .values()
            .filter(|row| row.project_id() == project_id)
            .cloned();
        Ok(page.apply(rows))
    }
}

#[async_trait]
impl PipelineRepository for InMemoryRecordStore {
    async fn create_pipeline(&self, draft: &NewPipeline) -> RecordRepositoryResult<Pipeline> {
        let mut state = self.write()?;
        state.require_project(draft.project_id())?;
        let id = PipelineId::new(state.next_id(RecordKind::Pipeline));
        let pipeline = Pipeline::from_new(id, draft.clone());
        state.pipelines.insert(id, pipeline.clone());
        Ok(pipeline)
    }

    async fn find_pipeline(&self, id: PipelineId) -> RecordRepositoryResult<Option<Pipeline>> {
        Ok(self.read()?.pipelines.get(&id).cloned())
    }

    async fn list_pipelines(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> RecordRepositoryResult<Vec<Pipeline>> {
        let state = self.read()?;
        let rows = state
            .pipelines
            .values()
            .filter(|row| row.project_id() == project_id)
            .cloned();
        Ok(page.apply(rows))
    }
}
