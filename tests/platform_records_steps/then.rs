//! Then steps for platform record BDD scenarios.

use super::world::{PlatformWorld, run_async};
use nvx29::records::services::ErrorClass;
use rstest_bdd_macros::then;

#[then(r#"the project has status "{status}""#)]
fn project_has_status(world: &mut PlatformWorld, status: String) -> Result<(), eyre::Report> {
    let actual = world.project()?.status();
    if actual.as_str() != status {
        return Err(eyre::eyre!("expected status {status}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the deployment has status "{status}""#)]
fn deployment_has_status(world: &mut PlatformWorld, status: String) -> Result<(), eyre::Report> {
    let deployment = world
        .deployment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deployment in scenario world"))?;
    if deployment.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected deployment status {status}, found {}",
            deployment.status()
        ));
    }
    Ok(())
}

#[then("the project metrics report {count:usize} deployments and no security score")]
fn metrics_without_score(world: &mut PlatformWorld, count: usize) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let expected = u64::try_from(count)?;
    let view = run_async(world.state.insights.project_metrics(project_id))
        .map_err(|err| eyre::eyre!("metrics view failed: {err}"))?;
    if view.total_deployments != expected {
        return Err(eyre::eyre!(
            "expected {count} deployments, found {}",
            view.total_deployments
        ));
    }
    if view.security_score.is_some() {
        return Err(eyre::eyre!("expected no security score, found {:?}", view.security_score));
    }
    Ok(())
}

#[then("the project metrics report a security score of {score}")]
fn metrics_with_score(world: &mut PlatformWorld, score: f64) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let view = run_async(world.state.insights.project_metrics(project_id))
        .map_err(|err| eyre::eyre!("metrics view failed: {err}"))?;
    let actual = view
        .security_score
        .ok_or_else(|| eyre::eyre!("expected a security score"))?;
    if actual.value().to_bits() != score.to_bits() {
        return Err(eyre::eyre!("expected score {score}, found {}", actual.value()));
    }
    Ok(())
}

#[then("the deployment can no longer be found")]
fn deployment_is_gone(world: &mut PlatformWorld) -> Result<(), eyre::Report> {
    let deployment = world
        .deployment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deployment in scenario world"))?;
    match run_async(world.state.deployments.get(deployment.id())) {
        Err(err) if err.class() == ErrorClass::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected not found, got {other:?}")),
    }
}

#[then("the project can no longer be found")]
fn project_is_gone(world: &mut PlatformWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    match run_async(world.state.projects.get(project_id)) {
        Err(err) if err.class() == ErrorClass::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected not found, got {other:?}")),
    }
}

#[then("creation fails with a conflict")]
fn creation_conflicts(world: &mut PlatformWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    match result {
        Err(err) if err.class() == ErrorClass::Conflict => Ok(()),
        other => Err(eyre::eyre!("expected conflict, got {other:?}")),
    }
}

#[then("it contains {count:usize} templates")]
fn catalogue_size(world: &mut PlatformWorld, count: usize) -> Result<(), eyre::Report> {
    if world.catalogue.len() != count {
        return Err(eyre::eyre!(
            "expected {count} templates, found {}",
            world.catalogue.len()
        ));
    }
    Ok(())
}

#[then(r#"it includes a template with id "{id}""#)]
fn catalogue_includes(world: &mut PlatformWorld, id: String) -> Result<(), eyre::Report> {
    if world.catalogue.iter().any(|template| template.id == id) {
        Ok(())
    } else {
        Err(eyre::eyre!("template {id} missing from catalogue"))
    }
}

#[then(r#"generation is acknowledged with status "{status}""#)]
fn generation_acknowledged(world: &mut PlatformWorld, status: String) -> Result<(), eyre::Report> {
    let ack = world
        .generation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing generation result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("generation was rejected: {err}"))?;
    let rendered = serde_json::to_value(ack.status)?;
    if rendered != status.as_str() {
        return Err(eyre::eyre!("expected status {status}, found {rendered}"));
    }
    if !ack.files_generated.is_empty() {
        return Err(eyre::eyre!("generation should not report files"));
    }
    Ok(())
}
