//! When steps for platform record BDD scenarios.

use super::world::{PlatformWorld, run_async};
use eyre::WrapErr;
use nvx29::records::services::{CreateDeploymentRequest, CreateProjectRequest, CreateSbomRequest};
use nvx29::templates::{GenerateTemplateRequest, request_generation, templates};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"a "{environment}" deployment of version "{version}" is recorded for the project"#)]
fn record_deployment(
    world: &mut PlatformWorld,
    environment: String,
    version: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let deployment = run_async(world.state.deployments.create(CreateDeploymentRequest::new(
        project_id,
        version,
        environment,
    )))
    .wrap_err("record scenario deployment")?;
    world.deployment = Some(deployment);
    Ok(())
}

#[when(
    r#"an SBOM for version "{version}" with security score {score} is recorded for the project"#
)]
fn record_sbom(world: &mut PlatformWorld, version: String, score: f64) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let request = CreateSbomRequest::new(project_id, version, json!({"components": []}))
        .with_security_score(score);
    run_async(world.state.sboms.create(request)).wrap_err("record scenario sbom")?;
    Ok(())
}

#[when("the project is deleted")]
fn delete_project(world: &mut PlatformWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    run_async(world.state.projects.delete(project_id)).wrap_err("delete scenario project")?;
    Ok(())
}

#[when(r#"another project named "{name}" of type "{project_type}" is created"#)]
fn create_another_project(world: &mut PlatformWorld, name: String, project_type: String) {
    let request = CreateProjectRequest::new(name, project_type);
    world.last_create_result = Some(run_async(world.state.projects.create(request)));
}

#[when("the template catalogue is requested")]
fn request_catalogue(world: &mut PlatformWorld) {
    world.catalogue = templates().to_vec();
}

#[when(r#"generation of "{project_name}" from template "{template_id}" is requested"#)]
fn request_template_generation(
    world: &mut PlatformWorld,
    project_name: String,
    template_id: String,
) {
    let request = GenerateTemplateRequest::new(project_name, template_id);
    world.generation = Some(request_generation(request));
}
