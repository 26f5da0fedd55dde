//! Given steps for platform record BDD scenarios.

use super::world::{PlatformWorld, run_async};
use eyre::WrapErr;
use nvx29::records::services::CreateProjectRequest;
use rstest_bdd_macros::given;

#[given(r#"a project named "{name}" of type "{project_type}""#)]
fn project_exists(
    world: &mut PlatformWorld,
    name: String,
    project_type: String,
) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .state
            .projects
            .create(CreateProjectRequest::new(name, project_type)),
    )
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}
