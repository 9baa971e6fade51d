mod bump;
mod image_ref;
mod next_version;
mod show;

use std::path::Path;

use kdeploy_core::{DeployMode, KdeployConfig, ServiceLayout, ServiceType};
use kdeploy_manifest::ImagePlan;

pub use bump::bump;
pub use image_ref::image_ref;
pub use next_version::next_version;
pub use show::show;

/// A configured service selected on the command line.
pub(crate) struct Target<'a> {
    pub project_dir: &'a Path,
    pub service: &'a str,
    pub mode: DeployMode,
    pub service_type: ServiceType,
}

/// Load kdeploy.toml and locate the target service.
pub(crate) fn resolve(target: &Target<'_>) -> anyhow::Result<(KdeployConfig, ServiceLayout)> {
    let config = KdeployConfig::load(target.project_dir)?;
    let layout = ServiceLayout::resolve(
        &config,
        target.project_dir,
        target.service_type,
        target.service,
        target.mode,
    )?;
    Ok((config, layout))
}

pub(crate) fn print_plan(plan: &ImagePlan) {
    println!("Image:           {}", display_or_none(&plan.current_image));
    println!(
        "Current version: {} ({})",
        plan.version.current, plan.version.source
    );
    println!("Next version:    {}", plan.version.next);
    println!("Current image:   {}", plan.current_reference);
    println!("Next image:      {}", plan.next_reference);
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}
