use std::path::Path;

use kdeploy_manifest::ImageUpdater;
use serde::Serialize;

use super::Target;

#[derive(Serialize)]
struct ShowReport<'a> {
    service: &'a str,
    image_name: &'a str,
    mode: &'static str,
    service_type: &'static str,
    service_dir: &'a Path,
    deployment_manifest: &'a Path,
    service_manifest: &'a Path,
    build_output_dir: &'a Path,
    current_image: &'a str,
    current_version: &'a str,
    next_version: &'a str,
    version_source: &'static str,
    current_reference: &'a str,
    next_reference: &'a str,
}

/// Print what a deploy of the current image, or a build of the next one, would use.
pub fn show(target: &Target<'_>, json: bool) -> anyhow::Result<()> {
    let (config, layout) = super::resolve(target)?;
    let plan = ImageUpdater::new().plan(&config, &layout)?;

    if json {
        let report = ShowReport {
            service: &layout.service,
            image_name: &plan.image_name,
            mode: layout.mode.as_str(),
            service_type: layout.service_type.as_str(),
            service_dir: &layout.service_dir,
            deployment_manifest: &layout.deployment_manifest,
            service_manifest: &layout.service_manifest,
            build_output_dir: &layout.build_output_dir,
            current_image: &plan.current_image,
            current_version: &plan.version.current,
            next_version: &plan.version.next,
            version_source: plan.version.source.as_str(),
            current_reference: &plan.current_reference,
            next_reference: &plan.next_reference,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Service:         {} ({}, {})",
        plan.image_name, layout.service_type, layout.mode
    );
    println!("Directory:       {}", layout.service_dir.display());
    println!("Deployment:      {}", layout.deployment_manifest.display());
    println!("Service file:    {}", layout.service_manifest.display());
    println!("Build output:    {}", layout.build_output_dir.display());
    super::print_plan(&plan);

    Ok(())
}
