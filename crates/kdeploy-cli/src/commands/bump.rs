use kdeploy_manifest::ImageUpdater;

use super::Target;

/// Rewrite the deployment manifest with the next image version.
pub fn bump(target: &Target<'_>, dry_run: bool) -> anyhow::Result<()> {
    let (config, layout) = super::resolve(target)?;
    let updater = ImageUpdater::new();

    println!(
        "Reading deployment manifest: {}",
        layout.deployment_manifest.display()
    );
    let plan = updater.plan(&config, &layout)?;
    super::print_plan(&plan);

    if dry_run {
        println!();
        println!("Dry run: {} not modified", plan.manifest.display());
        return Ok(());
    }

    updater.apply(&plan)?;

    println!();
    println!("Updated {}", plan.manifest.display());
    println!(
        "'bump' operation completed successfully for {}.",
        plan.image_name
    );

    Ok(())
}
