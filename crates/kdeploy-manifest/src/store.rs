use std::path::Path;

use crate::deployment::DeploymentManifest;
use crate::error::ManifestError;

/// Abstraction over deployment manifest storage for testability.
///
/// Production code uses [`FsManifestStore`], tests use mockall-generated mocks.
pub trait ManifestStore: Send + Sync {
    /// Read the first container's image from the deployment manifest at `path`.
    fn read_image(&self, path: &Path) -> Result<String, ManifestError>;

    /// Replace the first container's image in the deployment manifest at `path`.
    fn write_image(&self, path: &Path, image: &str) -> Result<(), ManifestError>;
}

/// Manifests as YAML files on the local filesystem.
pub struct FsManifestStore;

impl ManifestStore for FsManifestStore {
    fn read_image(&self, path: &Path) -> Result<String, ManifestError> {
        let manifest = DeploymentManifest::load(path)?;
        manifest.container_image().map(str::to_owned)
    }

    fn write_image(&self, path: &Path, image: &str) -> Result<(), ManifestError> {
        let mut manifest = DeploymentManifest::load(path)?;
        manifest.set_container_image(image)?;
        manifest.save()?;

        tracing::debug!(path = %path.display(), image, "rewrote container image");
        Ok(())
    }
}
