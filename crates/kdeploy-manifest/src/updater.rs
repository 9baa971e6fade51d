use std::path::PathBuf;

use kdeploy_core::{KdeployConfig, ResolvedVersion, ServiceLayout, extract_version};

use crate::error::ManifestError;
use crate::store::{FsManifestStore, ManifestStore};

/// Plans and applies image version bumps, parameterized over the store for testability.
pub struct ImageUpdater<S: ManifestStore = FsManifestStore> {
    store: S,
}

impl ImageUpdater<FsManifestStore> {
    pub fn new() -> Self {
        Self {
            store: FsManifestStore,
        }
    }
}

impl Default for ImageUpdater<FsManifestStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ManifestStore> ImageUpdater<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Read the deployed image of a service and work out what comes next.
    ///
    /// Nothing is written.
    pub fn plan(
        &self,
        config: &KdeployConfig,
        layout: &ServiceLayout,
    ) -> Result<ImagePlan, UpdateError> {
        let manifest = layout.deployment_manifest.clone();
        let current_image = self
            .store
            .read_image(&manifest)
            .map_err(|e| UpdateError::Read { source: e })?;

        let version = extract_version(&current_image);

        let current_reference = config
            .image_reference(layout.mode, &layout.service, &version.current)
            .map_err(|e| UpdateError::Reference { source: e })?;
        let next_reference = config
            .image_reference(layout.mode, &layout.service, &version.next)
            .map_err(|e| UpdateError::Reference { source: e })?;

        tracing::info!(
            service = %layout.service,
            mode = %layout.mode,
            current = %version.current,
            next = %version.next,
            source = %version.source,
            "planned image version"
        );

        Ok(ImagePlan {
            manifest,
            image_name: config.image_name(&layout.service),
            current_image,
            version,
            current_reference,
            next_reference,
        })
    }

    /// Write the plan's next image reference into its deployment manifest.
    pub fn apply(&self, plan: &ImagePlan) -> Result<(), UpdateError> {
        self.store
            .write_image(&plan.manifest, &plan.next_reference)
            .map_err(|e| UpdateError::Write { source: e })?;

        tracing::info!(
            manifest = %plan.manifest.display(),
            image = %plan.next_reference,
            "updated deployment manifest"
        );
        Ok(())
    }

    /// [`plan`](Self::plan) then [`apply`](Self::apply).
    pub fn bump(
        &self,
        config: &KdeployConfig,
        layout: &ServiceLayout,
    ) -> Result<ImagePlan, UpdateError> {
        let plan = self.plan(config, layout)?;
        self.apply(&plan)?;
        Ok(plan)
    }
}

/// Outcome of [`ImageUpdater::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlan {
    /// Deployment manifest the image was read from
    pub manifest: PathBuf,
    /// Image name with the configured prefix applied
    pub image_name: String,
    /// Image exactly as found in the manifest
    pub current_image: String,
    pub version: ResolvedVersion,
    /// Current version in the mode's registry (what a deploy without build ships)
    pub current_reference: String,
    /// Next version in the mode's registry (what a build publishes)
    pub next_reference: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("failed to read current image")]
    Read { source: ManifestError },

    #[error("failed to write next image")]
    Write { source: ManifestError },

    #[error("failed to compose image reference")]
    Reference { source: kdeploy_core::Error },
}
