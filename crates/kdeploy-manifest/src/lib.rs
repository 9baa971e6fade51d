//! Deployment manifest reading and image rewriting for kdeploy.
//!
//! ```text
//! kdeploy bump
//!   1. Layout   ── ServiceLayout::resolve (kdeploy.toml → manifest paths)
//!   2. Read     ── ManifestStore::read_image (first container's image)
//!   3. Resolve  ── extract_version → current / next
//!   4. Compose  ── KdeployConfig::image_reference (mode registry)
//!   5. Write    ── ManifestStore::write_image (skipped by `show` / --dry-run)
//! ```

pub mod deployment;
pub mod error;
pub mod store;
pub mod updater;

pub use deployment::DeploymentManifest;
pub use error::ManifestError;
pub use store::{FsManifestStore, ManifestStore};
pub use updater::{ImagePlan, ImageUpdater, UpdateError};
