//! Core types and configuration for kdeploy.
//!
//! This crate defines the image version resolver ([`extract_version`],
//! [`format_image_reference`]), the `kdeploy.toml` schema ([`KdeployConfig`]),
//! service layout resolution ([`ServiceLayout`]), and shared error types.

pub mod config;
pub mod error;
pub mod layout;
pub mod mode;
pub mod version;

pub use config::{
    ByMode, ByServiceType, CONFIG_FILE_NAME, KdeployConfig, KubernetesConfig, ManifestFileNames,
    ManifestFiles, ServicesConfig,
};
pub use error::{Error, Result};
pub use layout::ServiceLayout;
pub use mode::{DeployMode, ServiceType};
pub use version::{
    DEFAULT_VERSION, ResolvedVersion, SemanticVersion, VersionSource, extract_version,
    format_image_reference, image_name, image_tag,
};
