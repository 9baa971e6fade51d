use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mode::{DeployMode, ServiceType};
use crate::version;

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "kdeploy.toml";

/// kdeploy.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdeployConfig {
    /// Prefix joined to service names with `_` to form image names
    #[serde(default)]
    pub image_prefix: String,
    /// Build output directory, relative to each service directory
    #[serde(default = "default_build_output_dir")]
    pub build_output_dir: String,
    /// Container registry per deploy mode
    #[serde(default)]
    pub registry: ByMode<String>,
    #[serde(default)]
    pub kubernetes: KubernetesConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

/// One value per [`DeployMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByMode<T> {
    #[serde(default)]
    pub dev: T,
    #[serde(default)]
    pub prod: T,
}

impl<T> ByMode<T> {
    pub fn get(&self, mode: DeployMode) -> &T {
        match mode {
            DeployMode::Dev => &self.dev,
            DeployMode::Prod => &self.prod,
        }
    }
}

/// One value per [`ServiceType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByServiceType<T> {
    #[serde(default)]
    pub go: T,
    #[serde(default)]
    pub dotnet: T,
}

impl<T> ByServiceType<T> {
    pub fn get(&self, service_type: ServiceType) -> &T {
        match service_type {
            ServiceType::Go => &self.go,
            ServiceType::Dotnet => &self.dotnet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubernetesConfig {
    /// Manifest directory inside a service directory
    #[serde(default = "default_manifest_dirs")]
    pub directory: ByServiceType<String>,
    /// Manifest file names per deploy mode
    #[serde(default)]
    pub files: ManifestFiles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFiles {
    #[serde(default = "default_dev_files")]
    pub dev: ManifestFileNames,
    #[serde(default = "default_prod_files")]
    pub prod: ManifestFileNames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFileNames {
    /// Deployment manifest, rewritten with each new image version
    pub deployment: String,
    /// Service manifest
    pub service: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base directory of all services of a type, relative to the project
    #[serde(default)]
    pub root: ByServiceType<String>,
    /// Go services: name -> directory under `root.go`
    #[serde(default)]
    pub go: BTreeMap<String, String>,
    /// .NET services: name -> directory under `root.dotnet`
    #[serde(default)]
    pub dotnet: BTreeMap<String, String>,
}

impl ServicesConfig {
    pub fn by_type(&self, service_type: ServiceType) -> &BTreeMap<String, String> {
        match service_type {
            ServiceType::Go => &self.go,
            ServiceType::Dotnet => &self.dotnet,
        }
    }
}

impl ManifestFiles {
    pub fn get(&self, mode: DeployMode) -> &ManifestFileNames {
        match mode {
            DeployMode::Dev => &self.dev,
            DeployMode::Prod => &self.prod,
        }
    }
}

impl Default for KdeployConfig {
    fn default() -> Self {
        Self {
            image_prefix: String::new(),
            build_output_dir: default_build_output_dir(),
            registry: ByMode::default(),
            kubernetes: KubernetesConfig::default(),
            services: ServicesConfig::default(),
        }
    }
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            directory: default_manifest_dirs(),
            files: ManifestFiles::default(),
        }
    }
}

impl Default for ManifestFiles {
    fn default() -> Self {
        Self {
            dev: default_dev_files(),
            prod: default_prod_files(),
        }
    }
}

impl KdeployConfig {
    /// Load from kdeploy.toml in the given project directory.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(crate::Error::ConfigNotFound(config_path));
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.clone(),
                source: e,
            })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Registry base path for a deploy mode.
    pub fn registry(&self, mode: DeployMode) -> crate::Result<&str> {
        let registry = self.registry.get(mode);
        if registry.trim().is_empty() {
            return Err(crate::Error::MissingRegistry { mode });
        }
        Ok(registry)
    }

    /// Image name of a service, with the configured prefix applied.
    pub fn image_name(&self, service: &str) -> String {
        version::image_name(&self.image_prefix, service)
    }

    /// Fully qualified image reference of a service version in the mode's registry.
    pub fn image_reference(
        &self,
        mode: DeployMode,
        service: &str,
        version: &str,
    ) -> crate::Result<String> {
        Ok(version::format_image_reference(
            self.registry(mode)?,
            &self.image_prefix,
            service,
            version,
        ))
    }
}

fn default_build_output_dir() -> String {
    "build".to_owned()
}

fn default_manifest_dirs() -> ByServiceType<String> {
    ByServiceType {
        go: "k8s".to_owned(),
        dotnet: "k8s".to_owned(),
    }
}

fn default_dev_files() -> ManifestFileNames {
    ManifestFileNames {
        deployment: "deployment.dev.yaml".to_owned(),
        service: "service.dev.yaml".to_owned(),
    }
}

fn default_prod_files() -> ManifestFileNames {
    ManifestFileNames {
        deployment: "deployment.prod.yaml".to_owned(),
        service: "service.prod.yaml".to_owned(),
    }
}
