use std::path::{Path, PathBuf};

use crate::config::KdeployConfig;
use crate::mode::{DeployMode, ServiceType};

/// Filesystem locations of one service for one deploy mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLayout {
    pub service: String,
    pub service_type: ServiceType,
    pub mode: DeployMode,
    /// `<project>/<services.root.type>/<services.type[service]>`
    pub service_dir: PathBuf,
    /// Deployment manifest whose container image is versioned
    pub deployment_manifest: PathBuf,
    pub service_manifest: PathBuf,
    pub build_output_dir: PathBuf,
}

impl ServiceLayout {
    /// Resolve where a configured service lives.
    ///
    /// Relative paths in the config are joined onto `project_dir`. The
    /// service directory must exist; manifest files are not checked here.
    pub fn resolve(
        config: &KdeployConfig,
        project_dir: &Path,
        service_type: ServiceType,
        service: &str,
        mode: DeployMode,
    ) -> crate::Result<Self> {
        let services = config.services.by_type(service_type);
        let entry = services
            .get(service)
            .filter(|dir| !dir.is_empty())
            .ok_or_else(|| crate::Error::UnknownService {
                service: service.to_owned(),
                service_type,
                configured: services.keys().cloned().collect(),
            })?;

        let service_dir = project_dir
            .join(config.services.root.get(service_type))
            .join(entry);

        match std::fs::metadata(&service_dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(crate::Error::ServiceDirNotDirectory(service_dir)),
            Err(_) => return Err(crate::Error::ServiceDirMissing(service_dir)),
        }

        let manifest_dir = service_dir.join(config.kubernetes.directory.get(service_type));
        let files = config.kubernetes.files.get(mode);

        tracing::debug!(
            service,
            %service_type,
            %mode,
            dir = %service_dir.display(),
            "resolved service layout"
        );

        Ok(Self {
            service: service.to_owned(),
            service_type,
            mode,
            deployment_manifest: manifest_dir.join(&files.deployment),
            service_manifest: manifest_dir.join(&files.service),
            build_output_dir: service_dir.join(&config.build_output_dir),
            service_dir,
        })
    }
}
