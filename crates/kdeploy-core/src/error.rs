use std::path::PathBuf;

use crate::mode::{DeployMode, ServiceType};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found at {}; create kdeploy.toml in the project directory", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to load config from {}", path.display())]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no container registry configured for mode '{mode}'; set [registry].{mode}")]
    MissingRegistry { mode: DeployMode },

    #[error("unknown deploy mode '{0}' (expected: dev|prod)")]
    UnknownMode(String),

    #[error("unknown service type '{0}' (expected: go|dotnet)")]
    UnknownServiceType(String),

    // ── Service layout ──
    #[error(
        "service '{service}' is not configured under [services.{service_type}]; configured: {}",
        format_names(configured)
    )]
    UnknownService {
        service: String,
        service_type: ServiceType,
        configured: Vec<String>,
    },

    #[error("service directory not found: {}", .0.display())]
    ServiceDirMissing(PathBuf),

    #[error("service path is not a directory: {}", .0.display())]
    ServiceDirNotDirectory(PathBuf),
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_owned()
    } else {
        names.join(", ")
    }
}
