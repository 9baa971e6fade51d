use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read deployment manifest {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse deployment manifest {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("no container found in deployment manifest {} (expected spec.template.spec.containers)", path.display())]
    NoContainer { path: PathBuf },

    #[error("failed to serialize deployment manifest {}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to write deployment manifest {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
