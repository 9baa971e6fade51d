use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::ManifestError;

/// A Kubernetes Deployment manifest held as a generic YAML document.
///
/// Only the first container's `image` is read or written. Everything else in
/// the document is carried through a load/save cycle as-is (key order
/// included; comments are not preserved).
#[derive(Debug, Clone)]
pub struct DeploymentManifest {
    path: PathBuf,
    document: Value,
}

impl DeploymentManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest content; `path` is used for error reporting and [`save`](Self::save).
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let document = serde_yaml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image of the first container, `""` when the container has none.
    pub fn container_image(&self) -> Result<&str, ManifestError> {
        let container = self.document["spec"]["template"]["spec"]["containers"]
            .as_sequence()
            .and_then(|containers| containers.first())
            .ok_or_else(|| ManifestError::NoContainer {
                path: self.path.clone(),
            })?;

        match &container["image"] {
            Value::String(image) => Ok(image.as_str()),
            _ => Ok(""),
        }
    }

    pub fn set_container_image(&mut self, image: &str) -> Result<(), ManifestError> {
        let container = self
            .document
            .get_mut("spec")
            .and_then(|v| v.get_mut("template"))
            .and_then(|v| v.get_mut("spec"))
            .and_then(|v| v.get_mut("containers"))
            .and_then(Value::as_sequence_mut)
            .and_then(|containers| containers.first_mut())
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| ManifestError::NoContainer {
                path: self.path.clone(),
            })?;

        container.insert(
            Value::String("image".to_owned()),
            Value::String(image.to_owned()),
        );
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        serde_yaml::to_string(&self.document).map_err(|e| ManifestError::Serialize {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn save(&self) -> Result<(), ManifestError> {
        let content = self.to_yaml()?;
        std::fs::write(&self.path, content).map_err(|e| ManifestError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
