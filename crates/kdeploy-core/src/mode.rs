use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target environment of a deploy. Selects registry and manifest files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Local cluster
    #[default]
    Dev,
    /// Live cluster
    Prod,
}

/// Toolchain a service is written in. Selects service roots and manifest directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Go,
    Dotnet,
}

impl DeployMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Dotnet => "dotnet",
        }
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeployMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(crate::Error::UnknownMode(s.to_owned())),
        }
    }
}

impl FromStr for ServiceType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(Self::Go),
            "dotnet" => Ok(Self::Dotnet),
            _ => Err(crate::Error::UnknownServiceType(s.to_owned())),
        }
    }
}
