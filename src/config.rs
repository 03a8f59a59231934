use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::Result;

pub const DEFAULT_PROFILE: &str = "default";

/// `protocol` section of an execution profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtocolOptions {
    /// Transport compression algorithm, e.g. `lz4` or `snappy`.
    #[serde(default)]
    pub compression: Option<String>,
    /// Protocol version to negotiate, e.g. `V4`.
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutionProfile {
    #[serde(default)]
    pub protocol: ProtocolOptions,
}

impl ExecutionProfile {
    /// Configured compression, or `None` when unset or blank.
    pub fn compression(&self) -> Option<&str> {
        self.protocol
            .compression
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    // Options unset here are taken from `base`.
    fn inherit(&self, base: &ExecutionProfile) -> ExecutionProfile {
        ExecutionProfile {
            protocol: ProtocolOptions {
                compression: self
                    .protocol
                    .compression
                    .clone()
                    .or_else(|| base.protocol.compression.clone()),
                version: self
                    .protocol
                    .version
                    .clone()
                    .or_else(|| base.protocol.version.clone()),
            },
        }
    }
}

/// Driver configuration: a default profile plus named profiles derived from it.
///
/// ```json
/// { "default": { "protocol": { "compression": "lz4" } },
///   "profiles": { "olap": { "protocol": { "compression": "none" } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub default: ExecutionProfile,
    #[serde(default)]
    pub profiles: HashMap<String, ExecutionProfile>,
}

impl DriverConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn default_profile(&self) -> &ExecutionProfile {
        &self.default
    }

    /// Resolves a named profile; unknown names resolve to `None`.
    pub fn profile(&self, name: &str) -> Option<ExecutionProfile> {
        if name == DEFAULT_PROFILE {
            return Some(self.default.clone());
        }
        self.profiles.get(name).map(|p| p.inherit(&self.default))
    }
}
