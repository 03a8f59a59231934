use std::sync::OnceLock;

use tracing::debug;

use crate::errors::{Result, StartupError};
use crate::version::Version;

pub const NAME_PROPERTY: &str = "driver.name";
pub const VERSION_PROPERTY: &str = "driver.version";

const DRIVER_PROPERTIES: &str = include_str!("driver.properties");

static PACKAGED: OnceLock<Result<DriverMetadata>> = OnceLock::new();

/// Name and version the driver reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverMetadata {
    pub name: String,
    pub version: Version,
}

impl DriverMetadata {
    /// Parses a properties document holding `driver.name` and `driver.version`.
    pub fn parse(properties: &str) -> Result<Self> {
        let mut name = None;
        let mut version = None;
        for (idx, raw) in properties.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| StartupError::MalformedMetadata {
                    line: idx + 1,
                    content: raw.to_string(),
                })?;
            match key.trim() {
                NAME_PROPERTY => name = Some(value.trim().to_string()),
                VERSION_PROPERTY => version = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(StartupError::MissingMetadata(NAME_PROPERTY))?;
        let version = version.ok_or(StartupError::MissingMetadata(VERSION_PROPERTY))?;
        Ok(Self {
            name,
            version: Version::parse(&version)?,
        })
    }

    /// The metadata bundled with this crate, resolved once per process.
    ///
    /// A failure is fatal and is not retried: every later call returns the same error.
    pub fn packaged() -> Result<&'static DriverMetadata> {
        PACKAGED
            .get_or_init(|| {
                let resolved = Self::parse(DRIVER_PROPERTIES);
                debug!(ok = resolved.is_ok(), "resolved packaging metadata");
                resolved
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}
