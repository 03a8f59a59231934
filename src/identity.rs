use crate::errors::Result;
use crate::metadata::DriverMetadata;

/// Supplies the driver name and version written into the Startup message.
///
/// Wrapping or embedding clients can report their own identity by passing
/// another implementation to [`StartupOptionsBuilder::with_identity`].
/// Neither value can be overridden through additional options.
///
/// [`StartupOptionsBuilder::with_identity`]: crate::builder::StartupOptionsBuilder::with_identity
pub trait IdentityProvider: Send + Sync {
    fn driver_name(&self) -> String;
    fn driver_version(&self) -> String;
}

/// Identity taken from the packaging metadata bundled with this crate.
#[derive(Debug, Clone, Copy)]
pub struct PackagedIdentity {
    metadata: &'static DriverMetadata,
}

impl PackagedIdentity {
    /// Fails if the bundled metadata is missing or malformed.
    pub fn load() -> Result<Self> {
        Ok(Self {
            metadata: DriverMetadata::packaged()?,
        })
    }
}

impl IdentityProvider for PackagedIdentity {
    fn driver_name(&self) -> String {
        self.metadata.name.clone()
    }

    fn driver_version(&self) -> String {
        self.metadata.version.to_string()
    }
}

/// Fixed identity, for clients that embed this driver under their own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    pub name: String,
    pub version: String,
}

impl StaticIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn driver_name(&self) -> String {
        self.name.clone()
    }

    fn driver_version(&self) -> String {
        self.version.clone()
    }
}
