pub mod errors;
pub mod options;
pub mod builder;
pub mod identity;
pub mod metadata;
pub mod version;
pub mod compression;
pub mod config;
pub mod context;
pub mod startup;

use std::collections::HashMap;

use errors::Result;

/// Builds the Startup message for a config document and caller options,
/// reporting the packaged driver identity.
pub fn startup_for(
    config_json: &str,
    additional_options: Option<HashMap<String, Option<String>>>,
) -> Result<Startup> {
    let config = DriverConfig::from_json(config_json)?;
    let context = DefaultDriverContext::new(config, additional_options);
    Ok(Startup::new(context.startup_options()?))
}

/// Re-export the most-used types.
pub use builder::{StartupOptionsBuilder, DRIVER_NAME_KEY, DRIVER_VERSION_KEY, RESERVED_KEYS};
pub use config::DriverConfig;
pub use context::{DefaultDriverContext, DriverContext};
pub use errors::StartupError;
pub use identity::{IdentityProvider, PackagedIdentity, StaticIdentity};
pub use options::OptionMap;
pub use startup::{Startup, COMPRESSION_KEY, CQL_VERSION_KEY};
pub use version::Version;
