use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::StartupOptionsBuilder;
use crate::compression::{compressor_for, Compressor};
use crate::config::{DriverConfig, DEFAULT_PROFILE};
use crate::errors::{Result, StartupError};
use crate::identity::IdentityProvider;
use crate::options::OptionMap;

/// State a Startup options builder reads from the session it belongs to.
pub trait DriverContext {
    /// Compressor negotiated for this session's connections.
    fn compressor(&self) -> &dyn Compressor;
}

type StartupOptions = Option<HashMap<String, Option<String>>>;

/// Context assembled from a [`DriverConfig`] and the caller's extra startup options.
#[derive(Clone)]
pub struct DefaultDriverContext {
    compressor: Arc<dyn Compressor>,
    startup_options: StartupOptions,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl DefaultDriverContext {
    /// Context whose compression comes from the default profile.
    pub fn new(config: DriverConfig, startup_options: StartupOptions) -> Self {
        let compressor = compressor_for(config.default_profile().compression());
        Self {
            compressor,
            startup_options,
            identity: None,
        }
    }

    /// Context whose compression comes from the named profile.
    pub fn for_profile(
        config: &DriverConfig,
        profile: &str,
        startup_options: StartupOptions,
    ) -> Result<Self> {
        let resolved = config
            .profile(profile)
            .ok_or_else(|| StartupError::UnknownProfile(profile.to_string()))?;
        Ok(Self {
            compressor: compressor_for(resolved.compression()),
            startup_options,
            identity: None,
        })
    }

    /// Reports `identity` instead of the packaged driver name and version.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Options for a new Startup message. Built fresh on every call.
    pub fn startup_options(&self) -> Result<OptionMap> {
        let builder = match &self.identity {
            Some(identity) => StartupOptionsBuilder::with_identity(self, Arc::clone(identity)),
            None => StartupOptionsBuilder::new(self)?,
        };
        Ok(builder
            .with_additional_options(self.startup_options.as_ref())
            .build())
    }
}

impl DriverContext for DefaultDriverContext {
    fn compressor(&self) -> &dyn Compressor {
        self.compressor.as_ref()
    }
}
