use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::context::DriverContext;
use crate::errors::Result;
use crate::identity::{IdentityProvider, PackagedIdentity};
use crate::options::OptionMap;
use crate::startup::{COMPRESSION_KEY, CQL_VERSION_KEY};

pub const DRIVER_NAME_KEY: &str = "DRIVER_NAME";
pub const DRIVER_VERSION_KEY: &str = "DRIVER_VERSION";

/// Keys whose values the driver derives itself. They are silently dropped from
/// additional options.
pub const RESERVED_KEYS: [&str; 4] = [
    DRIVER_NAME_KEY,
    DRIVER_VERSION_KEY,
    COMPRESSION_KEY,
    CQL_VERSION_KEY,
];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Builds the options map sent in a Startup message.
///
/// The map holds `COMPRESSION` (only when the context has a compression
/// algorithm), `DRIVER_NAME`, `DRIVER_VERSION` and any additional options.
/// `CQL_VERSION` is added later by [`Startup::new`](crate::startup::Startup::new).
///
/// Additional options can never replace a reserved key. Such entries are
/// dropped without an error, so a caller asking for `DRIVER_NAME=foo` simply
/// gets the driver's own name back.
pub struct StartupOptionsBuilder<'a> {
    context: &'a dyn DriverContext,
    identity: Arc<dyn IdentityProvider>,
    additional_options: HashMap<String, Option<String>>,
}

impl<'a> StartupOptionsBuilder<'a> {
    /// Builder reporting the packaged driver identity.
    ///
    /// Fails if the packaging metadata cannot be resolved.
    pub fn new(context: &'a dyn DriverContext) -> Result<Self> {
        Ok(Self::with_identity(context, Arc::new(PackagedIdentity::load()?)))
    }

    pub fn with_identity(
        context: &'a dyn DriverContext,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            context,
            identity,
            additional_options: HashMap::new(),
        }
    }

    /// Merges extra options into the builder. `None` is a no-op.
    ///
    /// Reserved keys are skipped; other keys overwrite values from earlier calls.
    pub fn with_additional_options(
        mut self,
        options: Option<&HashMap<String, Option<String>>>,
    ) -> Self {
        let Some(options) = options else {
            return self;
        };
        for (key, value) in options {
            if is_reserved(key) {
                debug!(key = %key, "ignoring reserved startup option");
                continue;
            }
            self.additional_options.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn driver_name(&self) -> String {
        self.identity.driver_name()
    }

    pub fn driver_version(&self) -> String {
        self.identity.driver_version()
    }

    pub fn build(&self) -> OptionMap {
        let mut builder = OptionMap::builder(3 + self.additional_options.len());

        let compression = self
            .context
            .compressor()
            .algorithm()
            .map(str::trim)
            .filter(|alg| !alg.is_empty());
        if let Some(algorithm) = compression {
            builder = builder.put(COMPRESSION_KEY, Some(algorithm.to_string()));
        }

        let options = builder
            .put(DRIVER_NAME_KEY, Some(self.driver_name()))
            .put(DRIVER_VERSION_KEY, Some(self.driver_version()))
            .put_all(&self.additional_options)
            .build();
        trace!(
            compression = compression.unwrap_or("none"),
            count = options.len(),
            "built startup options"
        );
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{AlgorithmCompressor, Compressor, NoopCompressor};
    use crate::identity::StaticIdentity;
    use pretty_assertions::assert_eq;

    struct Fixed<C>(C);

    impl<C: Compressor> DriverContext for Fixed<C> {
        fn compressor(&self) -> &dyn Compressor {
            &self.0
        }
    }

    fn identity() -> Arc<dyn IdentityProvider> {
        Arc::new(StaticIdentity::new("test-driver", "1.2.3"))
    }

    fn opts(pairs: &[(&str, Option<&str>)]) -> HashMap<String, Option<String>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn whitespace_algorithm_means_no_compression() {
        let ctx = Fixed(AlgorithmCompressor::new("  \t "));
        let options = StartupOptionsBuilder::with_identity(&ctx, identity()).build();
        assert!(!options.contains_key(COMPRESSION_KEY));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn algorithm_is_trimmed() {
        let ctx = Fixed(AlgorithmCompressor::new(" lz4\n"));
        let options = StartupOptionsBuilder::with_identity(&ctx, identity()).build();
        assert_eq!(options.value(COMPRESSION_KEY), Some("lz4"));
    }

    #[test]
    fn caller_compression_kept_out_even_without_config() {
        let ctx = Fixed(NoopCompressor);
        let options = StartupOptionsBuilder::with_identity(&ctx, identity())
            .with_additional_options(Some(&opts(&[(COMPRESSION_KEY, Some("lz4"))])))
            .build();
        assert!(!options.contains_key(COMPRESSION_KEY));
    }

    #[test]
    fn later_calls_merge_rather_than_replace() {
        let ctx = Fixed(NoopCompressor);
        let options = StartupOptionsBuilder::with_identity(&ctx, identity())
            .with_additional_options(Some(&opts(&[("A", Some("1")), ("B", Some("1"))])))
            .with_additional_options(None)
            .with_additional_options(Some(&opts(&[
                ("B", Some("2")),
                (DRIVER_NAME_KEY, Some("x")),
            ])))
            .build();
        assert_eq!(options.value("A"), Some("1"));
        assert_eq!(options.value("B"), Some("2"));
        assert_eq!(options.value(DRIVER_NAME_KEY), Some("test-driver"));
    }

    #[test]
    fn custom_identity_is_reported() {
        let ctx = Fixed(NoopCompressor);
        let builder = StartupOptionsBuilder::with_identity(&ctx, identity());
        assert_eq!(builder.driver_name(), "test-driver");
        let options = builder.build();
        assert_eq!(options.value(DRIVER_VERSION_KEY), Some("1.2.3"));
    }

    #[test]
    fn reserved_key_set() {
        for key in RESERVED_KEYS {
            assert!(is_reserved(key));
        }
        assert!(!is_reserved("driver_name"));
        assert!(!is_reserved("APPLICATION_NAME"));
    }
}
