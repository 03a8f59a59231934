use crate::errors::{Result, StartupError};
use crate::options::OptionMap;

pub const COMPRESSION_KEY: &str = "COMPRESSION";
pub const CQL_VERSION_KEY: &str = "CQL_VERSION";
pub const CQL_VERSION: &str = "3.0.0";

/// STARTUP request: the first message on every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Startup {
    pub options: OptionMap,
}

impl Startup {
    /// Wraps `options`, adding `CQL_VERSION` unless already present.
    pub fn new(options: OptionMap) -> Self {
        if options.contains_key(CQL_VERSION_KEY) {
            return Self { options };
        }
        let mut builder = OptionMap::builder(options.len() + 1);
        for (key, value) in options.iter() {
            builder = builder.put(key, value.map(str::to_string));
        }
        Self {
            options: builder
                .put(CQL_VERSION_KEY, Some(CQL_VERSION.to_string()))
                .build(),
        }
    }

    /// Encodes the body as a `[string map]`: a u16 entry count followed by
    /// length-prefixed key/value strings, ordered by key.
    pub fn encode_body(&self) -> Result<Vec<u8>> {
        let entries = self.options.sorted();
        let count = u16::try_from(entries.len()).map_err(|_| StartupError::TooLong {
            what: "startup options".to_string(),
            len: entries.len(),
        })?;

        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&count.to_be_bytes());
        for (key, value) in entries {
            let value = value.ok_or_else(|| StartupError::NullValue(key.to_string()))?;
            write_string(&mut out, key)?;
            write_string(&mut out, value)?;
        }
        Ok(out)
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) -> Result<()> {
    let len = u16::try_from(s.len()).map_err(|_| StartupError::TooLong {
        what: format!("string starting {:?}", s.chars().take(16).collect::<String>()),
        len: s.len(),
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(s.as_bytes());
    Ok(())
}
