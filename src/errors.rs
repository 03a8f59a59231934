use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Errors raised while resolving identity, loading config or encoding a Startup message.
// Clone is required: the first metadata failure is cached and handed out again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupError {
    // Packaging metadata lacks a required property
    #[error("packaging metadata is missing `{0}`")]
    MissingMetadata(&'static str),

    // A properties line could not be split into key and value
    #[error("malformed packaging metadata at line {line}: {content:?}")]
    MalformedMetadata { line: usize, content: String },

    // A version string is not a semantic version
    #[error("invalid version {input:?}: {reason}")]
    InvalidVersion { input: String, reason: String },

    // The driver configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    // No execution profile with this name
    #[error("unknown execution profile `{0}`")]
    UnknownProfile(String),

    // A null option value cannot be written onto the wire
    #[error("option `{0}` has a null value and cannot be encoded")]
    NullValue(String),

    // A string or map exceeds the u16 length prefix of the protocol
    #[error("{what} is too long to encode ({len} > {max})", max = u16::MAX)]
    TooLong { what: String, len: usize },

    // A command-line option was not written as KEY=VALUE
    #[error("expected KEY=VALUE, got {0:?}")]
    BadOptionArg(String),
}

impl From<serde_json::Error> for StartupError {
    fn from(err: serde_json::Error) -> Self {
        StartupError::Config(err.to_string())
    }
}

// Type alias for results that use `StartupError` as the error type
pub type Result<T> = std::result::Result<T, StartupError>;
