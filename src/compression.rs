use std::sync::Arc;

/// Transport compression as seen by the handshake: only the algorithm name matters here.
pub trait Compressor: Send + Sync {
    /// Identifier sent in the `COMPRESSION` option, or `None` when frames are not compressed.
    fn algorithm(&self) -> Option<&str>;
}

/// No compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompressor;

impl Compressor for NoopCompressor {
    fn algorithm(&self) -> Option<&str> {
        None
    }
}

/// A compressor known only by name; availability is checked by the transport, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmCompressor {
    name: String,
}

impl AlgorithmCompressor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Compressor for AlgorithmCompressor {
    fn algorithm(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Picks a compressor for a configured algorithm name.
///
/// Absent, blank and `none` (any case) all mean no compression.
pub fn compressor_for(configured: Option<&str>) -> Arc<dyn Compressor> {
    match configured.map(str::trim) {
        None | Some("") => Arc::new(NoopCompressor),
        Some(name) if name.eq_ignore_ascii_case("none") => Arc::new(NoopCompressor),
        Some(name) => Arc::new(AlgorithmCompressor::new(name)),
    }
}
