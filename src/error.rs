use thiserror::Error;

/// Errors that can occur while encoding a value.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value, or a value nested inside it, has no bencode representation.
    ///
    /// Carries the Rust type name of the offending value.
    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),

    /// Two entries of one dictionary resolved to the same key.
    #[error("duplicate dictionary key: {0:?}")]
    DuplicateKey(String),

    /// The value nests lists and dictionaries deeper than the encoder's configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,

    /// The output sink rejected a write. Bytes written before the failure stay in the sink.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}
