use thiserror::Error;

/// Core error type for metadata conversion
#[derive(Error, Debug)]
pub enum MetadataError {
    /// A wire enumerator with no logical counterpart
    #[error("Unmapped {family} enumerator: {value}")]
    UnmappedEnumerator { family: &'static str, value: i32 },

    /// Flat schema element sequence that does not describe a valid schema tree
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    /// Logical schema tree rejected before flattening
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Decoded page header violating size invariants
    #[error("Malformed page header: {0}")]
    MalformedPageHeader(String),

    /// Errors from the thrift protocol codec, passed through unchanged
    #[error("Decoding error: {0}")]
    Decoding(#[from] thrift::Error),

    /// IO errors from stream operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

impl MetadataError {
    /// Create a new unmapped enumerator error
    pub fn unmapped(family: &'static str, value: i32) -> Self {
        MetadataError::UnmappedEnumerator { family, value }
    }

    /// Create a new malformed schema error
    pub fn malformed_schema<S: Into<String>>(msg: S) -> Self {
        MetadataError::MalformedSchema(msg.into())
    }

    /// Create a new invalid schema error
    pub fn invalid_schema<S: Into<String>>(msg: S) -> Self {
        MetadataError::InvalidSchema(msg.into())
    }

    /// Create a new malformed page header error
    pub fn malformed_page_header<S: Into<String>>(msg: S) -> Self {
        MetadataError::MalformedPageHeader(msg.into())
    }
}
