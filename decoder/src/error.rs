use bej_schema::{Format, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BejError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Invalid decoder configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid decoder options: {0}")]
    InvalidOptions(String),

    #[error("Payload of {len} bytes is shorter than the {min}-byte header")]
    TooShort {
        len: usize,
        min: usize,
    },

    #[error("BEJ version indicates an error payload (0x{version:08X})")]
    ErrorPayload { version: u32 },

    #[error("Unsupported BEJ schema class 0x{0:02X}; only 0x00 and 0x01 are supported")]
    UnsupportedSchemaClass(u8),

    #[error("Dictionary entry not found for sequence number {sequence}")]
    UnknownSequence { sequence: u64 },

    #[error("Unsupported BEJ format {format}")]
    UnsupportedFormat { format: Format },

    #[error("Container declares {declared} members but the payload ends after {decoded}")]
    TruncatedContainer {
        declared: u64,
        decoded:  u64,
    },

    #[error("Nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },

    #[error("Decoded JSON exceeds the output capacity of {capacity} bytes")]
    OutputOverflow { capacity: usize },

    #[error("Value length {0} does not fit in memory")]
    LengthOverflow(u64),

    #[error("Decoded output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
