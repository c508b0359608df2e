//! bej-decoder
//!
//! This crate implements:
//!  1) Payload header validation (`header`),
//!  2) The recursive decode engine that walks a BEJ payload against a schema
//!     dictionary and writes indented JSON (`decoder`),
//!  3) A fixed-capacity output buffer with JSON string escaping (`writer`),
//!  4) Decode limits loadable from JSON (`options`),
//!  5) Error types (`BejError`).
//!
//! ```
//! use bej_decoder::{BejError, Decoder};
//!
//! let decoder = Decoder::new(&[]);
//! assert!(matches!(decoder.decode_to_string(&[0x00, 0xF0]), Err(BejError::TooShort { .. })));
//! ```

pub mod error;
pub mod header;
pub mod options;
pub mod writer;
pub mod decoder;

pub use decoder::Decoder;
pub use error::BejError;
pub use header::PayloadHeader;
pub use options::DecodeOptions;
pub use writer::OutputBuffer;
