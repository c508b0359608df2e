//! bej
//!
//! This crate provides the convenience surface for turning BEJ payloads into
//! JSON text.
//!
//! - `Decoder`, `DecodeOptions` and `OutputBuffer` (re-exported from the decoder)
//! - One-call helpers that decode from memory or from files

use std::fs;
use std::path::Path;

pub use bej_decoder::error::BejError;
pub use bej_decoder::{DecodeOptions, Decoder, OutputBuffer, PayloadHeader};
pub use bej_schema::{Dictionary, DictionaryEntry, Format, SchemaError};

/// Decode a BEJ payload into indented JSON with default limits.
pub fn decode_to_json(payload: &[u8], dictionary: &[u8]) -> Result<String, BejError> {
    decode_to_json_with(payload, dictionary, &DecodeOptions::default())
}

/// Decode a BEJ payload into indented JSON. Partial output is never returned.
pub fn decode_to_json_with(
    payload: &[u8],
    dictionary: &[u8],
    options: &DecodeOptions,
) -> Result<String, BejError> {
    let decoder = Decoder::with_options(dictionary, options.clone())?;
    decoder.decode_to_string(payload)
}

/// Read a whole dictionary or payload file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, BejError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    tracing::debug!(path = %path.display(), len = data.len(), "loaded file");
    Ok(data)
}

/// Load both files and decode the payload against the dictionary.
pub fn decode_files(
    dictionary_path: impl AsRef<Path>,
    payload_path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<String, BejError> {
    let dictionary = load_file(dictionary_path)?;
    let payload = load_file(payload_path)?;
    decode_to_json_with(&payload, &dictionary, options)
}

pub mod error {
    pub use bej_decoder::error::BejError;
    pub use bej_schema::SchemaError;
}

pub mod schema {
    pub use bej_schema::{find_by_sequence, Dictionary, DictionaryEntry, Format, SubsetCount};
}
