use std::fs;
use std::path::Path;

use bej_schema::MAX_SUBSET_ENTRIES;
use serde::{Deserialize, Serialize};

use crate::error::BejError;

/// Default size of the JSON output buffer.
pub const DEFAULT_OUTPUT_CAPACITY: usize = 256 * 1024;

/// Largest output buffer a decode may request.
pub const MAX_OUTPUT_CAPACITY: usize = 64 * 1024 * 1024;

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest accepted `max_depth`.
///
/// Every nesting level holds a `MAX_SUBSET_ENTRIES` array of dictionary
/// entries on the stack (about 16 KiB on 64-bit targets), so 64 levels stay
/// near 1 MiB and fit a 2 MiB thread stack.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Limits applied to a decode.
///
/// Every field is optional in the JSON form; missing fields keep their
/// defaults.
///
/// ```
/// let options = bej_decoder::DecodeOptions::from_json_str(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(options.max_depth, 8);
/// assert_eq!(options.max_subset_entries, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// Entries a single dictionary subset may hold, at most 512.
    pub max_subset_entries: usize,
    /// Bytes of JSON text the output buffer accepts.
    pub output_capacity:    usize,
    /// Deepest container nesting accepted, counting the root's members as 1.
    pub max_depth:          usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_subset_entries: MAX_SUBSET_ENTRIES,
            output_capacity:    DEFAULT_OUTPUT_CAPACITY,
            max_depth:          DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn from_json_str(text: &str) -> Result<DecodeOptions, BejError> {
        let options: DecodeOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<DecodeOptions, BejError> {
        let text = fs::read_to_string(path)?;
        DecodeOptions::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), BejError> {
        if self.max_subset_entries == 0 || self.max_subset_entries > MAX_SUBSET_ENTRIES {
            return Err(BejError::InvalidOptions(format!(
                "max_subset_entries must be between 1 and {}, got {}",
                MAX_SUBSET_ENTRIES, self.max_subset_entries
            )));
        }
        if self.output_capacity == 0 || self.output_capacity > MAX_OUTPUT_CAPACITY {
            return Err(BejError::InvalidOptions(format!(
                "output_capacity must be between 1 and {}, got {}",
                MAX_OUTPUT_CAPACITY, self.output_capacity
            )));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(BejError::InvalidOptions(format!(
                "max_depth must be between 1 and {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }
        Ok(())
    }
}
