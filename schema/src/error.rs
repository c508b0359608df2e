use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("read of {wanted} bytes at offset {offset} runs past end of buffer ({len} bytes)")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        len:    usize,
    },

    #[error("integer width of {0} bytes exceeds the 8-byte maximum")]
    WidthTooLarge(usize),

    #[error("dictionary subset of {requested} entries exceeds capacity of {capacity}")]
    SubsetCapacityExceeded {
        requested: usize,
        capacity:  usize,
    },

    #[error("dictionary root header at offset {offset} runs past end of dictionary ({len} bytes)")]
    RootHeaderOutOfBounds {
        offset: usize,
        len:    usize,
    },

    #[error("dictionary record at offset {offset} runs past end of dictionary ({len} bytes)")]
    RecordOutOfBounds {
        offset: usize,
        len:    usize,
    },
}
