//! Low-level pieces of the BEJ (Binary Encoded JSON) format: a bounds-checked
//! cursor over byte slices, the format and selector codes, and a loader that
//! reads one level of a schema dictionary without allocating.
//!
//! ```
//! use bej_schema::*;
//!
//! let data = [
//!     0x30, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x0A, 0x00,
//!     b'S', b'l', b'o', b't', 0x00,
//! ];
//! let dictionary = Dictionary::new(&data);
//! let mut entries = [DictionaryEntry::EMPTY; MAX_SUBSET_ENTRIES];
//! let count = dictionary.load_subset(0, SubsetCount::Children(1), &mut entries).unwrap();
//!
//! let slot = find_by_sequence(&entries[..count], 2).unwrap();
//! assert_eq!(slot.format, Format::Integer);
//! assert_eq!(slot.name(), "Slot");
//! ```

pub mod bb;
pub mod dictionary;
pub mod error;
pub mod format;

pub use bb::*;
pub use dictionary::*;
pub use error::*;
pub use format::*;
