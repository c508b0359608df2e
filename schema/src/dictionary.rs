use std::borrow::Cow;

use crate::{bb::ByteBuffer, error::SchemaError, format::Format};

/// Largest number of sibling entries a single subset may hold.
pub const MAX_SUBSET_ENTRIES: usize = 512;

/// Size of the header that wraps the dictionary's root entry.
pub const ROOT_HEADER_LEN: usize = 12;

/// Size of one entry record.
pub const ENTRY_RECORD_LEN: usize = 10;

/// One named node of the schema tree.
///
/// The name borrows from the dictionary bytes, so an entry can never outlive
/// the [Dictionary] it was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryEntry<'d> {
    pub format:          Format,
    pub flags:           u8,
    pub sequence_number: u16,
    pub offset:          u16,
    pub child_count:     u16,
    name:                &'d [u8],
}

impl<'d> DictionaryEntry<'d> {
    /// Placeholder used to initialise fixed-capacity subset buffers.
    pub const EMPTY: DictionaryEntry<'d> = DictionaryEntry {
        format:          Format::Null,
        flags:           0,
        sequence_number: 0,
        offset:          0,
        child_count:     0,
        name:            &[],
    };

    /// Raw name bytes without the NUL terminator. Empty when the record has
    /// no name or its name lies outside the dictionary.
    pub fn name_bytes(&self) -> &'d [u8] {
        self.name
    }

    /// The name as text. Borrowed unless the bytes are not valid UTF-8.
    pub fn name(&self) -> Cow<'d, str> {
        String::from_utf8_lossy(self.name)
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Locator for this entry's children.
    pub fn children(&self) -> SubsetCount {
        SubsetCount::Children(self.child_count)
    }
}

/// How many records [Dictionary::load_subset] should read at an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetCount {
    /// Skip the root header at the offset and load the single entry after it.
    Root,
    /// Load this many sibling records.
    Children(u16),
}

/// The header in front of the root entry. Its fields are reported but never
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootHeader {
    pub version_tag:     u8,
    pub flags:           u8,
    pub schema_version:  u32,
    pub entry_count:     u16,
    pub dictionary_size: u32,
}

impl RootHeader {
    pub fn read_from(bb: &mut ByteBuffer) -> Result<RootHeader, SchemaError> {
        if bb.remaining() < ROOT_HEADER_LEN {
            return Err(SchemaError::RootHeaderOutOfBounds {
                offset: bb.index(),
                len:    bb.data().len(),
            });
        }
        Ok(RootHeader {
            version_tag:     bb.read_byte()?,
            flags:           bb.read_byte()?,
            schema_version:  bb.read_uint(4)? as u32,
            entry_count:     bb.read_uint(2)? as u16,
            dictionary_size: bb.read_uint(4)? as u32,
        })
    }
}

/// A BEJ schema dictionary held in memory.
///
/// ```
/// use bej_schema::{Dictionary, DictionaryEntry, SubsetCount};
///
/// let data = [
///     0x10, 0x01, 0x00, 0x08, 0x00, 0x00, 0x00, 0x04, 0x0A, 0x00,
///     b'N', b'a', b'm', b'e', 0x00,
/// ];
/// let dictionary = Dictionary::new(&data);
/// let mut entries = [DictionaryEntry::EMPTY; 4];
/// let count = dictionary.load_subset(0, SubsetCount::Children(1), &mut entries).unwrap();
/// assert_eq!(count, 1);
/// assert_eq!(entries[0].sequence_number, 1);
/// assert_eq!(entries[0].name(), "Name");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dictionary<'d> {
    data: &'d [u8],
}

impl<'d> Dictionary<'d> {
    pub fn new(data: &'d [u8]) -> Dictionary<'d> {
        Dictionary { data }
    }

    pub fn data(&self) -> &'d [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the root header at the start of the dictionary.
    pub fn root_header(&self) -> Result<RootHeader, SchemaError> {
        RootHeader::read_from(&mut ByteBuffer::new(self.data))
    }

    /// Loads the root entry that follows the header at offset 0, returning the
    /// header along with the number of entries written.
    pub fn load_root(&self, out: &mut [DictionaryEntry<'d>]) -> Result<(RootHeader, usize), SchemaError> {
        self.load_root_at(0, out)
    }

    /// Parses the records located at `offset` into `out` and returns how many
    /// were written. The capacity of the subset is `out.len()`.
    ///
    /// Nothing in `out` should be trusted when this returns an error.
    pub fn load_subset(
        &self,
        offset: usize,
        count: SubsetCount,
        out: &mut [DictionaryEntry<'d>],
    ) -> Result<usize, SchemaError> {
        match count {
            SubsetCount::Root => self.load_root_at(offset, out).map(|(_, loaded)| loaded),
            SubsetCount::Children(0) => Ok(0),
            SubsetCount::Children(n) => {
                let mut bb = self.cursor_at(offset, count, n as usize, out.len())?;
                self.read_entries(&mut bb, n as usize, out)
            }
        }
    }

    fn load_root_at(
        &self,
        offset: usize,
        out: &mut [DictionaryEntry<'d>],
    ) -> Result<(RootHeader, usize), SchemaError> {
        let mut bb = self.cursor_at(offset, SubsetCount::Root, 1, out.len())?;
        let header = RootHeader::read_from(&mut bb)?;
        let loaded = self.read_entries(&mut bb, 1, out)?;
        Ok((header, loaded))
    }

    // Capacity is checked before bounds.
    fn cursor_at(
        &self,
        offset: usize,
        count: SubsetCount,
        requested: usize,
        capacity: usize,
    ) -> Result<ByteBuffer<'d>, SchemaError> {
        if requested > capacity {
            return Err(SchemaError::SubsetCapacityExceeded { requested, capacity });
        }

        let len = self.data.len();
        if offset > len {
            return Err(match count {
                SubsetCount::Root => SchemaError::RootHeaderOutOfBounds { offset, len },
                SubsetCount::Children(_) => SchemaError::RecordOutOfBounds { offset, len },
            });
        }
        ByteBuffer::at(self.data, offset)
    }

    fn read_entries(
        &self,
        bb: &mut ByteBuffer<'d>,
        requested: usize,
        out: &mut [DictionaryEntry<'d>],
    ) -> Result<usize, SchemaError> {
        for slot in out.iter_mut().take(requested) {
            *slot = self.read_entry(bb)?;
        }
        Ok(requested)
    }

    fn read_entry(&self, bb: &mut ByteBuffer<'d>) -> Result<DictionaryEntry<'d>, SchemaError> {
        if bb.remaining() < ENTRY_RECORD_LEN {
            return Err(SchemaError::RecordOutOfBounds {
                offset: bb.index(),
                len:    self.data.len(),
            });
        }

        let format_flags = bb.read_byte()?;
        let sequence_number = bb.read_uint(2)? as u16;
        let offset = bb.read_uint(2)? as u16;
        let child_count = bb.read_uint(2)? as u16;
        let name_len = bb.read_byte()? as usize;
        let name_offset = bb.read_uint(2)? as usize;

        Ok(DictionaryEntry {
            format: Format::from_format_byte(format_flags),
            flags: format_flags & 0x0F,
            sequence_number,
            offset,
            child_count,
            name: self.name_at(name_offset, name_len),
        })
    }

    // Names are stored NUL-terminated; anything from the first NUL on is dropped.
    fn name_at(&self, name_offset: usize, name_len: usize) -> &'d [u8] {
        if name_len == 0 || name_offset + name_len > self.data.len() {
            return &[];
        }
        let raw = &self.data[name_offset..name_offset + name_len];
        match raw.iter().position(|&b| b == 0) {
            Some(end) => &raw[..end],
            None => raw,
        }
    }
}

/// Returns the first entry whose sequence number is `sequence`.
pub fn find_by_sequence<'a, 'd>(
    entries: &'a [DictionaryEntry<'d>],
    sequence: u64,
) -> Option<&'a DictionaryEntry<'d>> {
    entries
        .iter()
        .find(|entry| u64::from(entry.sequence_number) == sequence)
}
