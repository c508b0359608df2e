use std::io::Write as _;

use bej_schema::{
    find_by_sequence, ByteBuffer, Dictionary, DictionaryEntry, DictionarySelector, Format,
    MAX_SUBSET_ENTRIES,
};

use crate::{
    error::BejError,
    header::PayloadHeader,
    options::DecodeOptions,
    writer::{write_indent, write_json_string, OutputBuffer},
};

/// Renders BEJ payloads as indented JSON using one schema dictionary.
///
/// The decoder only borrows the dictionary; names written to the output are
/// read straight from it.
#[derive(Debug, Clone)]
pub struct Decoder<'d> {
    dictionary: Dictionary<'d>,
    options:    DecodeOptions,
}

impl<'d> Decoder<'d> {
    pub fn new(dictionary: &'d [u8]) -> Decoder<'d> {
        Decoder {
            dictionary: Dictionary::new(dictionary),
            options:    DecodeOptions::default(),
        }
    }

    pub fn with_options(dictionary: &'d [u8], options: DecodeOptions) -> Result<Decoder<'d>, BejError> {
        options.validate()?;
        Ok(Decoder {
            dictionary: Dictionary::new(dictionary),
            options,
        })
    }

    pub fn dictionary(&self) -> Dictionary<'d> {
        self.dictionary
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes `payload` and appends its JSON text to `out`.
    ///
    /// On error the contents of `out` are unspecified and must be discarded:
    /// fragments written before the failure are left in place.
    pub fn decode(&self, payload: &[u8], out: &mut OutputBuffer) -> Result<(), BejError> {
        let mut bb = ByteBuffer::new(payload);
        PayloadHeader::read_from(&mut bb)?;

        let mut root = [DictionaryEntry::EMPTY; 1];
        let (header, count) = self.dictionary.load_root(&mut root)?;
        tracing::debug!(?header, "loaded dictionary root");

        self.decode_stream(&mut bb, out, &root[..count], 1, 0, false)?;

        if out.overflowed() {
            return Err(BejError::OutputOverflow {
                capacity: out.capacity(),
            });
        }
        Ok(())
    }

    /// Decodes `payload` into a fresh buffer sized by the options.
    pub fn decode_to_string(&self, payload: &[u8]) -> Result<String, BejError> {
        let mut out = OutputBuffer::new(self.options.output_capacity);
        self.decode(payload, &mut out)?;
        out.into_string()
    }

    fn decode_stream(
        &self,
        bb: &mut ByteBuffer,
        out: &mut OutputBuffer,
        entries: &[DictionaryEntry<'d>],
        count: u64,
        depth: usize,
        add_name: bool,
    ) -> Result<(), BejError> {
        for i in 0..count {
            if i > 0 {
                out.write(b", ");
            }
            self.decode_element(bb, out, entries, depth, false, add_name)?;
        }
        Ok(())
    }

    fn decode_element(
        &self,
        bb: &mut ByteBuffer,
        out: &mut OutputBuffer,
        entries: &[DictionaryEntry<'d>],
        depth: usize,
        in_array: bool,
        add_name: bool,
    ) -> Result<(), BejError> {
        if bb.is_exhausted() {
            return Ok(());
        }

        let tag = bb.read_nnint()?;
        let format = Format::from_format_byte(bb.read_byte()?);
        let length = bb.read_nnint()?;

        // Array members all share the item entry with sequence number 0.
        let sequence = if in_array { 0 } else { tag >> 1 };
        if DictionarySelector::from_tag(tag) == DictionarySelector::Annotation {
            tracing::trace!(sequence, "annotation selector bit set, using schema dictionary");
        }
        let entry = *find_by_sequence(entries, sequence)
            .ok_or(BejError::UnknownSequence { sequence })?;

        if add_name && !in_array {
            write_indent(out, depth);
            if entry.has_name() {
                write_json_string(out, &entry.name())?;
                out.write(b": ");
            }
        }

        match format {
            Format::Set | Format::Array => self.decode_members(bb, out, &entry, format, depth),
            Format::Enum => self.decode_enum(bb, out, &entry),
            Format::Null => {
                out.write(b"null");
                Ok(())
            }
            Format::Integer => {
                let value = bb.read_sint(value_len(length)?)?;
                write!(out, "{}", value)?;
                Ok(())
            }
            Format::Boolean => {
                let value = bb.read_uint(value_len(length)?)?;
                let text: &[u8] = if value == 1 { b"true" } else { b"false" };
                out.write(text);
                Ok(())
            }
            Format::String => {
                let bytes = bb.read_bytes(value_len(length)?)?;
                let text = match bytes.split_last() {
                    Some((&0, rest)) => rest,
                    _ => bytes,
                };
                write_json_string(out, &String::from_utf8_lossy(text))
            }
            Format::Unsupported(_) => {
                bb.read_bytes(value_len(length)?)?;
                tracing::warn!(%format, length, "skipped value with unsupported BEJ format");
                out.write(b"null");
                Err(BejError::UnsupportedFormat { format })
            }
        }
    }

    fn decode_members(
        &self,
        bb: &mut ByteBuffer,
        out: &mut OutputBuffer,
        entry: &DictionaryEntry<'d>,
        format: Format,
        depth: usize,
    ) -> Result<(), BejError> {
        let count = bb.read_nnint()?;
        let member_depth = depth + 1;
        if member_depth > self.options.max_depth {
            return Err(BejError::DepthExceeded {
                max: self.options.max_depth,
            });
        }

        let mut buf = [DictionaryEntry::EMPTY; MAX_SUBSET_ENTRIES];
        let children = self.load_children(entry, &mut buf)?;

        let in_array = format == Format::Array;
        out.write(if in_array { b"[" } else { b"{" });
        for i in 0..count {
            if bb.is_exhausted() {
                return Err(BejError::TruncatedContainer {
                    declared: count,
                    decoded:  i,
                });
            }
            if i > 0 {
                out.write(b",");
            }
            if in_array {
                write_indent(out, member_depth);
            }
            self.decode_element(bb, out, children, member_depth, in_array, !in_array)?;
        }
        if count > 0 {
            write_indent(out, depth);
        }
        out.write(if in_array { b"]" } else { b"}" });
        Ok(())
    }

    fn decode_enum(
        &self,
        bb: &mut ByteBuffer,
        out: &mut OutputBuffer,
        entry: &DictionaryEntry<'d>,
    ) -> Result<(), BejError> {
        let selector = bb.read_nnint()?;

        let mut buf = [DictionaryEntry::EMPTY; MAX_SUBSET_ENTRIES];
        let values = self.load_children(entry, &mut buf)?;

        match find_by_sequence(values, selector) {
            Some(value) => write_json_string(out, &value.name()),
            None => {
                tracing::warn!(selector, property = %entry.name(), "enum value not in dictionary");
                out.write(b"null");
                Ok(())
            }
        }
    }

    fn load_children<'b>(
        &self,
        entry: &DictionaryEntry<'d>,
        buf: &'b mut [DictionaryEntry<'d>],
    ) -> Result<&'b [DictionaryEntry<'d>], BejError> {
        let capacity = self.options.max_subset_entries.min(buf.len());
        let count = self.dictionary.load_subset(
            entry.offset as usize,
            entry.children(),
            &mut buf[..capacity],
        )?;
        tracing::trace!(
            parent = %entry.name(),
            offset = entry.offset,
            count,
            "loaded dictionary subset"
        );
        Ok(&buf[..count])
    }
}

fn value_len(length: u64) -> Result<usize, BejError> {
    usize::try_from(length).map_err(|_| BejError::LengthOverflow(length))
}
