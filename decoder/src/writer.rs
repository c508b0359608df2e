use std::fs;
use std::io;
use std::path::Path;

use crate::error::BejError;
use crate::options::MAX_OUTPUT_CAPACITY;

const INDENT: &[u8] = b"    ";

/// Append-only buffer for JSON text with a fixed capacity.
///
/// The backing storage is allocated up front, up to `MAX_OUTPUT_CAPACITY`
/// bytes. A write that would not fit is dropped whole and the buffer
/// remembers that it overflowed.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data:       Vec<u8>,
    capacity:   usize,
    overflowed: bool,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> OutputBuffer {
        OutputBuffer {
            data: Vec::with_capacity(capacity.min(MAX_OUTPUT_CAPACITY)),
            capacity,
            overflowed: false,
        }
    }

    /// Empties the buffer and clears the overflow mark.
    pub fn clear(&mut self) {
        self.data.clear();
        self.overflowed = false;
    }

    pub fn write(&mut self, bytes: &[u8]) {
        if self.data.len() + bytes.len() > self.capacity {
            self.overflowed = true;
            return;
        }
        self.data.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once any write has been dropped for lack of room.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn into_string(self) -> Result<String, BejError> {
        Ok(String::from_utf8(self.data)?)
    }

    /// Writes the buffered text to `path`, replacing any existing file.
    pub fn flush_to_file(&self, path: impl AsRef<Path>) -> Result<(), BejError> {
        fs::write(path, &self.data)?;
        Ok(())
    }
}

impl io::Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        OutputBuffer::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Starts a new line indented by `level` steps of four spaces.
pub fn write_indent(out: &mut OutputBuffer, level: usize) {
    out.write(b"\n");
    for _ in 0..level {
        out.write(INDENT);
    }
}

/// Writes `text` as a quoted JSON string, escaping quotes, backslashes and
/// control characters.
pub fn write_json_string(out: &mut OutputBuffer, text: &str) -> Result<(), BejError> {
    serde_json::to_writer(out, text)?;
    Ok(())
}
