use crate::error::SchemaError;

/// A BEJ byte buffer meant for reading.
///
/// Both the payload stream and the dictionary are walked through this type.
/// Every read either succeeds entirely within bounds or fails without moving
/// the cursor.
///
/// Example usage:
///
/// ```
/// let mut bb = bej_schema::ByteBuffer::new(&[0x02, 0x00, 0x01, 0x01, 0xFE]);
/// assert_eq!(bb.read_nnint(), Ok(0x100));
/// assert_eq!(bb.read_sint(1), Ok(1));
/// assert_eq!(bb.read_sint(1), Ok(-2));
/// assert!(bb.is_exhausted());
/// ```
///
#[derive(Debug, Clone)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Create a new ByteBuffer that wraps the provided byte slice. The lifetime
    /// of the returned ByteBuffer must not outlive the lifetime of the byte
    /// slice.
    pub fn new(data: &'a [u8]) -> ByteBuffer<'a> {
        ByteBuffer { data, index: 0 }
    }

    /// Create a ByteBuffer positioned at `index`. Fails if `index` lies past
    /// the end of `data`.
    pub fn at(data: &'a [u8], index: usize) -> Result<ByteBuffer<'a>, SchemaError> {
        if index > data.len() {
            return Err(SchemaError::OutOfBounds {
                offset: index,
                wanted: 0,
                len: data.len(),
            });
        }
        Ok(ByteBuffer { data, index })
    }

    /// Retrieves the underlying byte slice.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Retrieves the current index into the underlying byte slice. This starts
    /// off as 0 and ends up as `self.data().len()` when everything has been
    /// read.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.data.len()
    }

    /// Try to read a byte starting at the current index.
    pub fn read_byte(&mut self) -> Result<u8, SchemaError> {
        match self.data.get(self.index) {
            Some(&value) => {
                self.index += 1;
                Ok(value)
            }
            None => Err(self.out_of_bounds(1)),
        }
    }

    /// Try to read `len` bytes starting at the current index. The slice
    /// aliases the underlying memory.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SchemaError> {
        if len > self.remaining() {
            return Err(self.out_of_bounds(len));
        }
        let value = &self.data[self.index..self.index + len];
        self.index += len;
        Ok(value)
    }

    /// Try to read a little-endian unsigned integer that is `width` bytes wide.
    /// A width of zero reads nothing and yields zero.
    pub fn read_uint(&mut self, width: usize) -> Result<u64, SchemaError> {
        if width > 8 {
            return Err(SchemaError::WidthTooLarge(width));
        }
        let bytes = self.read_bytes(width)?;
        let mut le = [0u8; 8];
        le[..width].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(le))
    }

    /// Try to read a little-endian two's-complement integer that is `width`
    /// bytes wide, sign-extended from its top bit.
    pub fn read_sint(&mut self, width: usize) -> Result<i64, SchemaError> {
        let value = self.read_uint(width)?;
        if width == 0 {
            return Ok(0);
        }
        let shift = 64 - 8 * width as u32;
        Ok(((value << shift) as i64) >> shift)
    }

    /// Try to read a BEJ non-negative integer: one byte holding the width,
    /// followed by that many little-endian value bytes.
    pub fn read_nnint(&mut self) -> Result<u64, SchemaError> {
        let start = self.index;
        let width = self.read_byte()? as usize;
        self.read_uint(width).map_err(|err| {
            self.index = start;
            err
        })
    }

    fn out_of_bounds(&self, wanted: usize) -> SchemaError {
        SchemaError::OutOfBounds {
            offset: self.index,
            wanted,
            len: self.data.len(),
        }
    }
}

#[test]
fn read_byte() {
    let read = |bytes| ByteBuffer::new(bytes).read_byte();
    assert!(read(&[]).is_err());
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[1]), Ok(1));
    assert_eq!(read(&[254]), Ok(254));
    assert_eq!(read(&[255]), Ok(255));
}

#[test]
fn read_bytes() {
    let read = |bytes, len| ByteBuffer::new(bytes).read_bytes(len);
    assert_eq!(read(&[], 0), Ok(vec![].as_slice()));
    assert!(read(&[], 1).is_err());
    assert_eq!(read(&[0], 0), Ok(vec![].as_slice()));
    assert_eq!(read(&[0], 1), Ok(vec![0].as_slice()));
    assert!(read(&[0], 2).is_err());

    let mut bb = ByteBuffer::new(&[1, 2, 3, 4, 5]);
    assert_eq!(bb.read_bytes(3), Ok(vec![1, 2, 3].as_slice()));
    assert_eq!(bb.read_bytes(2), Ok(vec![4, 5].as_slice()));
    assert_eq!(
        bb.read_bytes(1),
        Err(SchemaError::OutOfBounds {
            offset: 5,
            wanted: 1,
            len: 5
        })
    );
}

#[test]
fn read_uint() {
    let mut bb = ByteBuffer::new(&[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(bb.read_uint(1), Ok(0x01));
    assert_eq!(bb.read_uint(2), Ok(0x0302));
    assert_eq!(bb.read_uint(0), Ok(0));
    assert_eq!(bb.index(), 3);

    let read = |bytes, width| ByteBuffer::new(bytes).read_uint(width);
    assert_eq!(read(&[0x00, 0x00, 0x01], 3), Ok(0x01_0000));
    assert_eq!(read(&[0xFF; 8], 8), Ok(u64::MAX));
    assert_eq!(read(&[0xFF; 9], 9), Err(SchemaError::WidthTooLarge(9)));
}

#[test]
fn read_uint_past_end_leaves_cursor() {
    let mut bb = ByteBuffer::new(&[0x01, 0x02, 0x03]);
    assert_eq!(bb.read_uint(1), Ok(1));
    assert!(bb.read_uint(4).is_err());
    assert_eq!(bb.index(), 1);
    assert_eq!(bb.read_uint(2), Ok(0x0302));
}

#[test]
fn read_sint() {
    let read = |bytes, width| ByteBuffer::new(bytes).read_sint(width);
    assert_eq!(read(&[], 0), Ok(0));
    assert_eq!(read(&[0xFE], 1), Ok(-2));
    assert_eq!(read(&[0x7F], 1), Ok(127));
    assert_eq!(read(&[0x80], 1), Ok(-128));
    assert_eq!(read(&[0x00, 0x80], 2), Ok(-32768));
    assert_eq!(read(&[0x00, 0x00, 0x01], 3), Ok(65536));
    assert_eq!(read(&[0xFF; 8], 8), Ok(-1));
    assert_eq!(read(&[0, 0, 0, 0, 0, 0, 0, 0x80], 8), Ok(i64::MIN));
}

#[test]
fn read_nnint() {
    let read = |bytes| ByteBuffer::new(bytes).read_nnint();
    assert!(read(&[]).is_err());
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[1, 0x2A]), Ok(42));
    assert_eq!(read(&[2, 0x60, 0x09]), Ok(2400));
    assert!(read(&[2, 0x60]).is_err());
    assert_eq!(read(&[9, 0, 0, 0, 0, 0, 0, 0, 0, 0]), Err(SchemaError::WidthTooLarge(9)));
}

#[test]
fn read_nnint_truncated_leaves_cursor() {
    let mut bb = ByteBuffer::new(&[0x04, 0x01, 0x02]);
    assert!(bb.read_nnint().is_err());
    assert_eq!(bb.index(), 0);
}

#[test]
fn at_rejects_index_past_end() {
    assert!(ByteBuffer::at(&[1, 2], 2).is_ok());
    assert!(ByteBuffer::at(&[1, 2], 3).is_err());
    let mut bb = ByteBuffer::at(&[1, 2, 3], 1).unwrap();
    assert_eq!(bb.read_byte(), Ok(2));
    assert_eq!(bb.remaining(), 1);
}

#[test]
fn read_sequence() {
    let mut bb = ByteBuffer::new(&[
        0x01, 0x06, 0x50, 0x01, 0x04, 0x00, 0x00, 0x01, b'S', b'o', 0x00,
    ]);
    assert_eq!(bb.read_nnint(), Ok(6));
    assert_eq!(bb.read_byte().map(|b| b >> 4), Ok(0x5));
    assert_eq!(bb.read_nnint(), Ok(4));
    assert_eq!(bb.read_sint(3), Ok(0x01_0000));
    assert_eq!(bb.read_bytes(3), Ok(&b"So\0"[..]));
    assert!(bb.is_exhausted());
}
