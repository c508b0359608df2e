use bej_schema::{ByteBuffer, SchemaClass};

use crate::error::BejError;

/// Bytes taken by version, flags and schema class.
pub const HEADER_LEN: usize = 7;

/// Versions that mark the payload as an upstream error report.
pub const ERROR_PAYLOAD_VERSIONS: [u32; 2] = [0x00F0_F0F1, 0x00F0_F1F1];

/// The fixed header in front of every BEJ payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    pub version:      u32,
    pub flags:        u16,
    pub schema_class: SchemaClass,
}

impl PayloadHeader {
    /// Reads and checks the header at the start of `bb`.
    pub fn read_from(bb: &mut ByteBuffer) -> Result<PayloadHeader, BejError> {
        if bb.remaining() < HEADER_LEN {
            return Err(BejError::TooShort {
                len: bb.remaining(),
                min: HEADER_LEN,
            });
        }

        let version = bb.read_uint(4)? as u32;
        if ERROR_PAYLOAD_VERSIONS.contains(&version) {
            return Err(BejError::ErrorPayload { version });
        }

        let flags = bb.read_uint(2)? as u16;
        if flags != 0 {
            tracing::warn!("non-zero BEJ flags (0x{:04X}) encountered", flags);
        }

        let schema_class = SchemaClass::try_from(bb.read_byte()?)
            .map_err(BejError::UnsupportedSchemaClass)?;

        tracing::debug!(?schema_class, "payload header version 0x{:08X}", version);

        Ok(PayloadHeader {
            version,
            flags,
            schema_class,
        })
    }
}
