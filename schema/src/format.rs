use std::fmt;

/// Data format of a BEJ element, carried in the high nibble of the format
/// byte in both payload elements and dictionary records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Set,
    Array,
    Null,
    Integer,
    Enum,
    String,
    Boolean,
    /// Any nibble this decoder does not render (real, bytestring, choice,
    /// annotations, resource links and reserved codes).
    Unsupported(u8),
}

impl Format {
    pub const SET: u8 = 0x0;
    pub const ARRAY: u8 = 0x1;
    pub const NULL: u8 = 0x2;
    pub const INTEGER: u8 = 0x3;
    pub const ENUM: u8 = 0x4;
    pub const STRING: u8 = 0x5;
    pub const BOOLEAN: u8 = 0x7;

    /// Maps the low four bits of `nibble` to a format.
    pub fn from_nibble(nibble: u8) -> Format {
        match nibble & 0x0F {
            Self::SET => Format::Set,
            Self::ARRAY => Format::Array,
            Self::NULL => Format::Null,
            Self::INTEGER => Format::Integer,
            Self::ENUM => Format::Enum,
            Self::STRING => Format::String,
            Self::BOOLEAN => Format::Boolean,
            other => Format::Unsupported(other),
        }
    }

    /// Extracts the format from a whole format byte (high nibble).
    pub fn from_format_byte(byte: u8) -> Format {
        Format::from_nibble(byte >> 4)
    }

    pub fn nibble(self) -> u8 {
        match self {
            Format::Set => Self::SET,
            Format::Array => Self::ARRAY,
            Format::Null => Self::NULL,
            Format::Integer => Self::INTEGER,
            Format::Enum => Self::ENUM,
            Format::String => Self::STRING,
            Format::Boolean => Self::BOOLEAN,
            Format::Unsupported(other) => other,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Format::Set => f.write_str("set"),
            Format::Array => f.write_str("array"),
            Format::Null => f.write_str("null"),
            Format::Integer => f.write_str("integer"),
            Format::Enum => f.write_str("enum"),
            Format::String => f.write_str("string"),
            Format::Boolean => f.write_str("boolean"),
            Format::Unsupported(other) => write!(f, "0x{:02X}", other),
        }
    }
}

/// Schema class declared in byte 6 of a payload header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaClass {
    Major,
    Annotation,
}

impl TryFrom<u8> for SchemaClass {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0x00 => Ok(SchemaClass::Major),
            0x01 => Ok(SchemaClass::Annotation),
            other => Err(other),
        }
    }
}

/// Dictionary named by the low bit of an element tag.
///
/// The decoder always resolves against the single dictionary it was given;
/// the selector is only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionarySelector {
    MajorSchema,
    Annotation,
}

impl DictionarySelector {
    pub fn from_tag(tag: u64) -> DictionarySelector {
        if tag & 1 == 0 {
            DictionarySelector::MajorSchema
        } else {
            DictionarySelector::Annotation
        }
    }
}
