use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::Error;

/// The kind of a node in an NBT tree, as stored in its one-byte type field.
///
/// Only the values `0..=11` are valid. The reader rejects anything else.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TagKind {
    /// Marks the end of a compound.
    End = 0,
    /// Signed 8-bit integer.
    Byte = 1,
    /// Signed 16-bit integer.
    Short = 2,
    /// Signed 32-bit integer.
    Int = 3,
    /// Signed 64-bit integer.
    Long = 4,
    /// 32-bit IEEE-754 float.
    Float = 5,
    /// 64-bit IEEE-754 float.
    Double = 6,
    /// Length-prefixed array of bytes.
    ByteArray = 7,
    /// Length-prefixed UTF-8 string.
    String = 8,
    /// Homogeneous list of unnamed tags.
    List = 9,
    /// Collection of named tags, terminated by `End`.
    Compound = 10,
    /// Length-prefixed array of 32-bit integers.
    IntArray = 11,
}

impl TagKind {
    /// The largest valid discriminant.
    pub const MAX: u8 = TagKind::IntArray as u8;

    /// Converts a type byte into a `TagKind`.
    pub fn from_byte(b: u8) -> Result<Self, Error> {
        Self::try_from(b).map_err(|_| Error::InvalidTagType(b))
    }

    /// The numeric discriminant.
    #[inline(always)]
    pub fn to_byte(self) -> u8 {
        self.into()
    }

    /// The conventional name, e.g. `TAG_Int`.
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
        }
    }

    /// Returns `true` for kinds whose payload contains other tags.
    pub fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// The size in bytes of the payload, for kinds whose payload has a fixed size.
    ///
    /// A deserializer can pass this to `NbtReader::skip` to step over a scalar it does not need.
    pub fn payload_size(self) -> Option<usize> {
        match self {
            Self::End => Some(0),
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            Self::ByteArray | Self::String | Self::List | Self::Compound | Self::IntArray => None,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
