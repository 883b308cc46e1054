//! Reads and writes the primitive values of the NBT binary tag format.
//!
//! NBT is a tree of typed, optionally named tags. Every tag is stored as a one-byte type field,
//! a name and a payload, and every payload is ultimately built from the primitives this crate
//! handles: fixed-width integers, IEEE-754 floats, and strings with a `u16` byte-length prefix.
//! The tag tree itself, compression and file handling are left to the caller, which drives
//! `NbtWriter` and `NbtReader` one field at a time.
//!
//! All multi-byte values use one byte order, chosen when the reader or writer is created. Java
//! Edition files are big-endian; Bedrock Edition files are little-endian.
//!
//! ```
//! use nbt_binary_io::{ByteOrder, NbtReader, NbtWriter, TagKind};
//!
//! let mut w = NbtWriter::in_memory(ByteOrder::BigEndian);
//! w.write_tag_type(TagKind::Int).unwrap();
//! w.write_string("level").unwrap();
//! w.write_i32(0x01020304).unwrap();
//! let bytes = w.into_inner();
//! assert_eq!(bytes, [3, 0, 5, b'l', b'e', b'v', b'e', b'l', 1, 2, 3, 4]);
//!
//! let mut r = NbtReader::new(bytes.as_slice(), ByteOrder::BigEndian);
//! assert_eq!(r.read_tag_type().unwrap(), TagKind::Int);
//! r.skip_string().unwrap();
//! assert_eq!(r.read_i32().unwrap(), 0x01020304);
//! ```
//!
//! # References
//! * <https://minecraft.wiki/w/NBT_format>

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod byte_order;
mod error;
mod options;
mod reader;
mod tag_kind;
mod text;
pub mod transport;
mod writer;


pub use byte_order::{ByteOrder, ByteSwap};
pub use error::{Error, Result};
pub use options::{
    CodecOptions, DEFAULT_ENCODE_BUFFER_SIZE, DEFAULT_MAX_WRITE_CHUNK, DEFAULT_SKIP_BUFFER_SIZE,
    DEFAULT_STRING_BUFFER_SIZE,
};
pub use reader::NbtReader;
pub use tag_kind::TagKind;
pub use text::Utf16Encoder;
pub use transport::{ByteSource, Seekable, Unseekable};
pub use writer::NbtWriter;
