use std::io::Write;
use tracing::trace;
use zerocopy::IntoBytes;

use crate::byte_order::{swap_if, ByteOrder, ByteSwap};
use crate::options::CodecOptions;
use crate::text::Utf16Encoder;
use crate::{Error, Result, TagKind};

/// Encodes NBT primitive values into a `Write` sink, in a fixed byte order.
///
/// The writer owns a small scratch buffer and a text encoder that it reuses between calls, so
/// it needs `&mut self` for every operation. Share it between threads only behind a lock.
///
/// Nothing is buffered between calls: each value is handed to the sink before the call returns.
/// Wrap the sink in a `BufWriter` if it is expensive to call.
pub struct NbtWriter<W> {
    /// The output sink.
    out: W,
    byte_order: ByteOrder,
    swap: bool,
    buffer: Box<[u8]>,
    encoder: Utf16Encoder,
    max_write_chunk: usize,
}

impl<W: Write> NbtWriter<W> {
    /// Constructor. Uses the default buffer sizes.
    pub fn new(out: W, byte_order: ByteOrder) -> Self {
        Self::with_options(out, &CodecOptions::new().byte_order(byte_order))
    }

    /// Creates a writer using the byte order and buffer sizes in `options`.
    pub fn with_options(out: W, options: &CodecOptions) -> Self {
        Self {
            out,
            byte_order: options.byte_order,
            swap: options.byte_order.needs_swap(),
            buffer: vec![0; options.effective_encode_buffer_size()].into_boxed_slice(),
            encoder: Utf16Encoder::new(),
            max_write_chunk: options.effective_max_write_chunk(),
        }
    }

    /// The byte order this writer was created with.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns a shared reference to the inner sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Returns a mutable reference to the inner sink
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Extracts the inner sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flushes the inner sink.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Writes a small, fixed-size array of bytes.
    #[inline(always)]
    fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.out.write_all(&value)?;
        Ok(())
    }

    /// Writes the one-byte type field of a tag.
    pub fn write_tag_type(&mut self, kind: TagKind) -> Result<()> {
        self.write_u8(kind.to_byte())
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_cbytes([value])
    }

    /// Writes a single `i8` value. This is the payload of a `Byte` tag.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_cbytes([value as u8])
    }

    /// Writes a `bool` as a single byte. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes a single `u16` value. Used for string length prefixes.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_cbytes(swap_if(self.swap, value).to_ne_bytes())
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_cbytes(swap_if(self.swap, value as u32).to_ne_bytes())
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_cbytes(swap_if(self.swap, value as u64).to_ne_bytes())
    }

    /// Writes an `f32` value. The bit pattern is written unchanged, including NaN payloads.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_cbytes(swap_if(self.swap, value.to_bits()).to_ne_bytes())
    }

    /// Writes an `f64` value. The bit pattern is written unchanged, including NaN payloads.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_cbytes(swap_if(self.swap, value.to_bits()).to_ne_bytes())
    }

    /// Writes `bytes` to the output, in pieces no larger than the configured maximum write
    /// size.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.max_write_chunk {
            trace!(
                len = bytes.len(),
                chunk = self.max_write_chunk,
                "writing bytes in chunks"
            );
        }
        for chunk in bytes.chunks(self.max_write_chunk) {
            self.out.write_all(chunk)?;
        }
        Ok(())
    }

    /// Writes a string: a `u16` byte count followed by the UTF-8 bytes of `s`.
    ///
    /// Fails with `Error::Argument` if `s` is longer than 65535 bytes. Nothing is written in that
    /// case.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len = string_len(s.len())?;
        self.write_u16(len)?;

        let cap = self.buffer.len();
        if s.len() <= cap {
            self.out.write_all(s.as_bytes())?;
            return Ok(());
        }

        trace!(len = s.len(), chunk = cap, "writing string in chunks");
        let mut rest = s;
        while !rest.is_empty() {
            let (head, tail) = split_at_char_boundary(rest, cap);
            self.out.write_all(head.as_bytes())?;
            rest = tail;
        }
        Ok(())
    }

    /// Writes a string given as UTF-16 code units, converting it to UTF-8.
    ///
    /// Unpaired surrogates are written as U+FFFD. Long strings are converted a chunk at a time
    /// through the writer's scratch buffer; a surrogate pair that straddles two chunks is still
    /// written as a single code point.
    ///
    /// Fails with `Error::Argument` if the UTF-8 encoding is longer than 65535 bytes.
    pub fn write_string_utf16(&mut self, units: &[u16]) -> Result<()> {
        let len = string_len(Utf16Encoder::encoded_len(units))?;
        self.write_u16(len)?;

        self.encoder.reset();
        let cap = self.buffer.len();
        if Utf16Encoder::max_encoded_len(units.len()) <= cap {
            let n = self.encoder.encode(units, &mut self.buffer, true);
            self.out.write_all(&self.buffer[..n])?;
            return Ok(());
        }

        let chunk_units = Utf16Encoder::max_chunk_units(cap);
        trace!(
            len = len,
            chunk_units = chunk_units,
            "writing UTF-16 string in chunks"
        );
        let mut chunks = units.chunks(chunk_units).peekable();
        while let Some(chunk) = chunks.next() {
            let last = chunks.peek().is_none();
            let n = self.encoder.encode(chunk, &mut self.buffer, last);
            self.out.write_all(&self.buffer[..n])?;
        }
        Ok(())
    }

    /// Writes the payload of a `ByteArray` tag: an `i32` length followed by the bytes.
    pub fn write_byte_array(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_i32(array_len(bytes.len())?)?;
        self.write_bytes(bytes)
    }

    /// Writes the payload of an `IntArray` tag: an `i32` length followed by the values.
    pub fn write_int_array(&mut self, values: &[i32]) -> Result<()> {
        self.write_i32(array_len(values.len())?)?;

        if !self.swap {
            return self.write_bytes(values.as_bytes());
        }

        let per_chunk = self.buffer.len() / 4;
        for chunk in values.chunks(per_chunk) {
            for (dst, &v) in self.buffer.chunks_exact_mut(4).zip(chunk) {
                dst.copy_from_slice(&(v as u32).swap().to_ne_bytes());
            }
            self.out.write_all(&self.buffer[..chunk.len() * 4])?;
        }
        Ok(())
    }
}

impl NbtWriter<Vec<u8>> {
    /// Creates a writer over an empty `Vec<u8>`.
    pub fn in_memory(byte_order: ByteOrder) -> Self {
        Self::new(Vec::new(), byte_order)
    }
}

fn string_len(len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| {
        Error::Argument(format!(
            "string is {len} bytes long; the maximum is {}",
            u16::MAX
        ))
    })
}

fn array_len(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::Argument(format!(
            "array has {len} elements; the maximum is {}",
            i32::MAX
        ))
    })
}

/// Splits `s` at the last char boundary at or before `max` bytes. `max` must be at least 4 so
/// that every split makes progress.
fn split_at_char_boundary(s: &str, max: usize) -> (&str, &str) {
    if s.len() <= max {
        return (s, "");
    }
    let mut at = max;
    while !s.is_char_boundary(at) {
        at -= 1;
    }
    s.split_at(at)
}
