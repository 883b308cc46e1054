use std::io::{ErrorKind, Read};
use tracing::{debug, trace};
use zerocopy::IntoBytes;

use crate::byte_order::{swap_if, ByteOrder, ByteSwap};
use crate::options::CodecOptions;
use crate::transport::ByteSource;
use crate::{Error, Result, TagKind};

/// Arrays are read in steps of at most this many bytes, so that a corrupt length prefix cannot
/// allocate more than one step beyond the data that is actually present.
const ARRAY_READ_STEP: usize = 64 * 1024;

/// Decodes NBT primitive values from a `ByteSource`, in a fixed byte order.
///
/// Every read is exact: the reader keeps calling the source until it has all the bytes a value
/// needs, and fails with `Error::EndOfStream` if the source reports end-of-data first. Sources
/// may return fewer bytes per call than requested.
///
/// Short strings are decoded through a scratch buffer owned by the reader, so most calls need
/// `&mut self` and do not allocate beyond the returned value. A reader must not be used from two
/// threads at once without a lock.
///
/// ```
/// use nbt_binary_io::{ByteOrder, NbtReader, TagKind};
///
/// let data: &[u8] = &[3, 0, 2, b'h', b'i', 0, 0, 0, 42];
/// let mut r = NbtReader::new(data, ByteOrder::BigEndian);
/// assert_eq!(r.read_tag_type().unwrap(), TagKind::Int);
/// assert_eq!(r.read_string().unwrap(), "hi");
/// assert_eq!(r.read_i32().unwrap(), 42);
/// ```
pub struct NbtReader<R> {
    src: R,
    byte_order: ByteOrder,
    swap: bool,
    string_buffer: Box<[u8]>,
    /// Allocated the first time `skip` has to read and discard data.
    skip_buffer: Option<Box<[u8]>>,
    skip_buffer_size: usize,
    bytes_read: u64,
}

impl<R: ByteSource> NbtReader<R> {
    /// Constructor. Uses the default buffer sizes.
    pub fn new(src: R, byte_order: ByteOrder) -> Self {
        Self::with_options(src, &CodecOptions::new().byte_order(byte_order))
    }

    /// Creates a reader using the byte order and buffer sizes in `options`.
    pub fn with_options(src: R, options: &CodecOptions) -> Self {
        Self {
            src,
            byte_order: options.byte_order,
            swap: options.byte_order.needs_swap(),
            string_buffer: vec![0; options.effective_string_buffer_size()].into_boxed_slice(),
            skip_buffer: None,
            skip_buffer_size: options.effective_skip_buffer_size(),
            bytes_read: 0,
        }
    }

    /// The byte order this reader was created with.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Accesses the inner source
    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// The number of bytes consumed from the source so far, including skipped bytes.
    ///
    /// After a failed read this includes whatever part of the value was obtained before the
    /// failure.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Extracts the inner source
    pub fn into_inner(self) -> R {
        self.src
    }

    #[cfg(test)]
    pub(crate) fn has_skip_buffer(&self) -> bool {
        self.skip_buffer.is_some()
    }

    /// Fills `buf` completely from the source.
    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        fill(&mut self.src, &mut self.bytes_read, buf)
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0; N];
        fill(&mut self.src, &mut self.bytes_read, &mut bytes)?;
        Ok(bytes)
    }

    /// Reads the one-byte type field of a tag.
    ///
    /// Fails with `Error::InvalidTagType` if the byte is not in `0..=11`.
    pub fn read_tag_type(&mut self) -> Result<TagKind> {
        TagKind::from_byte(self.read_u8()?)
    }

    /// Reads a single `u8` value.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b]: [u8; 1] = self.read_cbytes()?;
        Ok(b)
    }

    /// Reads a single `i8` value. This is the payload of a `Byte` tag.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a single byte as a `bool`. Any non-zero value is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a `u16`. Used for string length prefixes.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(swap_if(self.swap, u16::from_ne_bytes(self.read_cbytes()?)))
    }

    /// Reads an `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Reads an `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(swap_if(self.swap, u32::from_ne_bytes(self.read_cbytes()?)) as i32)
    }

    /// Reads an `i64`.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(swap_if(self.swap, u64::from_ne_bytes(self.read_cbytes()?)) as i64)
    }

    /// Reads an `f32`. The bit pattern is returned unchanged, including NaN payloads.
    pub fn read_f32(&mut self) -> Result<f32> {
        let bits = u32::from_ne_bytes(self.read_cbytes()?);
        Ok(f32::from_bits(swap_if(self.swap, bits)))
    }

    /// Reads an `f64`. The bit pattern is returned unchanged, including NaN payloads.
    pub fn read_f64(&mut self) -> Result<f64> {
        let bits = u64::from_ne_bytes(self.read_cbytes()?);
        Ok(f64::from_bits(swap_if(self.swap, bits)))
    }

    /// Reads the length prefix of a string.
    fn read_string_len(&mut self) -> Result<usize> {
        // The prefix is unsigned, so unlike array lengths it cannot be negative.
        Ok(usize::from(self.read_u16()?))
    }

    /// Reads a string: a `u16` byte count followed by that many bytes of UTF-8.
    ///
    /// Fails with `Error::Format` if the bytes are not well-formed UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_string_len()?;
        if len < self.string_buffer.len() {
            let buf = &mut self.string_buffer[..len];
            fill(&mut self.src, &mut self.bytes_read, buf)?;
            match core::str::from_utf8(buf) {
                Ok(s) => Ok(s.to_owned()),
                Err(e) => Err(invalid_utf8(e)),
            }
        } else {
            let mut buf = vec![0; len];
            fill(&mut self.src, &mut self.bytes_read, &mut buf)?;
            String::from_utf8(buf).map_err(|e| invalid_utf8(e.utf8_error()))
        }
    }

    /// Reads a string, replacing byte sequences that are not valid UTF-8 with U+FFFD.
    pub fn read_string_lossy(&mut self) -> Result<String> {
        let len = self.read_string_len()?;
        let mut buf = vec![0; len];
        fill(&mut self.src, &mut self.bytes_read, &mut buf)?;
        Ok(match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Reads a string without validating it as UTF-8.
    #[cfg(feature = "bstr")]
    pub fn read_bstring(&mut self) -> Result<bstr::BString> {
        let len = self.read_string_len()?;
        let mut buf = vec![0; len];
        fill(&mut self.src, &mut self.bytes_read, &mut buf)?;
        Ok(bstr::BString::from(buf))
    }

    /// Steps over a string without decoding it.
    pub fn skip_string(&mut self) -> Result<()> {
        let len = self.read_string_len()?;
        self.skip(len as u64)
    }

    /// Advances past the next `n` bytes without decoding them.
    ///
    /// Sources that can seek are moved forward directly. Other sources are read into a scratch
    /// buffer and the data is discarded; that buffer is allocated on first use and kept for the
    /// life of the reader. Fails with `Error::EndOfStream` if the source ends before `n` bytes
    /// were consumed.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        if n == 0 {
            return Ok(());
        }

        if self.src.can_seek() {
            trace!(n, "skipping by seek");
            self.src.seek_forward(n)?;
            self.bytes_read += n;
            return Ok(());
        }

        trace!(n, "skipping by read");
        let size = self.skip_buffer_size;
        let buf = self.skip_buffer.get_or_insert_with(|| {
            debug!(size, "allocating skip buffer");
            vec![0; size].into_boxed_slice()
        });

        let mut remaining = n;
        while remaining != 0 {
            let want = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
            match self.src.read(&mut buf[..want]) {
                Ok(0) => return Err(Error::EndOfStream),
                Ok(got) => {
                    remaining -= got as u64;
                    self.bytes_read += got as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Reads an array length prefix. Fails with `Error::Format` if it is negative.
    fn read_array_len(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| Error::Format(format!("negative array length {len}")))
    }

    /// Reads the payload of a `ByteArray` tag.
    ///
    /// The buffer grows as data arrives, so a length prefix larger than the remaining data fails
    /// with `Error::EndOfStream` instead of allocating the whole claimed size up front.
    pub fn read_byte_array(&mut self) -> Result<Vec<u8>> {
        let len = self.read_array_len()?;
        let mut bytes = Vec::with_capacity(len.min(ARRAY_READ_STEP));
        while bytes.len() < len {
            let start = bytes.len();
            bytes.resize(start + (len - start).min(ARRAY_READ_STEP), 0);
            fill(&mut self.src, &mut self.bytes_read, &mut bytes[start..])?;
        }
        Ok(bytes)
    }

    /// Reads the payload of an `IntArray` tag. Grows in steps like `read_byte_array`.
    pub fn read_int_array(&mut self) -> Result<Vec<i32>> {
        const STEP: usize = ARRAY_READ_STEP / 4;

        let len = self.read_array_len()?;
        let mut values: Vec<i32> = Vec::with_capacity(len.min(STEP));
        while values.len() < len {
            let start = values.len();
            values.resize(start + (len - start).min(STEP), 0);
            fill(
                &mut self.src,
                &mut self.bytes_read,
                values[start..].as_mut_bytes(),
            )?;
        }
        if self.swap {
            for v in values.iter_mut() {
                *v = (*v as u32).swap() as i32;
            }
        }
        Ok(values)
    }

    /// Steps over the payload of a `ByteArray` tag.
    pub fn skip_byte_array(&mut self) -> Result<()> {
        let len = self.read_array_len()?;
        self.skip(len as u64)
    }

    /// Steps over the payload of an `IntArray` tag.
    pub fn skip_int_array(&mut self) -> Result<()> {
        let len = self.read_array_len()?;
        self.skip(len as u64 * 4)
    }
}

/// Reads from `src` until `buf` is full, adding every byte obtained to `count`. A read that
/// returns no data before then means the source is exhausted.
fn fill<R: Read + ?Sized>(src: &mut R, count: &mut u64, mut buf: &mut [u8]) -> Result<()> {
    while !buf.is_empty() {
        match src.read(buf) {
            Ok(0) => return Err(Error::EndOfStream),
            Ok(n) => {
                *count += n as u64;
                buf = &mut buf[n..];
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn invalid_utf8(e: core::str::Utf8Error) -> Error {
    Error::Format(format!("string is not valid UTF-8: {e}"))
}
