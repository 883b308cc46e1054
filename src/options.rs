use crate::ByteOrder;

/// Size of the reader's reusable buffer for short strings.
pub const DEFAULT_STRING_BUFFER_SIZE: usize = 64;

/// Size of the buffer used to read-and-discard data on sources that cannot seek.
pub const DEFAULT_SKIP_BUFFER_SIZE: usize = 8 * 1024;

/// Size of the writer's reusable buffer for encoding text.
pub const DEFAULT_ENCODE_BUFFER_SIZE: usize = 256;

/// Largest single write the writer issues to its sink.
pub const DEFAULT_MAX_WRITE_CHUNK: usize = 4 * 1024 * 1024;

/// The encode buffer must hold at least two worst-case UTF-16 code units plus a held surrogate.
pub(crate) const MIN_ENCODE_BUFFER_SIZE: usize = 9;

/// Settings shared by `NbtReader` and `NbtWriter`.
///
/// Every buffer is allocated once, from these sizes, when the reader or writer is built. Values
/// that are too small to be usable are raised to the smallest usable size.
///
/// ```
/// use nbt_binary_io::{ByteOrder, CodecOptions};
///
/// let options = CodecOptions::new()
///     .byte_order(ByteOrder::LittleEndian)
///     .skip_buffer_size(64 * 1024);
/// assert_eq!(options.get_byte_order(), ByteOrder::LittleEndian);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodecOptions {
    pub(crate) byte_order: ByteOrder,
    pub(crate) string_buffer_size: usize,
    pub(crate) skip_buffer_size: usize,
    pub(crate) encode_buffer_size: usize,
    pub(crate) max_write_chunk: usize,
}

impl CodecOptions {
    /// Default options: big-endian, default buffer sizes.
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            string_buffer_size: DEFAULT_STRING_BUFFER_SIZE,
            skip_buffer_size: DEFAULT_SKIP_BUFFER_SIZE,
            encode_buffer_size: DEFAULT_ENCODE_BUFFER_SIZE,
            max_write_chunk: DEFAULT_MAX_WRITE_CHUNK,
        }
    }

    /// Sets the byte order.
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets the size of the reader's buffer for short strings. Strings whose length is below
    /// this size are decoded without allocating a temporary buffer.
    pub fn string_buffer_size(mut self, size: usize) -> Self {
        self.string_buffer_size = size;
        self
    }

    /// Sets the size of the buffer used by `NbtReader::skip` on sources that cannot seek.
    pub fn skip_buffer_size(mut self, size: usize) -> Self {
        self.skip_buffer_size = size;
        self
    }

    /// Sets the size of the writer's text encoding buffer.
    pub fn encode_buffer_size(mut self, size: usize) -> Self {
        self.encode_buffer_size = size;
        self
    }

    /// Sets the largest number of bytes passed to the sink in one call.
    pub fn max_write_chunk(mut self, size: usize) -> Self {
        self.max_write_chunk = size;
        self
    }

    /// The configured byte order.
    pub fn get_byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub(crate) fn effective_string_buffer_size(&self) -> usize {
        self.string_buffer_size.max(1)
    }

    pub(crate) fn effective_skip_buffer_size(&self) -> usize {
        self.skip_buffer_size.max(1)
    }

    pub(crate) fn effective_encode_buffer_size(&self) -> usize {
        self.encode_buffer_size.max(MIN_ENCODE_BUFFER_SIZE)
    }

    pub(crate) fn effective_max_write_chunk(&self) -> usize {
        self.max_write_chunk.max(1)
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::new()
    }
}
