/// The byte order used for every multi-byte value in a stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum ByteOrder {
    /// Most-significant byte first. This is the order used by Java Edition files.
    #[default]
    BigEndian,
    /// Least-significant byte first. This is the order used by Bedrock Edition files.
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the host.
    #[inline(always)]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// Maps the conventional `big_endian: bool` flag onto a `ByteOrder`.
    pub const fn from_big_endian(big_endian: bool) -> Self {
        if big_endian {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// Returns `true` for `BigEndian`.
    pub const fn is_big_endian(self) -> bool {
        matches!(self, Self::BigEndian)
    }

    /// Returns `true` if values in this byte order must be swapped to get the host's in-memory
    /// representation.
    #[inline(always)]
    pub const fn needs_swap(self) -> bool {
        !matches!(
            (self, Self::native()),
            (Self::BigEndian, Self::BigEndian) | (Self::LittleEndian, Self::LittleEndian)
        )
    }
}

/// Reverses the byte order of a fixed-width unsigned integer.
///
/// These are plain shift-and-mask operations; they do not look at a sign bit, so signed values
/// are swapped by casting to the unsigned type of the same width first. Floating-point values
/// are swapped through their bit patterns (`to_bits` / `from_bits`).
pub trait ByteSwap: Copy {
    /// Returns `self` with its bytes in reverse order.
    fn swap(self) -> Self;
}

impl ByteSwap for u16 {
    #[inline(always)]
    fn swap(self) -> Self {
        (self >> 8) | (self << 8)
    }
}

impl ByteSwap for u32 {
    #[inline(always)]
    fn swap(self) -> Self {
        ((self >> 24) & 0x0000_00ff)
            | ((self >> 8) & 0x0000_ff00)
            | ((self << 8) & 0x00ff_0000)
            | ((self << 24) & 0xff00_0000)
    }
}

impl ByteSwap for u64 {
    #[inline(always)]
    fn swap(self) -> Self {
        ((self >> 56) & 0x0000_0000_0000_00ff)
            | ((self >> 40) & 0x0000_0000_0000_ff00)
            | ((self >> 24) & 0x0000_0000_00ff_0000)
            | ((self >> 8) & 0x0000_0000_ff00_0000)
            | ((self << 8) & 0x0000_00ff_0000_0000)
            | ((self << 24) & 0x0000_ff00_0000_0000)
            | ((self << 40) & 0x00ff_0000_0000_0000)
            | ((self << 56) & 0xff00_0000_0000_0000)
    }
}

/// Swaps `value` if `swap` is set; otherwise returns it unchanged.
#[inline(always)]
pub(crate) fn swap_if<T: ByteSwap>(swap: bool, value: T) -> T {
    if swap {
        value.swap()
    } else {
        value
    }
}
