//! Incremental UTF-16 to UTF-8 encoding.

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Converts UTF-16 text to UTF-8 a chunk at a time.
///
/// The input can be split anywhere, including between the two halves of a surrogate pair. When a
/// chunk ends with a high surrogate and `last` is false, the surrogate is held until the next call
/// so that the pair is encoded as one 4-byte sequence. Unpaired surrogates are encoded as U+FFFD.
#[derive(Clone, Debug, Default)]
pub struct Utf16Encoder {
    pending_high: Option<u16>,
}

impl Utf16Encoder {
    /// Creates an encoder with no held state.
    pub const fn new() -> Self {
        Self { pending_high: None }
    }

    /// Discards any held surrogate.
    pub fn reset(&mut self) {
        self.pending_high = None;
    }

    /// Returns `true` if a high surrogate is held from the previous chunk.
    pub fn has_pending(&self) -> bool {
        self.pending_high.is_some()
    }

    /// The most bytes that `encode` can produce for a chunk of `units` code units.
    ///
    /// Each code unit produces at most 3 bytes. A surrogate held from the previous chunk can add
    /// one more code unit's worth of output.
    pub const fn max_encoded_len(units: usize) -> usize {
        units.saturating_add(1).saturating_mul(3)
    }

    /// The largest chunk of code units whose output is guaranteed to fit in `buffer_len` bytes.
    pub const fn max_chunk_units(buffer_len: usize) -> usize {
        (buffer_len / 3).saturating_sub(1)
    }

    /// The exact number of UTF-8 bytes that `units` encodes to, when encoded in one piece.
    pub fn encoded_len(units: &[u16]) -> usize {
        char::decode_utf16(units.iter().copied())
            .map(|c| c.map_or(REPLACEMENT.len_utf8(), char::len_utf8))
            .sum()
    }

    /// Encodes `units` into `out` and returns the number of bytes written.
    ///
    /// Pass `last = true` for the final chunk; a trailing high surrogate is then encoded as
    /// U+FFFD instead of being held.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `max_encoded_len(units.len())` and the output does not
    /// fit.
    pub fn encode(&mut self, units: &[u16], out: &mut [u8], last: bool) -> usize {
        let mut n = 0;
        let mut pending = self.pending_high.take();

        for &unit in units {
            if let Some(high) = pending.take() {
                if is_low_surrogate(unit) {
                    n += put(combine(high, unit), &mut out[n..]);
                    continue;
                }
                n += put(REPLACEMENT, &mut out[n..]);
            }

            if is_high_surrogate(unit) {
                pending = Some(unit);
            } else {
                let c = char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT);
                n += put(c, &mut out[n..]);
            }
        }

        if let Some(high) = pending {
            if last {
                n += put(REPLACEMENT, &mut out[n..]);
            } else {
                self.pending_high = Some(high);
            }
        }

        n
    }
}

#[inline(always)]
fn is_high_surrogate(unit: u16) -> bool {
    (0xd800..0xdc00).contains(&unit)
}

#[inline(always)]
fn is_low_surrogate(unit: u16) -> bool {
    (0xdc00..0xe000).contains(&unit)
}

fn combine(high: u16, low: u16) -> char {
    let c = 0x10000 + ((u32::from(high) - 0xd800) << 10) + (u32::from(low) - 0xdc00);
    char::from_u32(c).unwrap_or(REPLACEMENT)
}

#[inline(always)]
fn put(c: char, out: &mut [u8]) -> usize {
    c.encode_utf8(out).len()
}
