// Byte interleaver: combines two equal-length ROM dump halves into one
// stream of alternating high/low chunks.
//
// Flash programmers for 32/64-bit buses often want a single image built
// from two 16-bit (or wider) dump files. Each output word is the chunk
// from the high half followed by the chunk from the low half; the word
// size only sets the chunk granularity, never the output length.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for interleave/deinterleave operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InterleaveError {
    /// Word size outside the supported set {16, 32, 64}.
    #[error("invalid word size {0}: must be 16, 32, or 64")]
    InvalidWordSize(u32),
    /// The two input halves are not the same length.
    #[error("file sizes are not the same: low is {low} bytes, high is {high} bytes")]
    SizeMismatch { low: u64, high: u64 },
}

// ---------------------------------------------------------------------------
// Word size
// ---------------------------------------------------------------------------

/// Bit-width of one interleaved output word.
///
/// Each word is built from one chunk per source, so a 32-bit word takes
/// 2 bytes from the high half and 2 from the low half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSize {
    /// 16-bit words: 1 byte per source per word.
    #[default]
    W16,
    /// 32-bit words: 2 bytes per source per word.
    W32,
    /// 64-bit words: 4 bytes per source per word.
    W64,
}

impl WordSize {
    /// Validate a bit count from user input. Anything outside
    /// {16, 32, 64} is an error, never coerced.
    pub fn from_bits(bits: u32) -> Result<Self, InterleaveError> {
        match bits {
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            other => Err(InterleaveError::InvalidWordSize(other)),
        }
    }

    /// Total bit-width of one output word.
    pub fn bits(self) -> u32 {
        match self {
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Bytes contributed by a single source per word.
    pub fn chunk_size(self) -> usize {
        (self.bits() / 16) as usize
    }
}

// ---------------------------------------------------------------------------
// Endianness (source role selection)
// ---------------------------------------------------------------------------

/// Selects which physical file plays the low vs high role.
///
/// This only swaps the role assignment of the two inputs; bytes within a
/// chunk are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// First file is the low half (the default).
    #[default]
    Little,
    /// First file is the high half. Same as swapping the two inputs.
    Big,
}

impl Endianness {
    /// Assign (low, high) roles to a pair of buffers.
    pub fn assign_roles<'a>(self, first: &'a [u8], second: &'a [u8]) -> (&'a [u8], &'a [u8]) {
        match self {
            Self::Little => (first, second),
            Self::Big => (second, first),
        }
    }
}

// ---------------------------------------------------------------------------
// Interleave
// ---------------------------------------------------------------------------

/// Interleave two equal-length buffers into one output buffer.
///
/// Strides the shared length in steps of `word.chunk_size()`, appending
/// the high chunk then the low chunk per stride. The output is always
/// exactly `2 * low.len()` bytes regardless of word size.
///
/// A length that is not a multiple of the chunk size is handled by
/// clamping the final stride to the bytes that remain, so trailing bytes
/// are still emitted and neither input is read past its end.
pub fn interleave(low: &[u8], high: &[u8], word: WordSize) -> Result<Vec<u8>, InterleaveError> {
    if low.len() != high.len() {
        return Err(InterleaveError::SizeMismatch {
            low: low.len() as u64,
            high: high.len() as u64,
        });
    }

    let chunk = word.chunk_size();
    let len = low.len();
    let mut out = Vec::with_capacity(len * 2);

    let mut i = 0;
    while i < len {
        let end = (i + chunk).min(len);
        out.extend_from_slice(&high[i..end]);
        out.extend_from_slice(&low[i..end]);
        i = end;
    }

    log::debug!(
        "interleaved {len} + {len} bytes at {} bits/word into {} bytes",
        word.bits(),
        out.len()
    );
    Ok(out)
}

/// Split an interleaved buffer back into its (low, high) halves.
///
/// Inverse of [`interleave`] at the same word size: alternating chunks
/// are peeled apart, high first. A trailing partial word is split evenly
/// (its high bytes precede its low bytes), matching what [`interleave`]
/// emits for non-aligned lengths.
pub fn deinterleave(data: &[u8], word: WordSize) -> (Vec<u8>, Vec<u8>) {
    let chunk = word.chunk_size();
    let mut low = Vec::with_capacity(data.len() / 2);
    let mut high = Vec::with_capacity(data.len() / 2);

    let mut i = 0;
    while i < data.len() {
        let pair = (chunk * 2).min(data.len() - i);
        let split = pair / 2;
        high.extend_from_slice(&data[i..i + split]);
        low.extend_from_slice(&data[i + split..i + pair]);
        i += pair;
    }

    (low, high)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
