// Windows CE .bin flash image inspection.
//
// A .bin image starts (possibly after padding or a bootloader stub) with
// the 7-byte sync marker "B000FF\n", immediately followed by two 32-bit
// fields: the image start address and the highest address used. This
// module locates the marker and decodes those fields relative to a
// user-supplied base address.
//
// The marker is a fixed literal, so it is found with a plain substring
// search (memchr::memmem) rather than a pattern engine.

use memchr::memmem;
use thiserror::Error;

/// The 7-byte sync sequence that opens a .bin image record.
pub const SYNC_MARKER: &[u8; 7] = b"B000FF\n";

/// Bytes per address field following the marker.
const FIELD_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for image scanning and address parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The sync marker does not occur anywhere in the image.
    #[error("sync marker B000FF not found in image")]
    MarkerNotFound,
    /// The image ends before both address fields after the marker.
    #[error("truncated image record: need {needed} bytes, have {available}")]
    TruncatedRecord { needed: usize, available: usize },
    /// A hex string (base address or field) failed to parse.
    #[error("invalid hex value '{input}'")]
    HexParse { input: String },
}

// ---------------------------------------------------------------------------
// Image info
// ---------------------------------------------------------------------------

/// Decoded address metadata for a located image record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Byte offset of the sync marker within the scanned buffer.
    pub marker_offset: usize,
    /// Raw decoded value of the first (least-address) field.
    pub least: u64,
    /// Raw decoded value of the second (greatest-address) field.
    pub greatest: u64,
    /// `least` with the base address subtracted.
    pub least_relative: u64,
    /// `greatest - least_relative`, the span reported by the tool.
    pub range_len: u64,
}

// ---------------------------------------------------------------------------
// Marker search
// ---------------------------------------------------------------------------

/// Find the byte offset of the first sync marker occurrence, if any.
pub fn find_marker(buf: &[u8]) -> Option<usize> {
    memmem::find(buf, SYNC_MARKER)
}

// ---------------------------------------------------------------------------
// Address field decoding
// ---------------------------------------------------------------------------

/// Decode a 4-byte address field the way the legacy flash tool did:
/// print each raw byte as two uppercase hex digits (in reverse byte
/// order for little-endian, forward for big-endian), then parse the
/// 8-digit string as an unsigned hex integer.
///
/// With fixed two-digit formatting this coincides with reading the
/// (reordered) bytes as a base-256 integer, but the text round-trip is
/// the documented behavior and is preserved as-is.
fn decode_field(field: &[u8], little_endian: bool) -> Result<u64, ScanError> {
    debug_assert_eq!(field.len(), FIELD_LEN);

    let mut text = String::with_capacity(FIELD_LEN * 2);
    if little_endian {
        for byte in field.iter().rev() {
            text.push_str(&format!("{byte:02X}"));
        }
    } else {
        for byte in field {
            text.push_str(&format!("{byte:02X}"));
        }
    }

    u64::from_str_radix(&text, 16).map_err(|_| ScanError::HexParse { input: text })
}

/// Parse a user-supplied hex base address, with or without a `0x` prefix.
pub fn parse_hex_address(input: &str) -> Result<u64, ScanError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    u64::from_str_radix(digits, 16).map_err(|_| ScanError::HexParse {
        input: input.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Locate the sync marker and compute the image's address range.
///
/// The two 4-byte fields directly after the marker are decoded per
/// `little_endian`, then combined with `base_address`:
///
/// ```text
/// least_relative = least - base_address
/// range_len      = greatest - least_relative
/// ```
///
/// That order of operations (greatest minus the *relative* least) is the
/// legacy tool's computation and is kept exactly. Arithmetic wraps,
/// mirroring the original's plain integer math when the base exceeds the
/// decoded field.
pub fn scan_image(
    buf: &[u8],
    base_address: u64,
    little_endian: bool,
) -> Result<ImageInfo, ScanError> {
    let marker_offset = find_marker(buf).ok_or(ScanError::MarkerNotFound)?;
    log::debug!("sync marker found at offset {marker_offset:#X}");

    let fields_at = marker_offset + SYNC_MARKER.len();
    let needed = fields_at + 2 * FIELD_LEN;
    if buf.len() < needed {
        return Err(ScanError::TruncatedRecord {
            needed,
            available: buf.len(),
        });
    }

    let least = decode_field(&buf[fields_at..fields_at + FIELD_LEN], little_endian)?;
    let greatest = decode_field(
        &buf[fields_at + FIELD_LEN..fields_at + 2 * FIELD_LEN],
        little_endian,
    )?;
    log::debug!("least address {least:#X}, greatest address {greatest:#X}");

    let least_relative = least.wrapping_sub(base_address);
    let range_len = greatest.wrapping_sub(least_relative);

    Ok(ImageInfo {
        marker_offset,
        least,
        greatest,
        least_relative,
        range_len,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
