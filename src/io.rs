// File-level helpers wrapping the pure cores.
//
// Provides `interleave_file()` and `inspect_file()` convenience functions
// that handle whole-file reads/writes around the interleaver and the
// image scanner. Inputs are read fully into memory; every error path
// releases the buffers by dropping them, and the output file is only
// created once all validation has passed.

use std::path::Path;

use thiserror::Error;

use crate::binfmt::{self, ImageInfo, ScanError};
use crate::interleave::{self, Endianness, InterleaveError, WordSize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file-level operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Interleaver validation error.
    #[error(transparent)]
    Interleave(#[from] InterleaveError),
    /// Image scanning error.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `interleave_file()`.
#[derive(Debug, Clone, Copy)]
pub struct InterleaveStats {
    /// Size of the low-half input file in bytes.
    pub low_size: u64,
    /// Size of the high-half input file in bytes.
    pub high_size: u64,
    /// Size of the written output file in bytes.
    pub output_size: u64,
}

/// Report returned by `inspect_file()`.
#[derive(Debug, Clone, Copy)]
pub struct ImageReport {
    /// Total size of the inspected file in bytes.
    pub file_size: u64,
    /// Decoded marker and address metadata.
    pub info: ImageInfo,
}

// ---------------------------------------------------------------------------
// interleave_file
// ---------------------------------------------------------------------------

/// Interleave two input files into `output_path`.
///
/// Both inputs are read fully into memory. The endianness flag picks
/// which file plays the low vs high role (`Little`: the first argument
/// is the low half). The output file is not created until both reads
/// and the size check have succeeded, so no partial output remains on
/// any error.
pub fn interleave_file(
    first_path: &Path,
    second_path: &Path,
    output_path: &Path,
    word: WordSize,
    endianness: Endianness,
) -> Result<InterleaveStats, IoError> {
    log::debug!("reading file {}", first_path.display());
    let first = std::fs::read(first_path)?;
    log::info!("first input size = {}", first.len());

    log::debug!("reading file {}", second_path.display());
    let second = std::fs::read(second_path)?;
    log::info!("second input size = {}", second.len());

    let (low, high) = endianness.assign_roles(&first, &second);
    let out = interleave::interleave(low, high, word)?;

    log::info!("output file size = {}", out.len());
    std::fs::write(output_path, &out)?;

    Ok(InterleaveStats {
        low_size: low.len() as u64,
        high_size: high.len() as u64,
        output_size: out.len() as u64,
    })
}

// ---------------------------------------------------------------------------
// inspect_file
// ---------------------------------------------------------------------------

/// Scan a .bin image file and compute its address-range report.
///
/// The file is read fully into memory and handed to
/// [`binfmt::scan_image`]; nothing is written.
pub fn inspect_file(
    path: &Path,
    base_address: u64,
    endianness: Endianness,
) -> Result<ImageReport, IoError> {
    log::debug!("reading file {}", path.display());
    let data = std::fs::read(path)?;
    log::info!("file size = {}", data.len());

    let little_endian = endianness == Endianness::Little;
    let info = binfmt::scan_image(&data, base_address, little_endian)?;

    Ok(ImageReport {
        file_size: data.len() as u64,
        info,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
