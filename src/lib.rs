//! Romweave: ROM dump interleaving and Windows CE .bin image inspection.
//!
//! The crate provides:
//! - A byte interleaver for combining two ROM dump halves (`interleave`)
//! - A .bin image sync-marker scanner (`binfmt`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use romweave::interleave::{self, WordSize};
//!
//! let low = [0x01, 0x02, 0x03, 0x04];
//! let high = [0xAA, 0xBB, 0xCC, 0xDD];
//!
//! let out = interleave::interleave(&low, &high, WordSize::W16).unwrap();
//! assert_eq!(out, [0xAA, 0x01, 0xBB, 0x02, 0xCC, 0x03, 0xDD, 0x04]);
//!
//! let (l, h) = interleave::deinterleave(&out, WordSize::W16);
//! assert_eq!(l, low);
//! assert_eq!(h, high);
//! ```

pub mod binfmt;
pub mod interleave;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
