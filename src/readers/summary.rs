// src/readers/summary.rs

//! Implements `Summary` statistics tracking struct.

#![allow(non_snake_case)]

use crate::common::FPath;
use crate::readers::blockreader::{SummaryBlockReader, BLOCKSZ_MAX, BLOCKSZ_MIN};
use crate::readers::guidscanner::{ScanConfig, SummaryGuidScanner};

use ::more_asserts::{debug_assert_ge, debug_assert_le};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Summary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics about the scan of a single file by a
/// `GuidScanner` and its underlying `BlockReader`.
///
/// For CLI option `--summary`.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    /// the `FPath` of the scanned file
    pub path: FPath,
    /// the effective settings, with the values as requested
    pub config: ScanConfig,
    pub blockreader: SummaryBlockReader,
    pub guidscanner: SummaryGuidScanner,
    /// The first encountered [`Error`], if any, as a `String`.
    ///
    /// Annoyingly, cannot [Clone or Copy `Error`].
    ///
    /// [`Error`]: std::io::Error
    /// [Clone or Copy `Error`]: https://github.com/rust-lang/rust/issues/24135
    pub error: Option<String>,
}

impl Summary {
    /// Create a new `Summary` for a completed scan.
    pub fn new(
        path: FPath,
        config: ScanConfig,
        summaryblockreader: SummaryBlockReader,
        summaryguidscanner: SummaryGuidScanner,
    ) -> Summary {
        // some sanity checks
        debug_assert_ge!(summaryblockreader.blockreader_chars, summaryblockreader.blockreader_blocks, "There are less chars than Blocks");
        debug_assert_ge!(summaryblockreader.blockreader_blocksz, BLOCKSZ_MIN, "blocksz too small");
        debug_assert_le!(summaryblockreader.blockreader_blocksz, BLOCKSZ_MAX, "blocksz too big");
        debug_assert_ge!(summaryguidscanner.guidscanner_recorded, summaryguidscanner.guidscanner_distinct, "There are less recorded than distinct GUIDs");

        Summary {
            path,
            config,
            blockreader: summaryblockreader,
            guidscanner: summaryguidscanner,
            error: None,
        }
    }

    /// Create a new `Summary` with limited known data.
    /// Useful for files that failed to scan due to errors
    /// (e.g. PermissionDenied, etc.).
    pub fn new_failed(
        path: FPath,
        config: ScanConfig,
        error: Option<String>,
    ) -> Summary {
        Summary {
            path,
            config,
            error,
            ..Default::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
