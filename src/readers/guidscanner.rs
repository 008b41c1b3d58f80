// src/readers/guidscanner.rs

//! Implements [`GuidScanner`], the read loop of one file scan.
//!
//! A `GuidScanner` pulls blocks from a [`BlockReader`], strips whitespace
//! into a [`CleanBuffer`], finds matches with a [`GuidMatcher`], and counts
//! canonical GUIDs in a [`GuidAccumulator`].
//!
//! ## Carry-over
//!
//! A GUID literal may straddle two blocks. After each block the unmatched
//! tail of the clean buffer is kept as _carry-over_ and prefixed to the
//! next block. The carry-over is bounded by
//! [`ScanConfig::carry_over_max`] `char`s; anything older was already
//! scanned and cannot be part of a literal still in flight.
//!
//! A match that ends exactly at the end of the clean buffer may still grow
//! with the next block (a `0x` field written with fewer digits than its
//! full count). Such a match is _deferred_: it is kept in the carry-over and
//! matched again with the next block. A deferred match longer than
//! `carry_over_max` is recorded immediately.
//!
//! The first part of a C struct literal may also match with its fields
//! split differently, e.g. `0xa864` and `f394` for `0xa864f394`. That match
//! fails canonicalization. A malformed match within `carry_over_max` of the
//! end of the clean buffer is deferred too, so the whole literal is matched
//! with the next block.
//!
//! After the last block nothing is deferred and the remaining carry-over is
//! discarded.
//!
//! [`GuidScanner`]: self::GuidScanner
//! [`BlockReader`]: crate::readers::blockreader::BlockReader
//! [`CleanBuffer`]: crate::readers::whitespace::CleanBuffer
//! [`GuidMatcher`]: crate::readers::guidmatcher::GuidMatcher
//! [`GuidAccumulator`]: crate::data::guidrecord::GuidAccumulator
//! [`ScanConfig::carry_over_max`]: self::ScanConfig::carry_over_max

use crate::common::{CharOffset, Count, FPath, ResultS3};
use crate::data::guid::{GuidId, GuidParseError};
use crate::data::guidrecord::{GuidAccumulator, GuidRecord};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use crate::readers::blockreader::{blocksz_clamp, BlockReader, BlockSz, BLOCKSZ_DEF, BYTES_READ_SZ_MAX};
use crate::readers::chardecoder::TextEncoding;
use crate::readers::guidmatcher::{GuidMatch, GuidMatcher};
use crate::readers::summary::Summary;
use crate::readers::whitespace::CleanBuffer;

use std::fmt;
use std::io::Result;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_le, debug_assert_lt};
#[allow(unused_imports)]
use ::si_trace_print::{def1n, def1o, def1x, defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ScanConfig
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Default most `char`s kept as carry-over between blocks.
pub const CARRY_OVER_MAX_DEF: usize = 64;

/// Settings of one file scan.
///
/// Out-of-range values are clamped, never rejected. The values as
/// requested are kept for reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanConfig {
    blocksz: BlockSz,
    blocksz_requested: BlockSz,
    carry_over_max: usize,
    carry_over_max_requested: usize,
    encoding: TextEncoding,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig::new(BLOCKSZ_DEF, CARRY_OVER_MAX_DEF, TextEncoding::default())
    }
}

impl ScanConfig {
    /// `blocksz` is clamped into [`BLOCKSZ_MIN`, `BLOCKSZ_MAX`].
    /// `carry_over_max` is clamped into [`1`, `blocksz - 1`].
    ///
    /// [`BLOCKSZ_MIN`]: crate::readers::blockreader::BLOCKSZ_MIN
    /// [`BLOCKSZ_MAX`]: crate::readers::blockreader::BLOCKSZ_MAX
    pub fn new(
        blocksz: BlockSz,
        carry_over_max: usize,
        encoding: TextEncoding,
    ) -> ScanConfig {
        let blocksz_: BlockSz = blocksz_clamp(blocksz);
        let carry_over_max_: usize = carry_over_max.clamp(1, (blocksz_ - 1) as usize);
        defñ!(
            "blocksz {} → {}, carry_over_max {} → {}, encoding {:?}",
            blocksz,
            blocksz_,
            carry_over_max,
            carry_over_max_,
            encoding
        );

        ScanConfig {
            blocksz: blocksz_,
            blocksz_requested: blocksz,
            carry_over_max: carry_over_max_,
            carry_over_max_requested: carry_over_max,
            encoding,
        }
    }

    /// Effective block size in `char`s.
    #[inline(always)]
    pub const fn blocksz(&self) -> BlockSz {
        self.blocksz
    }

    #[inline(always)]
    pub const fn blocksz_requested(&self) -> BlockSz {
        self.blocksz_requested
    }

    /// Effective most `char`s of carry-over.
    #[inline(always)]
    pub const fn carry_over_max(&self) -> usize {
        self.carry_over_max
    }

    #[inline(always)]
    pub const fn carry_over_max_requested(&self) -> usize {
        self.carry_over_max_requested
    }

    #[inline(always)]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Was any requested value changed by clamping?
    pub const fn is_clamped(&self) -> bool {
        self.blocksz != self.blocksz_requested || self.carry_over_max != self.carry_over_max_requested
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ScanWarning, ScanResult
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Non-fatal problem found during a scan. The scan continues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScanWarning {
    /// Text matched the GUID pattern but is not a valid GUID,
    /// e.g. a field with too few hex digits.
    MalformedCandidate {
        text: String,
        /// Decoded-`char` offset of the first `char` of `text`.
        offset: CharOffset,
        error: GuidParseError,
    },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanWarning::MalformedCandidate { text, offset, error } => {
                write!(f, "malformed GUID candidate {:?} at offset {}: {}", text, offset, error)
            }
        }
    }
}

pub type ScanWarnings = Vec<ScanWarning>;

/// Everything a successful scan returns.
#[derive(Debug)]
pub struct ScanResult {
    /// One record per distinct GUID, in no particular order.
    pub records: Vec<GuidRecord>,
    pub warnings: ScanWarnings,
    pub summary: Summary,
}

/// Statistics of one `GuidScanner`, for CLI option `--summary`.
#[allow(non_snake_case)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryGuidScanner {
    /// Count of pattern matches, including deferred matches seen again.
    pub guidscanner_matches: Count,
    /// Count of matches recorded as a GUID.
    pub guidscanner_recorded: Count,
    /// Count of matches that failed canonicalization.
    pub guidscanner_malformed: Count,
    /// Count of matches deferred to the next block.
    pub guidscanner_deferred: Count,
    /// Count of carry-overs cut to `carry_over_max`.
    pub guidscanner_carry_over_truncated: Count,
    /// Count of distinct GUIDs.
    pub guidscanner_distinct: Count,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Is `text` at most `chars` `char`s long?
///
/// Only counts `char`s when the byte length alone cannot decide.
pub(crate) fn fits_chars(text: &str, chars: usize) -> bool {
    if text.len() <= chars {
        return true;
    }
    // a `char` is at most 4 bytes
    if text.len() > chars.saturating_mul(4) {
        return false;
    }

    text.chars().count() <= chars
}

/// Scans one file for GUIDs.
///
/// A `GuidScanner` owns its `BlockReader`, buffer, and accumulator.
/// Nothing is shared between scanners.
pub struct GuidScanner {
    blockreader: BlockReader,
    config: ScanConfig,
    matcher: GuidMatcher,
    accumulator: GuidAccumulator,
    /// Carry-over and the current block, whitespace removed.
    clean: CleanBuffer,
    warnings: ScanWarnings,
    /// Decoded-`char` offset of the next block.
    offset_next: CharOffset,
    summary: SummaryGuidScanner,
}

impl fmt::Debug for GuidScanner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GuidScanner")
            .field("blockreader", &self.blockreader)
            .field("config", &self.config)
            .field("accumulator", &self.accumulator)
            .field("clean", &self.clean)
            .field("warnings", &self.warnings.len())
            .field("offset_next", &self.offset_next)
            .finish()
    }
}

impl GuidScanner {
    /// Open `path` for scanning.
    ///
    /// Fails if `path` does not exist, cannot be read, or is not a
    /// regular file.
    pub fn new(path: FPath, config: ScanConfig) -> Result<GuidScanner> {
        def1n!("({:?}, {:?})", path, config);
        let blockreader: BlockReader = match BlockReader::new(path, config.blocksz(), config.encoding()) {
            Ok(val) => val,
            Err(err) => {
                def1x!("BlockReader::new failed {}", err);
                return Err(err);
            }
        };
        let capacity: usize = std::cmp::min(config.blocksz() as usize, BYTES_READ_SZ_MAX) + config.carry_over_max();
        def1x!();

        Ok(GuidScanner {
            blockreader,
            config,
            matcher: GuidMatcher::new(),
            accumulator: GuidAccumulator::new(),
            clean: CleanBuffer::with_capacity(capacity),
            warnings: ScanWarnings::new(),
            offset_next: 0,
            summary: SummaryGuidScanner::default(),
        })
    }

    pub fn path(&self) -> &FPath {
        self.blockreader.path()
    }

    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Record one canonicalized match, or warn if it failed.
    fn record_match(
        accumulator: &mut GuidAccumulator,
        warnings: &mut ScanWarnings,
        summary: &mut SummaryGuidScanner,
        guid_match: &GuidMatch,
        guid: std::result::Result<GuidId, GuidParseError>,
        offset: CharOffset,
    ) {
        match guid {
            Ok(id) => {
                summary.guidscanner_recorded += 1;
                accumulator.record(id, offset);
            }
            Err(error) => {
                defo!("malformed {:?} at {}: {}", guid_match.text, offset, error);
                summary.guidscanner_malformed += 1;
                warnings.push(ScanWarning::MalformedCandidate {
                    text: guid_match.text.to_string(),
                    offset,
                    error,
                });
            }
        }
    }

    /// Match the clean buffer, record the matches, and reduce the clean
    /// buffer to the carry-over for the next block.
    ///
    /// `last` is `true` for the last block of the file.
    fn process_clean(&mut self, last: bool) {
        defn!("(last {}) {:?}", last, self.clean);
        let text: &str = self.clean.as_str();
        let carry_over_max: usize = self.config.carry_over_max();
        // byte index just after the last recorded match
        let mut consumed_to: usize = 0;

        for guid_match in self.matcher.find_iter(text) {
            self.summary.guidscanner_matches += 1;
            let guid = guid_match.to_guid();
            // the match and everything after it fits in the carry-over
            let in_tail: bool = !last && fits_chars(&text[guid_match.start..], carry_over_max);
            if in_tail && (guid_match.end == text.len() || guid.is_err()) {
                defo!("defer {:?} at {}", guid_match.text, guid_match.start);
                self.summary.guidscanner_deferred += 1;
                break;
            }
            let offset: CharOffset = self.clean.orig_offset(guid_match.start);
            GuidScanner::record_match(
                &mut self.accumulator,
                &mut self.warnings,
                &mut self.summary,
                &guid_match,
                guid,
                offset,
            );
            consumed_to = guid_match.end;
        }

        if last {
            // the final carry-over is never scanned again
            self.clean.clear();
            defx!("last block, carry-over discarded");
            return;
        }
        // a deferred match is within the last `carry_over_max` `char`s so
        // keeping that many `char`s keeps the match and any text before it
        self.clean.drain_to(consumed_to);
        if self.clean.count_chars() > carry_over_max {
            self.summary.guidscanner_carry_over_truncated += 1;
            self.clean.keep_tail_chars(carry_over_max);
        }
        debug_assert_le!(self.clean.count_chars(), carry_over_max, "carry-over too large");
        defx!("carry-over {:?}", self.clean);
    }

    /// Scan the entire file.
    ///
    /// On error no partial results are returned.
    pub fn scan(mut self) -> Result<ScanResult> {
        defn!("({:?})", self.path());
        loop {
            let block: String = match self.blockreader.read_block() {
                ResultS3::Found(block) => block,
                ResultS3::Done => {
                    // previous block was not known to be the last
                    if !self.clean.is_empty() {
                        self.process_clean(true);
                    }
                    break;
                }
                ResultS3::Err(err) => {
                    defx!("read_block Err {}", err);
                    return Err(err);
                }
            };
            self.clean.push_stripped(block.as_str(), self.offset_next);
            self.offset_next = self.blockreader.count_chars();
            let last: bool = self.blockreader.is_eof();
            self.process_clean(last);
            if last {
                break;
            }
        }
        self.summary.guidscanner_distinct = self.accumulator.len() as Count;
        let summary = Summary::new(
            self.blockreader.path().clone(),
            self.config,
            self.blockreader.summary(),
            self.summary,
        );
        defx!("{:?} distinct GUIDs, {} warnings", self.accumulator, self.warnings.len());

        Ok(ScanResult {
            records: self.accumulator.into_results(),
            warnings: self.warnings,
            summary,
        })
    }
}

/// Scan the file at `path` with `config`.
pub fn scan_file(path: &FPath, config: &ScanConfig) -> Result<ScanResult> {
    GuidScanner::new(path.clone(), *config)?.scan()
}
