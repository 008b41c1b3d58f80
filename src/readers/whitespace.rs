// src/readers/whitespace.rs

//! Whitespace removal for decoded text, and the [`CleanBuffer`] that
//! remembers where each remaining `char` came from.
//!
//! GUID literals are often wrapped across lines or padded for alignment.
//! All whitespace is removed before matching so such literals become
//! contiguous.
//!
//! [`CleanBuffer`]: self::CleanBuffer

use crate::common::CharOffset;

use std::fmt;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_ge, debug_assert_le, debug_assert_lt};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Is `c` whitespace?
///
/// Uses the Unicode `White_Space` property, which covers ASCII space, tab,
/// line feed, carriage return, vertical tab, form feed, and the other
/// Unicode spaces and line separators.
#[inline(always)]
pub fn is_whitespace_char(c: char) -> bool {
    c.is_whitespace()
}

/// Return `text` with every whitespace `char` removed.
pub fn strip_whitespace(text: &str) -> String {
    text.chars()
        .filter(|c| !is_whitespace_char(*c))
        .collect()
}

/// Start of a run of non-whitespace `char`s in a [`CleanBuffer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Segment {
    /// Byte index into the clean text.
    clean_at: usize,
    /// Decoded-`char` offset in the original stream of the `char` at
    /// `clean_at`.
    orig_offset: CharOffset,
    /// Every `char` of this run is one byte.
    single_byte: bool,
}

/// Whitespace-free text built from one or more decoded blocks, with a
/// run-length map back to the original decoded-`char` offsets.
///
/// The map holds one entry per run of non-whitespace text, not one entry
/// per `char`.
#[derive(Default)]
pub struct CleanBuffer {
    text: String,
    segments: Vec<Segment>,
}

impl fmt::Debug for CleanBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CleanBuffer")
            .field("len", &self.text.len())
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl CleanBuffer {
    pub fn new() -> CleanBuffer {
        CleanBuffer::default()
    }

    pub fn with_capacity(capacity: usize) -> CleanBuffer {
        CleanBuffer {
            text: String::with_capacity(capacity),
            segments: Vec::new(),
        }
    }

    /// The whitespace-free text.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Length in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Count of runs tracked by the offset map.
    pub fn count_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.segments.clear();
    }

    /// Append `raw` with whitespace removed. `raw_offset` is the
    /// decoded-`char` offset of the first `char` of `raw` in the original
    /// stream.
    pub fn push_stripped(&mut self, raw: &str, raw_offset: CharOffset) {
        defn!("(raw len {}, raw_offset {})", raw.len(), raw_offset);
        self.text.reserve(raw.len());
        let mut in_run: bool = false;
        for (index, c) in raw.chars().enumerate() {
            if is_whitespace_char(c) {
                in_run = false;
                continue;
            }
            if !in_run {
                self.segments.push(Segment {
                    clean_at: self.text.len(),
                    orig_offset: raw_offset + index as CharOffset,
                    single_byte: true,
                });
                in_run = true;
            }
            if c.len_utf8() != 1 {
                if let Some(segment) = self.segments.last_mut() {
                    segment.single_byte = false;
                }
            }
            self.text.push(c);
        }
        defx!("len {}, segments {}", self.text.len(), self.segments.len());
    }

    /// Index into `self.segments` of the run holding byte index `at`.
    fn segment_index(&self, at: usize) -> usize {
        self.segments
            .partition_point(|segment| segment.clean_at <= at)
            .saturating_sub(1)
    }

    /// Decoded-`char` offset in the original stream of the `char` at byte
    /// index `at` of the clean text.
    ///
    /// `at` must be on a `char` boundary. For an empty buffer returns `0`.
    pub fn orig_offset(&self, at: usize) -> CharOffset {
        debug_assert_le!(at, self.text.len(), "index past end of CleanBuffer");
        if self.segments.is_empty() {
            return 0;
        }
        let segment: &Segment = &self.segments[self.segment_index(at)];
        let within: usize = match segment.single_byte {
            true => at - segment.clean_at,
            false => self.text[segment.clean_at..at].chars().count(),
        };

        segment.orig_offset + within as CharOffset
    }

    /// Remove the clean text before byte index `at`. The offset map is kept
    /// consistent for the remaining text.
    ///
    /// `at` must be on a `char` boundary.
    pub fn drain_to(&mut self, at: usize) {
        defn!("({}) len {}", at, self.text.len());
        if at == 0 {
            defx!("nothing to drain");
            return;
        }
        if at >= self.text.len() {
            self.clear();
            defx!("cleared");
            return;
        }
        let orig_offset: CharOffset = self.orig_offset(at);
        let index: usize = self.segment_index(at);
        let single_byte: bool = self.segments[index].single_byte;
        self.segments.drain(..=index);
        for segment in self.segments.iter_mut() {
            segment.clean_at -= at;
        }
        self.segments.insert(
            0,
            Segment {
                clean_at: 0,
                orig_offset,
                single_byte,
            },
        );
        self.text.drain(..at);
        defx!("len {}, segments {}", self.text.len(), self.segments.len());
    }

    /// Keep only the trailing `chars` `char`s.
    pub fn keep_tail_chars(&mut self, chars: usize) {
        if chars == 0 {
            self.clear();
            return;
        }
        // byte index of the `chars`th char from the end
        if let Some((at, _)) = self.text.char_indices().rev().nth(chars - 1) {
            self.drain_to(at);
        }
    }

    /// Count of `char`s in the clean text.
    pub fn count_chars(&self) -> usize {
        self.text.chars().count()
    }
}
