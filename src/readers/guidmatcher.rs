// src/readers/guidmatcher.rs

//! Implements [`GuidMatcher`], finding GUID literals in whitespace-free
//! text, and canonicalization of each [`GuidMatch`] into a [`GuidId`].
//!
//! Three literal forms are found, all case-insensitive:
//!
//! 1. hyphenated, `a864f394-c94e-4727-8eeb-89223e3096af`
//! 2. C struct, `0xa864f394,0xc94e,0x4727,0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf`
//! 3. C struct with braces around the octets,
//!    `0xa864f394,0xc94e,0x4727,{0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf}`
//!
//! One regular expression describes all three: each field may be preceded
//! by a `,` or `-`, and each field is either `0x`-prefixed with up to its
//! full count of hex digits, or exactly its full count of hex digits.
//!
//! [`GuidMatcher`]: self::GuidMatcher
//! [`GuidMatch`]: self::GuidMatch
//! [`GuidId`]: crate::data::guid::GuidId

use crate::data::guid::{GuidId, GuidParseError, GUID_CANONICAL_LEN};

use std::fmt;
use std::str::FromStr;

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::{CaptureMatches, Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// regular expression
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Optional separator before a field.
const RP_SEP: &str = "[,-]?";
/// 32-bit field, `time_low`.
const RP_HEX8: &str = "0x[0-9a-f]{1,8}|[0-9a-f]{8}";
/// 16-bit field.
const RP_HEX4: &str = "0x[0-9a-f]{1,4}|[0-9a-f]{4}";
/// 8-bit field.
const RP_HEX2: &str = "0x[0-9a-f]{1,2}|[0-9a-f]{2}";

// capture group names

const CGN_F1: &str = "f1";
const CGN_F2: [&str; 2] = ["f2a", "f2b"];
const CGN_F3: [&str; 2] = ["f3a", "f3b"];
const CGN_F4: [&str; 6] = ["f4a", "f4b", "f4c", "f4d", "f4e", "f4f"];

/// The GUID pattern. Must be applied to text without whitespace.
pub const GUID_PATTERN: &str = concatcp!(
    "(?i)",
    "(?P<f1>", RP_HEX8, ")",
    RP_SEP, "(?P<f2a>", RP_HEX4, ")",
    RP_SEP, "(?P<f2b>", RP_HEX4, ")",
    RP_SEP, r"\{?",
    "(?P<f3a>", RP_HEX2, ")",
    RP_SEP, "(?P<f3b>", RP_HEX2, ")",
    RP_SEP, "(?P<f4a>", RP_HEX2, ")",
    RP_SEP, "(?P<f4b>", RP_HEX2, ")",
    RP_SEP, "(?P<f4c>", RP_HEX2, ")",
    RP_SEP, "(?P<f4d>", RP_HEX2, ")",
    RP_SEP, "(?P<f4e>", RP_HEX2, ")",
    RP_SEP, "(?P<f4f>", RP_HEX2, ")",
    r"\}?",
);

/// Longest possible match of [`GUID_PATTERN`], the brace form with every
/// separator and every `0x` prefix.
pub const GUID_MATCH_LEN_MAX: usize = 66;

lazy_static! {
    static ref REGEX_GUID: Regex = {
        defñ!("lazy_static! REGEX_GUID::new()");

        Regex::new(GUID_PATTERN).unwrap()
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidMatch
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The captured fields of one match, as written (including any `0x`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GuidFields<'a> {
    /// `time_low`
    pub field1: &'a str,
    /// `time_mid`, `time_hi_and_version`
    pub field2: [&'a str; 2],
    /// `clock_seq_hi_and_reserved`, `clock_seq_low`
    pub field3: [&'a str; 2],
    /// the six `node` octets
    pub field4: [&'a str; 6],
}

/// Remove a leading `0x` or `0X`.
#[inline(always)]
fn strip_hex_prefix(field: &str) -> &str {
    match field.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => &field[2..],
        _ => field,
    }
}

impl<'a> GuidFields<'a> {
    fn from_captures(captures: &Captures<'a>) -> GuidFields<'a> {
        let get = |name: &str| -> &'a str {
            match captures.name(name) {
                Some(m) => m.as_str(),
                None => "",
            }
        };

        GuidFields {
            field1: get(CGN_F1),
            field2: CGN_F2.map(get),
            field3: CGN_F3.map(get),
            field4: CGN_F4.map(get),
        }
    }

    /// Rebuild hyphenated text from the fields, `0x` prefixes removed.
    ///
    /// A field with fewer hex digits than its full count makes text that
    /// fails strict parsing.
    pub fn canonical_text(&self) -> String {
        let mut text: String = String::with_capacity(GUID_CANONICAL_LEN);
        text.push_str(strip_hex_prefix(self.field1));
        text.push('-');
        text.push_str(strip_hex_prefix(self.field2[0]));
        text.push('-');
        text.push_str(strip_hex_prefix(self.field2[1]));
        text.push('-');
        for field in self.field3.iter() {
            text.push_str(strip_hex_prefix(field));
        }
        text.push('-');
        for field in self.field4.iter() {
            text.push_str(strip_hex_prefix(field));
        }

        text
    }
}

/// One GUID candidate found by a [`GuidMatcher`].
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct GuidMatch<'a> {
    /// Byte index of the first byte of the match.
    pub start: usize,
    /// Byte index one past the last byte of the match.
    pub end: usize,
    /// The matched text.
    pub text: &'a str,
    pub fields: GuidFields<'a>,
}

impl fmt::Debug for GuidMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GuidMatch")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("text", &self.text)
            .finish()
    }
}

impl GuidMatch<'_> {
    /// Canonicalize into a [`GuidId`].
    ///
    /// First try the matched text as hyphenated text. Failing that, rebuild
    /// hyphenated text from the fields and try again.
    pub fn to_guid(&self) -> Result<GuidId, GuidParseError> {
        if let Ok(id) = GuidId::from_str(self.text) {
            defñ!("direct {:?}", self.text);
            return Ok(id);
        }
        let text: String = self.fields.canonical_text();
        defñ!("rebuilt {:?} from {:?}", text, self.text);

        GuidId::from_str(text.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidMatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Lazy, ordered iterator of non-overlapping [`GuidMatch`]es.
pub struct GuidMatches<'a> {
    captures: CaptureMatches<'static, 'a>,
}

impl<'a> Iterator for GuidMatches<'a> {
    type Item = GuidMatch<'a>;

    fn next(&mut self) -> Option<GuidMatch<'a>> {
        let captures: Captures<'a> = self.captures.next()?;
        let whole = captures.get(0)?;

        Some(GuidMatch {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str(),
            fields: GuidFields::from_captures(&captures),
        })
    }
}

/// Finds GUID literals in text that has no whitespace.
///
/// The compiled pattern is shared process-wide and immutable, so a
/// `GuidMatcher` is free to create.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuidMatcher {}

impl GuidMatcher {
    pub const fn new() -> GuidMatcher {
        GuidMatcher {}
    }

    /// All matches in `text`, in order, not overlapping.
    pub fn find_iter<'a>(&self, text: &'a str) -> GuidMatches<'a> {
        GuidMatches {
            captures: REGEX_GUID.captures_iter(text),
        }
    }
}
