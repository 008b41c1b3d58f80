// src/readers/chardecoder.rs

//! Implements [`TextEncoding`] selection, byte-order-mark sniffing, and the
//! streaming [`CharDecoder`] used by a [`BlockReader`] to turn file bytes
//! into `char`s.
//!
//! UTF-8 and UTF-16 decoding is done by crate [`encoding_rs`].
//! `encoding_rs` implements the [WHATWG Encoding Standard] which has no
//! UTF-32 or UTF-7, so those two (and the lossy 7-bit ASCII decoding) are
//! small stateful decoders here.
//!
//! All decoders are streaming; a multi-byte sequence split across two
//! calls to `decode` is decoded correctly. Malformed input becomes
//! U+FFFD.
//!
//! [`TextEncoding`]: self::TextEncoding
//! [`CharDecoder`]: self::CharDecoder
//! [`BlockReader`]: crate::readers::blockreader::BlockReader
//! [`encoding_rs`]: https://docs.rs/encoding_rs/0.8.35/encoding_rs/
//! [WHATWG Encoding Standard]: https://encoding.spec.whatwg.org/

use crate::common::CHAR_REPLACEMENT;

use std::fmt;

use ::encoding_rs::{CoderResult, Decoder, Encoding, UTF_16BE, UTF_16LE, UTF_8};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TextEncoding
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// User-selectable text encoding of a file.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TextEncoding {
    /// Sniff a byte-order-mark, fallback to UTF-8.
    #[default]
    AutoDetect,
    /// 7-bit ASCII. Bytes above `0x7F` become `'?'`.
    Ascii,
    /// UTF-16 little-endian.
    Unicode,
    /// UTF-32 little-endian.
    Utf32,
    /// UTF-7, [RFC 2152].
    ///
    /// [RFC 2152]: https://www.rfc-editor.org/rfc/rfc2152
    Utf7,
    Utf8,
}

/// Byte-order-marks sniffed by [`TextEncoding::AutoDetect`].
/// Longer marks first; the UTF-32LE mark starts with the UTF-16LE mark.
const BOMS: [(&[u8], DecodingUsed); 5] = [
    (&[0xFF, 0xFE, 0x00, 0x00], DecodingUsed::Utf32Le),
    (&[0x00, 0x00, 0xFE, 0xFF], DecodingUsed::Utf32Be),
    (&[0xEF, 0xBB, 0xBF], DecodingUsed::Utf8),
    (&[0xFF, 0xFE], DecodingUsed::Utf16Le),
    (&[0xFE, 0xFF], DecodingUsed::Utf16Be),
];

/// Longest byte-order-mark in [`BOMS`].
pub const BOM_LEN_MAX: usize = 4;

impl TextEncoding {
    pub const fn name(&self) -> &'static str {
        match self {
            TextEncoding::AutoDetect => "AutoDetect",
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Unicode => "Unicode",
            TextEncoding::Utf32 => "UTF32",
            TextEncoding::Utf7 => "UTF7",
            TextEncoding::Utf8 => "UTF8",
        }
    }

    /// Decide the actual decoding given the first bytes of a file.
    ///
    /// `first_bytes` should hold at least [`BOM_LEN_MAX`] bytes unless the
    /// file is shorter.
    ///
    /// Returns the decoding and the length of the byte-order-mark to skip.
    /// For an explicit encoding, only that encoding's own byte-order-mark
    /// is skipped.
    pub fn resolve(&self, first_bytes: &[u8]) -> (DecodingUsed, usize) {
        let own_bom = |used: DecodingUsed| -> (DecodingUsed, usize) {
            match BOMS
                .iter()
                .find(|(bom, used_)| *used_ == used && first_bytes.starts_with(bom))
            {
                Some((bom, _)) => (used, bom.len()),
                None => (used, 0),
            }
        };
        let resolved = match self {
            TextEncoding::AutoDetect => {
                match BOMS
                    .iter()
                    .find(|(bom, _)| first_bytes.starts_with(bom))
                {
                    Some((bom, used)) => (*used, bom.len()),
                    None => (DecodingUsed::Utf8, 0),
                }
            }
            TextEncoding::Ascii => (DecodingUsed::Ascii, 0),
            TextEncoding::Unicode => own_bom(DecodingUsed::Utf16Le),
            TextEncoding::Utf32 => own_bom(DecodingUsed::Utf32Le),
            TextEncoding::Utf7 => (DecodingUsed::Utf7, 0),
            TextEncoding::Utf8 => own_bom(DecodingUsed::Utf8),
        };
        defñ!("({:?}) {:?} first bytes {:02X?}", self, resolved, first_bytes);

        resolved
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The decoding actually applied to a file, after byte-order-mark sniffing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DecodingUsed {
    Ascii,
    Utf7,
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl DecodingUsed {
    pub const fn name(&self) -> &'static str {
        match self {
            DecodingUsed::Ascii => "US-ASCII",
            DecodingUsed::Utf7 => "UTF-7",
            DecodingUsed::Utf8 => "UTF-8",
            DecodingUsed::Utf16Le => "UTF-16LE",
            DecodingUsed::Utf16Be => "UTF-16BE",
            DecodingUsed::Utf32Le => "UTF-32LE",
            DecodingUsed::Utf32Be => "UTF-32BE",
        }
    }
}

impl fmt::Display for DecodingUsed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CharDecoder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// UTF-7 shift state carried between calls to `decode`.
#[derive(Debug, Default)]
struct Utf7State {
    /// Inside a `+…` base64 run.
    shifted: bool,
    /// Just saw the `+`; no base64 digit yet. `+-` is a literal `'+'`.
    shift_start: bool,
    /// Accumulated bits not yet forming a UTF-16 code unit.
    bits: u32,
    /// Count of valid bits in `bits`.
    nbits: u32,
    /// A high surrogate waiting for its low surrogate.
    high_surrogate: Option<u16>,
}

enum DecoderInner {
    EncodingRs(Decoder),
    Ascii,
    Utf32 {
        big_endian: bool,
        /// Trailing bytes of an incomplete 4-byte code unit.
        pending: Vec<u8>,
    },
    Utf7(Utf7State),
}

/// Streaming decoder of bytes to `char`s for one file.
///
/// Callers pass every byte of the file, in order, through one or more calls
/// to `decode`, the last call with `last` set to `true`. After that call the
/// `CharDecoder` must not be used again.
pub struct CharDecoder {
    used: DecodingUsed,
    inner: DecoderInner,
}

impl fmt::Debug for CharDecoder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CharDecoder")
            .field("used", &self.used)
            .finish()
    }
}

/// Value of one modified-base64 digit of UTF-7.
#[inline(always)]
const fn base64_value(b: u8) -> Option<u32> {
    match b {
        b'A'..=b'Z' => Some((b - b'A') as u32),
        b'a'..=b'z' => Some((b - b'a') as u32 + 26),
        b'0'..=b'9' => Some((b - b'0') as u32 + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

impl Utf7State {
    /// Push one decoded UTF-16 code unit, pairing surrogates.
    fn push_unit(&mut self, unit: u16, dst: &mut String) {
        match unit {
            0xD800..=0xDBFF => {
                if self.high_surrogate.replace(unit).is_some() {
                    dst.push(CHAR_REPLACEMENT);
                }
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let cp: u32 = 0x10000 + (((high as u32) - 0xD800) << 10) + ((unit as u32) - 0xDC00);
                    dst.push(char::from_u32(cp).unwrap_or(CHAR_REPLACEMENT));
                }
                None => dst.push(CHAR_REPLACEMENT),
            },
            _ => {
                if self.high_surrogate.take().is_some() {
                    dst.push(CHAR_REPLACEMENT);
                }
                dst.push(char::from_u32(unit as u32).unwrap_or(CHAR_REPLACEMENT));
            }
        }
    }

    /// Leave the base64 run. Leftover bits (fewer than 16) are padding.
    fn unshift(&mut self, dst: &mut String) {
        if self.high_surrogate.take().is_some() {
            dst.push(CHAR_REPLACEMENT);
        }
        self.shifted = false;
        self.shift_start = false;
        self.bits = 0;
        self.nbits = 0;
    }

    fn decode(&mut self, src: &[u8], dst: &mut String, last: bool) {
        for b in src.iter() {
            if self.shifted {
                if let Some(value) = base64_value(*b) {
                    self.shift_start = false;
                    self.bits = (self.bits << 6) | value;
                    self.nbits += 6;
                    if self.nbits >= 16 {
                        self.nbits -= 16;
                        let unit: u16 = ((self.bits >> self.nbits) & 0xFFFF) as u16;
                        self.bits &= (1 << self.nbits) - 1;
                        self.push_unit(unit, dst);
                    }
                    continue;
                }
                let shift_start = self.shift_start;
                self.unshift(dst);
                if *b == b'-' {
                    // `-` ends the run and is absorbed, `+-` is a literal `+`
                    if shift_start {
                        dst.push('+');
                    }
                    continue;
                }
            }
            match *b {
                b'+' => {
                    self.shifted = true;
                    self.shift_start = true;
                }
                0x00..=0x7F => dst.push(*b as char),
                _ => dst.push(CHAR_REPLACEMENT),
            }
        }
        if last && self.shifted {
            self.unshift(dst);
        }
    }
}

/// Decode with an `encoding_rs::Decoder` into `dst`, growing `dst` as
/// needed.
fn decode_encoding_rs(decoder: &mut Decoder, src: &[u8], dst: &mut String, last: bool) {
    let mut src: &[u8] = src;
    loop {
        let needed: usize = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() * 3 + 16);
        dst.reserve(needed);
        let (result, read, _had_replacements) = decoder.decode_to_string(src, dst, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => continue,
        }
    }
}

/// Decode UTF-32 into `dst`, keeping an incomplete code unit in `pending`.
fn decode_utf32(big_endian: bool, pending: &mut Vec<u8>, src: &[u8], dst: &mut String, last: bool) {
    let unit_to_char = |unit: [u8; 4]| -> char {
        let value: u32 = match big_endian {
            true => u32::from_be_bytes(unit),
            false => u32::from_le_bytes(unit),
        };
        char::from_u32(value).unwrap_or(CHAR_REPLACEMENT)
    };
    let mut at: usize = 0;
    if !pending.is_empty() {
        while pending.len() < 4 && at < src.len() {
            pending.push(src[at]);
            at += 1;
        }
        if pending.len() == 4 {
            dst.push(unit_to_char([pending[0], pending[1], pending[2], pending[3]]));
            pending.clear();
        }
    }
    let mut chunks = src[at..].chunks_exact(4);
    dst.reserve(chunks.len());
    for unit in &mut chunks {
        dst.push(unit_to_char([unit[0], unit[1], unit[2], unit[3]]));
    }
    pending.extend_from_slice(chunks.remainder());
    if last && !pending.is_empty() {
        dst.push(CHAR_REPLACEMENT);
        pending.clear();
    }
}

impl CharDecoder {
    /// Create a decoder for `used`. No byte-order-mark handling is done;
    /// callers skip any byte-order-mark found by [`TextEncoding::resolve`].
    pub fn new(used: DecodingUsed) -> CharDecoder {
        let encoding_rs_decoder = |encoding: &'static Encoding| -> DecoderInner {
            DecoderInner::EncodingRs(encoding.new_decoder_without_bom_handling())
        };
        let inner: DecoderInner = match used {
            DecodingUsed::Ascii => DecoderInner::Ascii,
            DecodingUsed::Utf7 => DecoderInner::Utf7(Utf7State::default()),
            DecodingUsed::Utf8 => encoding_rs_decoder(UTF_8),
            DecodingUsed::Utf16Le => encoding_rs_decoder(UTF_16LE),
            DecodingUsed::Utf16Be => encoding_rs_decoder(UTF_16BE),
            DecodingUsed::Utf32Le => DecoderInner::Utf32 {
                big_endian: false,
                pending: Vec::with_capacity(4),
            },
            DecodingUsed::Utf32Be => DecoderInner::Utf32 {
                big_endian: true,
                pending: Vec::with_capacity(4),
            },
        };

        CharDecoder { used, inner }
    }

    pub const fn used(&self) -> DecodingUsed {
        self.used
    }

    /// Decode `src` and append the `char`s to `dst`.
    ///
    /// Returns the count of `char`s appended.
    pub fn decode(&mut self, src: &[u8], dst: &mut String, last: bool) -> usize {
        let dst_len_before: usize = dst.len();
        match &mut self.inner {
            DecoderInner::EncodingRs(decoder) => decode_encoding_rs(decoder, src, dst, last),
            DecoderInner::Ascii => {
                dst.reserve(src.len());
                dst.extend(
                    src.iter()
                        .map(|b| if b.is_ascii() { *b as char } else { '?' }),
                );
            }
            DecoderInner::Utf32 { big_endian, pending } => decode_utf32(*big_endian, pending, src, dst, last),
            DecoderInner::Utf7(state) => state.decode(src, dst, last),
        }

        dst[dst_len_before..].chars().count()
    }
}
