// src/data/guid.rs

//! Implements [`GuidId`], a 128-bit identifier with the standard UUID
//! field layout, and its strict canonical-text parser.
//!
//! `GuidId` wraps a [`Uuid`].
//!
//! [`GuidId`]: self::GuidId
//! [`Uuid`]: https://docs.rs/uuid/1.11.0/uuid/struct.Uuid.html

use std::fmt;
use std::str::FromStr;

use ::uuid::Uuid;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidId
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Length of the canonical hyphenated text form,
/// e.g. `a864f394-c94e-4727-8eeb-89223e3096af`.
pub const GUID_CANONICAL_LEN: usize = 36;

/// Byte positions of the four hyphens in the canonical text form.
pub const GUID_CANONICAL_HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// A 128-bit GUID (UUID).
///
/// Field layout, most significant first:
///
/// | field                       | bits |
/// |-----------------------------|------|
/// | `time_low`                  | 32   |
/// | `time_mid`                  | 16   |
/// | `time_hi_and_version`       | 16   |
/// | `clock_seq_hi_and_reserved` | 8    |
/// | `clock_seq_low`             | 8    |
/// | `node`                      | 48   |
///
/// Equality, ordering, and hashing are by the full 128-bit value.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GuidId(Uuid);

impl GuidId {
    /// The all-zero GUID.
    pub const NIL: GuidId = GuidId(Uuid::nil());

    pub const fn from_u128(value: u128) -> GuidId {
        GuidId(Uuid::from_u128(value))
    }

    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Create a `GuidId` from the six standard fields.
    /// Only the low 48 bits of `node` are used.
    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq_hi_and_reserved: u8,
        clock_seq_low: u8,
        node: u64,
    ) -> GuidId {
        let n: [u8; 8] = node.to_be_bytes();
        let d4: [u8; 8] = [clock_seq_hi_and_reserved, clock_seq_low, n[2], n[3], n[4], n[5], n[6], n[7]];

        GuidId(Uuid::from_fields(time_low, time_mid, time_hi_and_version, &d4))
    }

    pub fn time_low(&self) -> u32 {
        self.0.as_fields().0
    }

    pub fn time_mid(&self) -> u16 {
        self.0.as_fields().1
    }

    pub fn time_hi_and_version(&self) -> u16 {
        self.0.as_fields().2
    }

    pub fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.0.as_fields().3[0]
    }

    pub fn clock_seq_low(&self) -> u8 {
        self.0.as_fields().3[1]
    }

    pub fn node(&self) -> u64 {
        let d4: &[u8; 8] = self.0.as_fields().3;

        u64::from_be_bytes([0, 0, d4[2], d4[3], d4[4], d4[5], d4[6], d4[7]])
    }

    /// The 16 bytes in canonical text order (big-endian fields).
    pub const fn to_bytes(&self) -> [u8; 16] {
        *self.0.as_bytes()
    }
}

impl Default for GuidId {
    fn default() -> Self {
        GuidId::NIL
    }
}

impl From<Uuid> for GuidId {
    fn from(uuid: Uuid) -> GuidId {
        GuidId(uuid)
    }
}

/// Lowercase canonical hyphenated form.
impl fmt::Display for GuidId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for GuidId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GuidId({})", self)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Why a text failed strict canonical GUID parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GuidParseError {
    /// Text is not [`GUID_CANONICAL_LEN`] bytes long. Holds the actual length.
    InvalidLength(usize),
    /// Expected a hyphen at this byte index.
    InvalidHyphen(usize),
    /// The hex digits were rejected by [`Uuid::try_parse`].
    ///
    /// [`Uuid::try_parse`]: https://docs.rs/uuid/1.11.0/uuid/struct.Uuid.html#method.try_parse
    InvalidHex(::uuid::Error),
}

impl fmt::Display for GuidParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GuidParseError::InvalidLength(len) => {
                write!(f, "invalid length {}, expected {}", len, GUID_CANONICAL_LEN)
            }
            GuidParseError::InvalidHyphen(at) => write!(f, "expected '-' at index {}", at),
            GuidParseError::InvalidHex(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GuidParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuidParseError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Strict parse of the canonical `8-4-4-4-12` hex digit form.
/// Case-insensitive. No surrounding braces or whitespace are allowed.
///
/// `Uuid::try_parse` also accepts the braced, URN, and unhyphenated forms,
/// so the length and hyphen positions are checked first.
impl FromStr for GuidId {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<GuidId, GuidParseError> {
        let bytes: &[u8] = s.as_bytes();
        if bytes.len() != GUID_CANONICAL_LEN {
            return Err(GuidParseError::InvalidLength(bytes.len()));
        }
        for at in GUID_CANONICAL_HYPHENS.iter() {
            if bytes[*at] != b'-' {
                return Err(GuidParseError::InvalidHyphen(*at));
            }
        }
        match Uuid::try_parse(s) {
            Ok(uuid) => Ok(GuidId(uuid)),
            Err(err) => Err(GuidParseError::InvalidHex(err)),
        }
    }
}
