// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;

use std::io::Write; // for `NamedTempFile.write_all`

use ::lazy_static::lazy_static;
use ::si_trace_print::defñ;

#[doc(hidden)]
pub use ::tempfile::tempdir;
#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
///
/// A known prefix makes leftover temporary files easy to find and delete.
/// See <https://github.com/Stebalien/tempfile/issues/183>.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-guidscan-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Testing helper function to write a `[u8]` to a temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    defñ!("(len {})", data.len());
    let mut ntf = match tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    match ntf.flush() {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::flush() return Err {}", err);
        }
    }

    ntf
}

/// Testing helper function to write a `str` to a temporary file.
///
/// BUG: `NamedTempFile` created within `lazy_static` will fail to remove itself
///      <https://github.com/Stebalien/tempfile/issues/183>.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes(data.as_bytes())
}

/// Testing helper to encode `data` as UTF-16 little-endian bytes,
/// optionally preceded by the byte-order-mark.
pub fn str_to_utf16le(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 2 + 2);
    if bom {
        bytes.extend_from_slice(&[0xFF, 0xFE]);
    }
    for unit in data.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    bytes
}

/// Testing helper to encode `data` as UTF-16 big-endian bytes,
/// optionally preceded by the byte-order-mark.
pub fn str_to_utf16be(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 2 + 2);
    if bom {
        bytes.extend_from_slice(&[0xFE, 0xFF]);
    }
    for unit in data.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }

    bytes
}

/// Testing helper to encode `data` as UTF-32 little-endian bytes,
/// optionally preceded by the byte-order-mark.
pub fn str_to_utf32le(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 4 + 4);
    if bom {
        bytes.extend_from_slice(&[0xFF, 0xFE, 0x00, 0x00]);
    }
    for c in data.chars() {
        bytes.extend_from_slice(&(c as u32).to_le_bytes());
    }

    bytes
}

/// Testing helper to encode `data` as UTF-32 big-endian bytes,
/// optionally preceded by the byte-order-mark.
pub fn str_to_utf32be(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 4 + 4);
    if bom {
        bytes.extend_from_slice(&[0x00, 0x00, 0xFE, 0xFF]);
    }
    for c in data.chars() {
        bytes.extend_from_slice(&(c as u32).to_be_bytes());
    }

    bytes
}
