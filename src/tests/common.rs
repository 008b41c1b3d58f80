// src/tests/common.rs

//! Common GUID values and helpers shared by tests.

#![allow(non_upper_case_globals)]

use crate::common::FPath;
use crate::data::guid::GuidId;
use crate::debug::helpers::{create_temp_file_bytes, ntf_fpath, NamedTempFile};
use crate::readers::guidscanner::{scan_file, ScanConfig, ScanResult};

/// Hyphenated form of [`GUID_A`].
pub const GUID_A_STR: &str = "a864f394-c94e-4727-8eeb-89223e3096af";
/// Hyphenated form of [`GUID_A`], uppercase.
pub const GUID_A_STR_UPPER: &str = "A864F394-C94E-4727-8EEB-89223E3096AF";
/// C struct form of [`GUID_A`].
pub const GUID_A_STRUCT: &str = "0xa864f394,0xc94e,0x4727,0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf";
/// C struct form of [`GUID_A`] with braces, as written in C source.
pub const GUID_A_BRACES: &str = "{0xa864f394,0xc94e,0x4727,{0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf}}";
/// C struct form of [`GUID_A`] with the last field cut to one digit.
pub const GUID_A_STRUCT_TRUNCATED: &str = "0xa864f394,0xc94e,0x4727,0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0x0";

pub const GUID_A: GuidId = GuidId::from_u128(0xa864f394_c94e_4727_8eeb_89223e3096af);

/// Hyphenated form of [`GUID_B`].
pub const GUID_B_STR: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

pub const GUID_B: GuidId = GuidId::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);

/// C struct form of `id`, every field written at full width.
pub fn guid_to_struct_text(id: &GuidId) -> String {
    let node: [u8; 16] = id.to_bytes();
    format!(
        "0x{:08x},0x{:04x},0x{:04x},0x{:02x},0x{:02x},0x{:02x},0x{:02x},0x{:02x},0x{:02x},0x{:02x},0x{:02x}",
        id.time_low(),
        id.time_mid(),
        id.time_hi_and_version(),
        id.clock_seq_hi_and_reserved(),
        id.clock_seq_low(),
        node[10],
        node[11],
        node[12],
        node[13],
        node[14],
        node[15],
    )
}

/// Write `data` to a temporary file and scan it with `config`.
///
/// The returned `NamedTempFile` must outlive uses of the path.
pub fn scan_bytes(
    data: &[u8],
    config: &ScanConfig,
) -> (NamedTempFile, ScanResult) {
    let ntf: NamedTempFile = create_temp_file_bytes(data);
    let path: FPath = ntf_fpath(&ntf);
    let result: ScanResult = match scan_file(&path, config) {
        Ok(val) => val,
        Err(err) => panic!("scan_file({:?}) returned Err {}", path, err),
    };

    (ntf, result)
}

/// [`scan_bytes`] for UTF-8 text.
pub fn scan_str(
    data: &str,
    config: &ScanConfig,
) -> ScanResult {
    let (_ntf, result) = scan_bytes(data.as_bytes(), config);

    result
}
