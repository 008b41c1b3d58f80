// src/tests/blockreader_tests.rs

//! tests for `blockreader.rs`

#![allow(non_snake_case)]

use crate::common::{FPath, ResultS3};
use crate::debug::helpers::{create_temp_file, create_temp_file_bytes, ntf_fpath, str_to_utf16le, tempdir};
use crate::readers::blockreader::{
    blocksz_clamp, Block, BlockReader, BlockSz, BLOCKSZ_DEF, BLOCKSZ_MAX, BLOCKSZ_MIN,
};
use crate::readers::chardecoder::{DecodingUsed, TextEncoding};
use crate::readers::helpers::path_to_fpath;

use std::io::ErrorKind;

use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

/// Read every block, return each block's `char` count, and check `is_eof`
/// is `true` right after the last block.
fn read_all_blocks(blockreader: &mut BlockReader) -> Vec<usize> {
    let mut lens: Vec<usize> = Vec::new();
    loop {
        match blockreader.read_block() {
            ResultS3::Found(block) => {
                let block: Block = block;
                assert!(!block.is_empty(), "Found an empty block");
                lens.push(block.chars().count());
            }
            ResultS3::Done => break,
            ResultS3::Err(err) => panic!("read_block returned Err {}", err),
        }
        if blockreader.is_eof() {
            match blockreader.read_block() {
                ResultS3::Done => {}
                _ => panic!("is_eof() but read_block did not return Done"),
            }
            break;
        }
    }
    assert!(blockreader.is_eof());

    lens
}

#[test_case(0, BLOCKSZ_MIN)]
#[test_case(20, BLOCKSZ_MIN)]
#[test_case(BLOCKSZ_MIN - 1, BLOCKSZ_MIN)]
#[test_case(BLOCKSZ_MIN, BLOCKSZ_MIN)]
#[test_case(BLOCKSZ_DEF, BLOCKSZ_DEF)]
#[test_case(BLOCKSZ_MAX, BLOCKSZ_MAX)]
#[test_case(BLOCKSZ_MAX + 1, BLOCKSZ_MAX)]
#[test_case(BlockSz::MAX, BLOCKSZ_MAX)]
fn test_blocksz_clamp(
    blocksz: BlockSz,
    expect: BlockSz,
) {
    assert_eq!(blocksz_clamp(blocksz), expect);
}

#[test]
fn test_BlockReader_new_clamps_blocksz() {
    let ntf = create_temp_file("abc");
    let path = ntf_fpath(&ntf);
    let blockreader = BlockReader::new(path, 20, TextEncoding::AutoDetect).unwrap();
    assert_eq!(blockreader.blocksz(), BLOCKSZ_MIN);
    assert_eq!(blockreader.filesz(), 3);
    assert_eq!(blockreader.encoding(), TextEncoding::AutoDetect);
    assert_eq!(blockreader.decoding(), None, "decoding is unknown before the first read");
}

#[test]
fn test_BlockReader_new_not_exist() {
    let path: FPath = FPath::from("/this/path/does/not/exist/guidscan");
    match BlockReader::new(path, BLOCKSZ_DEF, TextEncoding::AutoDetect) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::NotFound),
    }
}

#[test]
fn test_BlockReader_new_directory() {
    let tmpdir = tempdir().unwrap();
    let path: FPath = path_to_fpath(tmpdir.path());
    match BlockReader::new(path, BLOCKSZ_DEF, TextEncoding::AutoDetect) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Unsupported),
    }
}

#[test]
fn test_BlockReader_empty_file() {
    let ntf = create_temp_file("");
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), BLOCKSZ_MIN, TextEncoding::AutoDetect).unwrap();
    match blockreader.read_block() {
        ResultS3::Done => {}
        _ => panic!("expected Done"),
    }
    assert!(blockreader.is_eof());
    assert_eq!(blockreader.count_blocks(), 0);
    assert_eq!(blockreader.count_chars(), 0);
    assert_eq!(blockreader.count_bytes(), 0);
    assert_eq!(blockreader.decoding(), Some(DecodingUsed::Utf8));
}

#[test_case(1, &[1])]
#[test_case(4095, &[4095])]
#[test_case(4096, &[4096]; "exactly one block")]
#[test_case(4097, &[4096, 1])]
#[test_case(8192, &[4096, 4096]; "exactly two blocks")]
#[test_case(10000, &[4096, 4096, 1808])]
fn test_BlockReader_read_block_ascii(
    len: usize,
    expect: &[usize],
) {
    stack_offset_set(Some(2));
    let data: String = "z".repeat(len);
    let ntf = create_temp_file(data.as_str());
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), BLOCKSZ_MIN, TextEncoding::AutoDetect).unwrap();
    let lens = read_all_blocks(&mut blockreader);
    assert_eq!(lens, expect);
    assert_eq!(blockreader.count_blocks(), expect.len() as u64);
    assert_eq!(blockreader.count_chars(), len as u64);
    assert_eq!(blockreader.count_bytes(), len as u64);
}

#[test]
fn test_BlockReader_read_block_multibyte() {
    // 5000 `char`s, 10000 bytes
    let data: String = "é".repeat(5000);
    let ntf = create_temp_file(data.as_str());
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), BLOCKSZ_MIN, TextEncoding::Utf8).unwrap();
    let lens = read_all_blocks(&mut blockreader);
    assert_eq!(lens, &[4096, 904]);
    assert_eq!(blockreader.count_chars(), 5000);
    assert_eq!(blockreader.count_bytes(), 10000);
}

#[test]
fn test_BlockReader_read_block_utf16_bom() {
    let bytes = str_to_utf16le("hello", true);
    let ntf = create_temp_file_bytes(bytes.as_slice());
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), BLOCKSZ_MIN, TextEncoding::AutoDetect).unwrap();
    match blockreader.read_block() {
        ResultS3::Found(block) => assert_eq!(block, "hello"),
        _ => panic!("expected Found"),
    }
    assert!(blockreader.is_eof());
    assert_eq!(blockreader.decoding(), Some(DecodingUsed::Utf16Le));
    assert_eq!(blockreader.count_chars(), 5);
    assert_eq!(blockreader.count_bytes(), 12);
}

#[test]
fn test_BlockReader_read_block_short_file_bom_only() {
    // shorter than the longest byte-order-mark
    let ntf = create_temp_file_bytes(&[0xEF, 0xBB, 0xBF]);
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), BLOCKSZ_MIN, TextEncoding::AutoDetect).unwrap();
    match blockreader.read_block() {
        ResultS3::Done => {}
        _ => panic!("expected Done"),
    }
    assert_eq!(blockreader.decoding(), Some(DecodingUsed::Utf8));
}

#[test]
fn test_BlockReader_summary() {
    let data: String = "z".repeat(5000);
    let ntf = create_temp_file(data.as_str());
    let mut blockreader = BlockReader::new(ntf_fpath(&ntf), 20, TextEncoding::Ascii).unwrap();
    read_all_blocks(&mut blockreader);
    let summary = blockreader.summary();
    assert_eq!(summary.blockreader_bytes, 5000);
    assert_eq!(summary.blockreader_bytes_total, 5000);
    assert_eq!(summary.blockreader_blocks, 2);
    assert_eq!(summary.blockreader_chars, 5000);
    assert_eq!(summary.blockreader_blocksz, BLOCKSZ_MIN);
    assert_eq!(summary.blockreader_encoding, TextEncoding::Ascii);
    assert_eq!(summary.blockreader_decoding, Some(DecodingUsed::Ascii));
}
