// src/tests/printers_tests.rs

//! tests for `printer/printers.rs` and `printer/summary.rs`

#![allow(non_snake_case)]

use crate::common::{AllocatorChosen, FPath};
use crate::data::guidrecord::GuidRecord;
use crate::printer::printers::{
    guidrecord_to_string, print_colored_stderr, ColorChoice, PrinterGuidRecord, COLOR_ERROR, FIELD_SEP,
};
use crate::printer::summary::{print_summary, print_summary_processpathresult, print_summary_program};
use crate::readers::filepreprocessor::ProcessPathResult;
use crate::readers::guidscanner::ScanConfig;
use crate::readers::summary::Summary;
use crate::tests::common::{scan_str, GUID_A, GUID_A_STR, GUID_B, GUID_B_STR};

use ::test_case::test_case;

fn record_a() -> GuidRecord {
    GuidRecord {
        id: GUID_A,
        count: 3,
        first_offset: 42,
    }
}

#[test_case(false, format!("{}\t3", GUID_A_STR); "without offset")]
#[test_case(true, format!("{}\t3\t42", GUID_A_STR); "with offset")]
fn test_guidrecord_to_string(
    do_offset: bool,
    expect: String,
) {
    assert_eq!(FIELD_SEP, '\t');
    assert_eq!(guidrecord_to_string(&record_a(), do_offset), expect);
}

#[test_case(None, false)]
#[test_case(Some(String::from("file.txt:")), false)]
#[test_case(Some(String::from("/tmp/file.txt:")), true)]
fn test_PrinterGuidRecord_print_guidrecord(
    prepend_file: Option<String>,
    do_offset: bool,
) {
    let record = record_a();
    let prepend_len: usize = prepend_file.as_ref().map_or(0, |s| s.len());
    let mut printer = PrinterGuidRecord::new(ColorChoice::Never, prepend_file, do_offset);
    let printed: usize = printer.print_guidrecord(&record).unwrap();
    let expect: usize = prepend_len + guidrecord_to_string(&record, do_offset).len() + 1;
    assert_eq!(printed, expect);
    printer.finish().unwrap();
}

#[test]
fn test_PrinterGuidRecord_print_guidrecords() {
    let records: Vec<GuidRecord> = vec![
        record_a(),
        GuidRecord::new(GUID_B, 7),
    ];
    let mut printer = PrinterGuidRecord::new(ColorChoice::Never, None, false);
    let printed: usize = printer.print_guidrecords(records.iter()).unwrap();
    // GUID, tab, count, newline
    assert_eq!(printed, (36 + 1 + 1 + 1) * 2);
    assert_eq!(GUID_B.to_string(), GUID_B_STR);
    printer.finish().unwrap();
}

#[test]
fn test_PrinterGuidRecord_print_guidrecords_empty() {
    let records: Vec<GuidRecord> = Vec::new();
    let mut printer = PrinterGuidRecord::new(ColorChoice::Never, Some(String::from("x:")), true);
    assert_eq!(printer.print_guidrecords(records.iter()).unwrap(), 0);
}

#[test]
fn test_print_colored_stderr() {
    print_colored_stderr(COLOR_ERROR, Some(ColorChoice::Never), b"printers_tests\n").unwrap();
}

#[test]
fn test_print_summary_scanned() {
    let text: String = format!("{} {} {}", GUID_A_STR, GUID_B_STR, GUID_A_STR);
    let result = scan_str(text.as_str(), &ScanConfig::new(20, 0, Default::default()));
    assert!(!result.summary.has_error());
    // both settings were clamped
    print_summary(&result.summary, ColorChoice::Never);
}

#[test]
fn test_print_summary_not_clamped() {
    let config = ScanConfig::default();
    assert!(!config.is_clamped());
    let result = scan_str(GUID_A_STR, &config);
    assert_eq!(result.summary.config.blocksz(), result.summary.config.blocksz_requested());
    print_summary(&result.summary, ColorChoice::Never);
}

#[test]
fn test_print_summary_failed() {
    let summary = Summary::new_failed(
        FPath::from("/nope"),
        ScanConfig::default(),
        Some(String::from("No such file or directory")),
    );
    assert!(summary.has_error());
    print_summary(&summary, ColorChoice::Never);
}

#[test_case(ProcessPathResult::FileValid(FPath::from("a")); "FileValid")]
#[test_case(ProcessPathResult::FileErrNoPermissions(FPath::from("b")); "FileErrNoPermissions")]
#[test_case(ProcessPathResult::FileErrNotAFile(FPath::from("c")); "FileErrNotAFile")]
#[test_case(ProcessPathResult::FileErrNotExist(FPath::from("d")); "FileErrNotExist")]
#[test_case(ProcessPathResult::FileErr(FPath::from("e"), String::from("bad")); "FileErr")]
fn test_print_summary_processpathresult(result: ProcessPathResult) {
    print_summary_processpathresult(&result, ColorChoice::Never);
}

#[test]
fn test_print_summary_program() {
    print_summary_program(2, 1, AllocatorChosen::System);
}
