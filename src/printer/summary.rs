// src/printer/summary.rs

//! CLI option `--summary` printing functions.
//! Only used by `guidscan.rs`.

use crate::common::{AllocatorChosen, Count};
use crate::printer::printers::{print_colored_stderr, Color, ColorChoice, COLOR_DEFAULT, COLOR_ERROR};
use crate::readers::filepreprocessor::ProcessPathResult;
use crate::readers::summary::Summary;

#[allow(unused_imports)]
use ::si_trace_print::defñ;

const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";
const OPT_SUMMARY_PRINT_INDENT2: &str = "      ";

/// Print `value` in `color` to stderr, ignoring errors.
fn print_(
    value: String,
    color_choice: ColorChoice,
    color: Color,
) {
    if let Err(_err) = print_colored_stderr(color, Some(color_choice), value.as_bytes()) {
        defñ!("print_colored_stderr error {}", _err);
    }
}

/// Percentage of `part` in `total`, `0.0` for zero `total`.
fn percent64(
    part: Count,
    total: Count,
) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (part as f64) / (total as f64) * 100.0
}

/// Print the `--summary` of one path that failed pre-processing.
pub fn print_summary_processpathresult(
    result: &ProcessPathResult,
    color_choice: ColorChoice,
) {
    let (path, message): (&String, String) = match result {
        ProcessPathResult::FileValid(_) => return,
        ProcessPathResult::FileErrNoPermissions(path) => (path, String::from("(no permissions)")),
        ProcessPathResult::FileErrNotAFile(path) => (path, String::from("(not a file)")),
        ProcessPathResult::FileErrNotExist(path) => (path, String::from("(does not exist)")),
        ProcessPathResult::FileErr(path, message) => (path, format!("({})", message)),
    };
    print_(format!("File: {} ", path), color_choice, COLOR_DEFAULT);
    print_(message, color_choice, COLOR_ERROR);
    eprintln!();
}

/// Print the `--summary` of one scanned (or failed) file.
pub fn print_summary(
    summary: &Summary,
    color_choice: ColorChoice,
) {
    let indent1 = OPT_SUMMARY_PRINT_INDENT1;
    let indent2 = OPT_SUMMARY_PRINT_INDENT2;
    print_(format!("File: {}", summary.path), color_choice, COLOR_DEFAULT);
    eprintln!();
    let config = &summary.config;
    eprintln!("{}Settings:", indent1);
    match config.blocksz() == config.blocksz_requested() {
        true => eprintln!("{0}blocksz        : {1} (0x{1:X})", indent2, config.blocksz()),
        false => eprintln!(
            "{}blocksz        : {} (clamped from {})",
            indent2,
            config.blocksz(),
            config.blocksz_requested()
        ),
    }
    match config.carry_over_max() == config.carry_over_max_requested() {
        true => eprintln!("{}carry-over max : {}", indent2, config.carry_over_max()),
        false => eprintln!(
            "{}carry-over max : {} (clamped from {})",
            indent2,
            config.carry_over_max(),
            config.carry_over_max_requested()
        ),
    }
    eprintln!("{}encoding       : {}", indent2, config.encoding());
    if let Some(error) = summary.error.as_ref() {
        eprint!("{}Error: ", indent1);
        print_(error.clone(), color_choice, COLOR_ERROR);
        eprintln!();
        return;
    }
    let blockreader = &summary.blockreader;
    eprintln!("{}Processed:", indent1);
    match blockreader.blockreader_decoding {
        Some(decoding) => eprintln!("{}decoding       : {}", indent2, decoding),
        None => eprintln!("{}decoding       : (none)", indent2),
    }
    eprintln!(
        "{}bytes          : {} of {} ({:.1}%)",
        indent2,
        blockreader.blockreader_bytes,
        blockreader.blockreader_bytes_total,
        percent64(blockreader.blockreader_bytes, blockreader.blockreader_bytes_total),
    );
    eprintln!("{}chars          : {}", indent2, blockreader.blockreader_chars);
    eprintln!("{}blocks         : {}", indent2, blockreader.blockreader_blocks);
    let guidscanner = &summary.guidscanner;
    eprintln!("{}matches        : {}", indent2, guidscanner.guidscanner_matches);
    eprintln!("{}recorded       : {}", indent2, guidscanner.guidscanner_recorded);
    eprintln!("{}distinct GUIDs : {}", indent2, guidscanner.guidscanner_distinct);
    eprintln!("{}malformed      : {}", indent2, guidscanner.guidscanner_malformed);
    eprintln!("{}deferred       : {}", indent2, guidscanner.guidscanner_deferred);
    eprintln!("{}carry-over cut : {}", indent2, guidscanner.guidscanner_carry_over_truncated);
}

/// Print the `--summary` trailer about the program run.
pub fn print_summary_program(
    files_scanned: Count,
    files_failed: Count,
    allocator_chosen: AllocatorChosen,
) {
    let indent1 = OPT_SUMMARY_PRINT_INDENT1;
    eprintln!("Program:");
    eprintln!("{}files scanned  : {}", indent1, files_scanned);
    eprintln!("{}files failed   : {}", indent1, files_failed);
    eprintln!("{}allocator      : {:?}", indent1, allocator_chosen);
}
