// src/bin/guidscan.rs

//! Driver program _guidscan_ drives the [_gslib_].
//!
//! Processes user-passed command-line arguments.
//! Then checks each path passed for suitability (does it exist? is it a
//! file? is it readable?).
//!
//! For each valid file, a file scanning thread is created. Each thread
//! scans its file with a [`GuidScanner`] and sends the one [`ScanResult`]
//! (or the error) back to the main thread over its own [channel].
//!
//! The main thread receives results in the order paths were passed, and
//! prints the [`GuidRecord`s] of each file sorted by GUID.
//! Warnings and errors are printed to stderr.
//!
//! If passed CLI option `--summary`, the main thread prints a [`Summary`]
//! about each file scanned.
//!
//! `guidscan.rs` should be the main thread and the only thread that prints
//! to STDOUT.
//!
//! [_gslib_]: gslib
//! [channel]: self::ChanRecvDatum
//! [`GuidScanner`]: gslib::readers::guidscanner::GuidScanner
//! [`ScanResult`]: gslib::readers::guidscanner::ScanResult
//! [`GuidRecord`s]: gslib::data::guidrecord::GuidRecord
//! [`Summary`]: gslib::readers::summary::Summary

#![allow(non_camel_case_types)]

// first setup the custom global allocator
use ::gslib::common::AllocatorChosen;

cfg_if::cfg_if! {
    if #[cfg(feature = "jemalloc")] {
        use ::tikv_jemallocator::Jemalloc;
        #[global_allocator]
        static GLOBAL: Jemalloc = Jemalloc;
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::Jemalloc;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "jemalloc";
    }
    else if #[cfg(feature = "mimalloc")] {
        use ::mimalloc::MiMalloc;
        #[global_allocator]
        static GLOBAL: MiMalloc = MiMalloc;
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::Mimalloc;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "mimalloc";
    }
    else {
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::System;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "system";
    }
}

use std::io::{
    BufRead, // for stdin::lock().lines()
    Result,
};
use std::process::ExitCode;
use std::thread;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::crossbeam_channel;

use ::gslib::common::{Count, FPath, FPaths};
#[allow(unused_imports)]
use ::gslib::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use ::gslib::printer::printers::{ColorChoice, PrinterGuidRecord};
use ::gslib::printer::summary::{print_summary, print_summary_processpathresult, print_summary_program};
use ::gslib::readers::blockreader::{BlockSz, BLOCKSZ_DEF, BLOCKSZ_MAX, BLOCKSZ_MIN};
use ::gslib::readers::chardecoder::TextEncoding;
use ::gslib::readers::filepreprocessor::{process_paths, ProcessPathResult, ProcessPathResults};
use ::gslib::readers::guidscanner::{scan_file, ScanConfig, ScanResult, CARRY_OVER_MAX_DEF};
use ::gslib::readers::helpers::basename;
use ::gslib::readers::summary::Summary;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ, stack::stack_offset_set};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// user-passed signifier that file paths were passed on STDIN
const PATHS_ON_STDIN: &str = "-";

/// general error exit value
const EXIT_ERR: i32 = 1;

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// CLI enum that maps to [`TextEncoding`].
///
/// [`TextEncoding`]: gslib::readers::chardecoder::TextEncoding
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    ValueEnum, // from `clap`
)]
enum CLI_Encoding {
    #[value(name = "AutoDetect")]
    AutoDetect,
    #[value(name = "ASCII")]
    Ascii,
    #[value(name = "Unicode")]
    Unicode,
    #[value(name = "UTF32")]
    Utf32,
    #[value(name = "UTF7")]
    Utf7,
    #[value(name = "UTF8")]
    Utf8,
}

impl From<CLI_Encoding> for TextEncoding {
    fn from(encoding: CLI_Encoding) -> TextEncoding {
        match encoding {
            CLI_Encoding::AutoDetect => TextEncoding::AutoDetect,
            CLI_Encoding::Ascii => TextEncoding::Ascii,
            CLI_Encoding::Unicode => TextEncoding::Unicode,
            CLI_Encoding::Utf32 => TextEncoding::Utf32,
            CLI_Encoding::Utf7 => TextEncoding::Utf7,
            CLI_Encoding::Utf8 => TextEncoding::Utf8,
        }
    }
}

const CLI_HELP_AFTER: &str = concatcp!(
    "\
Each result line is a GUID in lowercase hyphenated form, a tab, and the
count of times it was found in that file. With --offset a tab and the
offset of the first occurrence follow. The offset is counted in decoded
characters from the start of the file, excluding any byte-order-mark.

GUIDs are found in three forms:
    a864f394-c94e-4727-8eeb-89223e3096af
    0xa864f394,0xc94e,0x4727,0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf
    {0xa864f394,0xc94e,0x4727,{0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf}}
Whitespace within a GUID is ignored.

--blocksz is clamped to ", BLOCKSZ_MIN, " ≤ BLOCKSZ ≤ ", BLOCKSZ_MAX, " characters.
--carry-over-max is clamped to 1 ≤ CARRY_OVER_MAX < BLOCKSZ.

Allocator: ", CLI_HELP_AFTER_ALLOCATOR, "
"
);

/// clap command-line arguments build-time definitions.
///
/// Note:
/// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "guidscan",
    // write expanded information for the `--version` output
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "Allocator: ", CLI_HELP_AFTER_ALLOCATOR , "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of text files to scan.
    /// Paths may also be passed via STDIN, one per line. The user must
    /// supply argument "-" to signify PATHS are available from STDIN.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Text encoding of the files.
    /// AutoDetect reads a byte-order-mark and defaults to UTF8.
    /// Unicode is UTF-16 little-endian. UTF32 is little-endian.
    #[clap(
        short = 'e',
        long = "encoding",
        verbatim_doc_comment,
        value_enum,
        ignore_case = true,
        default_value_t = CLI_Encoding::AutoDetect,
    )]
    encoding: CLI_Encoding,

    /// Prepend file basename to each result line.
    #[clap(
        short = 'n',
        long = "prepend-filename",
        verbatim_doc_comment,
        groups = &[
            "group_prepend_file",
        ],
    )]
    prepend_filename: bool,

    /// Prepend file full path to each result line.
    #[clap(
        short = 'p',
        long = "prepend-filepath",
        verbatim_doc_comment,
        groups = &[
            "group_prepend_file",
        ],
    )]
    prepend_filepath: bool,

    /// Separator string for prepended file name or path.
    #[clap(
        long = "separator",
        required = false,
        verbatim_doc_comment,
        default_value_t = String::from(":"),
    )]
    prepend_separator: String,

    /// Append the offset of the first occurrence to each result line.
    #[clap(
        short = 'o',
        long = "offset",
        verbatim_doc_comment,
    )]
    offset: bool,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Read blocks of this size in decoded characters.
    /// May pass value as any radix (hexadecimal, decimal, octal, binary).
    /// Out of range values are clamped.
    /// Using the default value is recommended.
    /// Most useful for developers.
    #[clap(
        required = false,
        long,
        verbatim_doc_comment,
        default_value_t = BLOCKSZ_DEF,
        value_parser = cli_process_blocksz,
    )]
    blocksz: BlockSz,

    /// Most characters kept between blocks to find a GUID split by a
    /// block boundary. Out of range values are clamped.
    /// Most useful for developers.
    #[clap(
        required = false,
        long = "carry-over-max",
        verbatim_doc_comment,
        default_value_t = CARRY_OVER_MAX_DEF,
    )]
    carry_over_max: usize,

    /// Print a summary of files scanned to stderr.
    /// Most useful for developers.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument processor for `--blocksz`.
///
/// Parses any radix. Does not check the range, out of range values are
/// clamped later by `ScanConfig::new`.
fn cli_process_blocksz(blockszs: &str) -> std::result::Result<BlockSz, String> {
    let errs = format!("Unable to parse a number for --blocksz {:?}", blockszs);
    let (digits, radix): (&str, u32) = if let Some(digits) = blockszs.strip_prefix("0x") {
        (digits, 16)
    } else if let Some(digits) = blockszs.strip_prefix("0o") {
        (digits, 8)
    } else if let Some(digits) = blockszs.strip_prefix("0b") {
        (digits, 2)
    } else {
        (blockszs, 10)
    };

    match BlockSz::from_str_radix(digits, radix) {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("{} {}", errs, err)),
    }
}

/// Settings derived from the command-line arguments.
#[derive(Debug)]
struct CLI_Settings {
    paths: FPaths,
    config: ScanConfig,
    color_choice: ColorChoice,
    prepend_filename: bool,
    prepend_filepath: bool,
    prepend_separator: String,
    offset: bool,
    summary: bool,
}

/// Process user-passed CLI argument strings into expected types.
///
/// This function will `std::process::exit` if there is an `Err`.
fn cli_process_args() -> CLI_Settings {
    let args = CLI_Args::parse();

    defo!("args {:?}", args);

    let mut paths: FPaths = FPaths::with_capacity(args.paths.len() + 1);
    let mut stdin_check = false;
    for path in args.paths.iter() {
        match path.as_str() {
            PATHS_ON_STDIN => {
                if stdin_check {
                    e_wrn!("passed special PATHS argument {:?} more than once", PATHS_ON_STDIN);
                    continue;
                }
                stdin_check = true;
                // stdin input is file paths, one per line
                for result in std::io::stdin()
                    .lock()
                    .lines()
                {
                    match result {
                        Ok(line) => {
                            if line.is_empty() {
                                continue;
                            }
                            paths.push(line);
                        }
                        Err(err) => {
                            // don't continue if there was an error
                            e_err!("reading stdin; {}", err);
                            std::process::exit(EXIT_ERR);
                        }
                    }
                }
            }
            _ => paths.push(path.clone()),
        }
    }

    let config = ScanConfig::new(args.blocksz, args.carry_over_max, TextEncoding::from(args.encoding));
    defo!("config {:?}", config);

    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };

    CLI_Settings {
        paths,
        config,
        color_choice,
        prepend_filename: args.prepend_filename,
        prepend_filepath: args.prepend_filepath,
        prepend_separator: args.prepend_separator,
        offset: args.offset,
        summary: args.summary,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// processing threads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Data sent from a file scanning thread to the main thread.
type ChanDatum = Result<ScanResult>;
type ChanSendDatum = crossbeam_channel::Sender<ChanDatum>;
type ChanRecvDatum = crossbeam_channel::Receiver<ChanDatum>;

/// Each thread sends one datum, so one slot suffices.
const CHANNEL_CAPACITY: usize = 1;

/// Thread entry point for scanning one file.
fn exec_guidscanner_thread(
    chan_send_dt: ChanSendDatum,
    path: FPath,
    config: ScanConfig,
) {
    stack_offset_set(Some(2));
    defn!("({:?})", path);

    let result: ChanDatum = scan_file(&path, &config);
    match chan_send_dt.send(result) {
        Ok(_) => {}
        Err(_err) => de_err!("chan_send_dt.send(…) failed {} for {:?}", _err, path),
    }

    defx!("({:?})", path);
}

/// The prefix printed before each result line of `path`, if any.
fn prepend_file(
    path: &FPath,
    settings: &CLI_Settings,
) -> Option<String> {
    if settings.prepend_filename {
        return Some(format!("{}{}", basename(path), settings.prepend_separator));
    }
    if settings.prepend_filepath {
        return Some(format!("{}{}", path, settings.prepend_separator));
    }

    None
}

/// Print the records and warnings of one scanned file.
///
/// Returns `false` if printing failed.
fn print_scanresult(
    path: &FPath,
    scanresult: &mut ScanResult,
    settings: &CLI_Settings,
) -> bool {
    for warning in scanresult.warnings.iter() {
        e_wrn!("{}: {}", path, warning);
    }
    scanresult
        .records
        .sort_unstable_by_key(|record| record.id);
    let mut printer = PrinterGuidRecord::new(settings.color_choice, prepend_file(path, settings), settings.offset);
    match printer.print_guidrecords(scanresult.records.iter()) {
        Ok(_printed) => {
            defo!("printed {} bytes for {:?}", _printed, path);
        }
        Err(err) => {
            de_err!("print_guidrecords failed {} for {:?}", err, path);
            return false;
        }
    }

    printer.finish().is_ok()
}

/// The main scanning and printing loop.
///
/// 1. reports invalid paths
///
/// 2. creates one thread per valid path
///
/// 3. receives each thread's result in path order and prints it
///
/// 4. prints each [`Summary`] (if CLI option `--summary`)
///
/// Returns `true` if every path was valid and scanned.
///
/// [`Summary`]: gslib::readers::summary::Summary
fn processing_loop(
    processed_paths: ProcessPathResults,
    settings: &CLI_Settings,
) -> bool {
    defn!("({} paths)", processed_paths.len());
    let mut ret: bool = true;

    // one receiver per valid path, `None` for invalid paths, in path order
    let mut receivers: Vec<(&ProcessPathResult, Option<ChanRecvDatum>)> =
        Vec::with_capacity(processed_paths.len());
    for result in processed_paths.iter() {
        let path: &FPath = match result {
            ProcessPathResult::FileValid(path) => path,
            ProcessPathResult::FileErrNoPermissions(path) => {
                e_err!("not enough permissions {:?}", path);
                ret = false;
                receivers.push((result, None));
                continue;
            }
            ProcessPathResult::FileErrNotAFile(path) => {
                e_err!("not a file {:?}", path);
                ret = false;
                receivers.push((result, None));
                continue;
            }
            ProcessPathResult::FileErrNotExist(path) => {
                e_err!("path not found {:?}", path);
                ret = false;
                receivers.push((result, None));
                continue;
            }
            ProcessPathResult::FileErr(path, message) => {
                e_err!("{} for {:?}", message, path);
                ret = false;
                receivers.push((result, None));
                continue;
            }
        };
        let (chan_send_dt, chan_recv_dt): (ChanSendDatum, ChanRecvDatum) =
            crossbeam_channel::bounded(CHANNEL_CAPACITY);
        let path_thread: FPath = path.clone();
        let config: ScanConfig = settings.config;
        let basename_: FPath = basename(path);
        match thread::Builder::new()
            .name(basename_.clone())
            .spawn(move || exec_guidscanner_thread(chan_send_dt, path_thread, config))
        {
            Ok(_joinhandle) => {
                receivers.push((result, Some(chan_recv_dt)));
            }
            Err(err) => {
                e_err!("thread.name({:?}).spawn() failed {:?}", basename_, err);
                ret = false;
                receivers.push((result, None));
            }
        }
    }

    let mut summaries: Vec<Summary> = Vec::with_capacity(receivers.len());
    let mut files_scanned: Count = 0;
    let mut files_failed: Count = 0;
    for (result, chan_recv_dt) in receivers.into_iter() {
        let path: &FPath = result.path();
        let chan_recv_dt: ChanRecvDatum = match chan_recv_dt {
            Some(val) => val,
            None => {
                files_failed += 1;
                continue;
            }
        };
        match chan_recv_dt.recv() {
            Ok(Ok(mut scanresult)) => {
                files_scanned += 1;
                if !print_scanresult(path, &mut scanresult, settings) {
                    ret = false;
                }
                summaries.push(scanresult.summary);
            }
            Ok(Err(err)) => {
                files_failed += 1;
                ret = false;
                e_err!("{} for {:?}", err, path);
                summaries.push(Summary::new_failed(path.clone(), settings.config, Some(err.to_string())));
            }
            Err(err) => {
                // the thread ended without sending, e.g. it panicked
                files_failed += 1;
                ret = false;
                e_err!("no result for {:?}; {}", path, err);
                summaries.push(Summary::new_failed(path.clone(), settings.config, Some(err.to_string())));
            }
        }
    }

    if settings.summary {
        eprintln!();
        for result in processed_paths.iter() {
            print_summary_processpathresult(result, settings.color_choice);
        }
        for summary in summaries.iter() {
            print_summary(summary, settings.color_choice);
        }
        print_summary_program(files_scanned, files_failed, ALLOCATOR_CHOSEN);
    }
    defx!("return {}", ret);

    ret
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let settings: CLI_Settings = cli_process_args();
    let processed_paths: ProcessPathResults = process_paths(&settings.paths);
    let ret: bool = processing_loop(processed_paths, &settings);

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
