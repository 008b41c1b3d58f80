// src/printer/printers.rs

//! Specialized printer struct [`PrinterGuidRecord`] and helper functions
//! for printing [`GuidRecord`s].
//!
//! [`PrinterGuidRecord`]: self::PrinterGuidRecord
//! [`GuidRecord`s]: crate::data::guidrecord::GuidRecord

use crate::data::guidrecord::GuidRecord;
use crate::debug::printers::de_err;

use std::io::{
    Result,
    Write, // for `std::io::Stdout.flush`
};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing the GUID and count.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_DEFAULT: Color = Color::White;

/// [`Color`] for printing prepended data like the file name.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_PREPEND: Color = Color::Cyan;

/// [`Color`] for printing some user-facing error messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] for printing some user-facing warning messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_WARNING: Color = Color::Yellow;

/// Separates the fields of one printed record.
pub const FIELD_SEP: char = '\t';

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The printed text of one [`GuidRecord`], without prefix or newline:
/// GUID, count, and optionally the offset of the first occurrence,
/// separated by [`FIELD_SEP`].
pub fn guidrecord_to_string(
    record: &GuidRecord,
    do_offset: bool,
) -> String {
    match do_offset {
        true => format!("{}{}{}{}{}", record.id, FIELD_SEP, record.count, FIELD_SEP, record.first_offset),
        false => format!("{}{}{}", record.id, FIELD_SEP, record.count),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterGuidRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer specialized for [`GuidRecord`s] of one file.
///
/// [`GuidRecord`s]: crate::data::guidrecord::GuidRecord
pub struct PrinterGuidRecord {
    /// termcolor handle to stdout
    stdout_color: termcolor::StandardStream,
    /// color settings for the record text
    color_spec_default: ColorSpec,
    /// color settings for the prepended file name or path
    color_spec_prepend: ColorSpec,
    /// the file name or path string, with separator.
    /// Embedded by the caller.
    prepend_file: Option<String>,
    /// print the offset of the first occurrence
    do_offset: bool,
    /// last value passed to `self.stdout_color.set_color()`
    color_spec_last: Option<ColorSpec>,
}

/// Aliased [`Result`] returned by various [`PrinterGuidRecord`] functions.
/// The `usize` is the count of bytes printed.
///
/// [`Result`]: std::io::Result
pub type PrinterGuidRecordResult = Result<usize>;

/// Macro that sets output color, only changed if needed.
///
/// Unnecessary changes to `set_color` may cause errant formatting bytes to
/// print to the terminal.
macro_rules! setcolor_or_return {
    ($stdout:expr, $color_spec:expr, $color_spec_last:expr) => {
        if $color_spec_last.as_ref() != Some(&$color_spec) {
            if let Err(err) = $stdout.set_color(&$color_spec) {
                de_err!("{}.set_color({:?}) returned error {}", stringify!($stdout), $color_spec, err);
                return PrinterGuidRecordResult::Err(err);
            };
            $color_spec_last = Some($color_spec.clone());
        }
    };
}

/// Macro to write to given stdout. If there is an error then
/// `return PrinterGuidRecordResult::Err`.
macro_rules! write_or_return {
    ($stdout:expr, $slice_:expr, $printed:expr) => {
        match $stdout.write_all($slice_) {
            Ok(_) => {
                $printed += $slice_.len();
            }
            Err(err) => {
                // XXX: this will print when this program stdout is truncated, like when piping
                //      to `head`, e.g. `guidscan file.txt | head`
                //          Broken pipe (os error 32)
                de_err!(
                    "{}.write({}) (len {})) error {}",
                    stringify!($stdout),
                    stringify!($slice_),
                    $slice_.len(),
                    err
                );
                return PrinterGuidRecordResult::Err(err);
            }
        }
    };
}

impl PrinterGuidRecord {
    /// Create a new `PrinterGuidRecord`.
    pub fn new(
        color_choice: ColorChoice,
        prepend_file: Option<String>,
        do_offset: bool,
    ) -> PrinterGuidRecord {
        let stdout_color = termcolor::StandardStream::stdout(color_choice);
        let mut color_spec_default: ColorSpec = ColorSpec::new();
        color_spec_default.set_fg(Some(COLOR_DEFAULT));
        let mut color_spec_prepend: ColorSpec = ColorSpec::new();
        color_spec_prepend.set_fg(Some(COLOR_PREPEND));

        PrinterGuidRecord {
            stdout_color,
            color_spec_default,
            color_spec_prepend,
            prepend_file,
            do_offset,
            color_spec_last: None,
        }
    }

    /// Prints one [`GuidRecord`] line based on `PrinterGuidRecord` settings.
    pub fn print_guidrecord(
        &mut self,
        record: &GuidRecord,
    ) -> PrinterGuidRecordResult {
        let mut printed: usize = 0;
        if let Some(prepend_file) = self.prepend_file.as_ref() {
            setcolor_or_return!(self.stdout_color, self.color_spec_prepend, self.color_spec_last);
            write_or_return!(self.stdout_color, prepend_file.as_bytes(), printed);
        }
        let text: String = guidrecord_to_string(record, self.do_offset);
        setcolor_or_return!(self.stdout_color, self.color_spec_default, self.color_spec_last);
        write_or_return!(self.stdout_color, text.as_bytes(), printed);
        write_or_return!(self.stdout_color, b"\n", printed);

        Ok(printed)
    }

    /// Print every record, in the order given.
    pub fn print_guidrecords<'a, I>(
        &mut self,
        records: I,
    ) -> PrinterGuidRecordResult
    where
        I: IntoIterator<Item = &'a GuidRecord>,
    {
        let mut printed: usize = 0;
        for record in records {
            printed += self.print_guidrecord(record)?;
        }

        Ok(printed)
    }

    /// Reset the terminal colors and flush.
    pub fn finish(&mut self) -> Result<()> {
        if self.color_spec_last.take().is_some() {
            self.stdout_color.reset()?;
        }
        self.stdout_color.flush()
    }
}

impl Drop for PrinterGuidRecord {
    fn drop(&mut self) {
        if let Err(_err) = self.finish() {
            de_err!("PrinterGuidRecord::finish() error {}", _err);
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// other printer functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
///
/// See an example <https://docs.rs/termcolor/1.1.2/termcolor/#detecting-presence-of-a-terminal>.
pub fn print_colored(
    color: Color,
    value: &[u8],
    out: &mut termcolor::StandardStream,
) -> Result<()> {
    match out.set_color(ColorSpec::new().set_fg(Some(color))) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: std.set_color({:?}) returned error {}", color, err);
            return Err(err);
        }
    };
    match out.write_all(value) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.write(…) returned error {}", err);
            return Err(err);
        }
    }
    match out.reset() {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.reset() returned error {}", err);
            return Err(err);
        }
    }
    out.flush()?;

    Ok(())
}

/// Print colored output to terminal on stderr.
///
/// See an example <https://docs.rs/termcolor/1.1.2/termcolor/#detecting-presence-of-a-terminal>.
pub fn print_colored_stderr(
    color: Color,
    color_choice_opt: Option<ColorChoice>,
    value: &[u8],
) -> Result<()> {
    let choice: ColorChoice = match color_choice_opt {
        Some(choice_) => choice_,
        None => ColorChoice::Auto,
    };
    let mut stderr = termcolor::StandardStream::stderr(choice);
    let _stdout_lock = std::io::stdout().lock();

    print_colored(color, value, &mut stderr)
}
