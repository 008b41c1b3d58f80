// src/readers/filepreprocessor.rs

//! Checks a user-passed path before a [`GuidScanner`] is created for it.
//!
//! Invalid paths are reported by the driver and never scanned.
//!
//! [`GuidScanner`]: crate::readers::guidscanner::GuidScanner

use crate::common::{FPath, File, FileMetadata, Path};

use std::io::ErrorKind;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FilePreProcessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Initial path processing return type.
#[derive(Debug, Eq, PartialEq)]
pub enum ProcessPathResult {
    /// File can be scanned
    FileValid(FPath),
    /// Filesystem permissions do not allow reading the file
    FileErrNoPermissions(FPath),
    /// Path exists and is not a file
    FileErrNotAFile(FPath),
    /// Path does not exist
    FileErrNotExist(FPath),
    /// Some other error, with its message
    FileErr(FPath, String),
}

pub type ProcessPathResults = Vec<ProcessPathResult>;

impl ProcessPathResult {
    pub fn path(&self) -> &FPath {
        match self {
            ProcessPathResult::FileValid(path)
            | ProcessPathResult::FileErrNoPermissions(path)
            | ProcessPathResult::FileErrNotAFile(path)
            | ProcessPathResult::FileErrNotExist(path)
            | ProcessPathResult::FileErr(path, _) => path,
        }
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self, ProcessPathResult::FileValid(_))
    }
}

/// Check `path` exists, is a regular file (or a symlink to one), and can be
/// opened for reading.
///
/// The file is opened and immediately closed.
pub fn process_path(path: &FPath) -> ProcessPathResult {
    defn!("({:?})", path);

    let std_path: &Path = Path::new(path);
    let metadata: FileMetadata = match std::fs::metadata(std_path) {
        Ok(val) => val,
        Err(err) => {
            let result = match err.kind() {
                ErrorKind::NotFound => ProcessPathResult::FileErrNotExist(path.clone()),
                ErrorKind::PermissionDenied => ProcessPathResult::FileErrNoPermissions(path.clone()),
                _ => ProcessPathResult::FileErr(path.clone(), err.to_string()),
            };
            defx!("metadata Err {:?}; return {:?}", err, result);
            return result;
        }
    };
    if !metadata.is_file() {
        defx!("not a file; return FileErrNotAFile");
        return ProcessPathResult::FileErrNotAFile(path.clone());
    }
    let result = match File::open(std_path) {
        Ok(_file) => ProcessPathResult::FileValid(path.clone()),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            ProcessPathResult::FileErrNoPermissions(path.clone())
        }
        Err(err) => ProcessPathResult::FileErr(path.clone(), err.to_string()),
    };
    defx!("return {:?}", result);

    result
}

/// [`process_path`] for each of `paths`, in order.
pub fn process_paths(paths: &[FPath]) -> ProcessPathResults {
    paths
        .iter()
        .map(process_path)
        .collect()
}
