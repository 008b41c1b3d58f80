// src/printer/mod.rs

//! The `printer` module is for printing user-facing results
//! ([`GuidRecord`s]) with text effects (color)
//! and per-line prepended data (file name or path),
//! and the CLI option `--summary`.
//!
//! [`GuidRecord`s]: crate::data::guidrecord::GuidRecord

pub mod printers;
pub mod summary;
