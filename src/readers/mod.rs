// src/readers/mod.rs

//! "Readers" for _gslib_.
//!
//! ## Overview of readers
//!
//! * A [`GuidScanner`] drives a [`BlockReader`] to derive [`Block`s].
//! * A `BlockReader` drives a [`CharDecoder`] to turn file bytes into
//!   `char`s.
//! * A `GuidScanner` strips whitespace from each `Block` into a
//!   [`CleanBuffer`], finds GUID literals with a [`GuidMatcher`], and
//!   counts them in a [`GuidAccumulator`].
//!
//! <br/>
//!
//! * A `BlockReader` measures a `Block` in decoded `char`s, not bytes.
//! * A `GuidScanner` keeps a bounded carry-over between `Block`s so a
//!   GUID literal split by a `Block` boundary is still found once.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! ---
//!
//! The _guidscan_ binary program uses a [`GuidScanner`] instance, one per
//! file, on one thread per file.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Block`s]: crate::readers::blockreader::Block
//! [`BlockReader`]: crate::readers::blockreader::BlockReader
//! [`CharDecoder`]: crate::readers::chardecoder::CharDecoder
//! [`CleanBuffer`]: crate::readers::whitespace::CleanBuffer
//! [`GuidMatcher`]: crate::readers::guidmatcher::GuidMatcher
//! [`GuidScanner`]: crate::readers::guidscanner::GuidScanner
//! [`GuidAccumulator`]: crate::data::guidrecord::GuidAccumulator

pub mod blockreader;
pub mod chardecoder;
pub mod filepreprocessor;
pub mod guidmatcher;
pub mod guidscanner;
pub mod helpers;
pub mod summary;
pub mod whitespace;
