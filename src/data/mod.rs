// src/data/mod.rs

//! The `data` module is specialized data containers for [`GuidId`]s and
//! [`GuidRecord`]s.
//!
//! ## Definitions of data
//!
//! ### GUID
//!
//! A "GUID" (or "UUID") is a 128-bit identifier with the standard field
//! layout `time_low`, `time_mid`, `time_hi_and_version`,
//! `clock_seq_hi_and_reserved`, `clock_seq_low`, `node`.
//!
//! A GUID is represented by a [`GuidId`]. However the GUID was written in a
//! file, it has exactly one `GuidId`.
//!
//! ### GUID record
//!
//! A "GUID record" is a distinct `GuidId` found in one file and the count of
//! times it was found.
//!
//! A GUID record is represented by a [`GuidRecord`] and counted by a
//! [`GuidAccumulator`].
//!
//! Also see [_Overview of readers_].
//!
//! [_Overview of readers_]: crate::readers
//! [`GuidId`]: crate::data::guid::GuidId
//! [`GuidRecord`]: crate::data::guidrecord::GuidRecord
//! [`GuidAccumulator`]: crate::data::guidrecord::GuidAccumulator

pub mod guid;
pub mod guidrecord;
