// src/lib.rs

//! _gslib_ is the library used by the program _guidscan_.
//!
//! _gslib_ finds GUID (UUID) literals in text files of any size, and counts
//! each distinct GUID found. A file is read in bounded blocks of decoded
//! characters; a file is never loaded whole.
//!
//! Three written forms of a GUID are recognized, and any amount of whitespace
//! may appear within a literal:
//!
//! ```text
//! a864f394-c94e-4727-8eeb-89223e3096af
//! 0xa864f394,0xc94e,0x4727,0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf
//! {0xa864f394,0xc94e,0x4727,{0x8e,0xeb,0x89,0x22,0x3e,0x30,0x96,0xaf}}
//! ```
//!
//! All three are the same GUID and are counted together.
//!
//! Start with [_Overview of readers_] and [_Definitions of data_].
//!
//! [_Overview of readers_]: crate::readers
//! [_Definitions of data_]: crate::data

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
