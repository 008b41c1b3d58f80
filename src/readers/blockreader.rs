// src/readers/blockreader.rs

//! Implements [`BlockReader`], the driver of reading bytes from a file and
//! decoding them into blocks of `char`s.
//!
//! A _block_ here is measured in decoded `char`s, not bytes. The byte
//! reads underneath are bounded by [`BYTES_READ_SZ_MAX`] so memory use is
//! bounded for any block size.
//!
//! [`BlockReader`]: crate::readers::blockreader::BlockReader
//! [`BYTES_READ_SZ_MAX`]: crate::readers::blockreader::BYTES_READ_SZ_MAX

#[doc(hidden)]
use crate::common::{Bytes, Count, FPath, FileSz};
use crate::common::{File, FileMetadata, FileOpenOptions, ResultS3};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use crate::readers::chardecoder::{CharDecoder, DecodingUsed, TextEncoding, BOM_LEN_MAX};

use std::fmt;
use std::io::prelude::Read;
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_ge, debug_assert_le};
#[allow(unused_imports)]
use ::si_trace_print::{def1n, def1o, def1x, def1ñ, defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Block Size in decoded `char`s.
pub type BlockSz = u64;

/// A _block_ of decoded `char`s read from some file.
pub type Block = String;

/// A typed [`ResultS3`] for function [`BlockReader::read_block`].
///
/// [`ResultS3`]: crate::common::ResultS3
/// [`BlockReader::read_block`]: BlockReader::read_block
pub type ResultS3ReadBlock = ResultS3<Block, Error>;

/// Minimum Block Size (inclusive).
pub const BLOCKSZ_MIN: BlockSz = 0x1000;

/// Maximum Block Size (inclusive).
pub const BLOCKSZ_MAX: BlockSz = 0x4000_0000;

/// Default Block Size.
pub const BLOCKSZ_DEF: BlockSz = 0x10000;

/// Most bytes requested from the file by one `read` call.
pub const BYTES_READ_SZ_MAX: usize = 0x10_0000;

/// Clamp `blocksz` into [`BLOCKSZ_MIN`, `BLOCKSZ_MAX`].
pub const fn blocksz_clamp(blocksz: BlockSz) -> BlockSz {
    if blocksz < BLOCKSZ_MIN {
        BLOCKSZ_MIN
    } else if blocksz > BLOCKSZ_MAX {
        BLOCKSZ_MAX
    } else {
        blocksz
    }
}

/// Statistics of one `BlockReader`, for CLI option `--summary`.
#[allow(non_snake_case)]
#[derive(Clone, Debug, Default)]
pub struct SummaryBlockReader {
    pub blockreader_bytes: Count,
    pub blockreader_bytes_total: FileSz,
    pub blockreader_blocks: Count,
    pub blockreader_chars: Count,
    pub blockreader_blocksz: BlockSz,
    pub blockreader_encoding: TextEncoding,
    /// `None` if nothing was read.
    pub blockreader_decoding: Option<DecodingUsed>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BlockReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `BlockReader` reads a file sequentially and returns blocks of up to
/// `blocksz` decoded `char`s.
///
/// A `BlockReader` does not know about GUIDs or whitespace.
/// A `BlockReader` only reads forward; no block is read twice.
///
/// The file handle is owned by the `BlockReader` and closed when it is
/// dropped.
pub struct BlockReader {
    /// Path to the file.
    path: FPath,
    /// Open file handle.
    file: File,
    /// File size in bytes.
    filesz: FileSz,
    /// Maximum `char`s returned by one `read_block`.
    blocksz: BlockSz,
    /// Encoding requested by the user.
    encoding: TextEncoding,
    /// Created after the first bytes are sniffed for a byte-order-mark.
    decoder: Option<CharDecoder>,
    /// First bytes of the file, held until enough to sniff a byte-order-mark.
    sniff: Bytes,
    /// Reusable buffer for raw reads.
    buffer: Bytes,
    /// Decoded `char`s not yet returned.
    pending: String,
    /// Count of `char`s in `pending`.
    pending_chars: usize,
    /// The file is exhausted and the decoder is flushed.
    eof_bytes: bool,
    /// Count of bytes read from the file.
    count_bytes: Count,
    /// Count of blocks returned.
    count_blocks: Count,
    /// Count of `char`s returned.
    count_chars: Count,
}

impl fmt::Debug for BlockReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("BlockReader")
            .field("path", &self.path)
            .field("file", &self.file)
            .field("filesz", &self.filesz)
            .field("blocksz", &self.blocksz)
            .field("encoding", &self.encoding)
            .field("decoding", &self.decoding())
            .field("pending chars", &self.pending_chars)
            .field("eof bytes", &self.eof_bytes)
            .field("bytes read", &self.count_bytes)
            .field("blocks", &self.count_blocks)
            .field("chars", &self.count_chars)
            .finish()
    }
}

impl BlockReader {
    /// Create a new `BlockReader`.
    ///
    /// `blocksz` is clamped into [`BLOCKSZ_MIN`, `BLOCKSZ_MAX`].
    ///
    /// Fails with `ErrorKind::NotFound` if `path` does not exist, with
    /// `ErrorKind::PermissionDenied` if it cannot be read, and with
    /// `ErrorKind::Unsupported` if it is not a regular file.
    pub fn new(
        path: FPath,
        blocksz: BlockSz,
        encoding: TextEncoding,
    ) -> Result<BlockReader> {
        def1n!("({:?}, {:?}, {:?})", path, blocksz, encoding);

        let blocksz_: BlockSz = blocksz_clamp(blocksz);
        if blocksz_ != blocksz {
            def1o!("blocksz {} clamped to {}", blocksz, blocksz_);
        }
        let path_std: &Path = Path::new(&path);

        let mut open_options = FileOpenOptions::new();
        def1o!("open_options.read(true).open({:?})", path);
        let file: File = match open_options
            .read(true)
            .open(path_std)
        {
            Ok(val) => val,
            Err(err) => {
                def1x!("return {:?}", err);
                return Err(err);
            }
        };
        let file_metadata: FileMetadata = match file.metadata() {
            Ok(val) => val,
            Err(err) => {
                def1x!("return {:?}", err);
                return Err(err);
            }
        };
        if !file_metadata.is_file() {
            def1x!("return Err(Unsupported)");
            return Err(Error::new(
                ErrorKind::Unsupported,
                format!("Path is not a file {:?}", path),
            ));
        }
        let filesz: FileSz = file_metadata.len() as FileSz;
        let bytes_read_sz: usize = std::cmp::min(blocksz_ as usize, BYTES_READ_SZ_MAX);

        def1x!("return Ok(BlockReader) filesz {}", filesz);

        Ok(BlockReader {
            path,
            file,
            filesz,
            blocksz: blocksz_,
            encoding,
            decoder: None,
            sniff: Bytes::with_capacity(BOM_LEN_MAX),
            buffer: vec![0; bytes_read_sz],
            pending: String::new(),
            pending_chars: 0,
            eof_bytes: false,
            count_bytes: 0,
            count_blocks: 0,
            count_chars: 0,
        })
    }

    #[inline(always)]
    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// The effective (clamped) block size.
    #[inline(always)]
    pub const fn blocksz(&self) -> BlockSz {
        self.blocksz
    }

    /// File size in bytes.
    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }

    #[inline(always)]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The decoding in use, known after the first `read_block`.
    pub fn decoding(&self) -> Option<DecodingUsed> {
        self.decoder
            .as_ref()
            .map(|decoder| decoder.used())
    }

    /// `true` once every byte of the file has been read and every decoded
    /// `char` has been returned.
    ///
    /// Already `true` right after `read_block` returns the last block.
    #[inline(always)]
    pub const fn is_eof(&self) -> bool {
        self.eof_bytes && self.pending_chars == 0
    }

    pub const fn count_bytes(&self) -> Count {
        self.count_bytes
    }

    pub const fn count_blocks(&self) -> Count {
        self.count_blocks
    }

    pub const fn count_chars(&self) -> Count {
        self.count_chars
    }

    /// One `read` from the file into `self.buffer`.
    /// Retries when interrupted.
    fn read_bytes(&mut self) -> Result<usize> {
        loop {
            match self.file.read(&mut self.buffer) {
                Ok(len) => {
                    self.count_bytes += len as Count;
                    return Ok(len);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Read more bytes and decode them into `self.pending`.
    ///
    /// The decoder is created once at least [`BOM_LEN_MAX`] bytes were read,
    /// or the file ended.
    fn fill_pending(&mut self) -> Result<()> {
        def1n!("pending_chars {}", self.pending_chars);
        let len: usize = self.read_bytes()?;
        let last: bool = len == 0;
        let mut src: &[u8] = &self.buffer[..len];
        def1o!("read {} bytes, last {}", len, last);

        if self.decoder.is_none() {
            let take: usize = std::cmp::min(BOM_LEN_MAX - self.sniff.len(), src.len());
            self.sniff.extend_from_slice(&src[..take]);
            src = &src[take..];
            if self.sniff.len() < BOM_LEN_MAX && !last {
                def1x!("sniffing, have {} bytes", self.sniff.len());
                return Ok(());
            }
            let (used, bom_len) = self.encoding.resolve(&self.sniff);
            def1o!("decoding {:?}, skip BOM of {} bytes", used, bom_len);
            let mut decoder = CharDecoder::new(used);
            let sniffed_last: bool = last && src.is_empty();
            self.pending_chars += decoder.decode(&self.sniff[bom_len..], &mut self.pending, sniffed_last);
            self.sniff.clear();
            self.decoder = Some(decoder);
            if sniffed_last {
                self.eof_bytes = true;
                def1x!("eof_bytes; pending_chars {}", self.pending_chars);
                return Ok(());
            }
        }
        if let Some(decoder) = self.decoder.as_mut() {
            self.pending_chars += decoder.decode(src, &mut self.pending, last);
        }
        if last {
            self.eof_bytes = true;
        }
        def1x!("pending_chars {}, eof_bytes {}", self.pending_chars, self.eof_bytes);

        Ok(())
    }

    /// Read the next block of up to `blocksz` decoded `char`s.
    ///
    /// Returns `Found(block)` with at least one `char`,
    /// `Done` when no `char`s remain,
    /// `Err` for file read errors.
    pub fn read_block(&mut self) -> ResultS3ReadBlock {
        defn!("blocks {}", self.count_blocks);
        let blocksz: usize = self.blocksz as usize;
        // read past `blocksz` so `is_eof` is exact after the last block
        while self.pending_chars <= blocksz && !self.eof_bytes {
            if let Err(err) = self.fill_pending() {
                defx!("return Err({:?})", err);
                return ResultS3ReadBlock::Err(err);
            }
        }
        if self.pending_chars == 0 {
            defx!("return Done");
            return ResultS3ReadBlock::Done;
        }
        let block_chars: usize;
        let block: Block = match self.pending_chars > blocksz {
            true => {
                // split after the `blocksz`th char
                let at: usize = match self.pending.char_indices().nth(blocksz) {
                    Some((at, _)) => at,
                    None => self.pending.len(),
                };
                let rest: String = self.pending.split_off(at);
                block_chars = blocksz;
                self.pending_chars -= blocksz;
                std::mem::replace(&mut self.pending, rest)
            }
            false => {
                block_chars = self.pending_chars;
                self.pending_chars = 0;
                std::mem::take(&mut self.pending)
            }
        };
        debug_assert_le!(block_chars, blocksz, "block too large");
        self.count_blocks += 1;
        self.count_chars += block_chars as Count;
        defx!("return Found(block) ({} chars), pending_chars {}", block_chars, self.pending_chars);

        ResultS3ReadBlock::Found(block)
    }

    pub fn summary(&self) -> SummaryBlockReader {
        SummaryBlockReader {
            blockreader_bytes: self.count_bytes,
            blockreader_bytes_total: self.filesz,
            blockreader_blocks: self.count_blocks,
            blockreader_chars: self.count_chars,
            blockreader_blocksz: self.blocksz,
            blockreader_encoding: self.encoding,
            blockreader_decoding: self.decoding(),
        }
    }
}
