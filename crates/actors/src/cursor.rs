//! Explicit read cursor over an append-only file
//!
//! The cursor is a plain byte offset. Each read covers exactly the bytes
//! between the offset and the current end of the file, then moves the
//! offset past what was decoded.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use wintail_core::error::{Error, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Owned file handle plus the offset of the first unreported byte
#[derive(Debug)]
pub struct TailCursor {
    path: PathBuf,
    file: File,
    offset: u64,
    strip_bom: bool,
}

impl TailCursor {
    /// Open `path` for reading
    ///
    /// The handle does not lock the file, so writers may keep appending.
    pub fn open(path: &Path, strip_bom: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            offset: 0,
            strip_bom,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read everything appended since the last call and advance the offset
    ///
    /// If the file shrank below the offset it was truncated or replaced; the
    /// offset resets to zero and the whole current content counts as new.
    pub fn read_to_end(&mut self) -> io::Result<String> {
        let len = self.file.metadata()?.len();
        if len < self.offset {
            warn!(
                "{:?} shrank from {} to {} bytes, reading from start",
                self.path, self.offset, len
            );
            self.offset = 0;
        }

        self.file.seek(SeekFrom::Start(self.offset))?;
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;

        let skip = if self.strip_bom && self.offset == 0 && buf.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };
        let (text, consumed) = decode_prefix(&buf[skip..]);
        self.offset += (skip + consumed) as u64;

        trace!(
            "Read {} bytes from {:?}, offset now {}",
            skip + consumed,
            self.path,
            self.offset
        );
        Ok(text)
    }
}

/// Decode as much of `bytes` as forms complete UTF-8
///
/// Returns the text and how many bytes it covers. A truncated multi-byte
/// sequence at the end is left out so the next read can complete it.
fn decode_prefix(bytes: &[u8]) -> (String, usize) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_owned(), bytes.len()),
        Err(e) if e.error_len().is_none() => {
            let valid = e.valid_up_to();
            (String::from_utf8_lossy(&bytes[..valid]).into_owned(), valid)
        }
        Err(_) => {
            // Invalid bytes somewhere before the end; check the tail separately
            let keep = incomplete_suffix_len(bytes);
            let end = bytes.len() - keep;
            (String::from_utf8_lossy(&bytes[..end]).into_owned(), end)
        }
    }
}

/// Length of a trailing, not yet complete, UTF-8 sequence
fn incomplete_suffix_len(bytes: &[u8]) -> usize {
    let start = bytes.len().saturating_sub(3);
    for i in (start..bytes.len()).rev() {
        let b = bytes[i];
        if b & 0xC0 == 0x80 {
            continue;
        }
        let needed = match b {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return 0,
        };
        let have = bytes.len() - i;
        return if have < needed { have } else { 0 };
    }
    0
}
