//! Streaming UTF-16LE decoding and line splitting.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use encoding_rs::{DecoderResult, UTF_16LE};

use crate::error::{IngestError, Result};

/// Number of leading header lines in an export file.
pub const HEADER_LINES: usize = 1;

const READ_CHUNK: usize = 8 * 1024;

/// Incremental line reader over a UTF-16LE export file.
///
/// Decodes the byte stream chunk by chunk, splits on line boundaries
/// (accepting both LF and CRLF), discards empty lines, and skips a fixed
/// number of leading header lines. Only one chunk of input and the
/// currently incomplete line are held in memory at a time.
pub struct LineReader {
    reader: BufReader<File>,
    decoder: encoding_rs::Decoder,
    path: PathBuf,
    /// Decoded text not yet terminated by a line break.
    carry: String,
    /// Complete lines awaiting emission.
    pending: VecDeque<String>,
    /// Header lines still to be discarded.
    skip: usize,
    /// Bytes consumed from the source so far.
    consumed: u64,
    at_eof: bool,
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("path", &self.path)
            .field("carry", &self.carry)
            .field("pending", &self.pending)
            .field("skip", &self.skip)
            .field("consumed", &self.consumed)
            .field("at_eof", &self.at_eof)
            .finish_non_exhaustive()
    }
}

impl LineReader {
    /// Open `path` and skip the first `header_lines` non-empty lines.
    pub fn open(path: &Path, header_lines: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(Self {
            reader: BufReader::new(file),
            decoder: UTF_16LE.new_decoder_with_bom_removal(),
            path: path.to_path_buf(),
            carry: String::new(),
            pending: VecDeque::new(),
            skip: header_lines,
            consumed: 0,
            at_eof: false,
        })
    }

    /// Decode one more chunk of input into `carry`, splitting off any
    /// complete lines into `pending`.
    fn fill_pending(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self
            .reader
            .read(&mut chunk)
            .map_err(|e| IngestError::FileRead {
                path: self.path.clone(),
                source: e,
            })?;
        let last = n == 0;

        let mut read_total = 0;
        loop {
            let remaining = &chunk[read_total..n];
            let capacity = self
                .decoder
                .max_utf8_buffer_length_without_replacement(remaining.len())
                .unwrap_or(READ_CHUNK * 3);
            let mut out = String::with_capacity(capacity.max(4));
            let (result, read) =
                self.decoder
                    .decode_to_string_without_replacement(remaining, &mut out, last);
            read_total += read;
            self.carry.push_str(&out);
            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(..) => {
                    return Err(IngestError::Decode {
                        path: self.path.clone(),
                        offset: self.consumed + read_total as u64,
                    });
                }
            }
        }
        self.consumed += n as u64;

        while let Some(pos) = self.carry.find('\n') {
            let mut line: String = self.carry.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            self.pending.push_back(line);
        }

        if last {
            self.at_eof = true;
            if !self.carry.is_empty() {
                self.pending.push_back(std::mem::take(&mut self.carry));
            }
        }
        Ok(())
    }
}

impl Iterator for LineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.pending.pop_front() {
                Some(line) if line.is_empty() => continue,
                Some(_line) if self.skip > 0 => {
                    self.skip -= 1;
                    continue;
                }
                Some(line) => return Some(Ok(line)),
                None if self.at_eof => return None,
                None => {
                    if let Err(e) = self.fill_pending() {
                        // Poison the reader so a caller that keeps pulling
                        // after an error sees end of stream.
                        self.at_eof = true;
                        self.pending.clear();
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
