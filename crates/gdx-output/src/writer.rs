//! UTF-16LE file sink with record-separator handling.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gdx_model::Table;

use crate::error::{OutputError, Result};

/// Record separator appended after every serialized line.
///
/// Export files are produced and consumed on Windows; the reader side
/// accepts plain LF as well.
pub const LINE_ENDING: &str = "\r\n";

/// Buffered writer for one table's output file.
///
/// Creates the output directory if absent, encodes each line as UTF-16LE
/// and appends [`LINE_ENDING`]. [`TableWriter::finish`] consumes the
/// writer so the final flush happens exactly once.
pub struct TableWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    scratch: Vec<u8>,
}

impl TableWriter {
    /// Open `<dir>/<table>.txt` for writing, creating `dir` if needed.
    pub fn create(dir: &Path, table: &Table) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| OutputError::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = table.path_in(dir);
        let file = File::create(&path).map_err(|source| OutputError::FileCreate {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "output file created");
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            scratch: Vec::new(),
        })
    }

    /// Destination file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode one line, append the record separator, and write it.
    ///
    /// Returns the encoded bytes of this line so callers can observe the
    /// raw output stream.
    pub fn write_line(&mut self, line: &str) -> Result<&[u8]> {
        self.scratch.clear();
        encode_utf16le(line, &mut self.scratch);
        encode_utf16le(LINE_ENDING, &mut self.scratch);
        self.writer
            .write_all(&self.scratch)
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(&self.scratch)
    }

    /// Flush buffered bytes and close the file.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn encode_utf16le(text: &str, out: &mut Vec<u8>) {
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn decode_utf16le(bytes: &[u8]) -> String {
        assert_eq!(bytes.len() % 2, 0, "odd byte count");
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).unwrap()
    }

    #[test]
    fn test_writes_utf16le_with_crlf() {
        let dir = TempDir::new().unwrap();
        let table = Table::new("players");
        let mut writer = TableWriter::create(dir.path(), &table).unwrap();
        writer.write_line("1,Eriksson").unwrap();
        writer.write_line("2,Dahl").unwrap();
        writer.finish().unwrap();

        let bytes = fs::read(dir.path().join("players.txt")).unwrap();
        assert_eq!(decode_utf16le(&bytes), "1,Eriksson\r\n2,Dahl\r\n");
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("week34");
        let table = Table::new("teams");
        let writer = TableWriter::create(&nested, &table).unwrap();
        writer.finish().unwrap();
        assert!(nested.join("teams.txt").exists());
    }

    #[test]
    fn test_write_line_returns_encoded_bytes() {
        let dir = TempDir::new().unwrap();
        let table = Table::new("t");
        let mut writer = TableWriter::create(dir.path(), &table).unwrap();
        let bytes = writer.write_line("ab").unwrap();
        assert_eq!(bytes, b"a\0b\0\r\0\n\0");
    }

    #[test]
    fn test_non_ascii_content() {
        let dir = TempDir::new().unwrap();
        let table = Table::new("t");
        let mut writer = TableWriter::create(dir.path(), &table).unwrap();
        writer.write_line("1,Müller Ωmega").unwrap();
        writer.finish().unwrap();

        let bytes = fs::read(dir.path().join("t.txt")).unwrap();
        assert_eq!(decode_utf16le(&bytes), "1,Müller Ωmega\r\n");
    }
}
