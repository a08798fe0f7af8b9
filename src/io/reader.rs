//! Dataset source reading.
//!
//! Provides buffered, line-by-line access to a route dataset file so that
//! large datasets are streamed rather than read into memory at once.

use crate::error::{IoError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Read buffer size for dataset files (64KB).
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered reader over a dataset file.
///
/// # Examples
///
/// ```no_run
/// use busroute::io::SourceReader;
///
/// let reader = SourceReader::open("data/bus-routes.txt").unwrap();
/// for line in reader.lines() {
///     let _line = line.unwrap();
/// }
/// ```
pub struct SourceReader {
    /// Buffered file handle.
    reader: BufReader<File>,
    /// File size in bytes.
    size: u64,
    /// File path for error messages.
    path: String,
}

impl SourceReader {
    /// Opens a dataset file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        Ok(Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, file),
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Consumes the reader and returns an iterator over its lines.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped. A line that is not
    /// valid UTF-8 is yielded as an error.
    #[must_use]
    pub fn lines(self) -> Lines<BufReader<File>> {
        self.reader.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_read_lines() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.txt");
        std::fs::write(&file_path, "2\r\n1 10 20\n2 30 40\n").unwrap();

        let reader = SourceReader::open(&file_path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["2", "1 10 20", "2 30 40"]);
    }

    #[test]
    fn test_open_nonexistent_file() {
        let result = SourceReader::open("/nonexistent/path/routes.txt");
        assert!(matches!(
            result,
            Err(Error::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_reader_size_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.txt");
        std::fs::write(&file_path, "0\n").unwrap();

        let reader = SourceReader::open(&file_path).unwrap();
        assert_eq!(reader.size(), 2);
        assert!(reader.path().contains("routes.txt"));
    }

    #[test]
    fn test_invalid_utf8_line_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("binary.txt");
        std::fs::write(&file_path, [b'1', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        let mut lines = SourceReader::open(&file_path).unwrap().lines();
        assert_eq!(lines.next().unwrap().unwrap(), "1");
        assert!(lines.next().unwrap().is_err());
    }
}
