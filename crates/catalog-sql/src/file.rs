//! Append-only SQL output file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SqlError};

/// Appends statements to a file shared by every batch of a run.
///
/// Existing content is kept; running twice appends twice.
#[derive(Debug)]
pub struct SqlFileWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    statements: usize,
}

impl SqlFileWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SqlError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            statements: 0,
        })
    }

    fn write_error(&self, source: std::io::Error) -> SqlError {
        SqlError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Appends one statement followed by a newline and flushes it.
    pub fn append(&mut self, statement: &str) -> Result<()> {
        writeln!(self.writer, "{statement}").map_err(|e| self.write_error(e))?;
        self.writer.flush().map_err(|e| self.write_error(e))?;
        self.statements += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Statements appended through this writer.
    pub fn statements(&self) -> usize {
        self.statements
    }
}
