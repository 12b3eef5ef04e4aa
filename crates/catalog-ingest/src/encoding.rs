//! File loading and text decoding.

use std::fs;
use std::path::Path;

use catalog_model::InputEncoding;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
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
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input, which the exporter never produces.
fn reject_utf16(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Decodes raw file bytes into text, dropping a leading UTF-8 BOM.
pub fn decode_bytes(bytes: &[u8], encoding: InputEncoding, path: &Path) -> Result<String> {
    reject_utf16(bytes, path)?;
    match encoding {
        InputEncoding::Utf8 => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                return Err(IngestError::InvalidEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-8",
                });
            }
            Ok(text.into_owned())
        }
        InputEncoding::Windows1252 => {
            let (text, actual, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            if actual != encoding_rs::WINDOWS_1252 {
                tracing::debug!(
                    path = %path.display(),
                    detected = actual.name(),
                    "byte order mark overrides configured encoding"
                );
            }
            Ok(text.into_owned())
        }
    }
}

/// Reads a whole file as text in the given encoding.
pub fn read_text(path: &Path, encoding: InputEncoding) -> Result<String> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)?;
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    decode_bytes(&bytes, encoding, path)
}
