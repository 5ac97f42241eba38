//! Reader for the SR28 flat files.
//!
//! The release ships one record per line, fields separated by `^`, text fields
//! wrapped in `~`, encoded as Windows-1252 (free text contains curly quotes and
//! other characters outside ASCII). Files have no header row and are not
//! self-describing, so the caller supplies the column-to-field mapping.
//!
//! Records are read as raw bytes with the `csv` crate and each field is then
//! decoded with `encoding_rs`.

use crate::import::coerce::{self, CellValue, CoerceError};
use crate::import::error::{ImportError, ImportResult};
use crate::schema::FieldDescriptor;
use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One coerced source line, in field-list order.
pub type Row = Vec<Option<CellValue>>;

/// Framing and encoding of a source file.
#[derive(Debug, Clone, Copy)]
pub struct SourceFormat {
    pub delimiter: u8,
    pub quote: u8,
    pub encoding: &'static Encoding,
}

impl SourceFormat {
    /// `^` separated, `~` quoted, Windows-1252.
    pub const SR28: SourceFormat = SourceFormat {
        delimiter: b'^',
        quote: b'~',
        encoding: WINDOWS_1252,
    };
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self::SR28
    }
}

/// Open `path` and parse every record into coerced rows.
pub fn read_rows(
    path: &Path,
    fields: &[&'static FieldDescriptor],
    format: &SourceFormat,
) -> ImportResult<Vec<Row>> {
    let io_error = |source: std::io::Error| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(io_error)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_bytes(&bytes, &file_name, fields, format)
}

/// Parse records from any reader.
///
/// Columns beyond the field list are ignored. A record with fewer columns than
/// the field list fails the whole file; a blank line counts as a record with
/// no columns.
pub fn parse_rows<R: Read>(
    mut reader: R,
    file_name: &str,
    fields: &[&'static FieldDescriptor],
    format: &SourceFormat,
) -> ImportResult<Vec<Row>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| ImportError::Io {
            path: file_name.into(),
            source,
        })?;

    parse_bytes(&bytes, file_name, fields, format)
}

fn parse_bytes(
    bytes: &[u8],
    file_name: &str,
    fields: &[&'static FieldDescriptor],
    format: &SourceFormat,
) -> ImportResult<Vec<Row>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(format.delimiter)
        .quote(format.quote)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();

    // The csv reader skips blank lines silently, so walk the line layout alongside it
    for start in line_starts(bytes, format) {
        let line = match start {
            LineStart::Blank(line) => {
                return Err(ImportError::TooFewColumns {
                    file: file_name.to_string(),
                    line,
                    expected: fields.len(),
                    found: 0,
                });
            }
            LineStart::Record(line) => line,
        };

        let more = csv_reader
            .read_byte_record(&mut record)
            .map_err(|source| ImportError::Csv {
                file: file_name.to_string(),
                source,
            })?;
        if !more {
            break;
        }

        if record.len() < fields.len() {
            return Err(ImportError::TooFewColumns {
                file: file_name.to_string(),
                line,
                expected: fields.len(),
                found: record.len(),
            });
        }

        let mut row = Vec::with_capacity(fields.len());
        for (field, raw) in fields.iter().zip(record.iter()) {
            let decoded = decode_field(raw, format.encoding);
            let value = coerce::coerce(field.kind, &decoded).map_err(|err| match err {
                CoerceError::InvalidBoolean(token) => ImportError::InvalidBoolean {
                    file: file_name.to_string(),
                    line,
                    field: field.name,
                    token,
                },
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    log::debug!("parsed {} records from {}", rows.len(), file_name);
    Ok(rows)
}

/// Where a physical line begins: a record, or an empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStart {
    Record(u64),
    Blank(u64),
}

/// One-based line of every record and blank line, in file order.
///
/// `\r\n`, `\r` and `\n` each end a line, as they do for the csv reader.
/// Terminators inside a quoted field belong to that field. A terminator at
/// the very end of the input does not open another line.
fn line_starts(bytes: &[u8], format: &SourceFormat) -> Vec<LineStart> {
    let mut starts = Vec::new();
    let mut line: u64 = 1;
    let mut at_line_start = true;
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];

        if in_quotes {
            if byte == format.quote {
                if bytes.get(idx + 1) == Some(&format.quote) {
                    idx += 1;
                } else {
                    in_quotes = false;
                }
            } else if byte == b'\n' {
                line += 1;
            }
            idx += 1;
            continue;
        }

        match byte {
            b'\r' | b'\n' => {
                if at_line_start {
                    starts.push(LineStart::Blank(line));
                }
                if byte == b'\r' && bytes.get(idx + 1) == Some(&b'\n') {
                    idx += 1;
                }
                line += 1;
                at_line_start = true;
                at_field_start = true;
            }
            _ => {
                if at_line_start {
                    starts.push(LineStart::Record(line));
                    at_line_start = false;
                }
                if byte == format.quote && at_field_start {
                    in_quotes = true;
                }
                at_field_start = byte == format.delimiter;
            }
        }
        idx += 1;
    }

    starts
}

/// Decode one field. Single-byte code pages map every byte, so this cannot fail.
fn decode_field(raw: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(raw);
    decoded.into_owned()
}
