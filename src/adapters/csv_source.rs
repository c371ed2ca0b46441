//! CSV input.
//!
//! The first record is the header row. A UTF-8 byte-order mark in front of
//! the first header is dropped. Records may be shorter or longer than the
//! header; missing cells read as empty.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Row;
use crate::infrastructure::config::ConfigError;

const BOM: char = '\u{feff}';

/// An opened CSV file with its header row already read.
#[derive(Debug)]
pub struct CsvSource {
    reader: csv::Reader<File>,
    headers: Vec<String>,
}

impl CsvSource {
    /// Open `path` and read its header row.
    ///
    /// Fails when the file does not exist, cannot be read, or has no
    /// header row.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ConfigError::InputNotFound(path));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|source| ConfigError::CsvRead {
                path: path.clone(),
                source,
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| ConfigError::CsvRead {
                path: path.clone(),
                source,
            })?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == 0 {
                    h.trim_start_matches(BOM).to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.iter().all(String::is_empty) {
            return Err(ConfigError::MissingHeaders(path));
        }

        tracing::debug!(path = %path.display(), columns = headers.len(), "opened CSV input");
        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Iterate the data records in file order.
    ///
    /// A record the CSV reader cannot parse is yielded as
    /// [`DomainError::MalformedRow`] so the batch can skip it.
    pub fn rows(&mut self) -> impl Iterator<Item = DomainResult<Row>> + '_ {
        let headers = &self.headers;
        self.reader.records().map(move |record| {
            record
                .map(|record| Row::from_record(headers.iter().map(String::as_str), record.iter()))
                .map_err(|e| DomainError::MalformedRow(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let file = create_temp_csv("Summary,Labels\nFix bug,\"a, b\"\nOther,\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert_eq!(source.headers(), ["Summary", "Labels"]);

        let rows: Vec<Row> = source.rows().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Labels"), "a, b");
        assert_eq!(rows[1].get("Summary"), "Other");
        assert_eq!(rows[1].get("Labels"), "");
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let file = create_temp_csv("\u{feff}Summary,Labels\nx,y\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert_eq!(source.headers()[0], "Summary");
        let row = source.rows().next().unwrap().unwrap();
        assert_eq!(row.get("Summary"), "x");
    }

    #[test]
    fn test_multiline_quoted_cell() {
        let file = create_temp_csv("Summary,Description\nFix,\"line1\nline2\"\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        let row = source.rows().next().unwrap().unwrap();
        assert_eq!(row.get("Description"), "line1\nline2");
    }

    #[test]
    fn test_short_and_long_records() {
        let file = create_temp_csv("A,B,C\n1\n1,2,3,4\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        let rows: Vec<Row> = source.rows().map(Result::unwrap).collect();
        assert_eq!(rows[0].get("A"), "1");
        assert_eq!(rows[0].get("C"), "");
        assert_eq!(rows[1].get("C"), "3");
    }

    #[test]
    fn test_missing_file() {
        let err = CsvSource::open("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ConfigError::InputNotFound(_)));
        assert!(err.to_string().contains("CSV not found"));
    }

    #[test]
    fn test_empty_file_has_no_headers() {
        let file = create_temp_csv("");
        let err = CsvSource::open(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHeaders(_)));
    }

    #[test]
    fn test_blank_header_names_count_as_missing() {
        let file = create_temp_csv(",\nx,y\n");
        let err = CsvSource::open(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHeaders(_)));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let file = create_temp_csv("Summary\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert_eq!(source.rows().count(), 0);
    }
}
