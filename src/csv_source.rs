// Streaming CSV row source with header validation
use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::DataError;

/// One CSV record projected onto the columns a mapping entry binds.
///
/// Transient by design: read, handed to the sink as statement parameters,
/// discarded.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line number of the record in the source file.
    pub line: u64,
    /// `(statement parameter, cell value)` pairs, one per binding.
    pub params: Vec<(String, String)>,
}

/// Lazy, single-pass reader over the data rows of one CSV file.
///
/// Opening validates that the header contains every bound column, so a
/// mapping/data mismatch surfaces before any row is handed out.
#[derive(Debug)]
pub struct RowReader {
    path: String,
    reader: Reader<File>,
    record: StringRecord,
    /// `(statement parameter, column index)` resolved against the header.
    projection: Vec<(String, usize)>,
}

impl RowReader {
    /// Open `path` and resolve `bindings` (parameter name -> column name)
    /// against the header row.
    pub fn open(path: &Path, bindings: &[(String, String)]) -> Result<Self, DataError> {
        let display_path = path.display().to_string();

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| DataError::Open {
                path: display_path.clone(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| DataError::Open {
                path: display_path.clone(),
                source,
            })?
            .clone();

        let mut projection = Vec::with_capacity(bindings.len());
        for (parameter, column) in bindings {
            let index = headers.iter().position(|h| h == column).ok_or_else(|| {
                DataError::MissingColumn {
                    path: display_path.clone(),
                    column: column.clone(),
                }
            })?;
            projection.push((parameter.clone(), index));
        }

        Ok(RowReader {
            path: display_path,
            reader,
            record: StringRecord::new(),
            projection,
        })
    }

    /// Read the next data row, or `None` at end of file.
    pub fn next_row(&mut self) -> Option<Result<Row, DataError>> {
        let line = self.reader.position().line();

        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let params = self
                    .projection
                    .iter()
                    .map(|(parameter, index)| {
                        let value = self.record.get(*index).unwrap_or_default();
                        (parameter.clone(), value.to_string())
                    })
                    .collect();
                Some(Ok(Row { line, params }))
            }
            Err(source) => Some(Err(DataError::Record {
                path: self.path.clone(),
                line,
                source,
            })),
        }
    }
}

impl Iterator for RowReader {
    type Item = Result<Row, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn bindings(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn rows_are_projected_onto_bound_columns() {
        let file = write_csv("Account_ID,Account_Name,Industry\nA1,Acme,Manufacturing\nA2,Globex,Energy\n");
        let reader = RowReader::open(
            file.path(),
            &bindings(&[("id", "Account_ID"), ("name", "Account_Name")]),
        )
        .unwrap();

        let rows: Vec<Row> = reader.map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].params,
            vec![
                ("id".to_string(), "A1".to_string()),
                ("name".to_string(), "Acme".to_string()),
            ]
        );
        assert_eq!(rows[1].params[1].1, "Globex");
    }

    #[test]
    fn line_numbers_skip_the_header() {
        let file = write_csv("Account_ID\nA1\nA2\nA3\n");
        let reader = RowReader::open(file.path(), &bindings(&[("id", "Account_ID")])).unwrap();

        let lines: Vec<u64> = reader.map(|r| r.unwrap().line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn missing_bound_column_is_a_data_error() {
        let file = write_csv("Account_ID,Account_Name\nA1,Acme\n");
        let err = RowReader::open(file.path(), &bindings(&[("industry", "Industry")])).unwrap_err();

        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "Industry"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_data_error() {
        let err = RowReader::open(Path::new("no/such/file.csv"), &[]).unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
    }

    #[test]
    fn ragged_record_is_a_data_error() {
        let file = write_csv("Account_ID,Account_Name\nA1,Acme\nA2\n");
        let mut reader =
            RowReader::open(file.path(), &bindings(&[("id", "Account_ID")])).unwrap();

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, DataError::Record { line: 3, .. }));
    }
}
