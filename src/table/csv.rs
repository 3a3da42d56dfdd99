// CSV input/output

use std::path::Path;

use super::Table;
use crate::error::{ExportError, InputError};

pub fn read(path: &Path) -> Result<Table, InputError> {
    let read_error = |e: csv::Error| InputError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    // Flexible: hand-edited files often have ragged rows
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, records })
}

pub fn write(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for record in &table.records {
        writer.write_record(record)?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_quoted_and_ragged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.csv");
        fs::write(
            &path,
            "Name,URL\n\"Acme, Inc\",https://acme.test\nshort\n",
        )
        .unwrap();

        let table = read(&path).unwrap();

        assert_eq!(table.headers, vec!["Name", "URL"]);
        assert_eq!(table.records[0], vec!["Acme, Inc", "https://acme.test"]);
        assert_eq!(table.records[1], vec!["short"]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }

    #[test]
    fn test_write_then_read_back() {
        let table = Table {
            headers: vec!["URL".to_string(), "Status".to_string()],
            records: vec![vec![
                "https://a.test".to_string(),
                "Invalid (DNS resolution failed)".to_string(),
            ]],
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        fs::write(&path, write(&table).unwrap()).unwrap();

        assert_eq!(read(&path).unwrap(), table);
    }
}
