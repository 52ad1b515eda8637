//! CSV intake boundary: turns a file on disk into the label→value rows the
//! validation pipeline consumes. Spreadsheet (.xlsx) decoding is handled by
//! an external collaborator; serial-date cells that survive a CSV export are
//! still understood downstream by the temporal coercer.

use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::RawRecord;
use crate::error::Result;

/// Read a headered CSV file into raw records.
///
/// Column labels are kept verbatim (the field resolver owns label matching),
/// except that a UTF-8 BOM on the first header is stripped — Excel emits one
/// and it would otherwise make the first column unresolvable. Cells are
/// trimmed, blank lines skipped, and a row that fails to decode is skipped
/// with a warning rather than aborting the batch.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    debug!(columns = headers.len(), "read CSV header");

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line = index + 2, "skipping undecodable CSV row: {}", e);
                continue;
            }
        };

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(label, cell)| (label.clone(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), "read CSV body");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_rows_with_labels_preserved() {
        let file = write_csv("Empleado#,Nombre\n1001,Ana\n1002,Luis\n");
        let rows = read_csv_file(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Empleado#"], "1001");
        assert_eq!(rows[1]["Nombre"], "Luis");
    }

    #[test]
    fn test_strips_bom_from_first_header() {
        let file = write_csv("\u{feff}Empleado#,Nombre\n1001,Ana\n");
        let rows = read_csv_file(file.path()).unwrap();

        assert!(rows[0].contains_key("Empleado#"));
    }

    #[test]
    fn test_skips_blank_lines() {
        let file = write_csv("Empleado#,Nombre\n1001,Ana\n,\n1002,Luis\n");
        let rows = read_csv_file(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_header_only_file_yields_no_rows() {
        let file = write_csv("Empleado#,Nombre\n");
        let rows = read_csv_file(file.path()).unwrap();

        assert!(rows.is_empty());
    }
}
