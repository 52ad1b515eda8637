//! Dataset validation: schema check up front, then per-row normalization
//! with error accumulation. A bad row never aborts the batch; a bad header
//! or an empty file aborts before any row is processed.

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{ParseResult, ParseStats, RawRecord};
use crate::error::{PipelineError, Result};
use crate::pipeline::processing::fields::{label_matches, REQUIRED_FIELDS};
use crate::pipeline::processing::normalize::normalize_row;

/// Validate an uploaded dataset and normalize every processable row.
///
/// Fatal outcomes (`EmptyFile`, `MissingColumns`) are the only way this
/// function fails; row-level problems are accumulated into the returned
/// [`ParseResult`] instead. Row numbers in errors are offset by the header
/// row to match what the user sees in a spreadsheet.
pub fn validate(rows: &[RawRecord]) -> Result<ParseResult> {
    if rows.is_empty() {
        return Err(PipelineError::EmptyFile);
    }

    let detected: Vec<String> = rows[0].keys().cloned().collect();
    debug!(columns = detected.len(), rows = rows.len(), "validating dataset");

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !label_matches(**field, &detected))
        .map(|field| field.primary_label().to_string())
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns {
            missing,
            detected: detected.iter().map(|c| c.trim().to_string()).collect(),
        });
    }

    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        // +2: spreadsheet rows are 1-based and the header occupies row 1.
        let row_number = index + 2;
        match normalize_row(row, row_number) {
            Ok(record) => records.push(record),
            Err(row_errors) => {
                debug!(row = row_number, errors = row_errors.len(), "row rejected");
                errors.extend(row_errors);
            }
        }
    }

    let stats = ParseStats {
        total: rows.len(),
        valid: records.len(),
        invalid: errors.len(),
        detected_columns: detected,
    };

    info!(
        total = stats.total,
        valid = stats.valid,
        invalid = stats.invalid,
        "dataset validated"
    );

    Ok(ParseResult {
        dataset_id: Uuid::new_v4(),
        records,
        errors,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use serde_json::json;

    fn row(entries: &[(&str, &str)]) -> RawRecord {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn valid_row(number: &str, salary: &str) -> RawRecord {
        row(&[
            ("Empleado#", number),
            ("Nombre", "Ana López"),
            ("Fecha de baja en el Sistema", "2024-03-15"),
            ("Fecha de último día de trabajo (UDT)", "2024-03-10"),
            ("Fecha de Alta", "2023-06-01"),
            ("Antigüedad en Semanas", "41"),
            ("Tipo de baja en el Sistema", "RV"),
            ("Área", "Producción"),
            ("Supervisor", "García"),
            ("Puesto", "Operador"),
            ("Salario", salary),
            ("Turno", "Matutino"),
        ])
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let err = validate(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFile));
    }

    #[test]
    fn test_missing_required_column_is_fatal_before_rows() {
        let mut bad = valid_row("1001", "7500");
        bad.remove("Tipo de baja en el Sistema");

        let err = validate(&[bad]).unwrap_err();
        match err {
            PipelineError::MissingColumns { missing, detected } => {
                assert_eq!(missing, vec!["Tipo de baja en el Sistema".to_string()]);
                assert!(detected.contains(&"Empleado#".to_string()));
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_error_is_deterministic() {
        let mut bad = valid_row("1001", "7500");
        bad.remove("Salario");
        let rows = vec![bad];

        let first = validate(&rows).unwrap_err().to_string();
        let second = validate(&rows).unwrap_err().to_string();
        assert_eq!(first, second);
        assert!(first.contains("Salario"));
    }

    #[test]
    fn test_header_match_tolerates_case_and_spacing() {
        let relabeled: RawRecord = valid_row("1001", "7500")
            .into_iter()
            .map(|(k, v)| (format!("  {}  ", k.to_uppercase()), v))
            .collect();

        let result = validate(&[relabeled]).unwrap();
        assert_eq!(result.stats.valid, 1);
    }

    #[test]
    fn test_mixed_rows_accumulate_errors_without_aborting() {
        let rows = vec![
            valid_row("1001", "7500"),
            valid_row("1002", "0"),
            valid_row("1003", "9000"),
        ];

        let result = validate(&rows).unwrap();
        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.valid, 2);
        assert_eq!(result.stats.invalid, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::OutOfRange);
        assert_eq!(result.errors[0].column, "Salario");
        // Data row 2 sits on spreadsheet row 3.
        assert_eq!(result.errors[0].row, 3);
        // Record order follows input order.
        assert_eq!(result.records[0].employee_number, "1001");
        assert_eq!(result.records[1].employee_number, "1003");
    }

    #[test]
    fn test_detected_columns_keep_file_order() {
        let result = validate(&[valid_row("1001", "7500")]).unwrap();
        assert_eq!(result.stats.detected_columns[0], "Empleado#");
        assert_eq!(result.stats.detected_columns[1], "Nombre");
    }
}
