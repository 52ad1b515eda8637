use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw intake row as produced by the file-decoding boundary: original column
/// labels mapped to whatever the export put in the cell (string or number).
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Termination code as recorded by the system of record. The dotted variants
/// are real spellings found in exports, not typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCode {
    #[serde(rename = "RV")]
    Rv,
    #[serde(rename = "RV.")]
    RvDot,
    #[serde(rename = "BXF")]
    Bxf,
    #[serde(rename = "BXF.")]
    BxfDot,
}

impl TerminationCode {
    /// Parse a trimmed raw cell value. Returns `None` for anything outside
    /// the accepted code set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "RV" => Some(Self::Rv),
            "RV." => Some(Self::RvDot),
            "BXF" => Some(Self::Bxf),
            "BXF." => Some(Self::BxfDot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rv => "RV",
            Self::RvDot => "RV.",
            Self::Bxf => "BXF",
            Self::BxfDot => "BXF.",
        }
    }

    /// Collapse the four accepted spellings into the binary reporting
    /// category: `RV*` is a voluntary resignation, everything else is a
    /// dismissal for absences.
    pub fn category(&self) -> TerminationCategory {
        if self.as_str().starts_with("RV") {
            TerminationCategory::Voluntary
        } else {
            TerminationCategory::AbsenceDismissal
        }
    }
}

/// Binary termination category used by downstream aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCategory {
    #[serde(rename = "RV")]
    Voluntary,
    #[serde(rename = "BXF")]
    AbsenceDismissal,
}

/// One validated employee-termination event, fully coerced and enriched with
/// the derived reporting fields. An `EmployeeExit` only exists if every
/// required field passed validation; there are no partial records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeExit {
    // Identification
    pub employee_number: String,
    pub name: String,
    pub department: Option<String>,

    // Key dates
    pub termination_date: NaiveDate,
    pub last_worked_date: NaiveDate,
    pub hire_date: NaiveDate,

    // Tenure and final week
    pub tenure_weeks: f64,
    pub last_hours_week_number: f64,
    pub last_week_hours: f64,

    // Settlement
    pub settlement_date: Option<NaiveDate>,
    pub settlement_delivery_date: Option<NaiveDate>,
    pub settlement_amount: Option<f64>,

    // Exit survey and reasons
    pub exit_survey_id: Option<String>,
    pub stated_reason: Option<String>,
    pub system_reason: Option<String>,

    // Classification
    pub class_code: String,
    pub shift: String,
    pub termination_code: TerminationCode,

    // Organization
    pub area: String,
    pub supervisor: String,
    pub position: String,

    // Training and attendance
    pub completed_training: bool,
    pub absence_count: f64,
    pub permit_count: f64,
    pub absence_date_1: Option<NaiveDate>,
    pub absence_date_2: Option<NaiveDate>,
    pub absence_date_3: Option<NaiveDate>,
    pub absence_date_4: Option<NaiveDate>,

    // Compensation
    pub salary: f64,
    pub last_salary_change_date: Option<NaiveDate>,

    // Derived
    pub tenure_days: f64,
    pub tenure_months: i64,
    pub days_last_worked_to_termination: i64,
    pub days_to_settlement: Option<i64>,
    pub days_to_settlement_delivery: Option<i64>,
    pub days_since_salary_change: Option<i64>,
    pub salary_bracket: String,
    pub tenure_bracket: String,
    pub termination_category: TerminationCategory,
    pub early_turnover: bool,
}

/// Category of a per-row validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent
    Missing,
    /// Value present but semantically wrong (e.g. unrecognized code)
    InvalidType,
    /// Value coerces but violates a business constraint
    OutOfRange,
    /// Value present but uncoercible (e.g. unparseable date)
    InvalidFormat,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidType => "invalid_type",
            Self::OutOfRange => "out_of_range",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single row-level validation failure. Row numbers are 1-based and offset
/// by the header row so they match what the user sees in a spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub column: String,
    pub kind: ErrorKind,
    pub message: String,
    pub raw_value: Option<String>,
}

/// Dataset-level counters reported alongside the validated records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub detected_columns: Vec<String>,
}

/// The outcome of validating one uploaded dataset: the records that passed,
/// the accumulated row-level errors, and summary stats. Constructed once per
/// upload and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub dataset_id: Uuid,
    pub records: Vec<EmployeeExit>,
    pub errors: Vec<ValidationError>,
    pub stats: ParseStats,
}
