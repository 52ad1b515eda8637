//! Fixed reference data for the intake pipeline: bracket tables, accepted
//! termination codes, and the thresholds the normalizer applies.

/// A labeled half-open interval `[min, max)` used to bucket a continuous
/// value into a reporting category.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
}

/// Salary brackets in ascending order, covering `[0, +inf)` with no gaps.
pub const SALARY_BRACKETS: &[Bracket] = &[
    Bracket { min: 0.0, max: 5_000.0, label: "$0 - $5,000" },
    Bracket { min: 5_000.0, max: 8_000.0, label: "$5,000 - $8,000" },
    Bracket { min: 8_000.0, max: 12_000.0, label: "$8,000 - $12,000" },
    Bracket { min: 12_000.0, max: 20_000.0, label: "$12,000 - $20,000" },
    Bracket { min: 20_000.0, max: f64::INFINITY, label: "$20,000+" },
];

/// Tenure brackets keyed on weeks of service, ascending, covering `[0, +inf)`.
pub const TENURE_BRACKETS: &[Bracket] = &[
    Bracket { min: 0.0, max: 4.0, label: "0-1 mes (0-4 semanas)" },
    Bracket { min: 4.0, max: 13.0, label: "1-3 meses (4-13 semanas)" },
    Bracket { min: 13.0, max: 26.0, label: "3-6 meses (13-26 semanas)" },
    Bracket { min: 26.0, max: 52.0, label: "6-12 meses (26-52 semanas)" },
    Bracket { min: 52.0, max: 104.0, label: "1-2 años (52-104 semanas)" },
    Bracket { min: 104.0, max: f64::INFINITY, label: "2+ años (104+ semanas)" },
];

/// Label returned when a value falls in no bracket. With the tables above
/// spanning the full non-negative line this only fires for negative input.
pub const UNKNOWN_BRACKET: &str = "Desconocido";

/// Termination codes accepted by the system-of-record export. The trailing
/// dot variants show up in real files and are kept as distinct spellings.
pub const ACCEPTED_TERMINATION_CODES: &[&str] = &["RV", "RV.", "BXF", "BXF."];

/// Exits at strictly fewer weeks than this are flagged as early turnover.
pub const EARLY_TURNOVER_WEEKS: f64 = 13.0;

/// Numeric values above this threshold are interpreted as spreadsheet
/// serial dates rather than literal numbers.
pub const SERIAL_DATE_MIN: f64 = 1000.0;

/// Average weeks per month used for the tenure-months derivation.
pub const WEEKS_PER_MONTH: f64 = 4.33;
