//! Field resolution: maps the loosely-spelled column labels found in real
//! intake files onto the fixed set of canonical fields the pipeline knows.
//!
//! Sources disagree on casing, surrounding whitespace, and diacritics, so the
//! accepted spellings live here as data and every lookup is trim- and
//! case-insensitive. Content must still match exactly; fuzzy matching would
//! risk silently binding the wrong column.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::RawRecord;

/// The closed set of semantic fields the pipeline recognizes, independent of
/// how the source labeled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    EmployeeNumber,
    Name,
    Department,
    TerminationDate,
    LastWorkedDate,
    HireDate,
    TenureWeeks,
    LastHoursWeekNumber,
    LastWeekHours,
    SettlementDate,
    SettlementDeliveryDate,
    SettlementAmount,
    ExitSurveyId,
    StatedReason,
    SystemReason,
    ClassCode,
    Shift,
    TerminationCode,
    Area,
    Supervisor,
    Position,
    CompletedTraining,
    AbsenceCount,
    PermitCount,
    AbsenceDate1,
    AbsenceDate2,
    AbsenceDate3,
    AbsenceDate4,
    Salary,
    LastSalaryChangeDate,
}

impl CanonicalField {
    /// Accepted label spellings, in priority order. The first entry is the
    /// label the system-of-record export uses and is what error messages
    /// show; the rest are the diacritic-stripped forms that appear when a
    /// file has been round-tripped through tools that mangle encodings.
    pub fn accepted_labels(&self) -> &'static [&'static str] {
        match self {
            Self::EmployeeNumber => &["Empleado#"],
            Self::Name => &["Nombre"],
            Self::Department => &["Depto."],
            Self::TerminationDate => &["Fecha de baja en el Sistema"],
            Self::LastWorkedDate => &[
                "Fecha de último día de trabajo (UDT)",
                "Fecha de ultimo dia de trabajo (UDT)",
            ],
            Self::HireDate => &["Fecha de Alta"],
            Self::TenureWeeks => &["Antigüedad en Semanas", "Antiguedad en Semanas"],
            Self::LastHoursWeekNumber => &[
                "Número de semana de las últimas horas trabajadas",
                "Numero de semana de las ultimas horas trabajadas",
            ],
            // The double space before "en" is present in the real export.
            Self::LastWeekHours => &[
                "Total de horas trabajadas  en la última semana",
                "Total de horas trabajadas en la última semana",
                "Total de horas trabajadas en la ultima semana",
            ],
            Self::SettlementDate => &["Fecha en que se hizo el finiquito"],
            Self::SettlementDeliveryDate => &["Fecha de entrega de finiquito"],
            Self::SettlementAmount => &["Monto Finiquito"],
            Self::ExitSurveyId => &["Encuesta de salida 4FRH-209"],
            Self::StatedReason => &["Razón de Renuncia", "Razon de Renuncia"],
            Self::SystemReason => &["Razon capturada en Sistema", "Razón capturada en Sistema"],
            Self::ClassCode => &["Clase"],
            Self::Shift => &["Turno"],
            Self::TerminationCode => &["Tipo de baja en el Sistema"],
            Self::Area => &["Área", "Area"],
            Self::Supervisor => &["Supervisor"],
            Self::Position => &["Puesto"],
            Self::CompletedTraining => &[
                "Cumplió con periodo de entrenamiento",
                "Cumplio con periodo de entrenamiento",
            ],
            Self::AbsenceCount => &["Total de faltas"],
            Self::PermitCount => &["Permisos"],
            Self::AbsenceDate1 => &["Falta 1"],
            Self::AbsenceDate2 => &["Falta 2"],
            Self::AbsenceDate3 => &["Falta 3"],
            Self::AbsenceDate4 => &["Falta 4"],
            Self::Salary => &["Salario"],
            Self::LastSalaryChangeDate => &["Último cambio de salario", "Ultimo cambio de salario"],
        }
    }

    /// The label shown to users in validation errors and missing-column
    /// reports.
    pub fn primary_label(&self) -> &'static str {
        self.accepted_labels()[0]
    }
}

/// Columns that must be present in the header for a dataset to be processed
/// at all. Presence is checked at the dataset level; see the normalizer for
/// which of these also hard-fail individual rows.
pub const REQUIRED_FIELDS: &[CanonicalField] = &[
    CanonicalField::EmployeeNumber,
    CanonicalField::Name,
    CanonicalField::TerminationDate,
    CanonicalField::LastWorkedDate,
    CanonicalField::HireDate,
    CanonicalField::TenureWeeks,
    CanonicalField::TerminationCode,
    CanonicalField::Area,
    CanonicalField::Supervisor,
    CanonicalField::Position,
    CanonicalField::Salary,
    CanonicalField::Shift,
];

/// Pre-lowered label tables so per-cell lookups don't re-fold the accepted
/// spellings for every row.
static LOWER_LABELS: Lazy<HashMap<CanonicalField, Vec<String>>> = Lazy::new(|| {
    ALL_FIELDS
        .iter()
        .map(|f| {
            (
                *f,
                f.accepted_labels()
                    .iter()
                    .map(|l| l.trim().to_lowercase())
                    .collect(),
            )
        })
        .collect()
});

const ALL_FIELDS: &[CanonicalField] = &[
    CanonicalField::EmployeeNumber,
    CanonicalField::Name,
    CanonicalField::Department,
    CanonicalField::TerminationDate,
    CanonicalField::LastWorkedDate,
    CanonicalField::HireDate,
    CanonicalField::TenureWeeks,
    CanonicalField::LastHoursWeekNumber,
    CanonicalField::LastWeekHours,
    CanonicalField::SettlementDate,
    CanonicalField::SettlementDeliveryDate,
    CanonicalField::SettlementAmount,
    CanonicalField::ExitSurveyId,
    CanonicalField::StatedReason,
    CanonicalField::SystemReason,
    CanonicalField::ClassCode,
    CanonicalField::Shift,
    CanonicalField::TerminationCode,
    CanonicalField::Area,
    CanonicalField::Supervisor,
    CanonicalField::Position,
    CanonicalField::CompletedTraining,
    CanonicalField::AbsenceCount,
    CanonicalField::PermitCount,
    CanonicalField::AbsenceDate1,
    CanonicalField::AbsenceDate2,
    CanonicalField::AbsenceDate3,
    CanonicalField::AbsenceDate4,
    CanonicalField::Salary,
    CanonicalField::LastSalaryChangeDate,
];

/// Look up the raw value for a canonical field in one intake row.
///
/// Labels are compared after trimming and case-folding; the first raw entry
/// whose label matches any accepted spelling wins. `None` means the column is
/// absent, which is distinct from an empty cell and never an error by itself.
pub fn resolve<'a>(record: &'a RawRecord, field: CanonicalField) -> Option<&'a Value> {
    let accepted = &LOWER_LABELS[&field];
    record
        .iter()
        .find(|(label, _)| {
            let normalized = label.trim().to_lowercase();
            accepted.iter().any(|a| *a == normalized)
        })
        .map(|(_, value)| value)
}

/// True if any label in `labels` resolves to `field` under the same matching
/// rules as [`resolve`]. Used for header-level schema checks.
pub fn label_matches(field: CanonicalField, labels: &[String]) -> bool {
    let accepted = &LOWER_LABELS[&field];
    labels
        .iter()
        .any(|l| accepted.iter().any(|a| *a == l.trim().to_lowercase()))
}
