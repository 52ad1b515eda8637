//! Row normalization: one raw intake row in, either a fully validated
//! [`EmployeeExit`] or the list of validation errors that disqualified it.
//!
//! Partial records are never produced. A row either passes every required
//! check and comes out enriched with its derived fields, or it contributes
//! nothing but errors. Optional fields are lenient: a cell that fails
//! coercion leaves the attribute unset instead of rejecting the row.

use serde_json::Value;

use crate::domain::{EmployeeExit, ErrorKind, RawRecord, TerminationCode, ValidationError};
use crate::pipeline::processing::coerce::{
    coerce_date, coerce_flag, coerce_number, coerce_text, DateOutcome,
};
use crate::pipeline::processing::derive;
use crate::pipeline::processing::fields::{resolve, CanonicalField};

fn error(
    row: usize,
    field: CanonicalField,
    kind: ErrorKind,
    message: &str,
    raw: Option<&Value>,
) -> ValidationError {
    ValidationError {
        row,
        column: field.primary_label().to_string(),
        kind,
        message: message.to_string(),
        raw_value: coerce_text(raw),
    }
}

/// Non-empty trimmed text for a field; blank cells count as absent.
fn non_empty_text(record: &RawRecord, field: CanonicalField) -> Option<String> {
    coerce_text(resolve(record, field)).filter(|s| !s.is_empty())
}

/// Validate and normalize one raw row.
///
/// `row_number` is the 1-based spreadsheet row (header included), so data
/// row `i` carries number `i + 2`. On failure the returned list is
/// non-empty and no record exists for the row.
pub fn normalize_row(
    record: &RawRecord,
    row_number: usize,
) -> Result<EmployeeExit, Vec<ValidationError>> {
    // Identity fields short-circuit: without them the row is not diagnosable
    // further.
    let employee_number = match non_empty_text(record, CanonicalField::EmployeeNumber) {
        Some(n) => n,
        None => {
            return Err(vec![error(
                row_number,
                CanonicalField::EmployeeNumber,
                ErrorKind::Missing,
                "Employee number is required",
                resolve(record, CanonicalField::EmployeeNumber),
            )])
        }
    };

    let name = match non_empty_text(record, CanonicalField::Name) {
        Some(n) => n,
        None => {
            return Err(vec![error(
                row_number,
                CanonicalField::Name,
                ErrorKind::Missing,
                "Name is required",
                resolve(record, CanonicalField::Name),
            )])
        }
    };

    // All three required dates are checked before aborting so one pass over
    // the file surfaces every date problem in a row.
    let mut errors = Vec::new();
    let mut required_date = |field: CanonicalField| {
        let raw = resolve(record, field);
        match coerce_date(raw) {
            DateOutcome::Parsed(d) => Some(d),
            DateOutcome::Absent => {
                errors.push(error(
                    row_number,
                    field,
                    ErrorKind::Missing,
                    "Required date is missing",
                    raw,
                ));
                None
            }
            DateOutcome::Unparseable => {
                errors.push(error(
                    row_number,
                    field,
                    ErrorKind::InvalidFormat,
                    "Invalid date format",
                    raw,
                ));
                None
            }
        }
    };

    let termination_date = required_date(CanonicalField::TerminationDate);
    let last_worked_date = required_date(CanonicalField::LastWorkedDate);
    let hire_date = required_date(CanonicalField::HireDate);

    let (termination_date, last_worked_date, hire_date) =
        match (termination_date, last_worked_date, hire_date) {
            (Some(t), Some(l), Some(h)) => (t, l, h),
            _ => return Err(errors),
        };

    // Termination code: fixed literal set, anything else is a type error.
    let code_raw = resolve(record, CanonicalField::TerminationCode);
    let code_text = coerce_text(code_raw).unwrap_or_default();
    let termination_code = match TerminationCode::parse(code_text.trim()) {
        Some(code) => code,
        None => {
            return Err(vec![error(
                row_number,
                CanonicalField::TerminationCode,
                ErrorKind::InvalidType,
                "Termination code must be RV, RV., BXF or BXF.",
                code_raw,
            )])
        }
    };

    // Salary is the one numeric field with a hard business constraint.
    let salary_raw = resolve(record, CanonicalField::Salary);
    let salary = coerce_number(salary_raw, None);
    if salary <= 0.0 {
        return Err(vec![error(
            row_number,
            CanonicalField::Salary,
            ErrorKind::OutOfRange,
            "Salary must be greater than 0",
            salary_raw,
        )]);
    }

    // Lenient numerics: malformed cells degrade to 0 rather than blocking
    // the row.
    let tenure_weeks = coerce_number(resolve(record, CanonicalField::TenureWeeks), None);
    let last_hours_week_number =
        coerce_number(resolve(record, CanonicalField::LastHoursWeekNumber), None);
    let last_week_hours = coerce_number(resolve(record, CanonicalField::LastWeekHours), None);
    let absence_count = coerce_number(resolve(record, CanonicalField::AbsenceCount), None);
    let permit_count = coerce_number(resolve(record, CanonicalField::PermitCount), None);

    // Optional dates: absent and unparseable both leave the field unset.
    let optional_date =
        |field: CanonicalField| coerce_date(resolve(record, field)).parsed();

    let settlement_date = optional_date(CanonicalField::SettlementDate);
    let settlement_delivery_date = optional_date(CanonicalField::SettlementDeliveryDate);
    let last_salary_change_date = optional_date(CanonicalField::LastSalaryChangeDate);
    let absence_date_1 = optional_date(CanonicalField::AbsenceDate1);
    let absence_date_2 = optional_date(CanonicalField::AbsenceDate2);
    let absence_date_3 = optional_date(CanonicalField::AbsenceDate3);
    let absence_date_4 = optional_date(CanonicalField::AbsenceDate4);

    // A settlement amount of zero means no settlement was recorded.
    let settlement_amount =
        Some(coerce_number(resolve(record, CanonicalField::SettlementAmount), None))
            .filter(|v| *v != 0.0);

    let department = non_empty_text(record, CanonicalField::Department);
    let exit_survey_id = non_empty_text(record, CanonicalField::ExitSurveyId);
    let stated_reason = non_empty_text(record, CanonicalField::StatedReason);
    let system_reason = non_empty_text(record, CanonicalField::SystemReason);

    let class_code =
        non_empty_text(record, CanonicalField::ClassCode).unwrap_or_else(|| "1".to_string());
    let shift = non_empty_text(record, CanonicalField::Shift).unwrap_or_default();
    let area = non_empty_text(record, CanonicalField::Area).unwrap_or_default();
    let supervisor = non_empty_text(record, CanonicalField::Supervisor).unwrap_or_default();
    let position = non_empty_text(record, CanonicalField::Position).unwrap_or_default();

    let completed_training = coerce_flag(resolve(record, CanonicalField::CompletedTraining));

    // Derived reporting fields, all from already-validated inputs.
    let tenure_days = derive::tenure_days(tenure_weeks);
    let tenure_months = derive::tenure_months(tenure_weeks);
    let days_last_worked_to_termination = derive::day_gap(last_worked_date, termination_date);
    let days_to_settlement = settlement_date.map(|d| derive::day_gap(termination_date, d));
    let days_to_settlement_delivery = settlement_date
        .zip(settlement_delivery_date)
        .map(|(made, delivered)| derive::day_gap(made, delivered));
    let days_since_salary_change =
        last_salary_change_date.map(|d| derive::day_gap(d, termination_date));
    let salary_bracket = derive::salary_bracket(salary).to_string();
    let tenure_bracket = derive::tenure_bracket(tenure_weeks).to_string();
    let termination_category = termination_code.category();
    let early_turnover = derive::early_turnover(tenure_weeks);

    Ok(EmployeeExit {
        employee_number,
        name,
        department,
        termination_date,
        last_worked_date,
        hire_date,
        tenure_weeks,
        last_hours_week_number,
        last_week_hours,
        settlement_date,
        settlement_delivery_date,
        settlement_amount,
        exit_survey_id,
        stated_reason,
        system_reason,
        class_code,
        shift,
        termination_code,
        area,
        supervisor,
        position,
        completed_training,
        absence_count,
        permit_count,
        absence_date_1,
        absence_date_2,
        absence_date_3,
        absence_date_4,
        salary,
        last_salary_change_date,
        tenure_days,
        tenure_months,
        days_last_worked_to_termination,
        days_to_settlement,
        days_to_settlement_delivery,
        days_since_salary_change,
        salary_bracket,
        tenure_bracket,
        termination_category,
        early_turnover,
    })
}
