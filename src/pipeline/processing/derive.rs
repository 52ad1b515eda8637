//! Derived reporting fields computed from already-validated inputs.

use chrono::NaiveDate;

use crate::constants::{
    Bracket, EARLY_TURNOVER_WEEKS, SALARY_BRACKETS, TENURE_BRACKETS, UNKNOWN_BRACKET,
    WEEKS_PER_MONTH,
};

fn bracket_label(value: f64, brackets: &[Bracket]) -> &'static str {
    brackets
        .iter()
        .find(|b| value >= b.min && value < b.max)
        .map(|b| b.label)
        .unwrap_or(UNKNOWN_BRACKET)
}

/// Bucket a salary into its reporting bracket.
pub fn salary_bracket(salary: f64) -> &'static str {
    bracket_label(salary, SALARY_BRACKETS)
}

/// Bucket tenure (in weeks) into its reporting bracket.
pub fn tenure_bracket(weeks: f64) -> &'static str {
    bracket_label(weeks, TENURE_BRACKETS)
}

/// Whole days from `from` to `to`; negative when `to` precedes `from`.
pub fn day_gap(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn tenure_days(weeks: f64) -> f64 {
    weeks * 7.0
}

pub fn tenure_months(weeks: f64) -> i64 {
    (weeks / WEEKS_PER_MONTH).floor() as i64
}

/// An exit counts as early turnover when it happens before the probation
/// horizon of 13 weeks.
pub fn early_turnover(weeks: f64) -> bool {
    weeks < EARLY_TURNOVER_WEEKS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_bracket_is_total_over_non_negative_values() {
        // Every non-negative salary lands in exactly one bracket, including
        // the boundaries between adjacent brackets.
        let samples = [
            0.0, 1.0, 4_999.99, 5_000.0, 7_999.0, 8_000.0, 11_999.0, 12_000.0, 19_999.0,
            20_000.0, 1_000_000.0,
        ];
        for salary in samples {
            let label = salary_bracket(salary);
            assert_ne!(label, UNKNOWN_BRACKET, "salary {} fell through", salary);
            let matching = SALARY_BRACKETS
                .iter()
                .filter(|b| salary >= b.min && salary < b.max)
                .count();
            assert_eq!(matching, 1, "salary {} matched {} brackets", salary, matching);
        }
    }

    #[test]
    fn test_salary_bracket_boundaries_are_half_open() {
        assert_eq!(salary_bracket(4_999.99), "$0 - $5,000");
        assert_eq!(salary_bracket(5_000.0), "$5,000 - $8,000");
        assert_eq!(salary_bracket(20_000.0), "$20,000+");
    }

    #[test]
    fn test_tenure_bracket_spans_all_weeks() {
        for weeks in [0.0, 3.9, 4.0, 12.9, 13.0, 25.9, 26.0, 51.9, 52.0, 103.9, 104.0, 500.0] {
            assert_ne!(tenure_bracket(weeks), UNKNOWN_BRACKET, "weeks {}", weeks);
        }
        assert_eq!(tenure_bracket(0.0), "0-1 mes (0-4 semanas)");
        assert_eq!(tenure_bracket(104.0), "2+ años (104+ semanas)");
    }

    #[test]
    fn test_early_turnover_threshold() {
        assert!(early_turnover(0.0));
        assert!(early_turnover(12.9));
        assert!(!early_turnover(13.0));
        assert!(!early_turnover(52.0));
    }

    #[test]
    fn test_tenure_conversions() {
        assert_eq!(tenure_days(10.0), 70.0);
        assert_eq!(tenure_months(13.0), 3);
        assert_eq!(tenure_months(4.0), 0);
        assert_eq!(tenure_months(52.0), 12);
    }

    #[test]
    fn test_day_gap_direction() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(day_gap(a, b), 14);
        assert_eq!(day_gap(b, a), -14);
    }
}
