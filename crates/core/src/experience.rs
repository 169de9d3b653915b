//! Derived values for experience entries.

use crate::error::CoreError;
use crate::types::Date;

/// An entry with no end date is the current position.
pub fn is_current(end_date: Option<Date>) -> bool {
    end_date.is_none()
}

/// Reject ranges that end before they start.
pub fn validate_date_range(start: Date, end: Option<Date>) -> Result<(), CoreError> {
    match end {
        Some(end) if end < start => Err(CoreError::Validation(format!(
            "end_date ({end}) must not be before start_date ({start})"
        ))),
        _ => Ok(()),
    }
}

/// Human-readable tenure such as `"2 years 3 months"` or `"5 months"`.
///
/// Open-ended ranges are measured up to `today`. Years are 365 days and
/// months 30 days, which is precise enough for display.
pub fn duration_label(start: Date, end: Option<Date>, today: Date) -> String {
    let days = (end.unwrap_or(today) - start).num_days().max(0);
    let years = days / 365;
    let months = (days % 365) / 30;

    let plural = |n: i64, unit: &str| format!("{n} {unit}{}", if n == 1 { "" } else { "s" });

    if years > 0 {
        format!("{} {}", plural(years, "year"), plural(months, "month"))
    } else {
        plural(months, "month")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn null_end_date_means_current() {
        assert!(is_current(None));
        assert!(!is_current(Some(d(2023, 1, 1))));
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(validate_date_range(d(2023, 5, 1), Some(d(2023, 4, 30))).is_err());
        assert!(validate_date_range(d(2023, 5, 1), Some(d(2023, 5, 1))).is_ok());
        assert!(validate_date_range(d(2023, 5, 1), None).is_ok());
    }

    #[test]
    fn duration_labels() {
        assert_eq!(duration_label(d(2020, 1, 1), Some(d(2022, 4, 1)), d(2030, 1, 1)), "2 years 3 months");
        assert_eq!(duration_label(d(2024, 1, 1), Some(d(2024, 2, 5)), d(2030, 1, 1)), "1 month");
        assert_eq!(duration_label(d(2024, 1, 1), None, d(2024, 1, 10)), "0 months");
        assert_eq!(duration_label(d(2023, 1, 1), None, d(2024, 1, 1)), "1 year 0 months");
    }
}
