//! Error types for chart computation.
//!
//! User-facing input problems and calendar-conversion failures are kept
//! apart from internal-consistency failures so callers can map them to
//! different responses.

use thiserror::Error;

/// Failure reported by an external lunar-to-solar calendar converter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lunar date {year}-{month:02}-{day:02}{} could not be converted: {reason}", leap_suffix(.leap_month))]
pub struct ConversionError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap_month: bool,
    pub reason: String,
}

fn leap_suffix(leap_month: &bool) -> &'static str {
    if *leap_month {
        " (leap month)"
    } else {
        ""
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// Date outside the Gregorian calendar, hour outside [0,23] or an unknown gender.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The lunar converter signalled failure; the unconverted date is never used.
    #[error("Calendar conversion failed: {0}")]
    CalendarConversion(#[from] ConversionError),

    /// A table defined as total missed, or a derived value left its domain.
    #[error("Internal consistency failure: {0}")]
    Invariant(String),
}

impl ChartError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than by the engine
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ChartError::Invariant(_))
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ChartError::invalid("hour", "24 is outside 0..=23").is_user_error());
        assert!(!ChartError::Invariant("miss".to_string()).is_user_error());

        let conversion = ConversionError {
            year: 1990,
            month: 4,
            day: 21,
            leap_month: true,
            reason: "no such day".to_string(),
        };
        let err: ChartError = conversion.into();
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Calendar conversion failed: lunar date 1990-04-21 (leap month) could not be converted: no such day"
        );
    }
}
