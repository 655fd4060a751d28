// 📥 Birth Input - validation and calendar resolution
// Turns raw caller values into a validated solar date + hour + gender.
//
// Lunar dates are resolved by an external converter. The engine only ever
// sees its outcome: a solar date or an explicit failure.

use crate::error::{ChartError, ConversionError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn korean(&self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남" | "남자" => Ok(Gender::Male),
            "female" | "f" | "여" | "여자" => Ok(Gender::Female),
            other => Err(ChartError::invalid(
                "gender",
                format!("unrecognized value {:?}", other),
            )),
        }
    }
}

// ============================================================================
// CALENDAR
// ============================================================================

/// Which calendar the supplied year/month/day belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CalendarKind {
    Solar,
    Lunar { leap_month: bool },
}

/// A lunar calendar date as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap_month: bool,
}

/// External lunar-to-solar conversion collaborator.
///
/// Implementations must report failure through the `Err` arm; returning the
/// lunar values unchanged as if they were solar is a contract violation.
pub trait LunarConverter {
    fn to_solar(&self, date: LunarDate) -> std::result::Result<NaiveDate, ConversionError>;
}

/// Converter used when no calendar service is configured. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLunarConverter;

impl LunarConverter for NoLunarConverter {
    fn to_solar(&self, date: LunarDate) -> std::result::Result<NaiveDate, ConversionError> {
        Err(ConversionError {
            year: date.year,
            month: date.month,
            day: date.day,
            leap_month: date.leap_month,
            reason: "no lunar calendar converter is configured".to_string(),
        })
    }
}

// ============================================================================
// BIRTH INPUT
// ============================================================================

/// Raw birth data as received from the outer layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Clock hour, 0..=23
    pub hour: u32,
    pub gender: Gender,
    #[serde(default = "default_calendar")]
    pub calendar: CalendarKind,
}

fn default_calendar() -> CalendarKind {
    CalendarKind::Solar
}

impl BirthInput {
    pub fn solar(year: i32, month: u32, day: u32, hour: u32, gender: Gender) -> Self {
        BirthInput {
            year,
            month,
            day,
            hour,
            gender,
            calendar: CalendarKind::Solar,
        }
    }

    pub fn lunar(
        year: i32,
        month: u32,
        day: u32,
        leap_month: bool,
        hour: u32,
        gender: Gender,
    ) -> Self {
        BirthInput {
            year,
            month,
            day,
            hour,
            gender,
            calendar: CalendarKind::Lunar { leap_month },
        }
    }

    /// Validate the input and resolve it to a solar birth moment.
    pub fn resolve(&self, converter: &dyn LunarConverter) -> Result<ResolvedBirth> {
        if self.hour > 23 {
            return Err(ChartError::invalid(
                "hour",
                format!("{} is outside 0..=23", self.hour),
            ));
        }

        let (solar_date, lunar) = match self.calendar {
            CalendarKind::Solar => (validate_solar(self.year, self.month, self.day)?, None),
            CalendarKind::Lunar { leap_month } => {
                if !(1..=12).contains(&self.month) || !(1..=30).contains(&self.day) {
                    return Err(ChartError::invalid(
                        "date",
                        format!(
                            "lunar {}-{}-{} is outside the lunar calendar range",
                            self.year, self.month, self.day
                        ),
                    ));
                }
                let lunar = LunarDate {
                    year: self.year,
                    month: self.month,
                    day: self.day,
                    leap_month,
                };
                let solar = converter.to_solar(lunar).map_err(|e| {
                    tracing::warn!(error = %e, "lunar conversion failed");
                    ChartError::CalendarConversion(e)
                })?;
                (solar, Some(lunar))
            }
        };

        Ok(ResolvedBirth {
            solar_date,
            hour: self.hour,
            gender: self.gender,
            lunar,
        })
    }
}

fn validate_solar(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ChartError::invalid(
            "date",
            format!("{}-{:02}-{:02} is not a valid Gregorian date", year, month, day),
        )
    })
}

/// Validated birth moment on the solar calendar.
///
/// Only constructible through [`BirthInput::resolve`] or [`ResolvedBirth::new`],
/// both of which enforce the hour range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedBirth {
    solar_date: NaiveDate,
    hour: u32,
    gender: Gender,
    lunar: Option<LunarDate>,
}

impl ResolvedBirth {
    pub fn new(solar_date: NaiveDate, hour: u32, gender: Gender) -> Result<Self> {
        if hour > 23 {
            return Err(ChartError::invalid(
                "hour",
                format!("{} is outside 0..=23", hour),
            ));
        }
        Ok(ResolvedBirth {
            solar_date,
            hour,
            gender,
            lunar: None,
        })
    }

    pub fn solar_date(&self) -> NaiveDate {
        self.solar_date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// The lunar date as supplied, when the input was lunar
    pub fn lunar(&self) -> Option<LunarDate> {
        self.lunar
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedConverter(NaiveDate);

    impl LunarConverter for FixedConverter {
        fn to_solar(&self, _date: LunarDate) -> std::result::Result<NaiveDate, ConversionError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_resolve_valid_solar_input() {
        let input = BirthInput::solar(1990, 5, 15, 14, Gender::Male);
        let birth = input.resolve(&NoLunarConverter).unwrap();

        assert_eq!(birth.solar_date(), NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert_eq!(birth.hour(), 14);
        assert!(birth.lunar().is_none());
    }

    #[test]
    fn test_reject_invalid_date_and_hour() {
        let bad_day = BirthInput::solar(2023, 2, 29, 10, Gender::Female);
        assert!(matches!(
            bad_day.resolve(&NoLunarConverter),
            Err(ChartError::InvalidInput { field: "date", .. })
        ));

        let bad_hour = BirthInput::solar(2023, 2, 28, 24, Gender::Female);
        assert!(matches!(
            bad_hour.resolve(&NoLunarConverter),
            Err(ChartError::InvalidInput { field: "hour", .. })
        ));

        assert!(ResolvedBirth::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 30, Gender::Male).is_err());
    }

    #[test]
    fn test_lunar_conversion_failure_is_not_swallowed() {
        let input = BirthInput::lunar(1990, 4, 21, false, 14, Gender::Male);
        let result = input.resolve(&NoLunarConverter);

        assert!(matches!(result, Err(ChartError::CalendarConversion(_))));
    }

    #[test]
    fn test_lunar_conversion_success_uses_converted_date() {
        let solar = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
        let input = BirthInput::lunar(1990, 4, 21, false, 14, Gender::Male);
        let birth = input.resolve(&FixedConverter(solar)).unwrap();

        assert_eq!(birth.solar_date(), solar);
        assert_eq!(birth.lunar().unwrap().day, 21);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("여".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_birth_input_deserializes_with_default_calendar() {
        let json = r#"{"year":1990,"month":5,"day":15,"hour":14,"gender":"male"}"#;
        let input: BirthInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.calendar, CalendarKind::Solar);
    }
}
