// 🌞 Solar-Term Boundaries (절기)
// Maps a solar date to its chart month using fixed calendar-date
// approximations of the twelve sectional terms. No ephemeris is involved.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A sectional term that opens a chart month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermBoundary {
    pub name: &'static str,
    pub month: u32,
    pub day: u32,
    /// Chart month opened by this term (1 = 寅 month .. 12 = 丑 month)
    pub chart_month: u8,
}

/// Boundaries in calendar order within one Gregorian year.
pub const TERM_BOUNDARIES: [TermBoundary; 12] = [
    TermBoundary { name: "소한(小寒)", month: 1, day: 6, chart_month: 12 },
    TermBoundary { name: "입춘(立春)", month: 2, day: 4, chart_month: 1 },
    TermBoundary { name: "경칩(驚蟄)", month: 3, day: 6, chart_month: 2 },
    TermBoundary { name: "청명(淸明)", month: 4, day: 5, chart_month: 3 },
    TermBoundary { name: "입하(立夏)", month: 5, day: 6, chart_month: 4 },
    TermBoundary { name: "망종(芒種)", month: 6, day: 6, chart_month: 5 },
    TermBoundary { name: "소서(小暑)", month: 7, day: 7, chart_month: 6 },
    TermBoundary { name: "입추(立秋)", month: 8, day: 7, chart_month: 7 },
    TermBoundary { name: "백로(白露)", month: 9, day: 8, chart_month: 8 },
    TermBoundary { name: "한로(寒露)", month: 10, day: 8, chart_month: 9 },
    TermBoundary { name: "입동(立冬)", month: 11, day: 7, chart_month: 10 },
    TermBoundary { name: "대설(大雪)", month: 12, day: 7, chart_month: 11 },
];

/// Start of spring: the year pillar rolls over here, not on January 1.
pub const SPRING_START: (u32, u32) = (2, 4);

impl TermBoundary {
    fn reached_by(&self, date: NaiveDate) -> bool {
        (date.month(), date.day()) >= (self.month, self.day)
    }
}

/// Latest boundary the date has reached.
///
/// Dates before January 6 have not reached any boundary of their own year.
/// Chart month 12 (소한, the 丑 month) runs on through them, so they resolve
/// to the 소한 entry.
pub fn governing_term(date: NaiveDate) -> &'static TermBoundary {
    TERM_BOUNDARIES
        .iter()
        .rev()
        .find(|boundary| boundary.reached_by(date))
        .unwrap_or(&TERM_BOUNDARIES[0])
}

/// Chart month in [1,12] for a solar date
pub fn chart_month(date: NaiveDate) -> u8 {
    governing_term(date).chart_month
}

/// True once the date has reached the start-of-spring boundary of its year
pub fn has_reached_spring(date: NaiveDate) -> bool {
    (date.month(), date.day()) >= SPRING_START
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_boundary_days_open_their_month() {
        assert_eq!(chart_month(date(2024, 2, 3)), 12);
        assert_eq!(chart_month(date(2024, 2, 4)), 1);
        assert_eq!(chart_month(date(1990, 5, 5)), 3);
        assert_eq!(chart_month(date(1990, 5, 6)), 4);
        assert_eq!(chart_month(date(1990, 5, 15)), 4);
        assert_eq!(chart_month(date(2000, 12, 7)), 11);
        assert_eq!(chart_month(date(2000, 12, 31)), 11);
    }

    #[test]
    fn test_early_january_continues_chart_month_12() {
        assert_eq!(chart_month(date(2001, 1, 1)), 12);
        assert_eq!(chart_month(date(2001, 1, 3)), 12);
        assert_eq!(chart_month(date(2001, 1, 5)), 12);
        assert_eq!(governing_term(date(2001, 1, 5)).name, "소한(小寒)");
        assert_eq!(chart_month(date(2001, 1, 6)), 12);
        assert_eq!(chart_month(date(2000, 12, 31)), 11);
    }

    #[test]
    fn test_every_day_of_a_year_resolves_into_range() {
        let mut day = date(2023, 1, 1);
        while day.year() == 2023 {
            let month = chart_month(day);
            assert!((1..=12).contains(&month));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_spring_boundary() {
        assert!(!has_reached_spring(date(2024, 2, 3)));
        assert!(has_reached_spring(date(2024, 2, 4)));
        assert!(!has_reached_spring(date(2024, 1, 31)));
    }
}
