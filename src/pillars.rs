// 🏛️ Pillar Calculator - Four Pillars (사주)
// Derives the year/month/day/hour stem-branch pairs of a birth moment.
//
// Year:  (Y - 4) mod 10 / mod 12, Y rolls over at the Feb 4 spring boundary
// Month: branch from the chart month, stem from the year-stem group
// Day:   60-day cycle counted from a fixed anchor day
// Hour:  two-hour brackets, 子 straddling midnight

use crate::error::{ChartError, Result};
use crate::input::ResolvedBirth;
use crate::solar_terms;
use crate::symbols::{Branch, Stem};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// POSITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Year,
    Month,
    Day,
    Hour,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Year, Position::Month, Position::Day, Position::Hour];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Pillar name, e.g. 년주
    pub fn pillar_name(self) -> &'static str {
        match self {
            Position::Year => "년주",
            Position::Month => "월주",
            Position::Day => "일주",
            Position::Hour => "시주",
        }
    }

    /// Stem slot name, e.g. 년간
    pub fn stem_name(self) -> &'static str {
        match self {
            Position::Year => "년간",
            Position::Month => "월간",
            Position::Day => "일간",
            Position::Hour => "시간",
        }
    }

    /// Branch slot name, e.g. 년지
    pub fn branch_name(self) -> &'static str {
        match self {
            Position::Year => "년지",
            Position::Month => "월지",
            Position::Day => "일지",
            Position::Hour => "시지",
        }
    }
}

/// The six unordered position pairs, in (year,month) .. (day,hour) order
pub const POSITION_PAIRS: [(Position, Position); 6] = [
    (Position::Year, Position::Month),
    (Position::Year, Position::Day),
    (Position::Year, Position::Hour),
    (Position::Month, Position::Day),
    (Position::Month, Position::Hour),
    (Position::Day, Position::Hour),
];

// ============================================================================
// PILLAR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub position: Position,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch, position: Position) -> Self {
        Pillar { stem, branch, position }
    }

    /// Position in the 60-term sexagenary cycle (甲子 = 0).
    ///
    /// Only stem/branch pairs of equal parity occur in the cycle; every pillar
    /// this module derives has that property.
    pub fn cycle_index(&self) -> Option<usize> {
        if self.stem.index() % 2 != self.branch.index() % 2 {
            return None;
        }
        let index = (6 * self.stem.index() as i64 - 5 * self.branch.index() as i64).rem_euclid(60);
        Some(index as usize)
    }

    /// Korean reading followed by Hanja, e.g. 경오(庚午)
    pub fn label(&self) -> String {
        format!(
            "{}{}({}{})",
            self.stem.korean(),
            self.branch.korean(),
            self.stem.hanja(),
            self.branch.hanja()
        )
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

// ============================================================================
// FOUR PILLARS
// ============================================================================

/// Exactly four pillars ordered year → month → day → hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// Chart month (1 = 寅 .. 12 = 丑) the month pillar was built from
    pub chart_month: u8,
}

impl FourPillars {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn get(&self, position: Position) -> Pillar {
        match position {
            Position::Year => self.year,
            Position::Month => self.month,
            Position::Day => self.day,
            Position::Hour => self.hour,
        }
    }

    pub fn stems(&self) -> [Stem; 4] {
        [self.year.stem, self.month.stem, self.day.stem, self.hour.stem]
    }

    pub fn branches(&self) -> [Branch; 4] {
        [self.year.branch, self.month.branch, self.day.branch, self.hour.branch]
    }

    /// The day stem (일간), reference for every relational classifier
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Derive all four pillars for a resolved birth moment
    pub fn compute(birth: &ResolvedBirth) -> Result<Self> {
        let date = birth.solar_date();

        let year = year_pillar(date);
        let chart_month = solar_terms::chart_month(date);
        let month = month_pillar(year.stem, chart_month)?;
        let day = day_pillar(date)?;
        let hour = hour_pillar(day.stem, birth.hour())?;

        tracing::debug!(
            %date,
            year = %year,
            month = %month,
            day = %day,
            hour = %hour,
            "derived four pillars"
        );

        Ok(FourPillars {
            year,
            month,
            day,
            hour,
            chart_month,
        })
    }
}

// ============================================================================
// YEAR PILLAR
// ============================================================================

/// Year pillar for an arbitrary calendar year (no spring adjustment)
pub fn calendar_year_pillar(year: i32) -> Pillar {
    let offset = year as i64 - 4;
    Pillar::new(Stem::wrapping(offset), Branch::wrapping(offset), Position::Year)
}

/// Year pillar of a birth date; dates before Feb 4 count as the previous year
pub fn year_pillar(date: NaiveDate) -> Pillar {
    let year = if solar_terms::has_reached_spring(date) {
        date.year()
    } else {
        date.year() - 1
    };
    calendar_year_pillar(year)
}

// ============================================================================
// MONTH PILLAR
// ============================================================================

/// Stem of chart month 1 (寅 month) for each year-stem group
/// 甲己→丙, 乙庚→戊, 丙辛→庚, 丁壬→壬, 戊癸→甲
const MONTH_STEM_START: [i64; 5] = [2, 4, 6, 8, 0];

pub fn month_pillar(year_stem: Stem, chart_month: u8) -> Result<Pillar> {
    if !(1..=12).contains(&chart_month) {
        return Err(ChartError::Invariant(format!(
            "chart month {} outside 1..=12",
            chart_month
        )));
    }
    let month = chart_month as i64;
    let start = MONTH_STEM_START[year_stem.index() % 5];

    Ok(Pillar::new(
        Stem::wrapping(start + month - 1),
        Branch::wrapping(month + 1),
        Position::Month,
    ))
}

// ============================================================================
// DAY PILLAR
// ============================================================================

/// A 甲子 day: 2024-01-01 sits at cycle position 0.
pub const DAY_CYCLE_ANCHOR: (i32, u32, u32) = (2024, 1, 1);
pub const DAY_CYCLE_ANCHOR_POSITION: i64 = 0;

fn day_cycle_anchor() -> Result<NaiveDate> {
    let (y, m, d) = DAY_CYCLE_ANCHOR;
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| ChartError::Invariant("day-cycle anchor is not a valid date".to_string()))
}

/// Day pillar by whole-day distance from the anchor; dates before the anchor
/// wrap with a floor modulo.
pub fn day_pillar(date: NaiveDate) -> Result<Pillar> {
    let days = date.signed_duration_since(day_cycle_anchor()?).num_days();
    let position = (DAY_CYCLE_ANCHOR_POSITION + days).rem_euclid(60);

    Ok(Pillar::new(
        Stem::wrapping(position),
        Branch::wrapping(position),
        Position::Day,
    ))
}

// ============================================================================
// HOUR PILLAR
// ============================================================================

/// Hour branch for a clock hour. 23:00 and 00:00 both belong to 子.
pub fn hour_branch(hour: u32) -> Result<Branch> {
    let index = match hour {
        23 | 0 => 0,
        1..=22 => ((hour + 1) / 2) as usize,
        _ => {
            return Err(ChartError::invalid(
                "hour",
                format!("{} is outside 0..=23", hour),
            ))
        }
    };
    Branch::from_index(index)
        .ok_or_else(|| ChartError::Invariant(format!("hour bracket {} has no branch", index)))
}

/// Stem of the 子 hour for each day-stem group
/// 甲己→甲, 乙庚→丙, 丙辛→戊, 丁壬→庚, 戊癸→壬
const HOUR_STEM_START: [i64; 5] = [0, 2, 4, 6, 8];

pub fn hour_pillar(day_stem: Stem, hour: u32) -> Result<Pillar> {
    let branch = hour_branch(hour)?;
    let start = HOUR_STEM_START[day_stem.index() % 5];

    Ok(Pillar::new(
        Stem::wrapping(start + branch.index() as i64),
        branch,
        Position::Hour,
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_pillar_rolls_over_at_spring_start() {
        let before = year_pillar(date(2024, 2, 3));
        let after = year_pillar(date(2024, 2, 4));

        assert_eq!(before.to_string(), "癸卯");
        assert_eq!(after.to_string(), "甲辰");
        assert_eq!(year_pillar(date(1990, 5, 15)).label(), "경오(庚午)");
    }

    #[test]
    fn test_month_pillar_follows_year_stem_group() {
        // 庚 year, 巳 month (chart month 4)
        let gyeong = Stem::from_index(6).unwrap();
        assert_eq!(month_pillar(gyeong, 4).unwrap().to_string(), "辛巳");

        // 甲 year opens with 丙寅, 戊 year with 甲寅
        assert_eq!(month_pillar(Stem::from_index(0).unwrap(), 1).unwrap().to_string(), "丙寅");
        assert_eq!(month_pillar(Stem::from_index(4).unwrap(), 1).unwrap().to_string(), "甲寅");
        // chart month 12 is 丑
        assert_eq!(month_pillar(Stem::from_index(0).unwrap(), 12).unwrap().to_string(), "丁丑");

        assert!(month_pillar(gyeong, 13).is_err());
    }

    #[test]
    fn test_day_pillar_known_days() {
        assert_eq!(day_pillar(date(2024, 1, 1)).unwrap().to_string(), "甲子");
        assert_eq!(day_pillar(date(2000, 1, 1)).unwrap().to_string(), "戊午");
        assert_eq!(day_pillar(date(1900, 1, 1)).unwrap().to_string(), "甲戌");
        assert_eq!(day_pillar(date(1990, 5, 15)).unwrap().to_string(), "庚辰");
    }

    #[test]
    fn test_day_pillar_before_anchor_uses_floor_modulo() {
        // one day before a 甲子 day is 癸亥
        assert_eq!(day_pillar(date(2023, 12, 31)).unwrap().to_string(), "癸亥");
        assert_eq!(day_pillar(date(2023, 11, 2)).unwrap().to_string(), "甲子");
    }

    #[test]
    fn test_early_january_month_uses_previous_year_group() {
        // 2000 is a 庚 year: its 丑 month is 己丑
        let birth = ResolvedBirth::new(date(2001, 1, 3), 12, Gender::Male).unwrap();
        let pillars = FourPillars::compute(&birth).unwrap();
        assert_eq!(pillars.year.to_string(), "庚辰");
        assert_eq!(pillars.chart_month, 12);
        assert_eq!(pillars.month.to_string(), "己丑");

        // 2023 is a 癸 year: its 丑 month is 乙丑
        let birth = ResolvedBirth::new(date(2024, 1, 1), 0, Gender::Male).unwrap();
        let pillars = FourPillars::compute(&birth).unwrap();
        assert_eq!(pillars.month.to_string(), "乙丑");
        assert_eq!(pillars.month, month_pillar(pillars.year.stem, 12).unwrap());
    }

    #[test]
    fn test_hour_branch_wraps_at_midnight() {
        assert_eq!(hour_branch(23).unwrap().index(), 0);
        assert_eq!(hour_branch(0).unwrap().index(), 0);
        assert_eq!(hour_branch(1).unwrap().index(), 1);
        assert_eq!(hour_branch(2).unwrap().index(), 1);
        assert_eq!(hour_branch(13).unwrap().index(), 7);
        assert_eq!(hour_branch(14).unwrap().index(), 7);
        assert_eq!(hour_branch(22).unwrap().index(), 11);
        assert!(hour_branch(24).is_err());
    }

    #[test]
    fn test_hour_pillar_follows_day_stem_group() {
        let gyeong = Stem::from_index(6).unwrap();
        assert_eq!(hour_pillar(gyeong, 14).unwrap().to_string(), "癸未");
        let gap = Stem::from_index(0).unwrap();
        assert_eq!(hour_pillar(gap, 23).unwrap().to_string(), "甲子");
        assert_eq!(hour_pillar(gap, 0).unwrap().to_string(), "甲子");
    }

    #[test]
    fn test_compute_four_pillars() {
        let birth = ResolvedBirth::new(date(1990, 5, 15), 14, Gender::Male).unwrap();
        let pillars = FourPillars::compute(&birth).unwrap();

        let labels: Vec<String> = pillars.pillars().iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["庚午", "辛巳", "庚辰", "癸未"]);
        assert_eq!(pillars.chart_month, 4);
        assert_eq!(pillars.day_master().hanja(), "庚");
        for (pillar, position) in pillars.pillars().iter().zip(Position::ALL) {
            assert_eq!(pillar.position, position);
            assert!(pillar.cycle_index().is_some());
        }
    }

    #[test]
    fn test_cycle_index() {
        let pillar = day_pillar(date(1990, 5, 15)).unwrap();
        assert_eq!(pillar.cycle_index(), Some(16));
        let odd = Pillar::new(Stem::from_index(0).unwrap(), Branch::from_index(1).unwrap(), Position::Day);
        assert_eq!(odd.cycle_index(), None);
    }
}
