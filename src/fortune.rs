// 🔄 Fortune Cycle Generator (대운)
// Ten decade-long periods stepped from the month pillar.
//
// Direction: yang-year male or yin-year female runs forward, everyone else
// in reverse. The starting age is an approximation of the classical method
// (days to the neighbouring sectional term divided by three): it uses the
// birth day-of-month in place of the real day count.

use crate::input::Gender;
use crate::pillars::{FourPillars, Pillar, Position};
use crate::symbols::{Branch, Polarity, Stem};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const PERIOD_COUNT: usize = 10;
pub const PERIOD_YEARS: u32 = 10;
pub const MIN_START_AGE: u32 = 1;
pub const MAX_START_AGE: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn of(gender: Gender, year_stem: Stem) -> Self {
        match (gender, year_stem.polarity()) {
            (Gender::Male, Polarity::Yang) | (Gender::Female, Polarity::Yin) => Direction::Forward,
            (Gender::Male, Polarity::Yin) | (Gender::Female, Polarity::Yang) => Direction::Reverse,
        }
    }

    fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Forward => "순행",
            Direction::Reverse => "역행",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortunePeriod {
    /// Age at which the period begins
    pub age: u32,
    /// Calendar year the period begins (birth year + age)
    pub year: i32,
    pub stem: Stem,
    pub branch: Branch,
    /// e.g. 임오(壬午)
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneCycle {
    pub direction: Direction,
    pub start_age: u32,
    pub periods: Vec<FortunePeriod>,
}

/// Simplified starting age.
///
/// Forward: (30 - day) / 3, reverse: day / 3, floored and clamped to [1,9].
pub fn start_age(direction: Direction, birth_date: NaiveDate) -> u32 {
    let day = birth_date.day();
    let days = match direction {
        Direction::Forward => 30u32.saturating_sub(day),
        Direction::Reverse => day,
    };
    (days / 3).clamp(MIN_START_AGE, MAX_START_AGE)
}

impl FortuneCycle {
    pub fn generate(pillars: &FourPillars, gender: Gender, birth_date: NaiveDate) -> Self {
        let direction = Direction::of(gender, pillars.year.stem);
        let start_age = start_age(direction, birth_date);
        let month = pillars.month;

        let periods = (0..PERIOD_COUNT)
            .map(|i| {
                let steps = direction.step() * (i as i64 + 1);
                let stem = month.stem.offset(steps);
                let branch = month.branch.offset(steps);
                let age = start_age + PERIOD_YEARS * i as u32;
                FortunePeriod {
                    age,
                    year: birth_date.year() + age as i32,
                    stem,
                    branch,
                    label: Pillar::new(stem, branch, Position::Month).label(),
                }
            })
            .collect();

        tracing::debug!(?direction, start_age, "generated fortune cycle");

        FortuneCycle {
            direction,
            start_age,
            periods,
        }
    }

    /// The period running at a given age, if the cycle has started
    pub fn period_at_age(&self, age: u32) -> Option<&FortunePeriod> {
        self.periods.iter().rev().find(|period| period.age <= age)
    }
}

// ============================================================================
// TESTS
// ============================================================================
