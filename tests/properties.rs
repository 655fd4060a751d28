use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use saju_engine::pillars::{day_pillar, hour_branch, month_pillar, year_pillar};
use saju_engine::solar_terms::chart_month;
use saju_engine::symbols::Branch;
use saju_engine::{
    analyze_at, BirthInput, ElementTally, FortuneCycle, FourPillars, Gender, NoLunarConverter,
    ResolvedBirth,
};

fn date_from(days: i64) -> NaiveDate {
    // 1900-01-01 .. ~2099
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days)
}

fn gender(male: bool) -> Gender {
    if male {
        Gender::Male
    } else {
        Gender::Female
    }
}

proptest! {
    /// Invariant: the day pillar repeats every 60 days, before and after the anchor.
    #[test]
    fn day_pillar_has_period_60(days in 0i64..73000) {
        let date = date_from(days);
        let later = date + Duration::days(60);
        prop_assert_eq!(day_pillar(date).unwrap(), day_pillar(later).unwrap());
    }

    /// Invariant: consecutive days advance the cycle by exactly one.
    #[test]
    fn day_pillar_advances_by_one(days in 0i64..73000) {
        let date = date_from(days);
        let today = day_pillar(date).unwrap().cycle_index().unwrap();
        let tomorrow = day_pillar(date + Duration::days(1)).unwrap().cycle_index().unwrap();
        prop_assert_eq!((today + 1) % 60, tomorrow);
    }

    /// Invariant: the year rolls over exactly between Feb 3 and Feb 4.
    #[test]
    fn year_rolls_over_at_spring_start(year in 1901i32..2100) {
        let feb3 = year_pillar(NaiveDate::from_ymd_opt(year, 2, 3).unwrap());
        let feb4 = year_pillar(NaiveDate::from_ymd_opt(year, 2, 4).unwrap());
        prop_assert_eq!(feb3.stem.offset(1), feb4.stem);
        prop_assert_eq!(feb3.branch.offset(1), feb4.branch);
        prop_assert_eq!(feb4.stem.index() as i32, (year - 4).rem_euclid(10));
    }

    /// Invariant: Jan 1-5 stay in chart month 12 (丑) of the previous year.
    #[test]
    fn early_january_is_chart_month_12(year in 1901i32..2100, day in 1u32..6, hour in 0u32..24) {
        let date = NaiveDate::from_ymd_opt(year, 1, day).unwrap();
        prop_assert_eq!(chart_month(date), 12);

        let birth = ResolvedBirth::new(date, hour, Gender::Female).unwrap();
        let chart = FourPillars::compute(&birth).unwrap();
        prop_assert_eq!(chart.month.branch.index(), 1);
        prop_assert_eq!(chart.year, year_pillar(NaiveDate::from_ymd_opt(year - 1, 6, 1).unwrap()));
        prop_assert_eq!(chart.month, month_pillar(chart.year.stem, 12).unwrap());
    }

    /// Invariant: every clock hour maps to exactly one branch.
    #[test]
    fn hour_mapping_is_total(hour in 0u32..24) {
        let branch = hour_branch(hour).unwrap();
        prop_assert!(branch.index() < Branch::COUNT);
        if hour == 23 || hour == 0 {
            prop_assert_eq!(branch.index(), 0);
        }
    }

    /// Invariant: hours past 23 are rejected, never wrapped.
    #[test]
    fn hour_out_of_range_is_rejected(hour in 24u32..1000) {
        prop_assert!(hour_branch(hour).is_err());
    }

    /// Invariant: the element tally always sums to eight.
    #[test]
    fn tally_sums_to_eight(days in 0i64..73000, hour in 0u32..24, male in any::<bool>()) {
        let birth = ResolvedBirth::new(date_from(days), hour, gender(male)).unwrap();
        let chart = FourPillars::compute(&birth).unwrap();
        prop_assert_eq!(ElementTally::from_pillars(&chart).total(), 8);
    }

    /// Invariant: every derived pillar sits in the sexagenary cycle.
    #[test]
    fn pillars_are_valid_cycle_units(days in 0i64..73000, hour in 0u32..24) {
        let birth = ResolvedBirth::new(date_from(days), hour, Gender::Male).unwrap();
        let chart = FourPillars::compute(&birth).unwrap();
        for pillar in chart.pillars() {
            prop_assert!(pillar.cycle_index().is_some());
        }
        prop_assert!((1..=12).contains(&chart.chart_month));
    }

    /// Invariant: ten periods, ages and years stepping by ten, start age in [1,9].
    #[test]
    fn fortune_cycle_is_monotonic(days in 0i64..73000, hour in 0u32..24, male in any::<bool>()) {
        let date = date_from(days);
        let birth = ResolvedBirth::new(date, hour, gender(male)).unwrap();
        let chart = FourPillars::compute(&birth).unwrap();
        let cycle = FortuneCycle::generate(&chart, birth.gender(), date);

        prop_assert_eq!(cycle.periods.len(), 10);
        prop_assert!((1..=9).contains(&cycle.start_age));
        prop_assert_eq!(cycle.periods[0].age, cycle.start_age);
        prop_assert_eq!(cycle.periods[0].year, date.year() + cycle.start_age as i32);
        for pair in cycle.periods.windows(2) {
            prop_assert_eq!(pair[1].age, pair[0].age + 10);
            prop_assert_eq!(pair[1].year, pair[0].year + 10);
        }
    }

    /// Invariant: any valid solar input produces a full report.
    #[test]
    fn analyze_never_fails_on_valid_input(days in 0i64..73000, hour in 0u32..24, male in any::<bool>()) {
        let date = date_from(days);
        let input = BirthInput::solar(date.year(), date.month(), date.day(), hour, gender(male));
        let report = analyze_at(&input, &NoLunarConverter, 2026).unwrap();

        prop_assert_eq!(report.pillars.len(), 4);
        prop_assert_eq!(report.ten_relations.len(), 7);
        for pillar in &report.pillars {
            let weights: u32 = pillar.hidden_stems.iter().map(|h| h.days as u32).sum();
            prop_assert_eq!(weights, 30);
        }
    }
}
