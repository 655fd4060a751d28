// 📜 Chart Report - Aggregator
// Pure composition of every component's output into one immutable value.
// No interpretation happens here beyond structural assembly and a few
// derived convenience fields (zodiac animal, dominant/weakest element).

use crate::elements::{ElementTally, FavorableElement};
use crate::error::Result;
use crate::fortune::FortuneCycle;
use crate::input::{BirthInput, Gender, LunarConverter, LunarDate, ResolvedBirth};
use crate::interactions::{self, RelationRecord};
use crate::pillars::{calendar_year_pillar, FourPillars, Pillar, Position};
use crate::spirits::{self, SpiritRecord};
use crate::symbols::{Element, Polarity};
use crate::ten_relations::{place_relations, RelationPlacement};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthSummary {
    pub solar_date: NaiveDate,
    pub hour: u32,
    /// e.g. 미시(13~15시)
    pub hour_name: &'static str,
    pub gender: Gender,
    /// Present when the caller supplied a lunar date
    pub lunar: Option<LunarDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenStemView {
    pub glyph: &'static str,
    pub element: Element,
    pub days: u8,
}

/// One pillar with everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarView {
    pub position: Position,
    pub name: &'static str,
    pub label: String,
    pub stem: &'static str,
    pub stem_korean: &'static str,
    pub stem_element: Element,
    pub stem_polarity: Polarity,
    pub branch: &'static str,
    pub branch_korean: &'static str,
    pub branch_element: Element,
    pub branch_polarity: Polarity,
    pub cycle_index: Option<usize>,
    pub hidden_stems: Vec<HiddenStemView>,
}

impl From<Pillar> for PillarView {
    fn from(pillar: Pillar) -> Self {
        PillarView {
            position: pillar.position,
            name: pillar.position.pillar_name(),
            label: pillar.label(),
            stem: pillar.stem.hanja(),
            stem_korean: pillar.stem.korean(),
            stem_element: pillar.stem.element(),
            stem_polarity: pillar.stem.polarity(),
            branch: pillar.branch.hanja(),
            branch_korean: pillar.branch.korean(),
            branch_element: pillar.branch.element(),
            branch_polarity: pillar.branch.polarity(),
            cycle_index: pillar.cycle_index(),
            hidden_stems: pillar
                .branch
                .hidden_stems()
                .iter()
                .map(|hidden| HiddenStemView {
                    glyph: hidden.stem.hanja(),
                    element: hidden.stem.element(),
                    days: hidden.days,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyView {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
    pub dominant: Element,
    pub weakest: Element,
    pub missing: Vec<Element>,
}

impl From<&ElementTally> for TallyView {
    fn from(tally: &ElementTally) -> Self {
        TallyView {
            wood: tally.count(Element::Wood),
            fire: tally.count(Element::Fire),
            earth: tally.count(Element::Earth),
            metal: tally.count(Element::Metal),
            water: tally.count(Element::Water),
            dominant: tally.dominant(),
            weakest: tally.weakest(),
            missing: tally.missing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentYear {
    pub year: i32,
    pub pillar: String,
    /// e.g. 2026년 병오(丙午)
    pub label: String,
}

impl CurrentYear {
    pub fn of(year: i32) -> Self {
        let pillar = calendar_year_pillar(year);
        CurrentYear {
            year,
            pillar: pillar.to_string(),
            label: format!("{}년 {}", year, pillar.label()),
        }
    }
}

// ============================================================================
// CHART REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartReport {
    pub birth: BirthSummary,
    pub pillars: Vec<PillarView>,
    pub day_master: String,
    pub day_master_element: Element,
    pub zodiac_animal: &'static str,
    pub elements: TallyView,
    pub favorable: FavorableElement,
    pub ten_relations: Vec<RelationPlacement>,
    pub relations: Vec<RelationRecord>,
    pub spirits: Vec<SpiritRecord>,
    pub fortune: FortuneCycle,
    pub current_year: CurrentYear,
    #[serde(skip)]
    chart: FourPillars,
}

impl ChartReport {
    /// Assemble the report for an already resolved birth moment
    pub fn from_birth(birth: &ResolvedBirth, current_year: i32) -> Result<Self> {
        let chart = FourPillars::compute(birth)?;
        let tally = ElementTally::from_pillars(&chart);
        let favorable = FavorableElement::estimate(&chart, &tally);
        let ten_relations = place_relations(&chart)?;
        let relations = interactions::detect(&chart);
        let spirits = spirits::evaluate(&chart);
        let fortune = FortuneCycle::generate(&chart, birth.gender(), birth.solar_date());
        let day_master = chart.day_master();

        Ok(ChartReport {
            birth: BirthSummary {
                solar_date: birth.solar_date(),
                hour: birth.hour(),
                hour_name: chart.hour.branch.hour_name(),
                gender: birth.gender(),
                lunar: birth.lunar(),
            },
            pillars: chart.pillars().into_iter().map(PillarView::from).collect(),
            day_master: format!("{}({})", day_master.korean(), day_master.hanja()),
            day_master_element: day_master.element(),
            zodiac_animal: chart.year.branch.animal(),
            elements: TallyView::from(&tally),
            favorable,
            ten_relations,
            relations,
            spirits,
            fortune,
            current_year: CurrentYear::of(current_year),
            chart,
        })
    }

    /// The raw four pillars behind the report
    pub fn chart(&self) -> &FourPillars {
        &self.chart
    }

    /// One-line summary: pillars, dominant element, favorable element
    pub fn summary(&self) -> String {
        let pillars: Vec<String> = self.chart.pillars().iter().map(|p| p.to_string()).collect();
        format!(
            "{} | 일간 {} | 최다 {} | 용신 {} ({})",
            pillars.join(" "),
            self.day_master,
            self.elements.dominant.label(),
            self.favorable.favorable_label,
            self.favorable.strength_label
        )
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Resolve and analyze a birth input against an explicit current year
pub fn analyze_at(
    input: &BirthInput,
    converter: &dyn LunarConverter,
    current_year: i32,
) -> Result<ChartReport> {
    let birth = input.resolve(converter)?;
    ChartReport::from_birth(&birth, current_year)
}

/// Resolve and analyze a birth input, using the local clock for the current year
pub fn analyze(input: &BirthInput, converter: &dyn LunarConverter) -> Result<ChartReport> {
    analyze_at(input, converter, Local::now().year())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::input::NoLunarConverter;

    fn reference_report() -> ChartReport {
        let input = BirthInput::solar(1990, 5, 15, 14, Gender::Male);
        analyze_at(&input, &NoLunarConverter, 2026).unwrap()
    }

    #[test]
    fn test_report_assembles_every_component() {
        let report = reference_report();

        assert_eq!(report.pillars.len(), 4);
        assert_eq!(report.pillars[0].label, "경오(庚午)");
        assert_eq!(report.pillars[3].name, "시주");
        assert_eq!(report.birth.hour_name, "미시(13~15시)");
        assert_eq!(report.day_master, "경(庚)");
        assert_eq!(report.day_master_element, Element::Metal);
        assert_eq!(report.zodiac_animal, "말");
        assert_eq!(report.ten_relations.len(), 7);
        assert_eq!(report.fortune.periods.len(), 10);
        assert!(report.spirits.is_empty());
    }

    #[test]
    fn test_current_year_pillar_ignores_spring_boundary() {
        let report = reference_report();
        assert_eq!(report.current_year.pillar, "丙午");
        assert_eq!(report.current_year.label, "2026년 병오(丙午)");
    }

    #[test]
    fn test_hidden_stems_listed_in_table_order() {
        let report = reference_report();
        // 辰: 乙 9, 癸 3, 戊 18
        let day = &report.pillars[2];
        let hidden: Vec<(&str, u8)> = day.hidden_stems.iter().map(|h| (h.glyph, h.days)).collect();
        assert_eq!(hidden, vec![("乙", 9), ("癸", 3), ("戊", 18)]);
    }

    #[test]
    fn test_tally_view_matches_tally() {
        let report = reference_report();
        let view = &report.elements;
        assert_eq!(
            [view.wood, view.fire, view.earth, view.metal, view.water],
            [0, 2, 2, 3, 1]
        );
        assert_eq!(view.dominant, Element::Metal);
        assert_eq!(view.weakest, Element::Wood);
    }

    #[test]
    fn test_summary_line() {
        let report = reference_report();
        assert_eq!(
            report.summary(),
            "庚午 辛巳 庚辰 癸未 | 일간 경(庚) | 최다 금(金) | 용신 수(水) (신강(身強))"
        );
    }

    #[test]
    fn test_errors_abort_without_partial_report() {
        let bad = BirthInput::solar(1990, 13, 1, 10, Gender::Male);
        assert!(matches!(
            analyze_at(&bad, &NoLunarConverter, 2026),
            Err(ChartError::InvalidInput { field: "date", .. })
        ));

        let lunar = BirthInput::lunar(1990, 4, 21, false, 14, Gender::Male);
        let err = analyze_at(&lunar, &NoLunarConverter, 2026).unwrap_err();
        assert!(matches!(err, ChartError::CalendarConversion(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = reference_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["favorable"]["strength"], "strong");
        assert_eq!(json["fortune"]["direction"], "forward");
        assert_eq!(json["pillars"][2]["stem"], "庚");
        assert!(json.get("chart").is_none());
    }
}
