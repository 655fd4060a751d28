// 🔗 Interaction Detector - 합/충/형
// Rules as data: five pair tables plus the trine sets, checked against the
// six unordered pillar pairings of stems and of branches.
//
// Tables are independent. One pair may match several of them (a branch
// pair can be both a clash and a punishment).

use crate::pillars::{FourPillars, Position, POSITION_PAIRS};
use crate::symbols::{Branch, Element, Stem};
use serde::Serialize;

// ============================================================================
// RELATION RECORD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    StemCombination,
    StemClash,
    BranchCombination,
    BranchClash,
    BranchPunishment,
    BranchTrine,
}

impl RelationKind {
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::StemCombination => "천간합",
            RelationKind::StemClash => "천간충",
            RelationKind::BranchCombination => "지지육합",
            RelationKind::BranchClash => "지지충",
            RelationKind::BranchPunishment => "지지형",
            RelationKind::BranchTrine => "지지삼합",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationRecord {
    pub kind: RelationKind,
    /// Positions taking part, in year → hour order
    pub positions: Vec<Position>,
    /// Rule name, e.g. 오미합(토)
    pub label: &'static str,
    /// Element a combination transforms into, when it has one
    pub element: Option<Element>,
    /// Full description, e.g. 지지육합: 년지-시지 - 오미합(토)
    pub description: String,
}

// ============================================================================
// RULE TABLES
// ============================================================================

/// One unordered pair rule over symbol indices
#[derive(Debug, Clone, Copy)]
pub struct PairRule {
    pub a: u8,
    pub b: u8,
    pub label: &'static str,
    pub element: Option<Element>,
}

impl PairRule {
    pub(crate) const fn new(a: u8, b: u8, label: &'static str) -> Self {
        PairRule { a, b, label, element: None }
    }

    pub(crate) const fn forming(a: u8, b: u8, label: &'static str, element: Element) -> Self {
        PairRule { a, b, label, element: Some(element) }
    }

    pub fn matches(&self, x: usize, y: usize) -> bool {
        let (a, b) = (self.a as usize, self.b as usize);
        (a == x && b == y) || (a == y && b == x)
    }
}

pub const STEM_COMBINATIONS: [PairRule; 5] = [
    PairRule::forming(0, 5, "갑기합(토)", Element::Earth),
    PairRule::forming(1, 6, "을경합(금)", Element::Metal),
    PairRule::forming(2, 7, "병신합(수)", Element::Water),
    PairRule::forming(3, 8, "정임합(목)", Element::Wood),
    PairRule::forming(4, 9, "무계합(화)", Element::Fire),
];

pub const STEM_CLASHES: [PairRule; 4] = [
    PairRule::new(0, 6, "갑경충"),
    PairRule::new(1, 7, "을신충"),
    PairRule::new(2, 8, "병임충"),
    PairRule::new(3, 9, "정계충"),
];

pub const BRANCH_COMBINATIONS: [PairRule; 6] = [
    PairRule::forming(0, 1, "자축합(토)", Element::Earth),
    PairRule::forming(2, 11, "인해합(목)", Element::Wood),
    PairRule::forming(3, 10, "묘술합(화)", Element::Fire),
    PairRule::forming(4, 9, "진유합(금)", Element::Metal),
    PairRule::forming(5, 8, "사신합(수)", Element::Water),
    PairRule::forming(6, 7, "오미합(토)", Element::Earth),
];

pub const BRANCH_CLASHES: [PairRule; 6] = [
    PairRule::new(0, 6, "자오충"),
    PairRule::new(1, 7, "축미충"),
    PairRule::new(2, 8, "인신충"),
    PairRule::new(3, 9, "묘유충"),
    PairRule::new(4, 10, "진술충"),
    PairRule::new(5, 11, "사해충"),
];

/// Includes self-punishment: the same branch appearing at two positions
pub const BRANCH_PUNISHMENTS: [PairRule; 11] = [
    PairRule::new(2, 5, "인사형"),
    PairRule::new(5, 8, "사신형"),
    PairRule::new(2, 8, "인신형"),
    PairRule::new(1, 10, "축술형"),
    PairRule::new(1, 7, "축미형"),
    PairRule::new(10, 7, "술미형"),
    PairRule::new(0, 3, "자묘형"),
    PairRule::new(4, 4, "진진 자형"),
    PairRule::new(6, 6, "오오 자형"),
    PairRule::new(9, 9, "유유 자형"),
    PairRule::new(11, 11, "해해 자형"),
];

#[derive(Debug, Clone, Copy)]
pub struct TrineRule {
    pub members: [u8; 3],
    pub label: &'static str,
    pub element: Element,
}

pub const BRANCH_TRINES: [TrineRule; 4] = [
    TrineRule { members: [8, 0, 4], label: "수국삼합(申子辰)", element: Element::Water },
    TrineRule { members: [2, 6, 10], label: "화국삼합(寅午戌)", element: Element::Fire },
    TrineRule { members: [5, 9, 1], label: "금국삼합(巳酉丑)", element: Element::Metal },
    TrineRule { members: [11, 3, 7], label: "목국삼합(亥卯未)", element: Element::Wood },
];

// ============================================================================
// DETECTION
// ============================================================================

fn pair_records(
    kind: RelationKind,
    table: &[PairRule],
    first: (Position, usize),
    second: (Position, usize),
    pair_name: &str,
    out: &mut Vec<RelationRecord>,
) {
    for rule in table.iter().filter(|rule| rule.matches(first.1, second.1)) {
        out.push(RelationRecord {
            kind,
            positions: vec![first.0, second.0],
            label: rule.label,
            element: rule.element,
            description: format!("{}: {} - {}", kind.label(), pair_name, rule.label),
        });
    }
}

/// Stem combinations and clashes over the six stem pairings
pub fn stem_relations(stems: [Stem; 4]) -> Vec<RelationRecord> {
    let mut records = Vec::new();
    for (p, q) in POSITION_PAIRS {
        let first = (p, stems[p.index()].index());
        let second = (q, stems[q.index()].index());
        let pair_name = format!("{}-{}", p.stem_name(), q.stem_name());

        pair_records(RelationKind::StemCombination, &STEM_COMBINATIONS, first, second, &pair_name, &mut records);
        pair_records(RelationKind::StemClash, &STEM_CLASHES, first, second, &pair_name, &mut records);
    }
    records
}

/// Branch six-combinations, clashes and punishments over the six branch
/// pairings, followed by any complete trine
pub fn branch_relations(branches: [Branch; 4]) -> Vec<RelationRecord> {
    let mut records = Vec::new();
    for (p, q) in POSITION_PAIRS {
        let first = (p, branches[p.index()].index());
        let second = (q, branches[q.index()].index());
        let pair_name = format!("{}-{}", p.branch_name(), q.branch_name());

        pair_records(RelationKind::BranchCombination, &BRANCH_COMBINATIONS, first, second, &pair_name, &mut records);
        pair_records(RelationKind::BranchClash, &BRANCH_CLASHES, first, second, &pair_name, &mut records);
        pair_records(RelationKind::BranchPunishment, &BRANCH_PUNISHMENTS, first, second, &pair_name, &mut records);
    }

    records.extend(trine_relations(branches));
    records
}

/// One record per trine whose three members all appear, wherever they sit
pub fn trine_relations(branches: [Branch; 4]) -> Vec<RelationRecord> {
    BRANCH_TRINES
        .iter()
        .filter(|trine| {
            trine
                .members
                .iter()
                .all(|&member| branches.iter().any(|b| b.index() == member as usize))
        })
        .map(|trine| {
            let positions = Position::ALL
                .into_iter()
                .filter(|pos| trine.members.contains(&(branches[pos.index()].index() as u8)))
                .collect();
            RelationRecord {
                kind: RelationKind::BranchTrine,
                positions,
                label: trine.label,
                element: Some(trine.element),
                description: format!("{}: {}", RelationKind::BranchTrine.label(), trine.label),
            }
        })
        .collect()
}

/// All stem and branch interactions of a chart
pub fn detect(pillars: &FourPillars) -> Vec<RelationRecord> {
    let mut records = stem_relations(pillars.stems());
    records.extend(branch_relations(pillars.branches()));
    tracing::debug!(count = records.len(), "detected interactions");
    records
}

// ============================================================================
// TESTS
// ============================================================================
