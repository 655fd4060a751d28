// ✨ Spirit Evaluator (신살)
// Day-branch keyed target tables plus the ghost-gate pair table.
//
// Each day-keyed table is a 12-entry array indexed by the day branch, so
// every branch has a target in every table. The day pillar never triggers
// its own rule; only the other three branches are compared.

use crate::interactions::PairRule;
use crate::pillars::{FourPillars, Position, POSITION_PAIRS};
use crate::symbols::Branch;
use serde::Serialize;

// ============================================================================
// SPIRIT KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiritKind {
    /// 도화살: attraction, popularity
    PeachBlossom,
    /// 역마살: movement, travel
    TravelingHorse,
    /// 화개살: solitude, art, religion
    FlowerCanopy,
    /// 귀문관살: nervous sensitivity
    GhostGate,
}

impl SpiritKind {
    pub fn name(&self) -> &'static str {
        match self {
            SpiritKind::PeachBlossom => "도화살(桃花殺)",
            SpiritKind::TravelingHorse => "역마살(驛馬殺)",
            SpiritKind::FlowerCanopy => "화개살(華蓋殺)",
            SpiritKind::GhostGate => "귀문관살(鬼門關殺)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpiritRecord {
    pub spirit: SpiritKind,
    pub name: &'static str,
    /// Triggering position(s): one for day-keyed rules, two for pair rules
    pub positions: Vec<Position>,
    /// Branch(es) that matched the rule
    pub matched: Vec<Branch>,
    /// e.g. 도화살(桃花殺) - 년지
    pub description: String,
}

// ============================================================================
// RULE TABLES
// ============================================================================

/// A day-branch keyed rule: `targets[day_branch]` is the branch to look for
#[derive(Debug, Clone, Copy)]
pub struct DayBranchRule {
    pub spirit: SpiritKind,
    pub targets: [u8; 12],
}

impl DayBranchRule {
    pub fn target(&self, day_branch: Branch) -> Branch {
        Branch::wrapping(self.targets[day_branch.index()] as i64)
    }
}

//                 子  丑  寅  卯  辰  巳  午  未  申  酉  戌  亥
/// 寅午戌→卯, 巳酉丑→午, 申子辰→酉, 亥卯未→子
pub const PEACH_BLOSSOM: DayBranchRule = DayBranchRule {
    spirit: SpiritKind::PeachBlossom,
    targets: [9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3, 0],
};

/// 寅午戌→申, 巳酉丑→亥, 申子辰→寅, 亥卯未→巳
pub const TRAVELING_HORSE: DayBranchRule = DayBranchRule {
    spirit: SpiritKind::TravelingHorse,
    targets: [2, 11, 8, 5, 2, 11, 8, 5, 2, 11, 8, 5],
};

/// 寅午戌→戌, 巳酉丑→丑, 申子辰→辰, 亥卯未→未
pub const FLOWER_CANOPY: DayBranchRule = DayBranchRule {
    spirit: SpiritKind::FlowerCanopy,
    targets: [4, 1, 10, 7, 4, 1, 10, 7, 4, 1, 10, 7],
};

pub const DAY_BRANCH_RULES: [DayBranchRule; 3] = [PEACH_BLOSSOM, TRAVELING_HORSE, FLOWER_CANOPY];

/// Mutually inauspicious branch pairs, checked across all six pairings
pub const GHOST_GATE_PAIRS: [PairRule; 6] = [
    PairRule::new(0, 7, "자미"),
    PairRule::new(1, 6, "축오"),
    PairRule::new(2, 5, "인사"),
    PairRule::new(3, 4, "묘진"),
    PairRule::new(8, 11, "신해"),
    PairRule::new(9, 10, "유술"),
];

// ============================================================================
// EVALUATION
// ============================================================================

fn day_branch_records(rule: &DayBranchRule, pillars: &FourPillars) -> Vec<SpiritRecord> {
    let target = rule.target(pillars.day.branch);

    pillars
        .pillars()
        .into_iter()
        .filter(|pillar| pillar.position != Position::Day && pillar.branch == target)
        .map(|pillar| SpiritRecord {
            spirit: rule.spirit,
            name: rule.spirit.name(),
            positions: vec![pillar.position],
            matched: vec![target],
            description: format!("{} - {}", rule.spirit.name(), pillar.position.branch_name()),
        })
        .collect()
}

fn ghost_gate_records(pillars: &FourPillars) -> Vec<SpiritRecord> {
    let mut records = Vec::new();
    for (p, q) in POSITION_PAIRS {
        let (a, b) = (pillars.get(p).branch, pillars.get(q).branch);
        if !GHOST_GATE_PAIRS.iter().any(|rule| rule.matches(a.index(), b.index())) {
            continue;
        }
        let spirit = SpiritKind::GhostGate;
        records.push(SpiritRecord {
            spirit,
            name: spirit.name(),
            positions: vec![p, q],
            matched: vec![a, b],
            description: format!("{} - {}/{}", spirit.name(), p.branch_name(), q.branch_name()),
        });
    }
    records
}

/// Every spirit present in the chart, day-keyed rules first
pub fn evaluate(pillars: &FourPillars) -> Vec<SpiritRecord> {
    let mut records: Vec<SpiritRecord> = DAY_BRANCH_RULES
        .iter()
        .flat_map(|rule| day_branch_records(rule, pillars))
        .collect();
    records.extend(ghost_gate_records(pillars));

    tracing::debug!(count = records.len(), day_branch = %pillars.day.branch, "evaluated spirits");
    records
}

// ============================================================================
// TESTS
// ============================================================================
