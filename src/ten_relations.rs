// 🔟 Ten Relations (십신)
// Classifies any stem relative to the day stem by element relation and
// polarity match. Branches are classified through their principal hidden
// stem.

use crate::error::{ChartError, Result};
use crate::pillars::{FourPillars, Position};
use crate::symbols::{Branch, Element, Stem};
use serde::Serialize;

// ============================================================================
// ELEMENT RELATION
// ============================================================================

/// How a target element stands relative to a reference element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRelation {
    /// Same element
    Peer,
    /// Reference generates target
    Output,
    /// Reference dominates target
    Wealth,
    /// Target dominates reference
    Authority,
    /// Target generates reference
    Resource,
}

impl ElementRelation {
    pub const ALL: [ElementRelation; 5] = [
        ElementRelation::Peer,
        ElementRelation::Output,
        ElementRelation::Wealth,
        ElementRelation::Authority,
        ElementRelation::Resource,
    ];

    /// The element standing in this relation to `reference`.
    ///
    /// For a fixed reference the five results are a permutation of all five
    /// elements, so exactly one relation matches any target.
    pub fn target_of(self, reference: Element) -> Element {
        match self {
            ElementRelation::Peer => reference,
            ElementRelation::Output => reference.generates(),
            ElementRelation::Wealth => reference.dominates(),
            ElementRelation::Authority => reference.dominated_by(),
            ElementRelation::Resource => reference.generated_by(),
        }
    }

    /// Steps from `reference` to `target` around the generation cycle
    /// decide the relation: 0 peer, 1 output, 2 wealth, 3 authority, 4 resource.
    pub fn between(reference: Element, target: Element) -> Result<Self> {
        match (target.index() + 5 - reference.index()) % 5 {
            0 => Ok(ElementRelation::Peer),
            1 => Ok(ElementRelation::Output),
            2 => Ok(ElementRelation::Wealth),
            3 => Ok(ElementRelation::Authority),
            4 => Ok(ElementRelation::Resource),
            steps => Err(ChartError::Invariant(format!(
                "{} steps from {:?} to {:?} is outside the element cycle",
                steps, reference, target
            ))),
        }
    }
}

// ============================================================================
// TEN RELATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenRelation {
    /// 비견: same element, same polarity
    Friend,
    /// 겁재: same element, opposite polarity
    RobWealth,
    /// 식신
    EatingGod,
    /// 상관
    HurtingOfficer,
    /// 편재
    IndirectWealth,
    /// 정재
    DirectWealth,
    /// 편관
    SevenKillings,
    /// 정관
    DirectOfficer,
    /// 편인
    IndirectResource,
    /// 정인
    DirectResource,
}

impl TenRelation {
    pub fn from_parts(relation: ElementRelation, same_polarity: bool) -> Self {
        match (relation, same_polarity) {
            (ElementRelation::Peer, true) => TenRelation::Friend,
            (ElementRelation::Peer, false) => TenRelation::RobWealth,
            (ElementRelation::Output, true) => TenRelation::EatingGod,
            (ElementRelation::Output, false) => TenRelation::HurtingOfficer,
            (ElementRelation::Wealth, true) => TenRelation::IndirectWealth,
            (ElementRelation::Wealth, false) => TenRelation::DirectWealth,
            (ElementRelation::Authority, true) => TenRelation::SevenKillings,
            (ElementRelation::Authority, false) => TenRelation::DirectOfficer,
            (ElementRelation::Resource, true) => TenRelation::IndirectResource,
            (ElementRelation::Resource, false) => TenRelation::DirectResource,
        }
    }

    pub fn category(&self) -> ElementRelation {
        match self {
            TenRelation::Friend | TenRelation::RobWealth => ElementRelation::Peer,
            TenRelation::EatingGod | TenRelation::HurtingOfficer => ElementRelation::Output,
            TenRelation::IndirectWealth | TenRelation::DirectWealth => ElementRelation::Wealth,
            TenRelation::SevenKillings | TenRelation::DirectOfficer => ElementRelation::Authority,
            TenRelation::IndirectResource | TenRelation::DirectResource => ElementRelation::Resource,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TenRelation::Friend => "비견",
            TenRelation::RobWealth => "겁재",
            TenRelation::EatingGod => "식신",
            TenRelation::HurtingOfficer => "상관",
            TenRelation::IndirectWealth => "편재",
            TenRelation::DirectWealth => "정재",
            TenRelation::SevenKillings => "편관",
            TenRelation::DirectOfficer => "정관",
            TenRelation::IndirectResource => "편인",
            TenRelation::DirectResource => "정인",
        }
    }
}

/// Relation of `target` to the reference (day) stem
pub fn classify_stem(reference: Stem, target: Stem) -> Result<TenRelation> {
    let relation = ElementRelation::between(reference.element(), target.element())?;
    Ok(TenRelation::from_parts(
        relation,
        reference.polarity() == target.polarity(),
    ))
}

/// Relation of a branch, judged by its principal hidden stem
pub fn classify_branch(reference: Stem, branch: Branch) -> Result<TenRelation> {
    classify_stem(reference, branch.principal_stem())
}

// ============================================================================
// CHART PLACEMENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Stem,
    Branch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationPlacement {
    pub position: Position,
    pub slot: Slot,
    /// Slot name, e.g. 년간 or 시지
    pub slot_name: &'static str,
    pub glyph: &'static str,
    pub relation: TenRelation,
    pub label: &'static str,
}

/// Relations of the seven non-reference symbols, year stem first, then the
/// remaining stems, then the four branches.
pub fn place_relations(pillars: &FourPillars) -> Result<Vec<RelationPlacement>> {
    let reference = pillars.day_master();
    let mut placements = Vec::with_capacity(7);

    for pillar in pillars.pillars() {
        if pillar.position == Position::Day {
            continue;
        }
        let relation = classify_stem(reference, pillar.stem)?;
        placements.push(RelationPlacement {
            position: pillar.position,
            slot: Slot::Stem,
            slot_name: pillar.position.stem_name(),
            glyph: pillar.stem.hanja(),
            relation,
            label: relation.label(),
        });
    }

    for pillar in pillars.pillars() {
        let relation = classify_branch(reference, pillar.branch)?;
        placements.push(RelationPlacement {
            position: pillar.position,
            slot: Slot::Branch,
            slot_name: pillar.position.branch_name(),
            glyph: pillar.branch.hanja(),
            relation,
            label: relation.label(),
        });
    }

    Ok(placements)
}

// ============================================================================
// TESTS
// ============================================================================
