// ⚖️ Element Tally & Favorable Element (오행 / 용신)
// Counts primary elements across the eight symbols and estimates the day
// master's strength.
//
// The strength rule is a deliberately simplified heuristic, not the full
// classical method: support = count(self) + count(generator of self);
// support >= 4 is "strong" and favours the outflow element, anything else
// is "weak" and favours the generating element.

use crate::pillars::FourPillars;
use crate::symbols::Element;
use serde::Serialize;

/// Support count at or above which the day master is classified strong
pub const STRONG_SUPPORT_THRESHOLD: u8 = 4;

// ============================================================================
// ELEMENT TALLY
// ============================================================================

/// Counts per element over the four stems and four branches.
/// Hidden stems are not counted, so the total is always 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementTally {
    counts: [u8; 5],
}

impl ElementTally {
    pub fn from_pillars(pillars: &FourPillars) -> Self {
        let mut counts = [0u8; 5];
        for stem in pillars.stems() {
            counts[stem.element().index()] += 1;
        }
        for branch in pillars.branches() {
            counts[branch.element().index()] += 1;
        }
        ElementTally { counts }
    }

    pub fn count(&self, element: Element) -> u8 {
        self.counts[element.index()]
    }

    /// Counts in wood, fire, earth, metal, water order
    pub fn values(&self) -> [u8; 5] {
        self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Highest count; ties go to the earliest element in wood..water order
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        for element in Element::ALL {
            if self.count(element) > self.count(best) {
                best = element;
            }
        }
        best
    }

    /// Lowest count; ties go to the earliest element in wood..water order
    pub fn weakest(&self) -> Element {
        let mut worst = Element::Wood;
        for element in Element::ALL {
            if self.count(element) < self.count(worst) {
                worst = element;
            }
        }
        worst
    }

    /// Elements with a zero count
    pub fn missing(&self) -> Vec<Element> {
        Element::ALL
            .into_iter()
            .filter(|&element| self.count(element) == 0)
            .collect()
    }
}

// ============================================================================
// STRENGTH VERDICT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Weak,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Strong => "신강(身強)",
            Strength::Weak => "신약(身弱)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavorableElement {
    pub strength: Strength,
    pub strength_label: &'static str,
    /// Element of the day stem
    pub self_element: Element,
    /// count(self) + count(generator of self)
    pub support: u8,
    pub favorable: Element,
    pub favorable_label: String,
    pub advice: String,
}

impl FavorableElement {
    pub fn estimate(pillars: &FourPillars, tally: &ElementTally) -> Self {
        let self_element = pillars.day_master().element();
        let support = tally.count(self_element) + tally.count(self_element.generated_by());

        let (strength, favorable, advice) = if support >= STRONG_SUPPORT_THRESHOLD {
            let favorable = self_element.generates();
            (
                Strength::Strong,
                favorable,
                format!(
                    "기운이 강하므로 {} 기운이 용신입니다. 활동적으로 에너지를 발산하는 것이 좋습니다.",
                    favorable
                ),
            )
        } else {
            let favorable = self_element.generated_by();
            (
                Strength::Weak,
                favorable,
                format!(
                    "기운이 약하므로 {} 기운이 용신입니다. 안정을 추구하고 내면을 다지는 것이 좋습니다.",
                    favorable
                ),
            )
        };

        FavorableElement {
            strength,
            strength_label: strength.label(),
            self_element,
            support,
            favorable,
            favorable_label: favorable.label(),
            advice,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
