// 🀄 Symbols - Stems, Branches, Elements
// The two cyclic symbol sets and the five-element space they map into.
//
// Every table here is a `const` array indexed by the symbol itself, so a
// lookup can never miss: the index types only admit in-domain values.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FIVE ELEMENTS
// ============================================================================

/// Five elements, declared in generation order.
///
/// The declaration order is also the tie-break order used for dominant and
/// weakest element (wood < fire < earth < metal < water).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The element this one generates (wood→fire→earth→metal→water→wood)
    pub fn generates(self) -> Element {
        Element::ALL[(self.index() + 1) % 5]
    }

    /// The element that generates this one
    pub fn generated_by(self) -> Element {
        Element::ALL[(self.index() + 4) % 5]
    }

    /// The element this one dominates (wood→earth→water→fire→metal→wood)
    pub fn dominates(self) -> Element {
        Element::ALL[(self.index() + 2) % 5]
    }

    /// The element that dominates this one
    pub fn dominated_by(self) -> Element {
        Element::ALL[(self.index() + 3) % 5]
    }

    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// Display label, e.g. `목(木)`
    pub fn label(self) -> String {
        format!("{}({})", self.korean(), self.hanja())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

// ============================================================================
// STEMS (천간)
// ============================================================================

/// One of the ten heavenly stems, index domain [0,9].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Stem(u8);

struct StemInfo {
    hanja: &'static str,
    korean: &'static str,
    element: Element,
}

const STEMS: [StemInfo; 10] = [
    StemInfo { hanja: "甲", korean: "갑", element: Element::Wood },
    StemInfo { hanja: "乙", korean: "을", element: Element::Wood },
    StemInfo { hanja: "丙", korean: "병", element: Element::Fire },
    StemInfo { hanja: "丁", korean: "정", element: Element::Fire },
    StemInfo { hanja: "戊", korean: "무", element: Element::Earth },
    StemInfo { hanja: "己", korean: "기", element: Element::Earth },
    StemInfo { hanja: "庚", korean: "경", element: Element::Metal },
    StemInfo { hanja: "辛", korean: "신", element: Element::Metal },
    StemInfo { hanja: "壬", korean: "임", element: Element::Water },
    StemInfo { hanja: "癸", korean: "계", element: Element::Water },
];

impl Stem {
    pub const COUNT: usize = 10;

    pub fn from_index(index: usize) -> Option<Stem> {
        (index < Self::COUNT).then(|| Stem(index as u8))
    }

    /// Floor-modulo constructor: any integer maps onto the cycle.
    pub fn wrapping(value: i64) -> Stem {
        Stem(value.rem_euclid(Self::COUNT as i64) as u8)
    }

    pub fn all() -> impl Iterator<Item = Stem> {
        (0..Self::COUNT as u8).map(Stem)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn element(self) -> Element {
        STEMS[self.index()].element
    }

    /// Even indices are yang, odd indices yin
    pub fn polarity(self) -> Polarity {
        if self.0 % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn hanja(self) -> &'static str {
        STEMS[self.index()].hanja
    }

    pub fn korean(self) -> &'static str {
        STEMS[self.index()].korean
    }

    pub fn offset(self, steps: i64) -> Stem {
        Stem::wrapping(self.0 as i64 + steps)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

// ============================================================================
// BRANCHES (지지)
// ============================================================================

/// One of the twelve earthly branches, index domain [0,11].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Branch(u8);

/// One weighted entry of a branch's hidden-stem composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenStem {
    pub stem: Stem,
    /// Share of the branch's 30-day span
    pub days: u8,
}

const fn hidden(stem: u8, days: u8) -> HiddenStem {
    HiddenStem { stem: Stem(stem), days }
}

struct BranchInfo {
    hanja: &'static str,
    korean: &'static str,
    element: Element,
    animal: &'static str,
    hour_name: &'static str,
    /// Ordered residual → middle → principal; the last entry dominates
    hidden: &'static [HiddenStem],
}

const BRANCHES: [BranchInfo; 12] = [
    BranchInfo {
        hanja: "子", korean: "자", element: Element::Water, animal: "쥐",
        hour_name: "자시(23~01시)",
        hidden: &[hidden(9, 30)],
    },
    BranchInfo {
        hanja: "丑", korean: "축", element: Element::Earth, animal: "소",
        hour_name: "축시(01~03시)",
        hidden: &[hidden(9, 9), hidden(7, 3), hidden(5, 18)],
    },
    BranchInfo {
        hanja: "寅", korean: "인", element: Element::Wood, animal: "호랑이",
        hour_name: "인시(03~05시)",
        hidden: &[hidden(4, 7), hidden(2, 7), hidden(0, 16)],
    },
    BranchInfo {
        hanja: "卯", korean: "묘", element: Element::Wood, animal: "토끼",
        hour_name: "묘시(05~07시)",
        hidden: &[hidden(1, 30)],
    },
    BranchInfo {
        hanja: "辰", korean: "진", element: Element::Earth, animal: "용",
        hour_name: "진시(07~09시)",
        hidden: &[hidden(1, 9), hidden(9, 3), hidden(4, 18)],
    },
    BranchInfo {
        hanja: "巳", korean: "사", element: Element::Fire, animal: "뱀",
        hour_name: "사시(09~11시)",
        hidden: &[hidden(4, 7), hidden(6, 7), hidden(2, 16)],
    },
    BranchInfo {
        hanja: "午", korean: "오", element: Element::Fire, animal: "말",
        hour_name: "오시(11~13시)",
        hidden: &[hidden(2, 10), hidden(5, 10), hidden(3, 10)],
    },
    BranchInfo {
        hanja: "未", korean: "미", element: Element::Earth, animal: "양",
        hour_name: "미시(13~15시)",
        hidden: &[hidden(3, 9), hidden(1, 3), hidden(5, 18)],
    },
    BranchInfo {
        hanja: "申", korean: "신", element: Element::Metal, animal: "원숭이",
        hour_name: "신시(15~17시)",
        hidden: &[hidden(5, 7), hidden(8, 7), hidden(6, 16)],
    },
    BranchInfo {
        hanja: "酉", korean: "유", element: Element::Metal, animal: "닭",
        hour_name: "유시(17~19시)",
        hidden: &[hidden(7, 30)],
    },
    BranchInfo {
        hanja: "戌", korean: "술", element: Element::Earth, animal: "개",
        hour_name: "술시(19~21시)",
        hidden: &[hidden(7, 9), hidden(3, 3), hidden(4, 18)],
    },
    BranchInfo {
        hanja: "亥", korean: "해", element: Element::Water, animal: "돼지",
        hour_name: "해시(21~23시)",
        hidden: &[hidden(4, 7), hidden(0, 7), hidden(8, 16)],
    },
];

impl Branch {
    pub const COUNT: usize = 12;

    pub fn from_index(index: usize) -> Option<Branch> {
        (index < Self::COUNT).then(|| Branch(index as u8))
    }

    /// Floor-modulo constructor: any integer maps onto the cycle.
    pub fn wrapping(value: i64) -> Branch {
        Branch(value.rem_euclid(Self::COUNT as i64) as u8)
    }

    pub fn all() -> impl Iterator<Item = Branch> {
        (0..Self::COUNT as u8).map(Branch)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn element(self) -> Element {
        BRANCHES[self.index()].element
    }

    pub fn polarity(self) -> Polarity {
        if self.0 % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn hanja(self) -> &'static str {
        BRANCHES[self.index()].hanja
    }

    pub fn korean(self) -> &'static str {
        BRANCHES[self.index()].korean
    }

    /// Zodiac animal (띠)
    pub fn animal(self) -> &'static str {
        BRANCHES[self.index()].animal
    }

    /// Two-hour bracket name when this branch is used as an hour branch
    pub fn hour_name(self) -> &'static str {
        BRANCHES[self.index()].hour_name
    }

    pub fn hidden_stems(self) -> &'static [HiddenStem] {
        BRANCHES[self.index()].hidden
    }

    /// Principal hidden stem (본기): last entry of the hidden-stem table
    pub fn principal_stem(self) -> Stem {
        let table = self.hidden_stems();
        // rows are never empty
        table[table.len() - 1].stem
    }

    pub fn offset(self, steps: i64) -> Branch {
        Branch::wrapping(self.0 as i64 + steps)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_stem_weights_sum_to_thirty() {
        for branch in Branch::all() {
            let total: u32 = branch.hidden_stems().iter().map(|h| h.days as u32).sum();
            assert_eq!(total, 30, "branch {} weights sum to {}", branch, total);
        }
    }

    #[test]
    fn test_principal_stem_is_heaviest_or_last() {
        for branch in Branch::all() {
            let table = branch.hidden_stems();
            let max = table.iter().map(|h| h.days).max().unwrap();
            assert_eq!(table.last().unwrap().days, max);
        }
        assert_eq!(Branch::from_index(6).unwrap().principal_stem().hanja(), "丁");
        assert_eq!(Branch::from_index(2).unwrap().principal_stem().hanja(), "甲");
    }

    #[test]
    fn test_generation_and_domination_cycles() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Metal.generated_by(), Element::Earth);
        assert_eq!(Element::Wood.dominates(), Element::Earth);
        assert_eq!(Element::Fire.dominates(), Element::Metal);
        assert_eq!(Element::Metal.dominated_by(), Element::Fire);

        for element in Element::ALL {
            assert_eq!(element.generates().generated_by(), element);
            assert_eq!(element.dominates().dominated_by(), element);
        }
    }

    #[test]
    fn test_wrapping_uses_floor_modulo() {
        assert_eq!(Stem::wrapping(-1).index(), 9);
        assert_eq!(Branch::wrapping(-1).index(), 11);
        assert_eq!(Branch::wrapping(25).index(), 1);
        assert!(Stem::from_index(10).is_none());
        assert!(Branch::from_index(12).is_none());
    }

    #[test]
    fn test_symbol_elements_and_polarity() {
        let gyeong = Stem::from_index(6).unwrap();
        assert_eq!(gyeong.element(), Element::Metal);
        assert_eq!(gyeong.polarity(), Polarity::Yang);
        assert_eq!(gyeong.korean(), "경");

        let ja = Branch::from_index(0).unwrap();
        assert_eq!(ja.element(), Element::Water);
        assert_eq!(ja.animal(), "쥐");
        assert_eq!(Element::Metal.label(), "금(金)");
    }
}
