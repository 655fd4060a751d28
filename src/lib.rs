// Saju Engine - Core Library
// Four-pillars chart computation, exposed for the CLI, the API server and tests

pub mod error;
pub mod symbols;
pub mod input;
pub mod solar_terms;
pub mod pillars;
pub mod elements;       // 오행 tally + 용신
pub mod ten_relations;  // 십신
pub mod interactions;   // 합/충/형
pub mod spirits;        // 신살
pub mod fortune;        // 대운
pub mod report;

// Re-export commonly used types
pub use error::{ChartError, ConversionError, Result};
pub use symbols::{Branch, Element, HiddenStem, Polarity, Stem};
pub use input::{
    BirthInput, CalendarKind, Gender, LunarConverter, LunarDate, NoLunarConverter, ResolvedBirth,
};
pub use pillars::{FourPillars, Pillar, Position};
pub use elements::{ElementTally, FavorableElement, Strength};
pub use ten_relations::{ElementRelation, RelationPlacement, TenRelation};
pub use interactions::{RelationKind, RelationRecord};
pub use spirits::{SpiritKind, SpiritRecord};
pub use fortune::{Direction, FortuneCycle, FortunePeriod};
pub use report::{analyze, analyze_at, ChartReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
