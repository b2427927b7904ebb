use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::question::Tier;

/// The seven learning modules.
///
/// Module ids double as the progress part keys: `Shape2D` and `Shape3D` are
/// the two halves of shape identification and weigh half as much as the five
/// standalone modules, so the seven weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleId {
    /// 2D shape identification, first half of shape identification.
    Shape2D,
    /// 3D shape identification, second half of shape identification.
    Shape3D,
    /// Angle type identification from a learner-chosen angle.
    AngleType,
    /// Area of rectangle, parallelogram, triangle and trapezium.
    AreaCalc,
    /// Area and circumference of a circle.
    CircleCalc,
    /// Area of compound shapes.
    CompoundArea,
    /// Area of sectors.
    SectorArc,
}

impl ModuleId {
    /// Every module, in home screen order.
    pub const ALL: [ModuleId; 7] = [
        ModuleId::Shape2D,
        ModuleId::Shape3D,
        ModuleId::AngleType,
        ModuleId::AreaCalc,
        ModuleId::CircleCalc,
        ModuleId::CompoundArea,
        ModuleId::SectorArc,
    ];

    /// Share of the global progress bar this module is worth.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            ModuleId::Shape2D | ModuleId::Shape3D => 1.0 / 12.0,
            _ => 1.0 / 6.0,
        }
    }

    /// Difficulty tier of this module's built-in questions.
    #[must_use]
    pub fn tier(self) -> Tier {
        match self {
            ModuleId::Shape2D
            | ModuleId::AngleType
            | ModuleId::AreaCalc
            | ModuleId::CircleCalc => Tier::Basic,
            ModuleId::Shape3D | ModuleId::CompoundArea | ModuleId::SectorArc => Tier::Advanced,
        }
    }

    /// Human-readable module name.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ModuleId::Shape2D => "2D Shape Identification",
            ModuleId::Shape3D => "3D Shape Identification",
            ModuleId::AngleType => "Angle Type Identification",
            ModuleId::AreaCalc => "Area Calculation",
            ModuleId::CircleCalc => "Circle Area & Circumference",
            ModuleId::CompoundArea => "Compound Shape Area",
            ModuleId::SectorArc => "Sector Area",
        }
    }

    /// Stable machine name, used on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ModuleId::Shape2D => "shapes-2d",
            ModuleId::Shape3D => "shapes-3d",
            ModuleId::AngleType => "angles",
            ModuleId::AreaCalc => "area",
            ModuleId::CircleCalc => "circle",
            ModuleId::CompoundArea => "compound",
            ModuleId::SectorArc => "sector",
        }
    }
}

/// Identifier for a question within a module.
///
/// For identification modules the id is the expected answer itself
/// (e.g. `"kite"`, `"obtuse"`), so re-posed questions of the same type
/// share one id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing a `ModuleId` from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModuleIdError {
    raw: String,
}

impl fmt::Display for ParseModuleIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown module {:?}", self.raw)
    }
}

impl std::error::Error for ParseModuleIdError {}

impl FromStr for ModuleId {
    type Err = ParseModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| ParseModuleIdError { raw: s.to_string() })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = ModuleId::ALL.iter().map(|m| m.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_weight_modules() {
        assert_eq!(ModuleId::Shape2D.weight(), ModuleId::Shape3D.weight());
        assert_eq!(ModuleId::Shape2D.weight() * 2.0, ModuleId::AreaCalc.weight());
    }

    #[test]
    fn test_module_id_display() {
        assert_eq!(ModuleId::Shape2D.to_string(), "shapes-2d");
        assert_eq!(ModuleId::SectorArc.to_string(), "sector");
    }

    #[test]
    fn test_module_id_from_str() {
        let id: ModuleId = "compound".parse().unwrap();
        assert_eq!(id, ModuleId::CompoundArea);
    }

    #[test]
    fn test_module_id_from_str_invalid() {
        let result = "fractions".parse::<ModuleId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_module_id_roundtrip() {
        for module in ModuleId::ALL {
            let parsed: ModuleId = module.key().parse().unwrap();
            assert_eq!(parsed, module);
        }
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("kite");
        assert_eq!(id.to_string(), "kite");
        assert_eq!(id.as_str(), "kite");
    }

    #[test]
    fn test_question_id_debug() {
        let id = QuestionId::new("cube");
        assert_eq!(format!("{id:?}"), "QuestionId(cube)");
    }
}
