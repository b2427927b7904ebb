//! Built-in question banks for the seven learning modules.

use geotutor_core::model::{AnswerRule, ModuleId, Question, QuestionId};
use geotutor_core::score::ScoreBoard;

use crate::error::AngleInputError;

/// The four angle types a learner can be asked to identify.
pub const ANGLE_TYPES: [&str; 4] = ["acute", "right", "obtuse", "reflex"];

/// Learner-entered angles must land on this step.
pub const ANGLE_STEP: i32 = 10;

fn naming(module: ModuleId, name: &str, prompt: &str) -> Question {
    Question::new(module, QuestionId::new(name), prompt, AnswerRule::exact(name))
}

fn numeric(module: ModuleId, id: &str, prompt: &str, expected: f64) -> Question {
    Question::new(
        module,
        QuestionId::new(id),
        prompt,
        AnswerRule::numeric(expected),
    )
}

/// The built-in bank for `module`.
///
/// Identification banks use the expected name as the question id, so the
/// answer to a shape question is literally its id. `AngleType` returns an
/// empty bank: its questions are generated per angle via
/// [`angle_question`].
#[must_use]
pub fn standard_bank(module: ModuleId) -> Vec<Question> {
    match module {
        ModuleId::Shape2D => shapes_2d(),
        ModuleId::Shape3D => shapes_3d(),
        ModuleId::AngleType => Vec::new(),
        ModuleId::AreaCalc => areas(),
        ModuleId::CircleCalc => circles(),
        ModuleId::CompoundArea => compounds(),
        ModuleId::SectorArc => sectors(),
    }
}

/// Question totals per module, used to size the score board.
#[must_use]
pub fn question_total(module: ModuleId) -> u32 {
    let total = match module {
        ModuleId::AngleType => ANGLE_TYPES.len(),
        _ => standard_bank(module).len(),
    };
    total as u32
}

/// Registry of every module and its question total.
#[must_use]
pub fn standard_registry() -> Vec<(ModuleId, u32)> {
    ModuleId::ALL
        .iter()
        .map(|&module| (module, question_total(module)))
        .collect()
}

/// Fresh board covering every module in the catalog.
#[must_use]
pub fn standard_board() -> ScoreBoard {
    ScoreBoard::new(standard_registry())
}

//
// ─── ANGLES ────────────────────────────────────────────────────────────────────
//

/// Classifies a validated angle into its type name.
fn angle_type_for(degrees: i32) -> &'static str {
    if degrees < 90 {
        "acute"
    } else if degrees == 90 {
        "right"
    } else if degrees < 180 {
        "obtuse"
    } else {
        "reflex"
    }
}

/// Builds the identification question for a learner-chosen angle.
///
/// The question id is the angle's type name, so every angle of the same
/// type continues the same question: attempts carry over, and a type that
/// is already settled stays settled.
///
/// # Errors
///
/// Returns [`AngleInputError`] when `degrees` is outside `0..=360` or not
/// a multiple of 10. Nothing is consumed by a rejected angle.
pub fn angle_question(degrees: i32) -> Result<Question, AngleInputError> {
    if !(0..=360).contains(&degrees) {
        return Err(AngleInputError::OutOfRange(degrees));
    }
    if degrees % ANGLE_STEP != 0 {
        return Err(AngleInputError::NotAStepOfTen(degrees));
    }
    let name = angle_type_for(degrees);
    Ok(naming(
        ModuleId::AngleType,
        name,
        &format!("Identify the type of a {degrees}° angle."),
    ))
}

//
// ─── BANKS ─────────────────────────────────────────────────────────────────────
//

fn shapes_2d() -> Vec<Question> {
    let entries = [
        ("circle", "perfectly round, every edge point the same distance from the centre"),
        ("rectangle", "four right angles, opposite sides equal in length"),
        ("triangle", "three straight sides and three corners"),
        ("oval", "an egg-shaped closed curve with no corners"),
        ("octagon", "eight straight sides, like a stop sign"),
        ("square", "four equal sides and four right angles"),
        ("heptagon", "seven straight sides"),
        ("rhombus", "four equal sides, slanted like a pushed-over square"),
        ("pentagon", "five straight sides"),
        ("hexagon", "six straight sides, like a honeycomb cell"),
        ("kite", "two pairs of equal adjacent sides and one line of symmetry"),
    ];
    entries
        .iter()
        .map(|(name, hint)| {
            naming(
                ModuleId::Shape2D,
                name,
                &format!("Name the 2D shape: {hint}."),
            )
        })
        .collect()
}

fn shapes_3d() -> Vec<Question> {
    let entries = [
        ("cube", "six identical square faces"),
        ("cuboid", "a box with six rectangular faces"),
        ("cylinder", "two parallel circular faces joined by a curved surface"),
        ("sphere", "perfectly round, like a ball"),
        ("triangular prism", "two triangular ends joined by three rectangles"),
        (
            "square-based pyramid",
            "a square base with four triangular faces meeting at a point",
        ),
        ("cone", "a circular base rising to a single point"),
        ("tetrahedron", "four triangular faces"),
    ];
    entries
        .iter()
        .map(|(name, hint)| {
            naming(
                ModuleId::Shape3D,
                name,
                &format!("Name the 3D shape: {hint}."),
            )
        })
        .collect()
}

fn areas() -> Vec<Question> {
    vec![
        numeric(
            ModuleId::AreaCalc,
            "rectangle",
            "A rectangle has length 8 cm and width 5 cm. Find its area in cm².",
            40.0,
        ),
        numeric(
            ModuleId::AreaCalc,
            "parallelogram",
            "A parallelogram has base 9 cm and height 4 cm. Find its area in cm².",
            36.0,
        ),
        numeric(
            ModuleId::AreaCalc,
            "triangle",
            "A triangle has base 10 cm and height 7 cm. Find its area in cm².",
            35.0,
        ),
        numeric(
            ModuleId::AreaCalc,
            "trapezium",
            "A trapezium has parallel sides 6 cm and 10 cm, and height 4 cm. Find its area in cm².",
            32.0,
        ),
    ]
}

fn circles() -> Vec<Question> {
    vec![
        numeric(
            ModuleId::CircleCalc,
            "area",
            "A circle has radius 7 cm. Taking π as 3.14, find its area in cm².",
            153.86,
        ),
        numeric(
            ModuleId::CircleCalc,
            "circumference",
            "A circle has diameter 12 cm. Taking π as 3.14, find its circumference in cm.",
            37.68,
        ),
    ]
}

fn compounds() -> Vec<Question> {
    let entries: [(&str, &str, f64); 6] = [
        (
            "compound-1",
            "Two rectangles form an L shape: 20 cm by 14 cm, with a 10 cm by 3 cm piece attached. Find the total area in cm².",
            310.0,
        ),
        (
            "compound-2",
            "A 26 cm by 19 cm rectangle has an 8 cm by 13 cm rectangle attached. Find the total area in cm².",
            598.0,
        ),
        (
            "compound-3",
            "An 18 m by 12 m rectangle has a 12 m by 6 m extension. Find the total area in m².",
            288.0,
        ),
        (
            "compound-4",
            "A 4 m by 3 m rectangle is topped by a triangle of base 4 m and height 3 m. Find the total area in m².",
            18.0,
        ),
        (
            "compound-5",
            "A 48 m by 60 m field has a 48 m by 12 m strip attached. Find the total area in m².",
            3456.0,
        ),
        (
            "compound-6",
            "A 15 m by 10 m rectangle has a triangle of base 8 m and height 6 m attached. Find the total area in m².",
            174.0,
        ),
    ];
    entries
        .iter()
        .map(|(id, prompt, expected)| numeric(ModuleId::CompoundArea, id, prompt, *expected))
        .collect()
}

fn sectors() -> Vec<Question> {
    // Expected areas use pi = 3.14, rounded to two decimals.
    let entries: [(f64, i32, &str, f64); 8] = [
        (8.0, 90, "cm", 50.24),
        (18.0, 130, "ft", 367.38),
        (19.0, 120, "cm", 377.85),
        (22.0, 110, "ft", 464.37),
        (3.5, 100, "m", 10.68),
        (8.0, 270, "in", 150.72),
        (12.0, 280, "yd", 351.68),
        (15.0, 250, "mm", 490.63),
    ];
    entries
        .iter()
        .enumerate()
        .map(|(index, (radius, angle, unit, expected))| {
            numeric(
                ModuleId::SectorArc,
                &format!("sector-{}", index + 1),
                &format!(
                    "A sector has radius {radius} {unit} and central angle {angle}°. \
                     Taking π as 3.14, find its area in {unit}²."
                ),
                *expected,
            )
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
