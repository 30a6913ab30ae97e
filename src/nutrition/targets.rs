//! Profile-derived energy and macro targets.
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE scales it by the activity
//! factor and the goal type shifts the calorie goal and picks a macro split.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" | "m" => Some(Gender::Male),
            "F" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }

    /// Matches a stored or submitted factor against the fixed set.
    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.factor() - factor).abs() < 1e-9)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Loss,
    Maintain,
    Gain,
}

impl GoalType {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalType::Loss => "loss",
            GoalType::Maintain => "maintain",
            GoalType::Gain => "gain",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "loss" => Some(GoalType::Loss),
            "maintain" => Some(GoalType::Maintain),
            "gain" => Some(GoalType::Gain),
            _ => None,
        }
    }

    /// Calorie offset applied to TDEE and the protein/carbs/fats split.
    fn adjustment(self) -> (f64, MacroSplit) {
        match self {
            GoalType::Loss => (-500.0, MacroSplit::new(35, 35, 30)),
            GoalType::Gain => (300.0, MacroSplit::new(30, 45, 25)),
            GoalType::Maintain => (0.0, MacroSplit::new(25, 50, 25)),
        }
    }
}

/// Percent of calories from each macro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fats_pct: i32,
}

impl MacroSplit {
    pub const fn new(protein_pct: i32, carbs_pct: i32, fats_pct: i32) -> Self {
        Self {
            protein_pct,
            carbs_pct,
            fats_pct,
        }
    }

    /// Sum of the three shares, widened so arbitrary input cannot overflow.
    pub fn total(&self) -> i64 {
        i64::from(self.protein_pct) + i64::from(self.carbs_pct) + i64::from(self.fats_pct)
    }
}

/// The body/goal fields the calculator reads.
#[derive(Debug, Clone, Copy)]
pub struct BodyMetrics {
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: GoalType,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Targets {
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_goal: i32,
    #[serde(flatten)]
    pub split: MacroSplit,
}

impl Targets {
    pub fn bmr_display(&self) -> i64 {
        whole_kcal(self.bmr)
    }

    pub fn tdee_display(&self) -> i64 {
        whole_kcal(self.tdee)
    }
}

/// Rounds an energy value half to even for display.
pub fn whole_kcal(kcal: f64) -> i64 {
    kcal.round_ties_even() as i64
}

pub fn bmr(gender: Gender, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.factor()
}

/// Applies the goal offset to a TDEE, rounding half to even.
///
/// Fails when the rounded goal does not fit the stored integer column.
pub fn goal_for(tdee: f64, goal: GoalType) -> Result<(i32, MacroSplit), AppError> {
    let (offset, split) = goal.adjustment();
    let rounded = (tdee + offset).round_ties_even();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&rounded) {
        return Err(AppError::validation(format!(
            "calorie goal {rounded} is out of range"
        )));
    }
    Ok((rounded as i32, split))
}

pub fn calculate(metrics: &BodyMetrics) -> Result<Targets, AppError> {
    let bmr = bmr(metrics.gender, metrics.age, metrics.height_cm, metrics.weight_kg);
    let tdee = tdee(bmr, metrics.activity);
    let (calorie_goal, split) = goal_for(tdee, metrics.goal)?;
    Ok(Targets {
        bmr,
        tdee,
        calorie_goal,
        split,
    })
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64, AppError> {
    let height_m = height_cm / 100.0;
    if height_m == 0.0 {
        return Err(AppError::DivisionByZero("bmi"));
    }
    Ok(weight_kg / (height_m * height_m))
}

/// Daily gram goals derived from the calorie goal and split.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GramGoals {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

pub fn gram_goals(calorie_goal: i32, split: MacroSplit) -> GramGoals {
    let share = |pct: i32| f64::from(calorie_goal) * f64::from(pct) / 100.0;
    GramGoals {
        protein_g: share(split.protein_pct) / KCAL_PER_G_PROTEIN,
        carbs_g: share(split.carbs_pct) / KCAL_PER_G_CARBS,
        fats_g: share(split.fats_pct) / KCAL_PER_G_FAT,
    }
}
