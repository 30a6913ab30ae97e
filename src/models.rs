use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::targets::{ActivityLevel, BodyMetrics, Gender, GoalType, MacroSplit};

/// Account record. The hash stays server side.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Body/goal profile, one per user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user_id: Uuid,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: GoalType,
    pub calorie_goal: i32,
    pub split: MacroSplit,
}

impl Profile {
    /// Values a profile starts with before the user edits it.
    pub fn with_defaults(user_id: Uuid) -> Self {
        Self {
            user_id,
            gender: Gender::Male,
            age: 25,
            height_cm: 170.0,
            weight_kg: 70.0,
            activity: ActivityLevel::Sedentary,
            goal: GoalType::Maintain,
            calorie_goal: 2000,
            split: MacroSplit::new(25, 50, 25),
        }
    }

    pub fn metrics(&self) -> BodyMetrics {
        BodyMetrics {
            gender: self.gender,
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            activity: self.activity,
            goal: self.goal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fats_g: f64,
    pub calories: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fats_g: f64,
    pub calories: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub quantity: f64,
    pub date: Date,
}

/// A consumption entry joined with the food it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedFood {
    #[serde(flatten)]
    pub entry: ConsumptionEntry,
    pub food: Food,
}
