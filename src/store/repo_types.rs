use anyhow::anyhow;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::models::{ConsumptionEntry, Food, LoggedFood, Profile, User};
use crate::nutrition::targets::{ActivityLevel, Gender, GoalType, MacroSplit};

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub gender: String,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_factor: f64,
    pub goal_type: String,
    pub calorie_goal: i32,
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fats_pct: i32,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> anyhow::Result<Self> {
        Ok(Self {
            user_id: r.user_id,
            gender: Gender::from_code(&r.gender)
                .ok_or_else(|| anyhow!("unknown gender code {:?}", r.gender))?,
            age: u32::try_from(r.age).map_err(|_| anyhow!("negative age {}", r.age))?,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            activity: ActivityLevel::from_factor(r.activity_factor)
                .ok_or_else(|| anyhow!("unknown activity factor {}", r.activity_factor))?,
            goal: GoalType::parse(&r.goal_type)
                .ok_or_else(|| anyhow!("unknown goal type {:?}", r.goal_type))?,
            calorie_goal: r.calorie_goal,
            split: MacroSplit::new(r.protein_pct, r.carbs_pct, r.fats_pct),
        })
    }
}

#[derive(Debug, FromRow)]
pub struct FoodRow {
    pub id: Uuid,
    pub name: String,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fats_g: f64,
    pub calories: i32,
}

impl From<FoodRow> for Food {
    fn from(r: FoodRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            carbs_g: r.carbs_g,
            protein_g: r.protein_g,
            fats_g: r.fats_g,
            calories: r.calories,
        }
    }
}

/// An entry row joined with its food.
#[derive(Debug, FromRow)]
pub struct LoggedFoodRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub quantity: f64,
    pub consumed_on: Date,
    pub food_name: String,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fats_g: f64,
    pub calories: i32,
}

impl From<LoggedFoodRow> for LoggedFood {
    fn from(r: LoggedFoodRow) -> Self {
        Self {
            entry: ConsumptionEntry {
                id: r.id,
                user_id: r.user_id,
                food_id: r.food_id,
                quantity: r.quantity,
                date: r.consumed_on,
            },
            food: Food {
                id: r.food_id,
                name: r.food_name,
                carbs_g: r.carbs_g,
                protein_g: r.protein_g,
                fats_g: r.fats_g,
                calories: r.calories,
            },
        }
    }
}
