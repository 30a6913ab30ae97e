use serde::Serialize;
use time::Date;

use crate::models::LoggedFood;
use crate::nutrition::aggregate::DayPoint;

/// Everything the daily progress view renders, as flat named values.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub date: Date,
    pub entries: Vec<LoggedFood>,
    pub total_calories: f64,
    pub total_carbs: f64,
    pub total_protein: f64,
    pub total_fats: f64,
    pub calorie_goal: i32,
    pub percent_of_goal: f64,
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fats_pct: i32,
    pub protein_goal_g: f64,
    pub carbs_goal_g: f64,
    pub fats_goal_g: f64,
    pub protein_progress_pct: f64,
    pub carbs_progress_pct: f64,
    pub fats_progress_pct: f64,
    pub weekly: Vec<DayPoint>,
}
