use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewFoodRequest {
    pub name: String,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
    pub calories: i32,
}
