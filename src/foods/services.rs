use tracing::{info, warn};
use uuid::Uuid;

use super::dto::NewFoodRequest;
use crate::error::{AppError, AppResult};
use crate::models::{Food, NewFood};
use crate::store::NutritionStore;

fn check_amount(field: &'static str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )))
    }
}

/// Adds a food to the shared catalog. Duplicate names are allowed.
pub async fn add_food(
    store: &dyn NutritionStore,
    user_id: Uuid,
    req: NewFoodRequest,
) -> AppResult<Food> {
    let name = req.name.trim();
    if name.is_empty() {
        warn!(%user_id, "custom food without a name");
        return Err(AppError::validation("name is required"));
    }
    if req.calories < 0 {
        return Err(AppError::validation("calories must be a non-negative number"));
    }

    let food = store
        .insert_food(NewFood {
            name: name.to_string(),
            carbs_g: check_amount("carbs", req.carbs)?,
            protein_g: check_amount("protein", req.protein)?,
            fats_g: check_amount("fats", req.fats)?,
            calories: req.calories,
        })
        .await?;
    info!(%user_id, food_id = %food.id, name = %food.name, "food added to catalog");
    Ok(food)
}

pub async fn list_foods(store: &dyn NutritionStore) -> AppResult<Vec<Food>> {
    Ok(store.list_foods().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn request(name: &str) -> NewFoodRequest {
        NewFoodRequest {
            name: name.into(),
            carbs: 27.0,
            protein: 5.0,
            fats: 3.0,
            calories: 150,
        }
    }

    #[tokio::test]
    async fn duplicate_names_are_allowed() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let a = add_food(&store, user, request("Oats")).await.unwrap();
        let b = add_food(&store, user, request("Oats")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(list_foods(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn catalog_is_shared_and_sorted() {
        let store = MemoryStore::new();
        add_food(&store, Uuid::new_v4(), request("Rice")).await.unwrap();
        add_food(&store, Uuid::new_v4(), request("  Banana ")).await.unwrap();
        let names: Vec<_> = list_foods(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Banana", "Rice"]);
    }

    #[tokio::test]
    async fn rejects_blank_name_and_negative_amounts() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(matches!(
            add_food(&store, user, request("   ")).await,
            Err(AppError::Validation(_))
        ));
        let negative = NewFoodRequest {
            fats: -1.0,
            ..request("Butter")
        };
        assert!(add_food(&store, user, negative).await.is_err());
        let negative_kcal = NewFoodRequest {
            calories: -5,
            ..request("Butter")
        };
        assert!(add_food(&store, user, negative_kcal).await.is_err());
        assert!(list_foods(&store).await.unwrap().is_empty());
    }
}
