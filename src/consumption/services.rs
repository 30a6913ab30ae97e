use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ConsumptionEntry, LoggedFood};
use crate::store::NutritionStore;

/// Records that `user_id` ate `quantity` servings of a catalog food on `day`.
pub async fn log_entry(
    store: &dyn NutritionStore,
    user_id: Uuid,
    food_id: Uuid,
    quantity: f64,
    day: Date,
) -> AppResult<LoggedFood> {
    if !(quantity.is_finite() && quantity > 0.0) {
        warn!(%user_id, quantity, "non-positive quantity");
        return Err(AppError::validation("quantity must be greater than 0"));
    }
    let food = store
        .get_food(food_id)
        .await?
        .ok_or(AppError::NotFound("food"))?;

    let entry = ConsumptionEntry {
        id: Uuid::new_v4(),
        user_id,
        food_id,
        quantity,
        date: day,
    };
    store.insert_entry(&entry).await?;
    info!(%user_id, entry_id = %entry.id, %food_id, quantity, "food logged");
    Ok(LoggedFood { entry, food })
}

/// Removes one of the caller's entries. Someone else's entry reports NotFound,
/// same as a missing one.
pub async fn delete_entry(
    store: &dyn NutritionStore,
    user_id: Uuid,
    entry_id: Uuid,
) -> AppResult<()> {
    if !store.delete_entry(user_id, entry_id).await? {
        warn!(%user_id, %entry_id, "delete of missing or foreign entry");
        return Err(AppError::NotFound("entry"));
    }
    info!(%user_id, %entry_id, "entry deleted");
    Ok(())
}

pub async fn entries_for_day(
    store: &dyn NutritionStore,
    user_id: Uuid,
    day: Date,
) -> AppResult<Vec<LoggedFood>> {
    Ok(store.list_entries(user_id, day, day).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Food, NewFood};
    use crate::store::memory::MemoryStore;
    use time::macros::date;

    async fn seed_food(store: &MemoryStore) -> Food {
        store
            .insert_food(NewFood {
                name: "Greek yogurt".into(),
                carbs_g: 4.0,
                protein_g: 10.0,
                fats_g: 0.4,
                calories: 59,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn log_entry_stamps_day_and_resolves_food() {
        let store = MemoryStore::new();
        let food = seed_food(&store).await;
        let user = Uuid::new_v4();
        let day = date!(2024 - 06 - 01);

        let logged = log_entry(&store, user, food.id, 1.5, day).await.unwrap();
        assert_eq!(logged.entry.date, day);
        assert_eq!(logged.food, food);

        let listed = entries_for_day(&store, user, day).await.unwrap();
        assert_eq!(listed, vec![logged]);
        assert!(entries_for_day(&store, user, date!(2024 - 06 - 02))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn unknown_food_is_not_found() {
        let store = MemoryStore::new();
        let err = log_entry(&store, Uuid::new_v4(), Uuid::new_v4(), 1.0, date!(2024 - 06 - 01))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("food")));
        assert_eq!(store.entry_count(), 0);
    }

    #[tokio::test]
    async fn quantity_must_be_positive() {
        let store = MemoryStore::new();
        let food = seed_food(&store).await;
        for q in [0.0, -1.0, f64::NAN] {
            let res = log_entry(&store, Uuid::new_v4(), food.id, q, date!(2024 - 06 - 01)).await;
            assert!(matches!(res, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let store = MemoryStore::new();
        let food = seed_food(&store).await;
        let user = Uuid::new_v4();
        let logged = log_entry(&store, user, food.id, 1.0, date!(2024 - 06 - 01))
            .await
            .unwrap();

        delete_entry(&store, user, logged.entry.id).await.unwrap();
        assert_eq!(store.entry_count(), 0);
        // second delete finds nothing
        assert!(matches!(
            delete_entry(&store, user, logged.entry.id).await,
            Err(AppError::NotFound("entry"))
        ));
    }

    #[tokio::test]
    async fn non_owner_delete_is_not_found_and_record_persists() {
        let store = MemoryStore::new();
        let food = seed_food(&store).await;
        let owner = Uuid::new_v4();
        let logged = log_entry(&store, owner, food.id, 1.0, date!(2024 - 06 - 01))
            .await
            .unwrap();

        let err = delete_entry(&store, Uuid::new_v4(), logged.entry.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("entry")));
        assert_eq!(store.entry_count(), 1);
    }
}
