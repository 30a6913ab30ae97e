use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::models::{ConsumptionEntry, Food, LoggedFood, NewFood, Profile, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;
mod repo_types;

pub use postgres::PgStore;

/// Persistence for profiles, the food catalog and the consumption log.
#[async_trait]
pub trait NutritionStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    /// Inserts unless a profile already exists; returns whether a row was written.
    async fn insert_profile_if_absent(&self, profile: &Profile) -> anyhow::Result<bool>;
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()>;

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>>;
    async fn get_food(&self, food_id: Uuid) -> anyhow::Result<Option<Food>>;
    async fn insert_food(&self, food: NewFood) -> anyhow::Result<Food>;

    async fn insert_entry(&self, entry: &ConsumptionEntry) -> anyhow::Result<()>;
    /// Deletes the entry only if `user_id` owns it; returns whether a row went away.
    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> anyhow::Result<bool>;
    /// Entries of one user dated within `from..=to`, oldest first.
    async fn list_entries(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<LoggedFood>>;
}

/// Persistence for accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_user_by_name(&self, username: &str) -> anyhow::Result<Option<User>>;
    /// Inserts a new account; `None` when the username is already taken.
    async fn create_user(&self, username: &str, password_hash: &str)
        -> anyhow::Result<Option<User>>;
}
