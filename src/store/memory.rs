use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use super::{NutritionStore, UserStore};
use crate::models::{ConsumptionEntry, Food, LoggedFood, NewFood, Profile, User};

/// In-process store backing the service and router tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: HashMap<Uuid, Profile>,
    foods: Vec<Food>,
    entries: Vec<ConsumptionEntry>,
    queried: Vec<(Date, Date)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Every `from..=to` range passed to `list_entries`, in call order.
    pub fn queried_ranges(&self) -> Vec<(Date, Date)> {
        self.inner.lock().unwrap().queried.clone()
    }
}

#[async_trait]
impl NutritionStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self.inner.lock().unwrap().profiles.get(&user_id).cloned())
    }

    async fn insert_profile_if_absent(&self, profile: &Profile) -> anyhow::Result<bool> {
        let mut t = self.inner.lock().unwrap();
        if t.profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        t.profiles.insert(profile.user_id, profile.clone());
        Ok(true)
    }

    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        let mut t = self.inner.lock().unwrap();
        if let Some(slot) = t.profiles.get_mut(&profile.user_id) {
            *slot = profile.clone();
        }
        Ok(())
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        let mut foods = self.inner.lock().unwrap().foods.clone();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(foods)
    }

    async fn get_food(&self, food_id: Uuid) -> anyhow::Result<Option<Food>> {
        let t = self.inner.lock().unwrap();
        Ok(t.foods.iter().find(|f| f.id == food_id).cloned())
    }

    async fn insert_food(&self, food: NewFood) -> anyhow::Result<Food> {
        let food = Food {
            id: Uuid::new_v4(),
            name: food.name,
            carbs_g: food.carbs_g,
            protein_g: food.protein_g,
            fats_g: food.fats_g,
            calories: food.calories,
        };
        self.inner.lock().unwrap().foods.push(food.clone());
        Ok(food)
    }

    async fn insert_entry(&self, entry: &ConsumptionEntry) -> anyhow::Result<()> {
        self.inner.lock().unwrap().entries.push(entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.inner.lock().unwrap();
        let before = t.entries.len();
        t.entries
            .retain(|e| !(e.id == entry_id && e.user_id == user_id));
        Ok(t.entries.len() < before)
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<LoggedFood>> {
        let mut t = self.inner.lock().unwrap();
        t.queried.push((from, to));
        let mut out: Vec<LoggedFood> = t
            .entries
            .iter()
            .filter(|e| e.user_id == user_id && e.date >= from && e.date <= to)
            .filter_map(|e| {
                t.foods.iter().find(|f| f.id == e.food_id).map(|f| LoggedFood {
                    entry: e.clone(),
                    food: f.clone(),
                })
            })
            .collect();
        out.sort_by_key(|item| item.entry.date);
        Ok(out)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let t = self.inner.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_name(&self, username: &str) -> anyhow::Result<Option<User>> {
        let t = self.inner.lock().unwrap();
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let mut t = self.inner.lock().unwrap();
        if t.users.iter().any(|u| u.username == username) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: time::OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(Some(user))
    }
}
