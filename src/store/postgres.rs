use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{FoodRow, LoggedFoodRow, ProfileRow, UserRow};
use super::{NutritionStore, UserStore};
use crate::models::{ConsumptionEntry, Food, LoggedFood, NewFood, Profile, User};

const PROFILE_COLUMNS: &str = "user_id, gender, age, height_cm, weight_kg, activity_factor, \
     goal_type, calorie_goal, protein_pct, carbs_pct, fats_pct";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn age_column(profile: &Profile) -> anyhow::Result<i32> {
    i32::try_from(profile.age).context("age out of range")
}

#[async_trait]
impl NutritionStore for PgStore {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("select profile")?;
        row.map(Profile::try_from).transpose()
    }

    async fn insert_profile_if_absent(&self, profile: &Profile) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO profiles (user_id, gender, age, height_cm, weight_kg, activity_factor,
                                  goal_type, calorie_goal, protein_pct, carbs_pct, fats_pct)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.gender.code())
        .bind(age_column(profile)?)
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.activity.factor())
        .bind(profile.goal.as_str())
        .bind(profile.calorie_goal)
        .bind(profile.split.protein_pct)
        .bind(profile.split.carbs_pct)
        .bind(profile.split.fats_pct)
        .execute(&self.db)
        .await
        .context("insert profile")?;
        Ok(res.rows_affected() == 1)
    }

    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
               SET gender = $2, age = $3, height_cm = $4, weight_kg = $5,
                   activity_factor = $6, goal_type = $7, calorie_goal = $8,
                   protein_pct = $9, carbs_pct = $10, fats_pct = $11
             WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.gender.code())
        .bind(age_column(profile)?)
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.activity.factor())
        .bind(profile.goal.as_str())
        .bind(profile.calorie_goal)
        .bind(profile.split.protein_pct)
        .bind(profile.split.carbs_pct)
        .bind(profile.split.fats_pct)
        .execute(&self.db)
        .await
        .context("update profile")?;
        Ok(())
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        let rows = sqlx::query_as::<_, FoodRow>(
            r#"
            SELECT id, name, carbs_g, protein_g, fats_g, calories
              FROM foods
             ORDER BY name ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list foods")?;
        Ok(rows.into_iter().map(Food::from).collect())
    }

    async fn get_food(&self, food_id: Uuid) -> anyhow::Result<Option<Food>> {
        let row = sqlx::query_as::<_, FoodRow>(
            r#"
            SELECT id, name, carbs_g, protein_g, fats_g, calories
              FROM foods
             WHERE id = $1
            "#,
        )
        .bind(food_id)
        .fetch_optional(&self.db)
        .await
        .context("select food")?;
        Ok(row.map(Food::from))
    }

    async fn insert_food(&self, food: NewFood) -> anyhow::Result<Food> {
        let row = sqlx::query_as::<_, FoodRow>(
            r#"
            INSERT INTO foods (id, name, carbs_g, protein_g, fats_g, calories)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, carbs_g, protein_g, fats_g, calories
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&food.name)
        .bind(food.carbs_g)
        .bind(food.protein_g)
        .bind(food.fats_g)
        .bind(food.calories)
        .fetch_one(&self.db)
        .await
        .context("insert food")?;
        Ok(row.into())
    }

    async fn insert_entry(&self, entry: &ConsumptionEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO consumption_entries (id, user_id, food_id, quantity, consumed_on)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.food_id)
        .bind(entry.quantity)
        .bind(entry.date)
        .execute(&self.db)
        .await
        .context("insert consumption entry")?;
        Ok(())
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM consumption_entries
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .context("delete consumption entry")?;
        Ok(res.rows_affected() == 1)
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<LoggedFood>> {
        let rows = sqlx::query_as::<_, LoggedFoodRow>(
            r#"
            SELECT e.id, e.user_id, e.food_id, e.quantity, e.consumed_on,
                   f.name AS food_name, f.carbs_g, f.protein_g, f.fats_g, f.calories
              FROM consumption_entries e
              JOIN foods f ON f.id = e.food_id
             WHERE e.user_id = $1
               AND e.consumed_on BETWEEN $2 AND $3
             ORDER BY e.consumed_on ASC, e.created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .context("list consumption entries")?;
        Ok(rows.into_iter().map(LoggedFood::from).collect())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select user by id")?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_name(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("select user by username")?;
        Ok(row.map(User::from))
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        // A concurrent registration of the same name yields no row.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;
        Ok(row.map(User::from))
    }
}
