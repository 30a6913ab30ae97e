use time::Date;
use tracing::debug;
use uuid::Uuid;

use super::dto::Dashboard;
use crate::error::AppResult;
use crate::nutrition::aggregate::{
    daily_totals, macro_progress, percent_of_goal, round1, week_start, weekly_series,
};
use crate::nutrition::targets::gram_goals;
use crate::profile::services::ensure_profile;
use crate::store::NutritionStore;

/// Builds the progress view for `day`, with the weekly series ending `today`.
pub async fn build_dashboard(
    store: &dyn NutritionStore,
    user_id: Uuid,
    day: Date,
    today: Date,
) -> AppResult<Dashboard> {
    let (profile, _) = ensure_profile(store, user_id).await?;

    let from = week_start(today);
    let week = store.list_entries(user_id, from, today).await?;
    let entries: Vec<_> = if (from..=today).contains(&day) {
        week.iter().filter(|i| i.entry.date == day).cloned().collect()
    } else {
        store.list_entries(user_id, day, day).await?
    };
    debug!(
        %user_id,
        %day,
        week_rows = week.len(),
        day_rows = entries.len(),
        "entries loaded for dashboard"
    );

    let totals = daily_totals(&entries, day);
    let goals = gram_goals(profile.calorie_goal, profile.split);
    let progress = macro_progress(&totals, &goals);
    let weekly = weekly_series(&week, today);

    Ok(Dashboard {
        date: day,
        entries,
        total_calories: round1(totals.calories),
        total_carbs: round1(totals.carbs),
        total_protein: round1(totals.protein),
        total_fats: round1(totals.fats),
        calorie_goal: profile.calorie_goal,
        percent_of_goal: round1(percent_of_goal(&totals, profile.calorie_goal)),
        protein_pct: profile.split.protein_pct,
        carbs_pct: profile.split.carbs_pct,
        fats_pct: profile.split.fats_pct,
        protein_goal_g: round1(goals.protein_g),
        carbs_goal_g: round1(goals.carbs_g),
        fats_goal_g: round1(goals.fats_g),
        protein_progress_pct: round1(progress.protein_pct),
        carbs_progress_pct: round1(progress.carbs_pct),
        fats_progress_pct: round1(progress.fats_pct),
        weekly,
    })
}
