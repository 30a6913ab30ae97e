use anyhow::anyhow;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{GoalOverrideRequest, ProfileUpdateRequest};
use crate::error::{AppError, AppResult};
use crate::form::{coerce, parse_finite, parse_int, RawValue};
use crate::models::Profile;
use crate::nutrition::targets::{self, ActivityLevel, Gender, GoalType, MacroSplit};
use crate::store::NutritionStore;

/// Returns the user's profile, creating it with defaults on first access.
pub async fn ensure_profile(
    store: &dyn NutritionStore,
    user_id: Uuid,
) -> AppResult<(Profile, bool)> {
    if let Some(profile) = store.get_profile(user_id).await? {
        return Ok((profile, false));
    }

    let fresh = Profile::with_defaults(user_id);
    if store.insert_profile_if_absent(&fresh).await? {
        info!(%user_id, "profile created with defaults");
        return Ok((fresh, true));
    }

    // Lost a race with a concurrent first access.
    let profile = store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| anyhow!("profile for {user_id} missing after insert conflict"))?;
    Ok((profile, false))
}

fn parse_activity(text: &str) -> Option<ActivityLevel> {
    parse_finite(text).and_then(ActivityLevel::from_factor)
}

/// Ages must fit the signed integer column.
fn parse_age(text: &str) -> Option<u32> {
    parse_int::<u32>(text).filter(|age| i32::try_from(*age).is_ok())
}

fn parse_pct(text: &str) -> Option<i32> {
    parse_int::<i32>(text).filter(|pct| (0..=100).contains(pct))
}

/// Applies the submitted body fields and recomputes the targets.
///
/// Every present field is coerced before anything is written, so a single
/// malformed value leaves the stored profile untouched.
pub async fn update_profile(
    store: &dyn NutritionStore,
    user_id: Uuid,
    req: &ProfileUpdateRequest,
) -> AppResult<Profile> {
    let (mut profile, _) = ensure_profile(store, user_id).await?;

    let gender = coerce("gender", req.gender.as_ref(), Gender::from_code)?;
    let age = coerce("age", req.age.as_ref(), parse_age)?;
    let height = coerce("height", req.height.as_ref(), parse_finite)?;
    let weight = coerce("weight", req.weight.as_ref(), parse_finite)?;
    let activity = coerce("activity_factor", req.activity_factor.as_ref(), parse_activity)?;
    let goal = coerce("goal_type", req.goal_type.as_ref(), GoalType::parse)?;

    if let Some(v) = gender {
        profile.gender = v;
    }
    if let Some(v) = age {
        profile.age = v;
    }
    if let Some(v) = height {
        profile.height_cm = v;
    }
    if let Some(v) = weight {
        profile.weight_kg = v;
    }
    if let Some(v) = activity {
        profile.activity = v;
    }
    if let Some(v) = goal {
        profile.goal = v;
    }

    let computed = targets::calculate(&profile.metrics())?;
    profile.calorie_goal = computed.calorie_goal;
    profile.split = computed.split;

    store.save_profile(&profile).await?;
    info!(
        %user_id,
        calorie_goal = profile.calorie_goal,
        goal = profile.goal.as_str(),
        "profile targets recomputed"
    );
    Ok(profile)
}

/// Replaces the calorie goal and split with user-chosen values.
pub async fn override_goals(
    store: &dyn NutritionStore,
    user_id: Uuid,
    req: &GoalOverrideRequest,
) -> AppResult<Profile> {
    let (mut profile, _) = ensure_profile(store, user_id).await?;

    let pct_field = |name: &'static str, raw: Option<&RawValue>| coerce(name, raw, parse_pct);
    let calorie_goal = coerce("calorie_goal", req.calorie_goal.as_ref(), parse_int::<i32>)?;
    let protein = pct_field("protein_pct", req.protein_pct.as_ref())?;
    let carbs = pct_field("carbs_pct", req.carbs_pct.as_ref())?;
    let fats = pct_field("fats_pct", req.fats_pct.as_ref())?;

    let split = MacroSplit::new(
        protein.unwrap_or(profile.split.protein_pct),
        carbs.unwrap_or(profile.split.carbs_pct),
        fats.unwrap_or(profile.split.fats_pct),
    );
    if split.total() != 100 {
        warn!(%user_id, total = split.total(), "macro override rejected");
        return Err(AppError::validation("macros must sum to 100"));
    }

    if let Some(v) = calorie_goal {
        profile.calorie_goal = v;
    }
    profile.split = split;

    store.save_profile(&profile).await?;
    info!(%user_id, calorie_goal = profile.calorie_goal, "goals overridden");
    Ok(profile)
}
