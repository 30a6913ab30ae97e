use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::RawValue;
use crate::models::Profile;
use crate::nutrition::aggregate::round1;
use crate::nutrition::targets::{self, Gender, GoalType, GramGoals};

/// Body fields as submitted by the profile form.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub gender: Option<RawValue>,
    pub age: Option<RawValue>,
    pub height: Option<RawValue>,
    pub weight: Option<RawValue>,
    pub activity_factor: Option<RawValue>,
    pub goal_type: Option<RawValue>,
}

/// Manual calorie goal and macro split.
#[derive(Debug, Default, Deserialize)]
pub struct GoalOverrideRequest {
    pub calorie_goal: Option<RawValue>,
    pub protein_pct: Option<RawValue>,
    pub carbs_pct: Option<RawValue>,
    pub fats_pct: Option<RawValue>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_factor: f64,
    pub activity_label: &'static str,
    pub goal_type: GoalType,
    pub calorie_goal: i32,
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fats_pct: i32,
    pub bmr: i64,
    pub tdee: i64,
    /// Absent when height is zero.
    pub bmi: Option<f64>,
    pub goal_grams: GramGoals,
    pub created: bool,
}

impl ProfileResponse {
    pub fn new(p: &Profile, created: bool) -> Self {
        let bmr = targets::bmr(p.gender, p.age, p.height_cm, p.weight_kg);
        let tdee = targets::tdee(bmr, p.activity);
        let grams = targets::gram_goals(p.calorie_goal, p.split);
        Self {
            user_id: p.user_id,
            gender: p.gender,
            age: p.age,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity_factor: p.activity.factor(),
            activity_label: p.activity.label(),
            goal_type: p.goal,
            calorie_goal: p.calorie_goal,
            protein_pct: p.split.protein_pct,
            carbs_pct: p.split.carbs_pct,
            fats_pct: p.split.fats_pct,
            bmr: targets::whole_kcal(bmr),
            tdee: targets::whole_kcal(tdee),
            bmi: targets::bmi(p.weight_kg, p.height_cm).ok().map(round1),
            goal_grams: GramGoals {
                protein_g: round1(grams.protein_g),
                carbs_g: round1(grams.carbs_g),
                fats_g: round1(grams.fats_g),
            },
            created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_view() {
        let p = Profile::with_defaults(Uuid::new_v4());
        let view = ProfileResponse::new(&p, true);
        // 10*70 + 6.25*170 - 5*25 + 5 = 1642.5, ties go to even
        assert_eq!(view.bmr, 1642);
        assert_eq!(view.tdee, 1971);
        assert_eq!(view.calorie_goal, 2000);
        assert_eq!(view.bmi, Some(24.2));
        assert_eq!(view.goal_grams.protein_g, 125.0);
        assert_eq!(view.goal_grams.fats_g, 55.6);
        assert_eq!(view.activity_label, "Sedentary");
    }

    #[test]
    fn zero_height_hides_bmi() {
        let p = Profile {
            height_cm: 0.0,
            ..Profile::with_defaults(Uuid::new_v4())
        };
        assert_eq!(ProfileResponse::new(&p, false).bmi, None);
    }

    #[test]
    fn serializes_codes() {
        let view = ProfileResponse::new(&Profile::with_defaults(Uuid::nil()), false);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["gender"], "M");
        assert_eq!(json["goal_type"], "maintain");
        assert_eq!(json["activity_factor"], 1.2);
    }

    #[test]
    fn update_request_accepts_mixed_types() {
        let req: ProfileUpdateRequest =
            serde_json::from_str(r#"{"age": 30, "height": "181.5", "goal_type": "gain"}"#).unwrap();
        assert!(req.age.is_some());
        assert!(req.gender.is_none());
    }
}
