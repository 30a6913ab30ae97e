use std::ops::{Add, Mul};

use serde::Serialize;
use time::{Date, Duration, Weekday};

use crate::models::LoggedFood;
use crate::nutrition::targets::GramGoals;

pub const WEEK_LEN: i64 = 7;

/// Energy and macro amounts; grams for the macros, kcal for calories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            calories: self.calories + other.calories,
            carbs: self.carbs + other.carbs,
            protein: self.protein + other.protein,
            fats: self.fats + other.fats,
        }
    }
}

impl Mul<f64> for Totals {
    type Output = Totals;

    fn mul(self, quantity: f64) -> Totals {
        Totals {
            calories: self.calories * quantity,
            carbs: self.carbs * quantity,
            protein: self.protein * quantity,
            fats: self.fats * quantity,
        }
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::default(), |acc, t| acc + t)
    }
}

impl From<&LoggedFood> for Totals {
    fn from(item: &LoggedFood) -> Self {
        let food = &item.food;
        Totals {
            calories: f64::from(food.calories),
            carbs: food.carbs_g,
            protein: food.protein_g,
            fats: food.fats_g,
        } * item.entry.quantity
    }
}

pub fn daily_totals(items: &[LoggedFood], day: Date) -> Totals {
    items
        .iter()
        .filter(|item| item.entry.date == day)
        .map(Totals::from)
        .sum()
}

/// `part / goal * 100`, or 0 when the goal is not positive.
pub fn percent_of(part: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    part / goal * 100.0
}

pub fn percent_of_goal(totals: &Totals, calorie_goal: i32) -> f64 {
    percent_of(totals.calories, f64::from(calorie_goal))
}

/// How far each macro total is toward its gram goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fats_pct: f64,
}

pub fn macro_progress(totals: &Totals, goals: &GramGoals) -> MacroProgress {
    MacroProgress {
        protein_pct: percent_of(totals.protein, goals.protein_g),
        carbs_pct: percent_of(totals.carbs, goals.carbs_g),
        fats_pct: percent_of(totals.fats, goals.fats_g),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    pub label: &'static str,
    pub date: Date,
    pub calories: f64,
}

/// Calories for the seven days ending on `today`, oldest first.
pub fn weekly_series(items: &[LoggedFood], today: Date) -> Vec<DayPoint> {
    (0..WEEK_LEN)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            DayPoint {
                label: weekday_abbrev(day.weekday()),
                date: day,
                calories: round1(daily_totals(items, day).calories),
            }
        })
        .collect()
}

/// First day of the window `weekly_series` covers.
pub fn week_start(today: Date) -> Date {
    today - Duration::days(WEEK_LEN - 1)
}

pub fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsumptionEntry, Food};
    use crate::nutrition::targets::{gram_goals, MacroSplit};
    use time::macros::date;
    use uuid::Uuid;

    fn food(calories: i32, carbs: f64, protein: f64, fats: f64) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: "test food".into(),
            carbs_g: carbs,
            protein_g: protein,
            fats_g: fats,
            calories,
        }
    }

    fn logged(food: &Food, quantity: f64, date: Date) -> LoggedFood {
        LoggedFood {
            entry: ConsumptionEntry {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                food_id: food.id,
                quantity,
                date,
            },
            food: food.clone(),
        }
    }

    #[test]
    fn daily_totals_scale_by_quantity_and_filter_by_day() {
        let oats = food(150, 27.0, 5.0, 3.0);
        let egg = food(70, 0.5, 6.0, 5.0);
        let items = vec![
            logged(&oats, 2.0, date!(2024 - 03 - 10)),
            logged(&egg, 1.5, date!(2024 - 03 - 10)),
            logged(&egg, 3.0, date!(2024 - 03 - 09)),
        ];

        let t = daily_totals(&items, date!(2024 - 03 - 10));
        assert_eq!(t.calories, 405.0);
        assert_eq!(t.carbs, 54.75);
        assert_eq!(t.protein, 19.0);
        assert_eq!(t.fats, 13.5);
    }

    #[test]
    fn empty_day_is_all_zero() {
        let t = daily_totals(&[], date!(2024 - 03 - 10));
        assert_eq!(t, Totals::default());
        assert_eq!(percent_of_goal(&t, 2000), 0.0);
    }

    #[test]
    fn percent_of_goal_guards_non_positive_goal() {
        let t = Totals {
            calories: 500.0,
            ..Totals::default()
        };
        assert_eq!(percent_of_goal(&t, 2000), 25.0);
        assert_eq!(percent_of_goal(&t, 0), 0.0);
        assert_eq!(percent_of_goal(&t, -100), 0.0);
    }

    #[test]
    fn macro_progress_against_gram_goals() {
        let goals = gram_goals(2000, MacroSplit::new(25, 50, 25));
        let t = Totals {
            calories: 1000.0,
            carbs: 125.0,
            protein: 62.5,
            fats: 0.0,
        };
        let p = macro_progress(&t, &goals);
        assert_eq!(p.protein_pct, 50.0);
        assert_eq!(p.carbs_pct, 50.0);
        assert_eq!(p.fats_pct, 0.0);
    }

    #[test]
    fn weekly_series_is_seven_days_oldest_first() {
        // 2024-03-10 is a Sunday
        let today = date!(2024 - 03 - 10);
        let rice = food(200, 45.0, 4.0, 0.4);
        let items = vec![
            logged(&rice, 1.0, today),
            logged(&rice, 0.25, date!(2024 - 03 - 04)),
            logged(&rice, 5.0, date!(2024 - 03 - 03)),
        ];

        let series = weekly_series(&items, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, date!(2024 - 03 - 04));
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[0].calories, 50.0);
        assert_eq!(series[6].label, "Sun");
        assert_eq!(series[6].calories, 200.0);
        assert!(series[1..6].iter().all(|p| p.calories == 0.0));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(week_start(today), series[0].date);
    }

    #[test]
    fn weekly_series_on_empty_log() {
        let series = weekly_series(&[], date!(2024 - 01 - 01));
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.calories >= 0.0));
    }

    #[test]
    fn round1_rounds_to_one_decimal() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(0.06), 0.1);
    }
}
