use serde::Deserialize;
use time::{macros::format_description, Date, OffsetDateTime};

use crate::error::{AppError, AppResult};

/// `?date=YYYY-MM-DD`, defaulting to today.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

impl DayQuery {
    pub fn resolve(&self, today: Date) -> AppResult<Date> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(raw) => parse_day(raw),
        }
    }
}

/// Calendar day entries are stamped with.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn parse_day(raw: &str) -> AppResult<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::validation(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn day_query_defaults_to_today() {
        let today = date!(2024 - 05 - 01);
        assert_eq!(DayQuery::default().resolve(today).unwrap(), today);
        let blank = DayQuery {
            date: Some(" ".into()),
        };
        assert_eq!(blank.resolve(today).unwrap(), today);
    }

    #[test]
    fn parses_iso_days() {
        let q = DayQuery {
            date: Some("2024-02-29".into()),
        };
        assert_eq!(q.resolve(date!(2024 - 05 - 01)).unwrap(), date!(2024 - 02 - 29));
        assert!(parse_day("2023-02-29").is_err());
        assert!(parse_day("29/02/2024").is_err());
    }
}
