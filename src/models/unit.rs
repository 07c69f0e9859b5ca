//! Rental unit models

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Rental unit (chalet) from units
#[derive(Debug, Clone, FromRow)]
pub struct Unit {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub weekday_rate: Decimal,
    pub weekend_rate: Option<Decimal>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Unit {
    /// Nightly rate for the night starting on `date`.
    ///
    /// Friday and Saturday nights use the weekend rate when the unit defines
    /// one; every other night (or a unit without a weekend rate) uses the
    /// weekday rate.
    pub fn nightly_rate(&self, date: NaiveDate) -> Decimal {
        match (date.weekday(), self.weekend_rate) {
            (Weekday::Fri | Weekday::Sat, Some(rate)) => rate,
            _ => self.weekday_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn unit(weekend_rate: Option<Decimal>) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Test Chalet".to_string(),
            capacity: 8,
            weekday_rate: dec!(600),
            weekend_rate,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_weekend_rate_applies_friday_and_saturday() {
        let u = unit(Some(dec!(800)));
        // 2024-03-15 is a Friday, 2024-03-16 a Saturday
        assert_eq!(u.nightly_rate(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), dec!(800));
        assert_eq!(u.nightly_rate(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()), dec!(800));
    }

    #[test]
    fn test_weekday_rate_applies_sunday_through_thursday() {
        let u = unit(Some(dec!(800)));
        // 2024-03-17 is a Sunday, 2024-03-14 a Thursday
        assert_eq!(u.nightly_rate(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()), dec!(600));
        assert_eq!(u.nightly_rate(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()), dec!(600));
    }

    #[test]
    fn test_missing_weekend_rate_falls_back_to_weekday_rate() {
        let u = unit(None);
        assert_eq!(u.nightly_rate(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), dec!(600));
    }
}
