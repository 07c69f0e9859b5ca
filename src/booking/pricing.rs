//! Stay pricing.
//!
//! Pure functions for pricing math - no database access. A stay is priced
//! once at reservation time against the unit's current rates; later rate
//! changes never touch an existing reservation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Unit;

use super::calendar::nights;

/// Price a stay over the half-open range `[check_in, check_out)`.
///
/// Each night is priced by [`Unit::nightly_rate`] (weekend rate on Friday
/// and Saturday nights when the unit defines one) and summed. The result is
/// deterministic for a fixed rate snapshot and never negative for
/// non-negative rates. Callers reject zero-night ranges before pricing; an
/// empty range prices to zero here.
pub fn quote(unit: &Unit, check_in: NaiveDate, check_out: NaiveDate) -> Decimal {
    nights(check_in, check_out)
        .into_iter()
        .map(|night| unit.nightly_rate(night))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn unit(weekday: Decimal, weekend: Option<Decimal>) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Test Chalet".to_string(),
            capacity: 8,
            weekday_rate: weekday,
            weekend_rate: weekend,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_quote_single_weekday_night() {
        let u = unit(dec!(600), Some(dec!(800)));
        // 2024-03-14 is a Thursday
        assert_eq!(quote(&u, d(2024, 3, 14), d(2024, 3, 15)), dec!(600));
    }

    #[test]
    fn test_quote_single_weekend_night() {
        let u = unit(dec!(600), Some(dec!(800)));
        // 2024-03-15 is a Friday, 2024-03-16 a Saturday
        assert_eq!(quote(&u, d(2024, 3, 15), d(2024, 3, 16)), dec!(800));
        assert_eq!(quote(&u, d(2024, 3, 16), d(2024, 3, 17)), dec!(800));
    }

    #[test]
    fn test_quote_thursday_to_sunday_mixes_rates() {
        let u = unit(dec!(600), Some(dec!(800)));
        // Nights: Thu 14th (600), Fri 15th (800), Sat 16th (800)
        assert_eq!(quote(&u, d(2024, 3, 14), d(2024, 3, 17)), dec!(2200));
    }

    #[test]
    fn test_quote_without_weekend_rate_uses_weekday_everywhere() {
        let u = unit(dec!(600), None);
        assert_eq!(quote(&u, d(2024, 3, 14), d(2024, 3, 17)), dec!(1800));
    }

    #[test]
    fn test_quote_empty_range_is_zero() {
        let u = unit(dec!(600), Some(dec!(800)));
        assert_eq!(quote(&u, d(2024, 3, 14), d(2024, 3, 14)), Decimal::ZERO);
    }

    #[test]
    fn test_quote_full_week() {
        let u = unit(dec!(500), Some(dec!(750)));
        // Mon 2024-03-11 through Mon 2024-03-18: 5 weekday + 2 weekend nights
        assert_eq!(
            quote(&u, d(2024, 3, 11), d(2024, 3, 18)),
            dec!(500) * dec!(5) + dec!(750) * dec!(2)
        );
    }
}
