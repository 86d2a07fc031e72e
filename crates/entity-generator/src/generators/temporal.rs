//! Date and timestamp generators.
//!
//! Values fall between 2000-01-01T00:00:00Z and 2030-12-31T23:59:59Z.

use chrono::{DateTime, Utc};
use entity_core::FieldValue;
use rand::Rng;

/// 2000-01-01T00:00:00Z
const START_TS: i64 = 946_684_800;

/// 2030-12-31T23:59:59Z
const END_TS: i64 = 1_924_991_999;

fn random_datetime<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    let ts = rng.random_range(START_TS..=END_TS);
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

/// Generate a random UTC timestamp with whole-second precision.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::DateTime(random_datetime(rng))
}

/// Generate a random calendar date.
pub fn generate_date<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::Date(random_datetime(rng).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_datetime_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            if let FieldValue::DateTime(dt) = generate_datetime(&mut rng) {
                assert!((START_TS..=END_TS).contains(&dt.timestamp()));
                assert_eq!(dt.timestamp_subsec_nanos(), 0);
            } else {
                panic!("Expected DateTime value");
            }
        }
    }

    #[test]
    fn test_generate_date_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            if let FieldValue::Date(date) = generate_date(&mut rng) {
                assert!((2000..=2030).contains(&date.year()));
            } else {
                panic!("Expected Date value");
            }
        }
    }

    #[test]
    fn test_range_bounds() {
        let start = DateTime::from_timestamp(START_TS, 0).unwrap();
        let end = DateTime::from_timestamp(END_TS, 0).unwrap();
        assert_eq!(start.to_rfc3339(), "2000-01-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2030-12-31T23:59:59+00:00");
    }
}
