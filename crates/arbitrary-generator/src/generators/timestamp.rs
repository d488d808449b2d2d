//! Timestamp value generators.

use crate::gen::Gen;
use arbitrary_core::{parse_timestamp, GenError, GenValue, TypeShape};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Earliest timestamp produced by [`any_timestamp`]: 0001-01-01T00:00:00Z.
const MIN_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Latest timestamp produced by [`any_timestamp`]: 9999-12-31T23:59:59Z.
const MAX_TIMESTAMP_SECS: i64 = 253_402_300_799;

/// Generate timestamps anywhere in years 0001 through 9999, with nanosecond precision.
pub fn any_timestamp() -> Gen {
    match (
        DateTime::from_timestamp(MIN_TIMESTAMP_SECS, 0),
        DateTime::from_timestamp(MAX_TIMESTAMP_SECS, 999_999_999),
    ) {
        (Some(start), Some(end)) => timestamp_between(start, end),
        _ => Gen::constant(TypeShape::Timestamp, GenValue::Timestamp(DateTime::<Utc>::UNIX_EPOCH)),
    }
}

/// Generate the current UTC timestamp.
///
/// This is NOT deterministic - each call returns the current time.
pub fn timestamp_now() -> Gen {
    Gen::from_fn(TypeShape::Timestamp, |_| Ok(GenValue::Timestamp(Utc::now())))
}

/// Generate timestamps in `[start, end]`.
pub fn timestamp_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Gen {
    if start >= end {
        return Gen::constant(TypeShape::Timestamp, GenValue::Timestamp(start));
    }

    Gen::from_fn(TypeShape::Timestamp, move |params| {
        let rng = params.rng();
        let secs = rng.random_range(start.timestamp()..=end.timestamp());
        let nanos = rng.random_range(0..1_000_000_000u32);
        let dt = DateTime::from_timestamp(secs, nanos).unwrap_or(start);
        Ok(GenValue::Timestamp(dt.clamp(start, end)))
    })
}

/// Generate random timestamps in the given range.
///
/// The start and end should be ISO 8601 formatted timestamps or plain
/// `YYYY-MM-DD` dates. An unparseable bound or a start after the end yields a
/// generator that fails with [`GenError::InvalidRange`] when sampled.
pub fn timestamp_range(start: &str, end: &str) -> Gen {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(from), Some(to)) if from <= to => timestamp_between(from, to),
        _ => Gen::failing(
            TypeShape::Timestamp,
            GenError::InvalidRange(format!("invalid timestamp range {start}..={end}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbitrary_core::GenParams;
    use chrono::Datelike;

    fn sample_timestamp(gen: &Gen, params: &mut GenParams) -> DateTime<Utc> {
        match gen.sample(params).retrieve().unwrap() {
            GenValue::Timestamp(dt) => dt,
            other => panic!("Expected Timestamp value, got {other:?}"),
        }
    }

    #[test]
    fn test_timestamp_range() {
        let gen = timestamp_range("2020-01-01T00:00:00Z", "2024-12-31T23:59:59Z");
        let mut params = GenParams::new(42);

        for _ in 0..50 {
            let dt = sample_timestamp(&gen, &mut params);
            assert!(dt.year() >= 2020 && dt.year() <= 2024);
        }
    }

    #[test]
    fn test_timestamp_with_dates_only() {
        let gen = timestamp_range("2020-01-01", "2024-12-31");
        let dt = sample_timestamp(&gen, &mut GenParams::new(42));
        assert!(dt.year() >= 2020 && dt.year() <= 2024);
    }

    #[test]
    fn test_timestamp_range_single_bound_fails() {
        let gen = timestamp_range("2021-06-01", "not a date");
        let result = gen.sample(&mut GenParams::new(1)).retrieve();
        assert!(matches!(result, Err(GenError::InvalidRange(_))));
    }

    #[test]
    fn test_timestamp_range_unparseable() {
        let gen = timestamp_range("yesterday", "tomorrow");
        let result = gen.sample(&mut GenParams::new(1)).retrieve();
        assert!(matches!(result, Err(GenError::InvalidRange(_))));
    }

    #[test]
    fn test_timestamp_range_inverted_fails() {
        let gen = timestamp_range("2024-01-01", "2020-01-01");
        let result = gen.sample(&mut GenParams::new(1)).retrieve();
        assert!(matches!(result, Err(GenError::InvalidRange(_))));
    }

    #[test]
    fn test_timestamp_range_single_instant() {
        let gen = timestamp_range("2021-06-01", "2021-06-01");
        let dt = sample_timestamp(&gen, &mut GenParams::new(1));
        assert_eq!((dt.year(), dt.month(), dt.day()), (2021, 6, 1));
    }

    #[test]
    fn test_any_timestamp_within_calendar_range() {
        let gen = any_timestamp();
        let mut params = GenParams::new(11);

        for _ in 0..100 {
            let dt = sample_timestamp(&gen, &mut params);
            assert!((1..=9999).contains(&dt.year()));
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let gen = timestamp_range("2020-01-01T00:00:00Z", "2024-12-31T23:59:59Z");
        let mut p1 = GenParams::new(42);
        let mut p2 = GenParams::new(42);

        assert_eq!(gen.sample(&mut p1), gen.sample(&mut p2));
    }
}
