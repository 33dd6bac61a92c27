//! Fixed timestamps for date assertions

/// Fixed timestamp for testing (2024-01-01 00:00:00 UTC), in the store's format
pub const TEST_TIMESTAMP: &str = "2024-01-01T00:00:00.000000Z";

/// A timestamp in the naive ISO-8601 form older record files use
pub const LEGACY_TIMESTAMP: &str = "2023-06-15T09:12:45.678901";

/// Get a fixed chrono DateTime for testing
pub fn test_now() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(TEST_TIMESTAMP)
        .expect("Invalid test timestamp")
        .with_timezone(&chrono::Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_timestamp() {
        let ts = test_now();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn test_legacy_timestamp_parses() {
        assert!(charsheet::parse_timestamp(LEGACY_TIMESTAMP).is_some());
    }
}
