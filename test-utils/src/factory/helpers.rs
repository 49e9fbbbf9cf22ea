//! Shared helper utilities for factory methods.

use chrono::{DateTime, Duration, Utc};

/// Counter for generating unique ids and ordered timestamps in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// A unique 24-digit hex id, the same shape as ids generated by the application.
///
/// The high bits are set so factory ids never collide with fixture ids.
pub fn unique_object_id() -> String {
    format!("{:024x}", (0xfau128 << 88) | next_id() as u128)
}

/// A timestamp that increases with every call, so documents created later sort as newer.
///
/// Truncated to whole milliseconds, the precision documents are stored with, so a factory
/// model compares equal to the same document read back from storage.
pub fn increasing_timestamp() -> DateTime<Utc> {
    let millis = (Utc::now() + Duration::milliseconds(next_id() as i64)).timestamp_millis();
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}
