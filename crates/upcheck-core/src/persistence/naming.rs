//! Generated destination file names.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::Rng;

/// Prefix of generated file names.
pub const GENERATED_PREFIX: &str = "e_";

/// Range of the random numeric suffix (always five digits).
pub const SUFFIX_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

/// Generates a file name stem: prefix, Unix timestamp in seconds, and a
/// five-digit random suffix, e.g. `e_171234567812345`.
///
/// Not unique: two uploads in the same second can collide, in which case
/// persistence reports the destination as already existing.
#[must_use]
pub fn generate_file_name() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let suffix = rand::rng().random_range(SUFFIX_RANGE);
    format!("{GENERATED_PREFIX}{timestamp}{suffix}")
}
