//! Policy Identifier Generation
//!
//! Human-readable labels for back-office tracking, shaped
//! `IH-YYYYMMDD-REGION-XXXXX`. These are not insurer-issued policy numbers.

use chrono::Local;
use rand::Rng;

use crate::region::DEFAULT_REGION;

/// Prefix on every generated identifier.
const POLICY_PREFIX: &str = "IH";

/// Alphabet for the random suffix (base 36, uppercased).
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 5;

/// Generates a policy identifier like `IH-20250115-NJ-7KQ2M`.
///
/// The date comes from the local process clock; the region defaults to
/// `"US"` when empty and is uppercased otherwise. The suffix is random but
/// deliberately not collision-proof: no uniqueness is enforced anywhere,
/// which is good enough for bookkeeping labels.
pub fn generate_policy_id(region: &str) -> String {
    let date = Local::now().format("%Y%m%d");

    let region = if region.is_empty() {
        DEFAULT_REGION.to_string()
    } else {
        region.to_uppercase()
    };

    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    format!("{}-{}-{}-{}", POLICY_PREFIX, date, region, suffix)
}
