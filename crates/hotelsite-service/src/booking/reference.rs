//! Booking reference generation.

use rand::Rng;

/// Number of digits after the prefix.
const REFERENCE_DIGITS: usize = 8;

/// Generate a reference such as `BK04718263`: the prefix followed by eight
/// random digits.
pub fn generate_reference(prefix: &str) -> String {
    let number: u32 = rand::rng().random_range(0..100_000_000);
    format!("{prefix}{number:0width$}", width = REFERENCE_DIGITS)
}

/// Whether `reference` is `prefix` followed by exactly eight digits.
pub fn is_reference(reference: &str, prefix: &str) -> bool {
    reference.strip_prefix(prefix).is_some_and(|digits| {
        digits.len() == REFERENCE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
    })
}
