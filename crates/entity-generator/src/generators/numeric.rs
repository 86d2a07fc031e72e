//! Numeric value generators.

use entity_core::FieldValue;
use rand::Rng;

/// Generate a random integer in the given range (inclusive).
pub fn generate_integer<R: Rng>(rng: &mut R, min: i64, max: i64) -> FieldValue {
    FieldValue::Int(rng.random_range(min..=max))
}
