//! Lists of ready-made string values for data-driven tests.
//!
//! Tests iterate over these lists to create one entity per value, covering
//! every charset with a valid value and the usual rejections (empty,
//! whitespace-only, too long) with invalid ones.

use entity_core::Charset;
use rand::Rng;

pub use crate::generators::string::generate_string;

/// Length of the over-long strings in [`invalid_values_list`].
pub const INVALID_STRING_LENGTH: usize = 300;

/// Longest string in [`valid_data_list`].
pub const MAX_VALID_LENGTH: usize = 255;

/// One string per charset not in `exclude`.
///
/// Every string gets `length` characters, or a random length from 3 to 30 when
/// `length` is `None`.
pub fn generate_strings_list<R: Rng>(
    rng: &mut R,
    length: Option<usize>,
    exclude: &[Charset],
) -> Vec<String> {
    let length = length.unwrap_or_else(|| rng.random_range(3..=30));
    Charset::ALL
        .into_iter()
        .filter(|charset| !exclude.contains(charset))
        .map(|charset| generate_string(rng, charset, length))
        .collect()
}

/// One valid (non-empty) string per charset, each with its own length.
pub fn valid_data_list<R: Rng>(rng: &mut R) -> Vec<String> {
    Charset::ALL
        .into_iter()
        .map(|charset| {
            let length = rng.random_range(1..=MAX_VALID_LENGTH);
            generate_string(rng, charset, length)
        })
        .collect()
}

/// Strings a name-like field must reject.
pub fn invalid_values_list<R: Rng>(rng: &mut R) -> Vec<String> {
    let mut values = vec![String::new(), " ".to_string(), "\t".to_string()];
    values.extend(
        Charset::ALL
            .into_iter()
            .map(|charset| generate_string(rng, charset, INVALID_STRING_LENGTH)),
    );
    values
}
