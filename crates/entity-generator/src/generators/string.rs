//! String generators.
//!
//! Every charset produces exactly the requested number of characters (not
//! bytes). No charset emits control or whitespace characters.

use entity_core::{Charset, FieldValue, StringSpec};
use rand::Rng;

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const NUMERIC: &[u8] = b"0123456789";

/// Fully assigned, printable blocks used for the utf8 charset:
/// Basic Latin letters, Latin-1 letters, Greek, Cyrillic, Hiragana and CJK.
const UTF8_RANGES: &[(u32, u32)] = &[
    (0x0041, 0x005A),
    (0x0061, 0x007A),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x00FF),
    (0x03B1, 0x03C9),
    (0x0410, 0x044F),
    (0x3041, 0x3096),
    (0x4E00, 0x9FA5),
];

/// Latin-1 supplement letters, skipping the multiplication and division signs.
const LATIN1_RANGES: &[(u32, u32)] = &[(0x00C0, 0x00D6), (0x00D8, 0x00F6), (0x00F8, 0x00FF)];

const CJK_RANGES: &[(u32, u32)] = &[(0x4E00, 0x9FA5)];

const HTML_TAGS: &[&str] = &["a", "b", "i", "p", "em", "div", "span", "strong"];

/// Generate a string field value with a random length from `spec.length`.
///
/// The lower bound is raised to 1 so the value is never empty.
pub fn generate_string_field<R: Rng>(rng: &mut R, spec: &StringSpec) -> FieldValue {
    let min = spec.length.min.max(1);
    let length = rng.random_range(min..=spec.length.max.max(min));
    FieldValue::String(generate_string(rng, spec.charset, length))
}

/// Generate a string of exactly `length` characters from `charset`.
pub fn generate_string<R: Rng>(rng: &mut R, charset: Charset, length: usize) -> String {
    match charset {
        Charset::Alpha => from_ascii(rng, ALPHA, length),
        Charset::Alphanumeric => from_ascii(rng, ALPHANUMERIC, length),
        Charset::Numeric => from_ascii(rng, NUMERIC, length),
        Charset::Latin1 => from_ranges(rng, LATIN1_RANGES, length),
        Charset::Utf8 => from_ranges(rng, UTF8_RANGES, length),
        Charset::Cjk => from_ranges(rng, CJK_RANGES, length),
        Charset::Html => generate_html(rng, length),
    }
}

fn from_ascii<R: Rng>(rng: &mut R, alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

fn from_ranges<R: Rng>(rng: &mut R, ranges: &[(u32, u32)], length: usize) -> String {
    let mut result = String::with_capacity(length * 3);
    let mut count = 0;
    while count < length {
        let (start, end) = ranges[rng.random_range(0..ranges.len())];
        if let Some(c) = char::from_u32(rng.random_range(start..=end)) {
            result.push(c);
            count += 1;
        }
    }
    result
}

/// `<tag>text</tag>` totalling `length` characters; plain alpha when the
/// length is too short to hold a tag pair.
fn generate_html<R: Rng>(rng: &mut R, length: usize) -> String {
    let tag = HTML_TAGS[rng.random_range(0..HTML_TAGS.len())];
    let overhead = 2 * tag.len() + 5;
    if length <= overhead {
        return from_ascii(rng, ALPHA, length);
    }
    let inner = from_ascii(rng, ALPHA, length - overhead);
    format!("<{tag}>{inner}</{tag}>")
}
