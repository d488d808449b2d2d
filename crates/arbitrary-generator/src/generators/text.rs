//! Text generators.
//!
//! Pattern strings support placeholders:
//! - `{index}` - sample index from the generation parameters
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use super::uuid::random_uuid_v4;
use crate::gen::Gen;
use arbitrary_core::{GenValue, TypeShape};
use rand::Rng;

/// Generate arbitrary unicode text.
///
/// Lengths are drawn from the parameters' size bounds, capped at `max_length`
/// characters.
pub fn any_text(max_length: usize) -> Gen {
    Gen::from_fn(TypeShape::Text, move |params| {
        let length = params.next_size(max_length);
        let rng = params.rng();
        let text: String = (0..length).map(|_| rng.random::<char>()).collect();
        Ok(GenValue::Text(text))
    })
}

/// Generate strings based on a pattern with placeholders.
pub fn pattern(pattern: impl Into<String>) -> Gen {
    let pattern = pattern.into();
    Gen::from_fn(TypeShape::Text, move |params| {
        let index = params.index;
        Ok(GenValue::Text(expand_pattern(&pattern, params.rng(), index)))
    })
}

fn expand_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid_v4(rng).to_string(), 1);
    }

    // Replace {rand:N} placeholders; stop at the first malformed one
    while let Some(start) = result.find("{rand:") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let Ok(digits) = result[start + 6..end].parse::<usize>() else {
            break;
        };
        let random_num = random_digits(rng, digits);
        result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
    }

    result
}

/// Generate a random number with exactly N digits.
fn random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit is 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.random_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.random_range(0..10u8)));
    }

    result
}
