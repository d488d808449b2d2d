//! Sequence and map generators.

use super::static_value::coerce;
use crate::gen::Gen;
use arbitrary_core::{GenParams, GenValue, TypeShape};
use rand::seq::{IndexedRandom, SliceRandom};

/// Draw a collection length: the parameters' size bounds capped at
/// `max_len`, but never below `min_len`.
fn collection_length(params: &mut GenParams, min_len: usize, max_len: usize) -> usize {
    let (min_len, max_len) = (min_len.min(max_len), min_len.max(max_len));
    params.next_size(max_len).max(min_len)
}

/// Generate sequences whose elements come from `element`.
///
/// The first element that fails to generate fails the whole sequence.
pub fn sequence_of(element: Gen, min_len: usize, max_len: usize) -> Gen {
    let shape = TypeShape::sequence(element.result_shape().clone());
    Gen::from_fn(shape, move |params| {
        let length = collection_length(params, min_len, max_len);
        let items = (0..length)
            .map(|_| element.sample(params).retrieve())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GenValue::Array(items))
    })
}

/// Generate maps with keys from `key` and values from `value`.
///
/// Entries whose key was already generated replace the earlier entry, so a
/// map may hold fewer entries than the drawn length.
pub fn map_of(key: Gen, value: Gen, min_len: usize, max_len: usize) -> Gen {
    let shape = TypeShape::map(key.result_shape().clone(), value.result_shape().clone());
    Gen::from_fn(shape, move |params| {
        let length = collection_length(params, min_len, max_len);
        let mut entries: Vec<(GenValue, GenValue)> = Vec::with_capacity(length);
        for _ in 0..length {
            let k = key.sample(params).retrieve()?;
            let v = value.sample(params).retrieve()?;
            match entries.iter().position(|(existing, _)| *existing == k) {
                Some(idx) => entries[idx].1 = v,
                None => entries.push((k, v)),
            }
        }
        Ok(GenValue::Map(entries))
    })
}

/// Generate arrays by sampling from a pool of values, converting each sample
/// to `element_shape`.
pub fn sample_array(
    pool: Vec<String>,
    min_length: usize,
    max_length: usize,
    element_shape: TypeShape,
) -> Gen {
    let shape = TypeShape::sequence(element_shape.clone());
    Gen::from_fn(shape, move |params| {
        if pool.is_empty() || max_length == 0 {
            return Ok(GenValue::Array(vec![]));
        }

        let length = collection_length(params, min_length, max_length);
        let rng = params.rng();

        // Randomly select `length` items from the pool (with potential duplicates)
        let items = (0..length)
            .filter_map(|_| pool.choose(rng))
            .map(|item| coerce(GenValue::Text(item.clone()), &element_shape))
            .collect();

        Ok(GenValue::Array(items))
    })
}

/// Generate text arrays by sampling unique items from a pool.
pub fn unique_sample_array(pool: Vec<String>, min_length: usize, max_length: usize) -> Gen {
    Gen::from_fn(TypeShape::sequence(TypeShape::Text), move |params| {
        if pool.is_empty() || max_length == 0 {
            return Ok(GenValue::Array(vec![]));
        }

        // Clamp max_length to pool size for unique sampling
        let effective_max = max_length.min(pool.len());
        let effective_min = min_length.min(effective_max);
        let length = collection_length(params, effective_min, effective_max);

        // Shuffle and take first `length` items
        let mut shuffled = pool.clone();
        shuffled.shuffle(params.rng());

        let items = shuffled
            .into_iter()
            .take(length)
            .map(GenValue::Text)
            .collect();

        Ok(GenValue::Array(items))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::numeric::int_range;

    fn pool() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_sequence_lengths_within_bounds() {
        let gen = sequence_of(int_range(TypeShape::Int32, 0, 9), 1, 5);
        assert_eq!(gen.result_shape(), &TypeShape::sequence(TypeShape::Int32));

        let mut params = GenParams::new(42);
        for _ in 0..100 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            let items = value.as_array().unwrap();
            assert!((1..=5).contains(&items.len()));
            assert!(value.conforms_to(gen.result_shape()));
        }
    }

    #[test]
    fn test_sequence_respects_param_sizes() {
        let gen = sequence_of(int_range(TypeShape::Int32, 0, 9), 0, 50);
        let mut params = GenParams::new(42).with_size(0, 3);
        for _ in 0..50 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            assert!(value.as_array().unwrap().len() <= 3);
        }
    }

    #[test]
    fn test_sequence_propagates_element_failure() {
        let gen = sequence_of(int_range(TypeShape::Int32, 9, 0), 1, 3);
        assert!(gen.sample(&mut GenParams::new(1)).retrieve().is_err());
    }

    #[test]
    fn test_map_keys_are_unique() {
        let gen = map_of(
            int_range(TypeShape::Int8, 0, 3),
            int_range(TypeShape::Int64, 0, 1000),
            10,
            10,
        );
        let mut params = GenParams::new(7);
        for _ in 0..20 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            let entries = value.as_map().unwrap();
            assert!(entries.len() <= 4);
            for (i, (k, _)) in entries.iter().enumerate() {
                assert!(entries[i + 1..].iter().all(|(other, _)| other != k));
            }
        }
    }

    #[test]
    fn test_sample_array() {
        let gen = sample_array(pool(), 1, 3, TypeShape::Text);
        let mut params = GenParams::new(42);

        for _ in 0..10 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            let arr = value.as_array().unwrap();
            assert!(!arr.is_empty());
            assert!(arr.len() <= 3);
        }
    }

    #[test]
    fn test_sample_array_typed_elements() {
        let pool = vec!["1".to_string(), "2".to_string()];
        let gen = sample_array(pool, 2, 2, TypeShape::Int64);
        let value = gen.sample(&mut GenParams::new(3)).retrieve().unwrap();
        assert!(value.conforms_to(&TypeShape::sequence(TypeShape::Int64)));
    }

    #[test]
    fn test_sample_array_empty_pool() {
        let gen = sample_array(vec![], 0, 3, TypeShape::Text);
        let value = gen.sample(&mut GenParams::new(42)).retrieve().unwrap();
        assert_eq!(value, GenValue::Array(vec![]));
    }

    #[test]
    fn test_unique_sample_array() {
        let pool: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        let gen = unique_sample_array(pool, 3, 3);

        let value = gen.sample(&mut GenParams::new(42)).retrieve().unwrap();
        let strings: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(GenValue::as_str)
            .collect();
        assert_eq!(strings.len(), 3);
        let mut sorted = strings.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(strings.len(), sorted.len());
    }

    #[test]
    fn test_deterministic_generation() {
        let gen = sample_array(pool(), 1, 3, TypeShape::Text);
        let mut p1 = GenParams::new(42);
        let mut p2 = GenParams::new(42);

        assert_eq!(gen.sample(&mut p1), gen.sample(&mut p2));
    }
}
