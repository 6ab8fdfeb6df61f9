use ahash::AHashSet;
use rand::Rng;

use super::MAX_ATTEMPTS_PER_ROW;
use crate::model::Country;
use crate::values::FakeValues;

/// Draw countries keyed by dialing codes sampled from `dial_pool` without
/// replacement. Delivery is bounded by the distinct codes remaining in the
/// pool; when the attempt budget runs out the batch is returned short.
pub fn countries<R: Rng>(
    values: &mut FakeValues<R>,
    dial_pool: &[i64],
    taken: &mut AHashSet<i64>,
    count: usize,
    currency_ids: &[i64],
) -> Vec<Country> {
    let mut batch = Vec::with_capacity(count);
    if dial_pool.is_empty() || currency_ids.is_empty() {
        return batch;
    }

    let mut attempts = 0;
    let max_attempts = count * MAX_ATTEMPTS_PER_ROW;
    while batch.len() < count && attempts < max_attempts {
        attempts += 1;
        let Some(code) = values.pick(dial_pool).copied() else {
            break;
        };
        if !taken.insert(code) {
            continue;
        }
        let Some(currency_id) = values.pick(currency_ids).copied() else {
            break;
        };
        batch.push(Country {
            dial_code: code,
            name: values.country_name(),
            currency_id,
        });
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dial_codes_unique_across_calls() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(3));
        let pool: Vec<i64> = (1..=100).collect();
        let mut taken = AHashSet::new();
        let currency_ids = vec![1, 2, 3];

        let a = countries(&mut values, &pool, &mut taken, 40, &currency_ids);
        let b = countries(&mut values, &pool, &mut taken, 40, &currency_ids);

        let mut seen = AHashSet::new();
        for c in a.iter().chain(b.iter()) {
            assert!(seen.insert(c.dial_code));
            assert!(currency_ids.contains(&c.currency_id));
        }
    }

    #[test]
    fn test_exhausted_pool_under_delivers() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(4));
        let pool = vec![10, 20, 30];
        let mut taken = AHashSet::new();
        let batch = countries(&mut values, &pool, &mut taken, 5, &[1]);
        assert_eq!(batch.len(), 3);
    }
}
