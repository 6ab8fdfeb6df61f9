use rand::Rng;

use super::IdAllocator;
use crate::model::CurrencyConversion;
use crate::values::FakeValues;

/// Conversion factor bounds relative to the reference currency.
const FACTOR_MIN: f64 = 0.01;
const FACTOR_MAX: f64 = 50.0;

pub fn currencies<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    count: usize,
) -> Vec<CurrencyConversion> {
    (0..count)
        .map(|_| CurrencyConversion {
            id: ids.next(),
            code: values.currency_code(),
            factor: values.decimal(FACTOR_MIN, FACTOR_MAX),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_factors_within_bounds() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(2));
        let mut ids = IdAllocator::new();
        for c in currencies(&mut values, &mut ids, 100) {
            assert!((FACTOR_MIN..=FACTOR_MAX).contains(&c.factor));
            assert_eq!(c.code.len(), 3);
        }
    }
}
