use rand::Rng;

use super::IdAllocator;
use crate::model::Company;
use crate::values::FakeValues;

pub fn companies<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    count: usize,
) -> Vec<Company> {
    (0..count)
        .map(|_| {
            let id = ids.next();
            Company {
                id,
                // Id suffix keeps legal names distinct across the full run.
                legal_name: format!("{} {}", values.company_name(), id),
                trade_name: values.trade_name(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_companies_have_distinct_ids_and_names() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(1));
        let mut ids = IdAllocator::new();
        let batch = companies(&mut values, &mut ids, 50);
        assert_eq!(batch.len(), 50);

        let mut seen_ids = std::collections::HashSet::new();
        let mut seen_names = std::collections::HashSet::new();
        for c in &batch {
            assert!(seen_ids.insert(c.id));
            assert!(seen_names.insert(c.legal_name.clone()));
        }
    }
}
