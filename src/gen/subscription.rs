use rand::Rng;

use super::{PairSet, MAX_ATTEMPTS_PER_ROW};
use crate::model::Subscription;
use crate::values::FakeValues;

/// Join users to channel tiers. Each (tier, user) pair appears at most once.
pub fn subscriptions<R: Rng>(
    values: &mut FakeValues<R>,
    tier_ids: &[i64],
    user_sample: &[i64],
    count: usize,
    pairs: &mut PairSet,
) -> Vec<Subscription> {
    let mut batch = Vec::with_capacity(count);
    if tier_ids.is_empty() || user_sample.is_empty() {
        return batch;
    }

    let ceiling = tier_ids.len().saturating_mul(user_sample.len());
    let target = count.min(ceiling.saturating_sub(pairs.len()));

    let mut attempts = 0;
    let max_attempts = count * MAX_ATTEMPTS_PER_ROW;
    while batch.len() < target && attempts < max_attempts {
        attempts += 1;
        let Some(tier_id) = values.pick(tier_ids).copied() else {
            break;
        };
        let Some(user_id) = values.pick(user_sample).copied() else {
            break;
        };
        if !pairs.insert(tier_id, user_id) {
            continue;
        }
        batch.push(Subscription { tier_id, user_id });
    }
    batch
}
