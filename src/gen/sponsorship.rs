use rand::Rng;

use super::{PairSet, MAX_ATTEMPTS_PER_ROW};
use crate::model::Sponsorship;
use crate::values::FakeValues;

const AMOUNT_MIN: f64 = 100.0;
const AMOUNT_MAX: f64 = 250_000.0;

/// Join companies to channels. Each (company, channel) pair appears at most
/// once; delivery is capped by the remaining pair space.
pub fn sponsorships<R: Rng>(
    values: &mut FakeValues<R>,
    company_ids: &[i64],
    channel_ids: &[i64],
    count: usize,
    pairs: &mut PairSet,
) -> Vec<Sponsorship> {
    let mut batch = Vec::with_capacity(count);
    if company_ids.is_empty() || channel_ids.is_empty() {
        return batch;
    }

    let ceiling = company_ids.len().saturating_mul(channel_ids.len());
    let target = count.min(ceiling.saturating_sub(pairs.len()));

    let mut attempts = 0;
    let max_attempts = count * MAX_ATTEMPTS_PER_ROW;
    while batch.len() < target && attempts < max_attempts {
        attempts += 1;
        let Some(company_id) = values.pick(company_ids).copied() else {
            break;
        };
        let Some(channel_id) = values.pick(channel_ids).copied() else {
            break;
        };
        if !pairs.insert(company_id, channel_id) {
            continue;
        }
        batch.push(Sponsorship {
            company_id,
            channel_id,
            amount: values.decimal(AMOUNT_MIN, AMOUNT_MAX),
        });
    }
    batch
}
