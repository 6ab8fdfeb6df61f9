use rand::Rng;

use super::IdAllocator;
use crate::model::User;
use crate::values::FakeValues;

const MIN_AGE: i32 = 13;
const MAX_AGE: i32 = 80;

/// Share of users soft-deleted at generation time.
const DELETED_SHARE: f64 = 0.05;

/// Share of users with no country on record.
const NO_COUNTRY_SHARE: f64 = 0.10;

/// Generate a chunk of users. `offset` is the number of users emitted by
/// earlier chunks; it suffixes nicks and email local parts so both stay
/// unique across the whole run without any lookup set.
pub fn users<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    count: usize,
    offset: u64,
    dial_codes: &[i64],
) -> Vec<User> {
    let mut batch = Vec::with_capacity(count);
    for i in 0..count {
        let handle = format!("{}{}", values.username(), offset + i as u64);
        let email = format!("{}@{}", handle, values.email_domain());
        let country_code = if dial_codes.is_empty() || values.bool_with_probability(NO_COUNTRY_SHARE)
        {
            None
        } else {
            values.pick(dial_codes).copied()
        };
        let deleted_at = if values.bool_with_probability(DELETED_SHARE) {
            Some(values.timestamp_between(2023, 2025))
        } else {
            None
        };
        batch.push(User {
            id: ids.next(),
            nick: handle,
            email,
            born: values.birth_date(MIN_AGE, MAX_AGE),
            phone: values.phone(),
            country_code,
            postal_code: values.postal_code(),
            deleted_at,
        });
    }
    batch
}
