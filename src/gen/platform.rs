use rand::Rng;

use super::{IdAllocator, MemberState, MAX_ATTEMPTS_PER_ROW};
use crate::model::{Platform, PlatformMembership};
use crate::values::FakeValues;

const FOUNDED_MIN_YEAR: i32 = 2005;
const FOUNDED_MAX_YEAR: i32 = 2022;

const MEMBER_NO_MIN: i64 = 10_000_000;
const MEMBER_NO_MAX: i64 = 99_999_999;

pub fn platforms<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    count: usize,
    company_ids: &[i64],
) -> Vec<Platform> {
    let mut batch = Vec::with_capacity(count);
    if company_ids.is_empty() {
        return batch;
    }
    for _ in 0..count {
        let id = ids.next();
        let founder_id = match values.pick(company_ids) {
            Some(c) => *c,
            None => break,
        };
        let operator_id = values.pick(company_ids).copied().unwrap_or(founder_id);
        batch.push(Platform {
            id,
            name: format!("{} Live", values.word()),
            founded: values.date_between(FOUNDED_MIN_YEAR, FOUNDED_MAX_YEAR),
            founder_id,
            operator_id,
        });
    }
    batch
}

/// Join users to platforms. Each (platform, user) pair appears at most once
/// and each member number is unique within its platform; both are enforced
/// through `state`, which the caller threads across chunks.
pub fn memberships<R: Rng>(
    values: &mut FakeValues<R>,
    platform_ids: &[i64],
    user_sample: &[i64],
    count: usize,
    state: &mut MemberState,
) -> Vec<PlatformMembership> {
    let mut batch = Vec::with_capacity(count);
    if platform_ids.is_empty() || user_sample.is_empty() {
        return batch;
    }

    let ceiling = platform_ids.len().saturating_mul(user_sample.len());
    let target = count.min(ceiling.saturating_sub(state.pairs.len()));

    let mut attempts = 0;
    let max_attempts = count * MAX_ATTEMPTS_PER_ROW;
    while batch.len() < target && attempts < max_attempts {
        attempts += 1;
        let Some(platform_id) = values.pick(platform_ids).copied() else {
            break;
        };
        let Some(user_id) = values.pick(user_sample).copied() else {
            break;
        };
        if !state.pairs.insert(platform_id, user_id) {
            continue;
        }
        let taken = state.member_nos.entry(platform_id).or_default();
        let mut member_no = None;
        for _ in 0..MAX_ATTEMPTS_PER_ROW {
            let candidate = values.int_range(MEMBER_NO_MIN, MEMBER_NO_MAX);
            if taken.insert(candidate) {
                member_no = Some(candidate);
                break;
            }
        }
        let Some(member_no) = member_no else {
            continue;
        };
        batch.push(PlatformMembership {
            platform_id,
            user_id,
            member_no,
        });
    }
    batch
}
