use ahash::AHashSet;
use rand::Rng;

use super::MAX_ATTEMPTS_PER_ROW;
use crate::model::{CompanyCountry, StreamerNationality};
use crate::values::FakeValues;

/// One nationality per streamer in the chunk. Passport numbers are unique
/// across the run via `passports`.
pub fn streamer_nationalities<R: Rng>(
    values: &mut FakeValues<R>,
    streamer_ids: &[i64],
    dial_codes: &[i64],
    passports: &mut AHashSet<String>,
) -> Vec<StreamerNationality> {
    let mut batch = Vec::with_capacity(streamer_ids.len());
    if dial_codes.is_empty() {
        return batch;
    }
    for &user_id in streamer_ids {
        let Some(dial_code) = values.pick(dial_codes).copied() else {
            break;
        };
        let Some(passport_no) = fresh(passports, || values.passport_no()) else {
            continue;
        };
        batch.push(StreamerNationality {
            user_id,
            dial_code,
            passport_no,
        });
    }
    batch
}

/// One country of registration per company in the chunk. National ids are
/// unique per country via `national_ids`.
pub fn company_countries<R: Rng>(
    values: &mut FakeValues<R>,
    company_ids: &[i64],
    dial_codes: &[i64],
    national_ids: &mut AHashSet<(i64, String)>,
) -> Vec<CompanyCountry> {
    let mut batch = Vec::with_capacity(company_ids.len());
    if dial_codes.is_empty() {
        return batch;
    }
    for &company_id in company_ids {
        let Some(dial_code) = values.pick(dial_codes).copied() else {
            break;
        };
        let mut picked = None;
        for _ in 0..MAX_ATTEMPTS_PER_ROW {
            let candidate = values.national_id();
            if national_ids.insert((dial_code, candidate.clone())) {
                picked = Some(candidate);
                break;
            }
        }
        let Some(national_id) = picked else {
            continue;
        };
        batch.push(CompanyCountry {
            company_id,
            dial_code,
            national_id,
        });
    }
    batch
}

fn fresh(taken: &mut AHashSet<String>, mut make: impl FnMut() -> String) -> Option<String> {
    for _ in 0..MAX_ATTEMPTS_PER_ROW {
        let candidate = make();
        if taken.insert(candidate.clone()) {
            return Some(candidate);
        }
    }
    None
}
