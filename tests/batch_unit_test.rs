//! Batch runner behavior against a real in-memory store.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use streamfill::batch::BatchRunner;
use streamfill::model::{Company, Record, SqlValue, TableRows};
use streamfill::store::Store;

fn store() -> Store {
    let store = Store::open(None).unwrap();
    store.create_schema().unwrap();
    store
}

fn company_rows(start: i64, n: usize) -> Vec<TableRows> {
    let rows = (0..n as i64)
        .map(|i| {
            vec![
                SqlValue::Int(start + i),
                SqlValue::String(format!("Company {}", start + i)),
                SqlValue::String("Co".to_string()),
            ]
        })
        .collect();
    vec![TableRows {
        table: Company::TABLE,
        columns: Company::COLUMNS,
        rows,
    }]
}

#[test]
fn chunks_never_exceed_the_requested_size() {
    let store = store();
    let runner = BatchRunner::new(&store, false);
    let mut requests = Vec::new();
    let outcome = runner
        .run_offset("companies", 23, 10, |request, inserted| {
            requests.push(request);
            company_rows(inserted as i64 + 1, request)
        })
        .unwrap();
    assert_eq!(outcome.inserted, 23);
    assert_eq!(requests, vec![10, 10, 3]);
}

#[test]
fn under_delivery_terminates_without_error() {
    let store = store();
    let runner = BatchRunner::new(&store, false);
    let mut remaining = 12usize;
    let outcome = runner
        .run_simple("companies", 100, 10, |request| {
            let n = request.min(remaining);
            let rows = company_rows((12 - remaining) as i64 + 1, n);
            remaining -= n;
            rows
        })
        .unwrap();
    assert_eq!(outcome.inserted, 12);
    assert_eq!(store.count("company").unwrap(), 12);
}

#[test]
fn sampled_runs_bound_the_sample_by_the_source() {
    let store = store();
    let runner = BatchRunner::new(&store, false);
    let source: Vec<i64> = (1..=6).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut next_id = 1i64;
    runner
        .run_sampled("companies", 10, 5, &mut rng, &source, 4, |sample, request| {
            // 5 * 4 exceeds the source, so the whole source is the sample
            assert_eq!(sample.len(), 6);
            let rows = company_rows(next_id, request);
            next_id += request as i64;
            rows
        })
        .unwrap();
}

#[test]
fn flushed_rows_survive_only_after_commit() {
    let store = store();
    let runner = BatchRunner::new(&store, false);

    store.begin().unwrap();
    runner
        .run_simple("companies", 5, 5, |request| company_rows(1, request))
        .unwrap();
    // visible to the open transaction
    assert_eq!(store.count("company").unwrap(), 5);
    store.rollback().unwrap();
    assert_eq!(store.count("company").unwrap(), 0);

    store.begin().unwrap();
    runner
        .run_simple("companies", 5, 5, |request| company_rows(1, request))
        .unwrap();
    store.commit().unwrap();
    assert_eq!(store.count("company").unwrap(), 5);
}
