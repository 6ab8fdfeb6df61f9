//! Bounded-memory batch insertion.
//!
//! [`BatchRunner`] drives one entity group at a time: ask the caller's
//! closure for a chunk of rows, hand them to the store, drop them, repeat.
//! Rows are flushed but never committed here; commit boundaries belong to
//! the orchestrator. Cross-chunk state (id allocators, pair sets, sequence
//! counters) lives in the closures, so a chunk never needs the previous
//! chunk's rows.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Instant;

use crate::model::TableRows;
use crate::store::Store;

/// Result of running one entity group.
#[derive(Debug, Clone, Copy)]
pub struct GroupOutcome {
    /// Rows actually written, which can fall short of the request when a
    /// generator exhausts its key space.
    pub inserted: u64,
    pub elapsed_secs: f64,
}

pub struct BatchRunner<'a> {
    store: &'a Store,
    progress: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(store: &'a Store, progress: bool) -> Self {
        Self { store, progress }
    }

    /// Generate and insert `total` rows in chunks of `chunk_size`. The
    /// closure receives the chunk request size and returns the groups to
    /// insert. A chunk that comes back empty ends the group early.
    pub fn run_simple<F>(
        &self,
        label: &str,
        total: u64,
        chunk_size: usize,
        mut generate: F,
    ) -> Result<GroupOutcome>
    where
        F: FnMut(usize) -> Vec<TableRows>,
    {
        self.run(label, total, chunk_size, |request, _inserted| generate(request))
    }

    /// Like [`run_simple`](Self::run_simple), but the closure also receives
    /// the number of rows inserted so far, for generators that disambiguate
    /// values with a running offset.
    pub fn run_offset<F>(
        &self,
        label: &str,
        total: u64,
        chunk_size: usize,
        mut generate: F,
    ) -> Result<GroupOutcome>
    where
        F: FnMut(usize, u64) -> Vec<TableRows>,
    {
        self.run(label, total, chunk_size, |request, inserted| {
            generate(request, inserted)
        })
    }

    /// Like [`run_simple`](Self::run_simple), but each chunk gets a fresh
    /// random sample of parent keys drawn from `source`, sized
    /// `request * multiplier` so collision-heavy generators have room to
    /// reject duplicates.
    pub fn run_sampled<F, R>(
        &self,
        label: &str,
        total: u64,
        chunk_size: usize,
        rng: &mut R,
        source: &[i64],
        multiplier: usize,
        mut generate: F,
    ) -> Result<GroupOutcome>
    where
        F: FnMut(&[i64], usize) -> Vec<TableRows>,
        R: Rng,
    {
        self.run(label, total, chunk_size, |request, _inserted| {
            let sample_size = (request * multiplier).min(source.len());
            let sample: Vec<i64> = source
                .choose_multiple(rng, sample_size)
                .copied()
                .collect();
            generate(&sample, request)
        })
    }

    fn run<F>(&self, label: &str, total: u64, chunk_size: usize, mut generate: F) -> Result<GroupOutcome>
    where
        F: FnMut(usize, u64) -> Vec<TableRows>,
    {
        let start = Instant::now();
        let bar = self.make_bar(label, total);
        let mut inserted = 0u64;

        while inserted < total {
            let request = chunk_size.min((total - inserted) as usize);
            let groups = generate(request, inserted);
            let chunk_rows: u64 = groups.iter().map(|g| g.rows.len() as u64).sum();
            if chunk_rows == 0 {
                // Key space exhausted; deliver what we have.
                break;
            }
            self.store.insert(&groups)?;
            inserted += chunk_rows;
            bar.set_position(inserted.min(total));
            drop(groups);
        }

        bar.finish_and_clear();
        Ok(GroupOutcome {
            inserted,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    fn make_bar(&self, label: &str, total: u64) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            bar.set_style(style.progress_chars("█▓▒░  "));
        }
        bar.set_message(label.to_string());
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Company, Record, SqlValue, TableRows};

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
    fn test_run_offset_covers_total_in_chunks() {
        let store = store();
        let runner = BatchRunner::new(&store, false);
        let mut calls = 0;
        let outcome = runner
            .run_offset("companies", 25, 10, |request, inserted| {
                calls += 1;
                company_rows(inserted as i64 + 1, request)
            })
            .unwrap();
        assert_eq!(outcome.inserted, 25);
        assert_eq!(calls, 3);
        assert_eq!(store.count("company").unwrap(), 25);
    }

    #[test]
    fn test_empty_chunk_ends_group_early() {
        let store = store();
        let runner = BatchRunner::new(&store, false);
        let mut served = false;
        let outcome = runner
            .run_simple("companies", 100, 10, |request| {
                if served {
                    return vec![];
                }
                served = true;
                company_rows(1, request)
            })
            .unwrap();
        assert_eq!(outcome.inserted, 10);
        assert_eq!(store.count("company").unwrap(), 10);
    }

    #[test]
    fn test_sampled_run_draws_from_source() {
        let store = store();
        let runner = BatchRunner::new(&store, false);
        let source: Vec<i64> = (1..=50).collect();
        let mut rng = {
            use rand::SeedableRng;
            rand_chacha::ChaCha8Rng::seed_from_u64(21)
        };
        let mut next_id = 1i64;
        let outcome = runner
            .run_sampled("companies", 20, 5, &mut rng, &source, 2, |sample, request| {
                assert!(sample.len() <= 10);
                assert!(sample.iter().all(|id| (1..=50).contains(id)));
                let rows = company_rows(next_id, request);
                next_id += request as i64;
                rows
            })
            .unwrap();
        assert_eq!(outcome.inserted, 20);
    }
}
