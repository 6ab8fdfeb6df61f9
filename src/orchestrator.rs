//! Dependency-ordered population run.
//!
//! Entity groups are generated in nine levels, parents strictly before
//! children. Parent keys cross level boundaries either as in-memory id
//! vectors or, after a commit boundary, as read-backs from the store, so no
//! level ever holds full parent records. Commits land after levels 3, 4, 6
//! and 7, plus the final commit after level 9; everything in between is
//! flushed but uncommitted, and any error rolls the open transaction back.

use ahash::AHashSet;
use anyhow::Result;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::batch::BatchRunner;
use crate::gen::{
    self, FanOutCursor, IdAllocator, MemberState, PairSet, SequenceMap,
};
use crate::model::TableRows;
use crate::plan::VolumePlan;
use crate::store::Store;
use crate::values::{FakeValues, DIAL_CODES};

/// Per-level wall-clock timings for one run.
#[derive(Debug, Default, Clone)]
pub struct RunTimings {
    pub levels: [f64; 9],
    pub total_secs: f64,
}

pub struct Orchestrator {
    values: FakeValues<ChaCha8Rng>,
    sample_rng: ChaCha8Rng,
    progress: bool,
}

impl Orchestrator {
    pub fn new(seed: u64, progress: bool) -> Self {
        Self {
            values: FakeValues::new(ChaCha8Rng::seed_from_u64(seed)),
            // Distinct stream so parent sampling does not perturb the
            // value sequence.
            sample_rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            progress,
        }
    }

    /// Populate the store according to `plan`. The schema must exist and
    /// the tables must be empty.
    pub fn run(&mut self, store: &Store, plan: &VolumePlan) -> Result<RunTimings> {
        match self.run_levels(store, plan) {
            Ok(timings) => Ok(timings),
            Err(e) => {
                let _ = store.rollback();
                Err(e)
            }
        }
    }

    fn run_levels(&mut self, store: &Store, plan: &VolumePlan) -> Result<RunTimings> {
        let values = &mut self.values;
        let sample_rng = &mut self.sample_rng;
        let runner = BatchRunner::new(store, self.progress);
        let batch = plan.batch;

        let mut timings = RunTimings::default();
        let total_start = Instant::now();

        store.begin()?;

        // Level 1: companies and currencies have no parents.
        let level = Instant::now();
        let mut company_alloc = IdAllocator::new();
        runner.run_simple("companies", plan.n_companies, batch.tiny, |request| {
            vec![TableRows::from_records(&gen::company::companies(
                values,
                &mut company_alloc,
                request,
            ))]
        })?;
        let mut currency_alloc = IdAllocator::new();
        runner.run_simple("currencies", plan.n_currencies, batch.tiny, |request| {
            vec![TableRows::from_records(&gen::currency::currencies(
                values,
                &mut currency_alloc,
                request,
            ))]
        })?;
        let company_ids = store.query_ids("company", "id")?;
        let currency_ids = store.query_ids("currency_conversion", "id")?;
        timings.levels[0] = level.elapsed().as_secs_f64();

        // Level 2: countries and platforms.
        let level = Instant::now();
        let mut taken_dials = AHashSet::new();
        runner.run_simple("countries", plan.n_countries, batch.tiny, |request| {
            vec![TableRows::from_records(&gen::country::countries(
                values,
                DIAL_CODES,
                &mut taken_dials,
                request,
                &currency_ids,
            ))]
        })?;
        let mut platform_alloc = IdAllocator::new();
        runner.run_simple("platforms", plan.n_platforms, batch.tiny, |request| {
            vec![TableRows::from_records(&gen::platform::platforms(
                values,
                &mut platform_alloc,
                request,
                &company_ids,
            ))]
        })?;
        let dial_codes = store.query_ids("country", "dial_code")?;
        let platform_ids = store.query_ids("platform", "id")?;
        timings.levels[1] = level.elapsed().as_secs_f64();

        // Level 3: users, then the first commit boundary.
        let level = Instant::now();
        let mut user_alloc = IdAllocator::new();
        runner.run_offset("users", plan.n_users, batch.medium, |request, offset| {
            vec![TableRows::from_records(&gen::user::users(
                values,
                &mut user_alloc,
                request,
                offset,
                &dial_codes,
            ))]
        })?;
        store.commit()?;
        store.begin()?;
        let user_ids = store.query_ids("users", "id")?;
        timings.levels[2] = level.elapsed().as_secs_f64();

        // Level 4: streamer designation, memberships, nationalities,
        // company registrations, channels. Commit boundary after.
        let level = Instant::now();
        let n_streamers = (plan.n_streamers as usize).min(user_ids.len());
        let mut streamer_ids: Vec<i64> = user_ids
            .choose_multiple(sample_rng, n_streamers)
            .copied()
            .collect();
        streamer_ids.sort_unstable();
        let streamers = store.query_streamers(&streamer_ids)?;

        let mut member_state = MemberState::new();
        runner.run_sampled(
            "platform memberships",
            plan.n_memberships,
            batch.huge,
            sample_rng,
            &user_ids,
            2,
            |user_sample, request| {
                vec![TableRows::from_records(&gen::platform::memberships(
                    values,
                    &platform_ids,
                    user_sample,
                    request,
                    &mut member_state,
                ))]
            },
        )?;

        let mut passports = AHashSet::new();
        let mut nat_cursor = 0usize;
        runner.run_simple(
            "streamer nationalities",
            plan.n_nationalities.min(streamer_ids.len() as u64),
            batch.large,
            |request| {
                let slice = next_slice(&streamer_ids, &mut nat_cursor, request);
                vec![TableRows::from_records(&gen::nationality::streamer_nationalities(
                    values,
                    slice,
                    &dial_codes,
                    &mut passports,
                ))]
            },
        )?;

        let mut national_ids = AHashSet::new();
        let mut reg_cursor = 0usize;
        runner.run_simple(
            "company registrations",
            plan.n_company_countries.min(company_ids.len() as u64),
            batch.large,
            |request| {
                let slice = next_slice(&company_ids, &mut reg_cursor, request);
                vec![TableRows::from_records(&gen::nationality::company_countries(
                    values,
                    slice,
                    &dial_codes,
                    &mut national_ids,
                ))]
            },
        )?;

        let mut channel_alloc = IdAllocator::new();
        let mut chan_cursor = 0usize;
        runner.run_simple("channels", streamers.len() as u64, batch.small, |request| {
            let slice = next_slice(&streamers, &mut chan_cursor, request);
            vec![TableRows::from_records(&gen::channel::channels(
                values,
                &mut channel_alloc,
                slice,
                &platform_ids,
            ))]
        })?;
        store.commit()?;
        store.begin()?;
        let channel_ids = store.query_ids("channel", "id")?;
        timings.levels[3] = level.elapsed().as_secs_f64();

        // Level 5: sponsorships and channel tiers.
        let level = Instant::now();
        let mut sponsor_pairs = PairSet::new();
        runner.run_simple("sponsorships", plan.n_sponsorships, batch.large, |request| {
            vec![TableRows::from_records(&gen::sponsorship::sponsorships(
                values,
                &company_ids,
                &channel_ids,
                request,
                &mut sponsor_pairs,
            ))]
        })?;

        let tiers_per_channel = if plan.n_channels > 0 {
            (plan.n_tiers / plan.n_channels).max(1)
        } else {
            1
        };
        let mut tier_alloc = IdAllocator::new();
        let mut tier_cursor = FanOutCursor::default();
        runner.run_simple(
            "channel tiers",
            channel_ids.len() as u64 * tiers_per_channel,
            batch.large,
            |request| {
                vec![TableRows::from_records(&gen::channel::tiers(
                    values,
                    &mut tier_alloc,
                    &channel_ids,
                    tiers_per_channel,
                    &mut tier_cursor,
                    request,
                ))]
            },
        )?;
        timings.levels[4] = level.elapsed().as_secs_f64();

        // Level 6: subscriptions and videos. Commit boundary after.
        let level = Instant::now();
        let tier_ids = store.query_ids("channel_tier", "id")?;
        let mut sub_pairs = PairSet::new();
        runner.run_sampled(
            "subscriptions",
            plan.n_subscriptions,
            batch.huge,
            sample_rng,
            &user_ids,
            2,
            |user_sample, request| {
                vec![TableRows::from_records(&gen::subscription::subscriptions(
                    values,
                    &tier_ids,
                    user_sample,
                    request,
                    &mut sub_pairs,
                ))]
            },
        )?;

        let mut video_alloc = IdAllocator::new();
        runner.run_offset("videos", plan.n_videos, batch.medium, |request, offset| {
            vec![TableRows::from_records(&gen::video::videos(
                values,
                &mut video_alloc,
                &channel_ids,
                request,
                offset,
            ))]
        })?;
        store.commit()?;
        store.begin()?;
        let video_ids = store.query_ids("video", "id")?;
        timings.levels[5] = level.elapsed().as_secs_f64();

        // Level 7: video appearances and comments. Commit boundary after.
        let level = Instant::now();
        let mut appearance_pairs = PairSet::new();
        runner.run_simple("video appearances", plan.n_appearances, batch.huge, |request| {
            vec![TableRows::from_records(&gen::video::appearances(
                values,
                &video_ids,
                &streamer_ids,
                request,
                &mut appearance_pairs,
            ))]
        })?;

        let mut comment_seqs = SequenceMap::new();
        runner.run_sampled(
            "comments",
            plan.n_comments,
            batch.medium,
            sample_rng,
            &user_ids,
            1,
            |user_sample, request| {
                vec![TableRows::from_records(&gen::comment::comments(
                    values,
                    request,
                    &video_ids,
                    user_sample,
                    &mut comment_seqs,
                ))]
            },
        )?;
        store.commit()?;
        store.begin()?;
        timings.levels[6] = level.elapsed().as_secs_f64();

        // Level 8: donations against half of the committed comments.
        let level = Instant::now();
        let mut comment_keys = store.query_comment_keys()?;
        comment_keys.shuffle(sample_rng);
        comment_keys.truncate(comment_keys.len() / 2);

        let mut don_cursor = 0usize;
        runner.run_simple("donations", comment_keys.len() as u64, batch.large, |request| {
            let slice = next_slice(&comment_keys, &mut don_cursor, request);
            vec![TableRows::from_records(&gen::donation::donations(values, slice))]
        })?;
        timings.levels[7] = level.elapsed().as_secs_f64();

        // Level 9: payment details, one per donation, then the final commit.
        let level = Instant::now();
        let donation_keys = store.query_donation_keys()?;
        let split = gen::donation::payments(values, &donation_keys);
        store.insert(&[
            TableRows::from_records(&split.bitcoin),
            TableRows::from_records(&split.card),
            TableRows::from_records(&split.paypal),
            TableRows::from_records(&split.platform),
        ])?;
        store.commit()?;
        timings.levels[8] = level.elapsed().as_secs_f64();

        timings.total_secs = total_start.elapsed().as_secs_f64();
        Ok(timings)
    }
}

/// Advance a cursor over a parent slice, returning the next window. An empty
/// window ends the calling batch group.
fn next_slice<'a, T>(items: &'a [T], cursor: &mut usize, request: usize) -> &'a [T] {
    let start = (*cursor).min(items.len());
    let end = (start + request).min(items.len());
    *cursor = end;
    &items[start..end]
}
