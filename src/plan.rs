//! Volume planning.
//!
//! A [`VolumeSpec`] holds the tunable bases and ratios of a run; deriving it
//! produces a [`VolumePlan`] of absolute per-table counts, optionally with
//! per-parameter jitter so repeated runs do not yield identical cardinality
//! profiles. Five presets cover quick development through extreme stress.

use anyhow::{bail, Result};
use rand::Rng;

/// Chunk sizes by entity weight. Heavier rows use smaller chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSizes {
    pub tiny: usize,
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub huge: usize,
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            tiny: 1_000,
            small: 5_000,
            medium: 10_000,
            large: 25_000,
            huge: 50_000,
        }
    }
}

/// Tunable bases and ratios for one run.
#[derive(Debug, Clone)]
pub struct VolumeSpec {
    pub name: &'static str,
    pub n_users: u64,
    pub n_companies: u64,
    pub n_platforms: u64,
    pub n_countries: u64,
    pub pct_streamers: f64,
    pub videos_per_channel: u64,
    pub comments_per_video: u64,
    pub platforms_per_user: f64,
    pub subscriptions_per_user: f64,
    pub appearances_per_video: f64,
    pub tiers_per_channel: u64,
    pub sponsorships_per_company: u64,
    pub batch: BatchSizes,
}

/// Absolute per-table counts derived from a [`VolumeSpec`].
#[derive(Debug, Clone)]
pub struct VolumePlan {
    pub name: &'static str,
    pub batch: BatchSizes,
    pub n_users: u64,
    pub n_companies: u64,
    pub n_platforms: u64,
    pub n_countries: u64,
    pub n_currencies: u64,
    pub n_streamers: u64,
    pub n_channels: u64,
    pub n_videos: u64,
    pub n_comments: u64,
    pub n_memberships: u64,
    pub n_subscriptions: u64,
    pub n_appearances: u64,
    pub n_tiers: u64,
    pub n_sponsorships: u64,
    pub n_nationalities: u64,
    pub n_company_countries: u64,
    /// Planning estimate only; actual donations are sampled at run time.
    pub n_donations_est: u64,
}

/// Optional ±10% perturbation applied to spec parameters during derivation.
struct Jitter<'a, R: Rng> {
    rng: Option<&'a mut R>,
}

impl<R: Rng> Jitter<'_, R> {
    /// Jittered integer parameter, floored at 1.
    fn int(&mut self, base: u64) -> u64 {
        let Some(rng) = self.rng.as_deref_mut() else {
            return base;
        };
        if base == 0 {
            return 0;
        }
        let variation = base as f64 * 0.10;
        let min = ((base as f64 - variation) as u64).max(1);
        let max = (base as f64 + variation) as u64;
        if min >= max {
            return min;
        }
        rng.random_range(min..=max)
    }

    fn float(&mut self, base: f64) -> f64 {
        let Some(rng) = self.rng.as_deref_mut() else {
            return base;
        };
        if base == 0.0 {
            return 0.0;
        }
        let variation = base * 0.10;
        rng.random_range((base - variation)..=(base + variation))
    }
}

impl VolumeSpec {
    /// Derive absolute counts without jitter. Same spec, same plan.
    pub fn derive_exact(&self) -> Result<VolumePlan> {
        self.derive(Jitter::<rand::rngs::ThreadRng> { rng: None })
    }

    /// Derive absolute counts with each parameter jittered by up to ±10%
    /// before the ratios multiply out.
    pub fn derive_jittered<R: Rng>(&self, rng: &mut R) -> Result<VolumePlan> {
        self.derive(Jitter { rng: Some(rng) })
    }

    fn derive<R: Rng>(&self, mut jitter: Jitter<'_, R>) -> Result<VolumePlan> {
        if self.n_users == 0 || self.n_companies == 0 || self.n_platforms == 0 {
            bail!(
                "volume spec '{}' has a zero base count (users/companies/platforms must be positive)",
                self.name
            );
        }
        if self.n_countries == 0 {
            bail!("volume spec '{}' requires at least one country", self.name);
        }
        if !(0.0..=1.0).contains(&self.pct_streamers) {
            bail!(
                "volume spec '{}': pct_streamers {} outside [0, 1]",
                self.name,
                self.pct_streamers
            );
        }

        let n_users = jitter.int(self.n_users);
        let n_companies = jitter.int(self.n_companies);
        let n_platforms = jitter.int(self.n_platforms);
        let n_countries = self.n_countries;

        let n_streamers = (n_users as f64 * jitter.float(self.pct_streamers)) as u64;
        let n_channels = n_streamers;
        let n_videos = n_channels * jitter.int(self.videos_per_channel);
        let n_comments = n_videos * jitter.int(self.comments_per_video);

        let n_memberships = (n_users as f64 * jitter.float(self.platforms_per_user)) as u64;
        let n_subscriptions = (n_users as f64 * jitter.float(self.subscriptions_per_user)) as u64;
        let n_appearances = (n_videos as f64 * jitter.float(self.appearances_per_video)) as u64;
        let n_tiers = n_channels * jitter.int(self.tiers_per_channel);
        let n_sponsorships = n_companies * jitter.int(self.sponsorships_per_company);

        Ok(VolumePlan {
            name: self.name,
            batch: self.batch,
            n_users,
            n_companies,
            n_platforms,
            n_countries,
            n_currencies: n_countries,
            n_streamers,
            n_channels,
            n_videos,
            n_comments,
            n_memberships,
            n_subscriptions,
            n_appearances,
            n_tiers,
            n_sponsorships,
            n_nationalities: n_streamers,
            n_company_countries: n_companies,
            n_donations_est: n_comments / 10,
        })
    }
}

impl VolumePlan {
    pub fn total_records(&self) -> u64 {
        self.n_users
            + self.n_companies
            + self.n_platforms
            + self.n_countries
            + self.n_currencies
            + self.n_channels
            + self.n_videos
            + self.n_comments
            + self.n_memberships
            + self.n_subscriptions
            + self.n_appearances
            + self.n_tiers
            + self.n_sponsorships
            + self.n_nationalities
            + self.n_company_countries
            + self.n_donations_est
    }

    /// Rough on-disk footprint at ~200 bytes per record.
    pub fn disk_estimate_gb(&self) -> f64 {
        (self.total_records() * 200) as f64 / (1024u64.pow(3)) as f64
    }

    /// (min, max) wall-clock estimate in minutes at 1k-5k records/s.
    pub fn time_estimate_minutes(&self) -> (f64, f64) {
        let total = self.total_records() as f64;
        (total / 5_000.0 / 60.0, total / 1_000.0 / 60.0)
    }
}

const PRESETS: &[(&str, fn() -> VolumeSpec)] = &[
    ("quick-dev", quick_dev),
    ("functional", functional),
    ("performance", performance),
    ("index-stress", index_stress),
    ("extreme", extreme),
];

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

pub fn preset(name: &str) -> Result<VolumeSpec> {
    for (preset_name, build) in PRESETS {
        if *preset_name == name {
            return Ok(build());
        }
    }
    bail!(
        "unknown preset '{}' (available: {})",
        name,
        preset_names().join(", ")
    );
}

pub fn all_presets() -> Vec<VolumeSpec> {
    PRESETS.iter().map(|(_, build)| build()).collect()
}

fn quick_dev() -> VolumeSpec {
    VolumeSpec {
        name: "quick-dev",
        n_users: 10_000,
        n_companies: 500,
        n_platforms: 10,
        n_countries: 192,
        pct_streamers: 0.15,
        videos_per_channel: 10,
        comments_per_video: 5,
        platforms_per_user: 1.5,
        subscriptions_per_user: 3.0,
        appearances_per_video: 1.2,
        tiers_per_channel: 3,
        sponsorships_per_company: 5,
        batch: BatchSizes {
            tiny: 500,
            small: 1_000,
            medium: 2_000,
            large: 5_000,
            huge: 10_000,
        },
    }
}

fn functional() -> VolumeSpec {
    VolumeSpec {
        name: "functional",
        n_users: 50_000,
        n_companies: 1_000,
        n_platforms: 12,
        n_countries: 192,
        pct_streamers: 0.15,
        videos_per_channel: 20,
        comments_per_video: 8,
        platforms_per_user: 1.8,
        subscriptions_per_user: 4.0,
        appearances_per_video: 1.5,
        tiers_per_channel: 4,
        sponsorships_per_company: 8,
        batch: BatchSizes {
            tiny: 1_000,
            small: 2_500,
            medium: 5_000,
            large: 10_000,
            huge: 20_000,
        },
    }
}

fn performance() -> VolumeSpec {
    VolumeSpec {
        name: "performance",
        n_users: 500_000,
        n_companies: 5_000,
        n_platforms: 15,
        n_countries: 192,
        pct_streamers: 0.15,
        videos_per_channel: 50,
        comments_per_video: 15,
        platforms_per_user: 2.0,
        subscriptions_per_user: 5.0,
        appearances_per_video: 1.8,
        tiers_per_channel: 4,
        sponsorships_per_company: 15,
        batch: BatchSizes::default(),
    }
}

fn index_stress() -> VolumeSpec {
    VolumeSpec {
        name: "index-stress",
        n_users: 800_000,
        n_companies: 8_000,
        n_platforms: 18,
        n_countries: 192,
        pct_streamers: 0.15,
        videos_per_channel: 60,
        comments_per_video: 20,
        platforms_per_user: 2.2,
        subscriptions_per_user: 6.0,
        appearances_per_video: 2.0,
        tiers_per_channel: 5,
        sponsorships_per_company: 20,
        batch: BatchSizes::default(),
    }
}

fn extreme() -> VolumeSpec {
    VolumeSpec {
        name: "extreme",
        n_users: 1_000_000,
        n_companies: 10_000,
        n_platforms: 20,
        n_countries: 192,
        pct_streamers: 0.15,
        videos_per_channel: 75,
        comments_per_video: 25,
        platforms_per_user: 2.5,
        subscriptions_per_user: 7.0,
        appearances_per_video: 2.2,
        tiers_per_channel: 6,
        sponsorships_per_company: 25,
        batch: BatchSizes::default(),
    }
}
