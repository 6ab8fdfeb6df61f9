//! Volume planning behavior across presets and jitter settings.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use streamfill::plan::{preset, preset_names, BatchSizes, VolumeSpec};

fn small_spec() -> VolumeSpec {
    VolumeSpec {
        name: "small",
        n_users: 100,
        n_companies: 10,
        n_platforms: 2,
        n_countries: 5,
        pct_streamers: 0.2,
        videos_per_channel: 2,
        comments_per_video: 3,
        platforms_per_user: 1.5,
        subscriptions_per_user: 2.0,
        appearances_per_video: 1.0,
        tiers_per_channel: 2,
        sponsorships_per_company: 3,
        batch: BatchSizes::default(),
    }
}

#[test]
fn derived_counts_follow_the_ratio_chain() {
    let plan = small_spec().derive_exact().unwrap();
    assert_eq!(plan.n_streamers, 20);
    assert_eq!(plan.n_channels, 20);
    assert_eq!(plan.n_videos, 40);
    assert_eq!(plan.n_comments, 120);
    assert_eq!(plan.n_memberships, 150);
    assert_eq!(plan.n_subscriptions, 200);
    assert_eq!(plan.n_appearances, 40);
    assert_eq!(plan.n_tiers, 40);
    assert_eq!(plan.n_sponsorships, 30);
    assert_eq!(plan.n_currencies, plan.n_countries);
    assert_eq!(plan.n_nationalities, plan.n_streamers);
    assert_eq!(plan.n_company_countries, plan.n_companies);
}

#[test]
fn exact_derivation_never_varies() {
    let spec = preset("performance").unwrap();
    let a = spec.derive_exact().unwrap();
    let b = spec.derive_exact().unwrap();
    assert_eq!(a.n_users, b.n_users);
    assert_eq!(a.n_videos, b.n_videos);
    assert_eq!(a.total_records(), b.total_records());
}

#[test]
fn jittered_counts_stay_near_the_base() {
    let spec = preset("functional").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..50 {
        let plan = spec.derive_jittered(&mut rng).unwrap();
        assert!(plan.n_users >= 45_000 && plan.n_users <= 55_000);
        // countries are fixed, never jittered
        assert_eq!(plan.n_countries, 192);
    }
}

#[test]
fn jittered_derivation_varies_between_calls() {
    let spec = preset("functional").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let counts: Vec<u64> = (0..10)
        .map(|_| spec.derive_jittered(&mut rng).unwrap().n_users)
        .collect();
    assert!(counts.iter().any(|c| *c != counts[0]));
}

#[test]
fn all_five_presets_derive() {
    for name in preset_names() {
        let spec = preset(name).unwrap();
        let plan = spec.derive_exact().unwrap();
        assert!(plan.total_records() > 0, "{name} produced an empty plan");
    }
}

#[test]
fn invalid_specs_are_rejected() {
    assert!(preset("does-not-exist").is_err());

    let mut zero_users = small_spec();
    zero_users.n_users = 0;
    assert!(zero_users.derive_exact().is_err());

    let mut bad_pct = small_spec();
    bad_pct.pct_streamers = 1.5;
    assert!(bad_pct.derive_exact().is_err());
}
