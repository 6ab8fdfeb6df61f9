//! Plain-text run reports: pre-run volume summary, preset listing, and
//! post-run timing and row-count summaries.

use anyhow::Result;

use crate::orchestrator::RunTimings;
use crate::plan::{all_presets, VolumePlan};
use crate::store::Store;

pub fn print_volume_report(plan: &VolumePlan) {
    println!();
    println!("{}", "=".repeat(70));
    println!("VOLUME PLAN: {}", plan.name);
    println!("{}", "=".repeat(70));
    println!("  Users:                {:>14}", group(plan.n_users));
    println!("  Companies:            {:>14}", group(plan.n_companies));
    println!("  Platforms:            {:>14}", group(plan.n_platforms));
    println!("  Countries:            {:>14}", group(plan.n_countries));
    println!("  Currencies:           {:>14}", group(plan.n_currencies));
    println!("  Streamers:            {:>14}", group(plan.n_streamers));
    println!("  Channels:             {:>14}", group(plan.n_channels));
    println!("  Channel tiers:        {:>14}", group(plan.n_tiers));
    println!("  Videos:               {:>14}", group(plan.n_videos));
    println!("  Comments:             {:>14}", group(plan.n_comments));
    println!("  Memberships:          {:>14}", group(plan.n_memberships));
    println!("  Subscriptions:        {:>14}", group(plan.n_subscriptions));
    println!("  Appearances:          {:>14}", group(plan.n_appearances));
    println!("  Sponsorships:         {:>14}", group(plan.n_sponsorships));
    println!("  Nationalities:        {:>14}", group(plan.n_nationalities));
    println!("  Company countries:    {:>14}", group(plan.n_company_countries));
    println!("  Donations (est.):     {:>14}", group(plan.n_donations_est));
    println!("{}", "-".repeat(70));
    println!("  Total records:        {:>14}", group(plan.total_records()));
    println!(
        "  Disk estimate:        {:>11.2} GB (with indexes: ~{:.2} GB)",
        plan.disk_estimate_gb(),
        plan.disk_estimate_gb() * 1.5
    );
    let (lo, hi) = plan.time_estimate_minutes();
    println!("  Time estimate:        {lo:>11.1}-{hi:.1} minutes");
    println!("{}", "=".repeat(70));
    println!();
}

pub fn print_preset_list() {
    println!();
    println!("Available presets:");
    println!();
    for spec in all_presets() {
        match spec.derive_exact() {
            Ok(plan) => {
                let (lo, hi) = plan.time_estimate_minutes();
                println!("  {}", spec.name);
                println!("    users: {:>12}", group(plan.n_users));
                println!("    records: {:>10}", group(plan.total_records()));
                println!("    disk: ~{:.2} GB", plan.disk_estimate_gb());
                println!("    time: {lo:.1}-{hi:.1} min");
                println!();
            }
            Err(e) => println!("  {} (invalid: {e})", spec.name),
        }
    }
}

pub fn print_timing_summary(timings: &RunTimings) {
    println!();
    println!("Timing summary:");
    for (i, secs) in timings.levels.iter().enumerate() {
        println!("  level {}: {:>8.2}s", i + 1, secs);
    }
    println!("  total:   {:>8.2}s", timings.total_secs);
}

pub fn print_table_counts(store: &Store) -> Result<()> {
    println!();
    println!("Rows per table:");
    let mut total = 0u64;
    for (table, count) in store.table_counts()? {
        println!("  {table:<22} {:>14}", group(count));
        total += count;
    }
    println!("  {:<22} {:>14}", "total", group(total));
    Ok(())
}

/// Thousands-separated rendering of a count.
fn group(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_separators() {
        assert_eq!(group(0), "0");
        assert_eq!(group(999), "999");
        assert_eq!(group(1_000), "1,000");
        assert_eq!(group(1_234_567), "1,234,567");
    }
}
