use rand::Rng;

use super::{IdAllocator, PairSet, MAX_ATTEMPTS_PER_ROW};
use crate::model::{Video, VideoAppearance};
use crate::values::FakeValues;

const PUBLISHED_MIN_YEAR: i32 = 2018;
const PUBLISHED_MAX_YEAR: i32 = 2025;

const DURATION_MIN_SECS: i64 = 60;
const DURATION_MAX_SECS: i64 = 8 * 60 * 60;

const PEAK_VIEWERS_MAX: i64 = 500_000;
const TOTAL_VIEWS_MAX: i64 = 20_000_000;

/// Generate a chunk of videos. `offset` suffixes titles so they stay unique
/// across the run.
pub fn videos<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    channel_ids: &[i64],
    count: usize,
    offset: u64,
) -> Vec<Video> {
    let mut batch = Vec::with_capacity(count);
    if channel_ids.is_empty() {
        return batch;
    }
    for i in 0..count {
        let Some(channel_id) = values.pick(channel_ids).copied() else {
            break;
        };
        let peak = values.int_range(0, PEAK_VIEWERS_MAX);
        batch.push(Video {
            id: ids.next(),
            channel_id,
            title: format!("{} #{}", values.sentence(), offset + i as u64 + 1),
            published_at: values.timestamp_between(PUBLISHED_MIN_YEAR, PUBLISHED_MAX_YEAR),
            theme: values.video_theme().to_string(),
            duration_secs: values.int_range(DURATION_MIN_SECS, DURATION_MAX_SECS),
            peak_viewers: peak,
            total_views: values.int_range(peak, TOTAL_VIEWS_MAX.max(peak)),
        });
    }
    batch
}

/// Join streamers to videos they appear in. Each (video, streamer) pair
/// appears at most once.
pub fn appearances<R: Rng>(
    values: &mut FakeValues<R>,
    video_ids: &[i64],
    streamer_ids: &[i64],
    count: usize,
    pairs: &mut PairSet,
) -> Vec<VideoAppearance> {
    let mut batch = Vec::with_capacity(count);
    if video_ids.is_empty() || streamer_ids.is_empty() {
        return batch;
    }

    let ceiling = video_ids.len().saturating_mul(streamer_ids.len());
    let target = count.min(ceiling.saturating_sub(pairs.len()));

    let mut attempts = 0;
    let max_attempts = count * MAX_ATTEMPTS_PER_ROW;
    while batch.len() < target && attempts < max_attempts {
        attempts += 1;
        let Some(video_id) = values.pick(video_ids).copied() else {
            break;
        };
        let Some(streamer_id) = values.pick(streamer_ids).copied() else {
            break;
        };
        if !pairs.insert(video_id, streamer_id) {
            continue;
        }
        batch.push(VideoAppearance {
            video_id,
            streamer_id,
        });
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_video_titles_unique_across_chunks() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(14));
        let mut ids = IdAllocator::new();
        let channels = vec![1, 2, 3];

        let a = videos(&mut values, &mut ids, &channels, 50, 0);
        let b = videos(&mut values, &mut ids, &channels, 50, 50);

        let mut titles = std::collections::HashSet::new();
        for v in a.iter().chain(b.iter()) {
            assert!(titles.insert(v.title.clone()));
            assert!(v.total_views >= v.peak_viewers);
            assert!((DURATION_MIN_SECS..=DURATION_MAX_SECS).contains(&v.duration_secs));
        }
    }

    #[test]
    fn test_appearance_pairs_unique() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(15));
        let mut pairs = PairSet::new();
        let batch = appearances(&mut values, &[1, 2, 3, 4], &[10, 20], 20, &mut pairs);
        let mut seen = std::collections::HashSet::new();
        for a in &batch {
            assert!(seen.insert((a.video_id, a.streamer_id)));
        }
    }
}
