use rand::Rng;

use super::{FanOutCursor, IdAllocator};
use crate::model::{Channel, ChannelKind, ChannelTier, StreamerRef};
use crate::values::FakeValues;

const CREATED_MIN_YEAR: i32 = 2015;
const CREATED_MAX_YEAR: i32 = 2025;

const VIEW_COUNT_MAX: i64 = 50_000_000;

const TIER_PRICE_MIN: f64 = 0.99;
const TIER_PRICE_MAX: f64 = 49.99;

/// One channel per streamer in the chunk. The channel name derives from the
/// streamer nick, which is unique, so names need no lookup set.
pub fn channels<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    streamers: &[StreamerRef],
    platform_ids: &[i64],
) -> Vec<Channel> {
    let mut batch = Vec::with_capacity(streamers.len());
    if platform_ids.is_empty() {
        return batch;
    }
    for streamer in streamers {
        let Some(platform_id) = values.pick(platform_ids).copied() else {
            break;
        };
        let kind = values
            .pick(&ChannelKind::ALL)
            .copied()
            .unwrap_or(ChannelKind::Public);
        batch.push(Channel {
            id: ids.next(),
            platform_id,
            streamer_id: streamer.id,
            name: format!("{}_channel", streamer.nick),
            kind,
            created: values.date_between(CREATED_MIN_YEAR, CREATED_MAX_YEAR),
            description: values.sentence(),
            view_count: values.int_range(0, VIEW_COUNT_MAX),
        });
    }
    batch
}

/// Emit up to `request` subscription tiers, `per_channel` for each channel,
/// resuming from `cursor`. Labels are "Tier 1".."Tier N" within a channel,
/// so the (channel, label) pair is unique by construction.
pub fn tiers<R: Rng>(
    values: &mut FakeValues<R>,
    ids: &mut IdAllocator,
    channel_ids: &[i64],
    per_channel: u64,
    cursor: &mut FanOutCursor,
    request: usize,
) -> Vec<ChannelTier> {
    let mut batch = Vec::with_capacity(request);
    while batch.len() < request && cursor.parent_idx < channel_ids.len() {
        let channel_id = channel_ids[cursor.parent_idx];
        let tier_no = cursor.child_idx + 1;
        batch.push(ChannelTier {
            id: ids.next(),
            channel_id,
            label: format!("Tier {tier_no}"),
            price: values.decimal(TIER_PRICE_MIN, TIER_PRICE_MAX),
            artwork_url: values.artwork_url(),
        });
        cursor.child_idx += 1;
        if cursor.child_idx >= per_channel {
            cursor.child_idx = 0;
            cursor.parent_idx += 1;
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn values() -> FakeValues<ChaCha8Rng> {
        FakeValues::new(ChaCha8Rng::seed_from_u64(10))
    }

    #[test]
    fn test_channel_names_follow_nick() {
        let mut v = values();
        let mut ids = IdAllocator::new();
        let streamers = vec![
            StreamerRef {
                id: 4,
                nick: "ana7".to_string(),
            },
            StreamerRef {
                id: 9,
                nick: "bob12".to_string(),
            },
        ];
        let batch = channels(&mut v, &mut ids, &streamers, &[1, 2]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].name, "ana7_channel");
        assert_eq!(batch[1].streamer_id, 9);
    }

    #[test]
    fn test_tiers_resume_across_chunks() {
        let mut v = values();
        let mut ids = IdAllocator::new();
        let channel_ids = vec![100, 200, 300];
        let mut cursor = FanOutCursor::default();

        let a = tiers(&mut v, &mut ids, &channel_ids, 3, &mut cursor, 4);
        let b = tiers(&mut v, &mut ids, &channel_ids, 3, &mut cursor, 10);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 5);

        let mut labels = std::collections::HashSet::new();
        for t in a.iter().chain(b.iter()) {
            assert!(labels.insert((t.channel_id, t.label.clone())));
            assert!((TIER_PRICE_MIN..=TIER_PRICE_MAX).contains(&t.price));
        }
        // every channel got exactly per_channel tiers
        for id in &channel_ids {
            let n = a.iter().chain(b.iter()).filter(|t| t.channel_id == *id).count();
            assert_eq!(n, 3);
        }
    }
}
