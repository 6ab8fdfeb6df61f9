use rand::Rng;

use super::SequenceMap;
use crate::model::Comment;
use crate::values::FakeValues;

const POSTED_MIN_YEAR: i32 = 2018;
const POSTED_MAX_YEAR: i32 = 2025;

/// Share of comments hidden by moderation.
const HIDDEN_SHARE: f64 = 0.03;

/// Generate a chunk of comments. The per-video sequence number comes from
/// `seqs`, so it stays gapless across chunks and the (video, seq) key is
/// unique by construction.
pub fn comments<R: Rng>(
    values: &mut FakeValues<R>,
    count: usize,
    video_ids: &[i64],
    user_sample: &[i64],
    seqs: &mut SequenceMap,
) -> Vec<Comment> {
    let mut batch = Vec::with_capacity(count);
    if video_ids.is_empty() || user_sample.is_empty() {
        return batch;
    }
    for _ in 0..count {
        let Some(video_id) = values.pick(video_ids).copied() else {
            break;
        };
        let Some(user_id) = values.pick(user_sample).copied() else {
            break;
        };
        batch.push(Comment {
            video_id,
            seq_no: seqs.next(video_id),
            user_id,
            body: values.paragraph(),
            posted_at: values.timestamp_between(POSTED_MIN_YEAR, POSTED_MAX_YEAR),
            visible: !values.bool_with_probability(HIDDEN_SHARE),
        });
    }
    batch
}
