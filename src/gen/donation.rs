use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use super::MAX_ATTEMPTS_PER_ROW;
use crate::model::{
    BitcoinPayment, CardPayment, CommentKey, Donation, PaymentStatus, PaypalPayment,
    PlatformPayment,
};
use crate::values::FakeValues;

const AMOUNT_MIN: f64 = 1.0;
const AMOUNT_MAX: f64 = 9_999.99;

/// One donation per comment key in the chunk. The caller decides which
/// comments get a donation; this just attaches amount and status.
pub fn donations<R: Rng>(values: &mut FakeValues<R>, keys: &[CommentKey]) -> Vec<Donation> {
    keys.iter()
        .map(|key| Donation {
            key: *key,
            amount: values.decimal(AMOUNT_MIN, AMOUNT_MAX),
            status: values
                .pick(&PaymentStatus::ALL)
                .copied()
                .unwrap_or(PaymentStatus::Completed),
        })
        .collect()
}

/// Payment detail rows, one per donation, split across the four methods.
#[derive(Debug, Default)]
pub struct PaymentSplit {
    pub bitcoin: Vec<BitcoinPayment>,
    pub card: Vec<CardPayment>,
    pub paypal: Vec<PaypalPayment>,
    pub platform: Vec<PlatformPayment>,
}

impl PaymentSplit {
    pub fn total(&self) -> usize {
        self.bitcoin.len() + self.card.len() + self.paypal.len() + self.platform.len()
    }
}

/// Partition donation keys into quarters (the remainder lands on the
/// platform method) and attach method-specific detail. Card numbers are
/// unique per provider; a donation that exhausts its card attempts falls
/// through to the platform method so the partition stays total.
pub fn payments<R: Rng>(values: &mut FakeValues<R>, donation_keys: &[CommentKey]) -> PaymentSplit {
    let mut keys = donation_keys.to_vec();
    keys.shuffle(values.rng());

    let n = keys.len();
    let split1 = n / 4;
    let split2 = n / 2;
    let split3 = 3 * n / 4;

    let mut out = PaymentSplit::default();
    let mut cards_taken: AHashSet<(String, &'static str)> = AHashSet::new();
    let mut paypal_ids = super::IdAllocator::new();
    let mut platform_seqs = super::IdAllocator::new();

    for (i, key) in keys.into_iter().enumerate() {
        if i < split1 {
            out.bitcoin.push(BitcoinPayment {
                donation: key,
                tx_id: values.hex_token(64),
            });
        } else if i < split2 {
            let mut card = None;
            for _ in 0..MAX_ATTEMPTS_PER_ROW {
                let number = values.card_number();
                let provider = values.card_provider();
                if cards_taken.insert((number.clone(), provider)) {
                    card = Some((number, provider));
                    break;
                }
            }
            match card {
                Some((card_no, provider)) => out.card.push(CardPayment {
                    donation: key,
                    card_no,
                    provider: provider.to_string(),
                }),
                None => out.platform.push(PlatformPayment {
                    donation: key,
                    seq: platform_seqs.next(),
                }),
            }
        } else if i < split3 {
            out.paypal.push(PaypalPayment {
                donation: key,
                paypal_id: paypal_ids.next(),
            });
        } else {
            out.platform.push(PlatformPayment {
                donation: key,
                seq: platform_seqs.next(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn keys(n: i64) -> Vec<CommentKey> {
        (0..n)
            .map(|i| CommentKey {
                video_id: i / 10 + 1,
                seq_no: i % 10 + 1,
                user_id: i + 100,
            })
            .collect()
    }

    #[test]
    fn test_one_donation_per_key() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(17));
        let keys = keys(40);
        let batch = donations(&mut values, &keys);
        assert_eq!(batch.len(), 40);
        for d in &batch {
            assert!((AMOUNT_MIN..=AMOUNT_MAX).contains(&d.amount));
        }
    }

    #[test]
    fn test_payment_split_partitions_every_donation() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(18));
        let keys = keys(103);
        let split = payments(&mut values, &keys);
        assert_eq!(split.total(), 103);
        assert_eq!(split.bitcoin.len(), 25);
        assert_eq!(split.paypal.len(), 26);
        // card may fall through to platform, never the other way
        assert!(split.card.len() <= 26);
        assert!(split.platform.len() >= 26);

        let mut seen = std::collections::HashSet::new();
        for key in split
            .bitcoin
            .iter()
            .map(|p| p.donation)
            .chain(split.card.iter().map(|p| p.donation))
            .chain(split.paypal.iter().map(|p| p.donation))
            .chain(split.platform.iter().map(|p| p.donation))
        {
            assert!(seen.insert(key));
        }
    }

    #[test]
    fn test_card_numbers_unique_per_provider() {
        let mut values = FakeValues::new(ChaCha8Rng::seed_from_u64(19));
        let split = payments(&mut values, &keys(400));
        let mut cards = std::collections::HashSet::new();
        for c in &split.card {
            assert_eq!(c.card_no.len(), 16);
            assert!(cards.insert((c.card_no.clone(), c.provider.clone())));
        }
    }
}
