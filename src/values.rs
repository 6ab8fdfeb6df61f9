//! Scalar fake-value generation.
//!
//! [`FakeValues`] wraps an RNG and produces every scalar the entity
//! generators need. All randomness in a run flows through here (plus the
//! orchestrator's sampling RNG), so a fixed seed reproduces the dataset.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use fake::faker::address::en::{CountryName, ZipCode};
use fake::faker::company::en::{CompanyName, CompanySuffix};
use fake::faker::currency::en::CurrencyCode;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;

/// International dialing codes used as country primary keys. Drawn on
/// without replacement, so the pool bounds how many countries a run can
/// deliver.
pub const DIAL_CODES: &[i64] = &[
    1, 7, 20, 27, 30, 31, 32, 33, 34, 36, 39, 40, 41, 43, 44, 45, 46, 47, 48, 49, 51, 52, 53, 54,
    55, 56, 57, 58, 60, 61, 62, 63, 64, 65, 66, 81, 82, 84, 86, 90, 91, 92, 93, 94, 95, 98, 211,
    212, 213, 216, 218, 220, 221, 222, 223, 224, 225, 226, 227, 228, 229, 230, 231, 232, 233, 234,
    235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 248, 249, 250, 251, 252, 253, 254,
    255, 256, 257, 258, 260, 261, 262, 263, 264, 265, 266, 267, 268, 269, 290, 291, 297, 298, 299,
    350, 351, 352, 353, 354, 355, 356, 357, 358, 359, 370, 371, 372, 373, 374, 375, 376, 377, 378,
    380, 381, 382, 383, 385, 386, 387, 389, 420, 421, 423, 500, 501, 502, 503, 504, 505, 506, 507,
    508, 509, 590, 591, 592, 593, 594, 595, 596, 597, 598, 599, 670, 672, 673, 674, 675, 676, 677,
    678, 679, 680, 681, 682, 683, 685, 686, 687, 688, 689, 690, 691, 692, 850, 852, 853, 855, 856,
    880, 886, 960, 961, 962, 963, 964, 965, 966, 967, 968, 970, 971, 972, 973, 974, 975, 976, 977,
    992, 993, 994, 995, 996, 998,
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "proton.me",
    "icloud.com",
    "fastmail.com",
];

const CARD_PROVIDERS: &[&str] = &["Visa", "Mastercard", "Amex", "Discover", "UnionPay"];

const VIDEO_THEMES: &[&str] = &[
    "gaming",
    "music",
    "talk",
    "cooking",
    "sports",
    "coding",
    "art",
    "travel",
    "education",
    "news",
];

const HEX_CHARS: &[u8] = b"0123456789abcdef";

/// Fake scalar generator over an explicit RNG.
pub struct FakeValues<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeValues<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    // ---- names and words ----

    pub fn person_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    pub fn company_name(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    pub fn trade_name(&mut self) -> String {
        let base: String = Word().fake_with_rng(&mut self.rng);
        let suffix: String = CompanySuffix().fake_with_rng(&mut self.rng);
        format!("{base} {suffix}")
    }

    pub fn username(&mut self) -> String {
        Username().fake_with_rng(&mut self.rng)
    }

    pub fn sentence(&mut self) -> String {
        Sentence(4..10).fake_with_rng(&mut self.rng)
    }

    pub fn paragraph(&mut self) -> String {
        Paragraph(1..3).fake_with_rng(&mut self.rng)
    }

    pub fn word(&mut self) -> String {
        Word().fake_with_rng(&mut self.rng)
    }

    pub fn currency_code(&mut self) -> String {
        CurrencyCode().fake_with_rng(&mut self.rng)
    }

    pub fn phone(&mut self) -> String {
        PhoneNumber().fake_with_rng(&mut self.rng)
    }

    pub fn postal_code(&mut self) -> String {
        ZipCode().fake_with_rng(&mut self.rng)
    }

    pub fn country_name(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }

    pub fn email_domain(&mut self) -> &'static str {
        EMAIL_DOMAINS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(EMAIL_DOMAINS[0])
    }

    pub fn video_theme(&mut self) -> &'static str {
        VIDEO_THEMES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(VIDEO_THEMES[0])
    }

    pub fn card_provider(&mut self) -> &'static str {
        CARD_PROVIDERS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CARD_PROVIDERS[0])
    }

    // ---- numbers ----

    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    /// Two-decimal amount in `[min, max]`.
    pub fn decimal(&mut self, min: f64, max: f64) -> f64 {
        let raw = min + self.rng.random::<f64>() * (max - min);
        (raw * 100.0).round() / 100.0
    }

    pub fn bool_with_probability(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    // ---- dates and times ----

    /// Date with year in `[min_year, max_year]`. Day capped at 28 so every
    /// month is valid.
    pub fn date_between(&mut self, min_year: i32, max_year: i32) -> NaiveDate {
        let year = self.rng.random_range(min_year..=max_year);
        let month = self.rng.random_range(1..=12);
        let day = self.rng.random_range(1..=28);
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default())
    }

    pub fn birth_date(&mut self, min_age: i32, max_age: i32) -> NaiveDate {
        let now = Utc::now().date_naive().year();
        self.date_between(now - max_age, now - min_age)
    }

    pub fn timestamp_between(&mut self, min_year: i32, max_year: i32) -> NaiveDateTime {
        let d = self.date_between(min_year, max_year);
        let h = self.rng.random_range(0..24);
        let m = self.rng.random_range(0..60);
        let s = self.rng.random_range(0..60);
        d.and_hms_opt(h, m, s)
            .unwrap_or_else(|| d.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    // ---- identifiers ----

    /// Lowercase hex token, e.g. a 64-char transaction id.
    pub fn hex_token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| HEX_CHARS[self.rng.random_range(0..HEX_CHARS.len())] as char)
            .collect()
    }

    pub fn card_number(&mut self) -> String {
        (0..16)
            .map(|_| char::from(b'0' + self.rng.random_range(0..10u8)))
            .collect()
    }

    /// Two uppercase letters followed by seven digits.
    pub fn passport_no(&mut self) -> String {
        let mut s = String::with_capacity(9);
        for _ in 0..2 {
            s.push(char::from(b'A' + self.rng.random_range(0..26u8)));
        }
        for _ in 0..7 {
            s.push(char::from(b'0' + self.rng.random_range(0..10u8)));
        }
        s
    }

    pub fn national_id(&mut self) -> String {
        let mut s = String::with_capacity(10);
        for _ in 0..9 {
            s.push(char::from(b'0' + self.rng.random_range(0..10u8)));
        }
        s.push(char::from(b'A' + self.rng.random_range(0..26u8)));
        s
    }

    pub fn artwork_url(&mut self) -> String {
        format!("https://cdn.streamfill.dev/tiers/{}.png", self.hex_token(12))
    }
}
