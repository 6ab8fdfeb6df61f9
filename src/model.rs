//! Entity record types and their row representation.
//!
//! Every generated entity knows its table name, column list, and how to
//! render itself as a row of [`SqlValue`]s. Batches of heterogeneous entity
//! types travel to the store as [`TableRows`] groups.

use chrono::{NaiveDate, NaiveDateTime};

/// SQL value representation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

impl SqlValue {
    /// Format as a DuckDB SQL literal
    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(n) => format!("{:.2}", n),
            SqlValue::String(s) => format!("'{}'", escape_sql_string(s)),
            SqlValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        }
    }
}

pub fn escape_sql_string(s: &str) -> String {
    s.replace('\'', "''")
}

fn date(d: NaiveDate) -> SqlValue {
    SqlValue::String(d.format("%Y-%m-%d").to_string())
}

fn timestamp(t: NaiveDateTime) -> SqlValue {
    SqlValue::String(t.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// A row of generated data
pub type Row = Vec<SqlValue>;

/// A record type that maps onto one table.
pub trait Record {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn to_row(&self) -> Row;
}

/// Generated rows for a single table; the unit the store's bulk insert
/// accepts, so one insert call can carry several entity types.
#[derive(Debug, Clone)]
pub struct TableRows {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

impl TableRows {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        Self {
            table: R::TABLE,
            columns: R::COLUMNS,
            rows: records.iter().map(Record::to_row).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// All tables in foreign-key dependency order (parents first). Truncation
/// walks this list in reverse.
pub const TABLES: &[&str] = &[
    "company",
    "currency_conversion",
    "country",
    "platform",
    "users",
    "platform_membership",
    "streamer_nationality",
    "company_country",
    "channel",
    "sponsorship",
    "channel_tier",
    "subscription",
    "video",
    "video_appearance",
    "comment",
    "donation",
    "bitcoin_payment",
    "card_payment",
    "paypal_payment",
    "platform_payment",
];

// ================= enums =================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Private,
    Public,
    Mixed,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [ChannelKind::Private, ChannelKind::Public, ChannelKind::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Private => "private",
            ChannelKind::Public => "public",
            ChannelKind::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

// ================= entities =================

#[derive(Debug, Clone)]
pub struct Company {
    pub id: i64,
    pub legal_name: String,
    pub trade_name: String,
}

impl Record for Company {
    const TABLE: &'static str = "company";
    const COLUMNS: &'static [&'static str] = &["id", "legal_name", "trade_name"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::String(self.legal_name.clone()),
            SqlValue::String(self.trade_name.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CurrencyConversion {
    pub id: i64,
    pub code: String,
    pub factor: f64,
}

impl Record for CurrencyConversion {
    const TABLE: &'static str = "currency_conversion";
    const COLUMNS: &'static [&'static str] = &["id", "code", "factor"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::String(self.code.clone()),
            SqlValue::Float(self.factor),
        ]
    }
}

/// Country keyed by its international dialing code.
#[derive(Debug, Clone)]
pub struct Country {
    pub dial_code: i64,
    pub name: String,
    pub currency_id: i64,
}

impl Record for Country {
    const TABLE: &'static str = "country";
    const COLUMNS: &'static [&'static str] = &["dial_code", "name", "currency_id"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.dial_code),
            SqlValue::String(self.name.clone()),
            SqlValue::Int(self.currency_id),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub founded: NaiveDate,
    pub founder_id: i64,
    pub operator_id: i64,
}

impl Record for Platform {
    const TABLE: &'static str = "platform";
    const COLUMNS: &'static [&'static str] = &["id", "name", "founded", "founder_id", "operator_id"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::String(self.name.clone()),
            date(self.founded),
            SqlValue::Int(self.founder_id),
            SqlValue::Int(self.operator_id),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub nick: String,
    pub email: String,
    pub born: NaiveDate,
    pub phone: String,
    pub country_code: Option<i64>,
    pub postal_code: String,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "nick",
        "email",
        "born",
        "phone",
        "country_code",
        "postal_code",
        "deleted_at",
    ];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::String(self.nick.clone()),
            SqlValue::String(self.email.clone()),
            date(self.born),
            SqlValue::String(self.phone.clone()),
            self.country_code.map_or(SqlValue::Null, SqlValue::Int),
            SqlValue::String(self.postal_code.clone()),
            self.deleted_at.map_or(SqlValue::Null, timestamp),
        ]
    }
}

/// A user joined to a platform; `member_no` is the platform-local member
/// number, unique within its platform.
#[derive(Debug, Clone)]
pub struct PlatformMembership {
    pub platform_id: i64,
    pub user_id: i64,
    pub member_no: i64,
}

impl Record for PlatformMembership {
    const TABLE: &'static str = "platform_membership";
    const COLUMNS: &'static [&'static str] = &["platform_id", "user_id", "member_no"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.platform_id),
            SqlValue::Int(self.user_id),
            SqlValue::Int(self.member_no),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct StreamerNationality {
    pub user_id: i64,
    pub dial_code: i64,
    pub passport_no: String,
}

impl Record for StreamerNationality {
    const TABLE: &'static str = "streamer_nationality";
    const COLUMNS: &'static [&'static str] = &["user_id", "dial_code", "passport_no"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.user_id),
            SqlValue::Int(self.dial_code),
            SqlValue::String(self.passport_no.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CompanyCountry {
    pub company_id: i64,
    pub dial_code: i64,
    pub national_id: String,
}

impl Record for CompanyCountry {
    const TABLE: &'static str = "company_country";
    const COLUMNS: &'static [&'static str] = &["company_id", "dial_code", "national_id"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.company_id),
            SqlValue::Int(self.dial_code),
            SqlValue::String(self.national_id.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Channel {
    pub id: i64,
    pub platform_id: i64,
    pub streamer_id: i64,
    pub name: String,
    pub kind: ChannelKind,
    pub created: NaiveDate,
    pub description: String,
    pub view_count: i64,
}

impl Record for Channel {
    const TABLE: &'static str = "channel";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "platform_id",
        "streamer_id",
        "name",
        "kind",
        "created",
        "description",
        "view_count",
    ];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::Int(self.platform_id),
            SqlValue::Int(self.streamer_id),
            SqlValue::String(self.name.clone()),
            SqlValue::String(self.kind.as_str().to_string()),
            date(self.created),
            SqlValue::String(self.description.clone()),
            SqlValue::Int(self.view_count),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Sponsorship {
    pub company_id: i64,
    pub channel_id: i64,
    pub amount: f64,
}

impl Record for Sponsorship {
    const TABLE: &'static str = "sponsorship";
    const COLUMNS: &'static [&'static str] = &["company_id", "channel_id", "amount"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.company_id),
            SqlValue::Int(self.channel_id),
            SqlValue::Float(self.amount),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ChannelTier {
    pub id: i64,
    pub channel_id: i64,
    pub label: String,
    pub price: f64,
    pub artwork_url: String,
}

impl Record for ChannelTier {
    const TABLE: &'static str = "channel_tier";
    const COLUMNS: &'static [&'static str] = &["id", "channel_id", "label", "price", "artwork_url"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::Int(self.channel_id),
            SqlValue::String(self.label.clone()),
            SqlValue::Float(self.price),
            SqlValue::String(self.artwork_url.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub tier_id: i64,
    pub user_id: i64,
}

impl Record for Subscription {
    const TABLE: &'static str = "subscription";
    const COLUMNS: &'static [&'static str] = &["tier_id", "user_id"];

    fn to_row(&self) -> Row {
        vec![SqlValue::Int(self.tier_id), SqlValue::Int(self.user_id)]
    }
}

#[derive(Debug, Clone)]
pub struct Video {
    pub id: i64,
    pub channel_id: i64,
    pub title: String,
    pub published_at: NaiveDateTime,
    pub theme: String,
    pub duration_secs: i64,
    pub peak_viewers: i64,
    pub total_views: i64,
}

impl Record for Video {
    const TABLE: &'static str = "video";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "channel_id",
        "title",
        "published_at",
        "theme",
        "duration_secs",
        "peak_viewers",
        "total_views",
    ];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.id),
            SqlValue::Int(self.channel_id),
            SqlValue::String(self.title.clone()),
            timestamp(self.published_at),
            SqlValue::String(self.theme.clone()),
            SqlValue::Int(self.duration_secs),
            SqlValue::Int(self.peak_viewers),
            SqlValue::Int(self.total_views),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct VideoAppearance {
    pub video_id: i64,
    pub streamer_id: i64,
}

impl Record for VideoAppearance {
    const TABLE: &'static str = "video_appearance";
    const COLUMNS: &'static [&'static str] = &["video_id", "streamer_id"];

    fn to_row(&self) -> Row {
        vec![SqlValue::Int(self.video_id), SqlValue::Int(self.streamer_id)]
    }
}

/// Composite key shared by comments, donations, and payment details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentKey {
    pub video_id: i64,
    pub seq_no: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub video_id: i64,
    pub seq_no: i64,
    pub user_id: i64,
    pub body: String,
    pub posted_at: NaiveDateTime,
    pub visible: bool,
}

impl Comment {
    pub fn key(&self) -> CommentKey {
        CommentKey {
            video_id: self.video_id,
            seq_no: self.seq_no,
            user_id: self.user_id,
        }
    }
}

impl Record for Comment {
    const TABLE: &'static str = "comment";
    const COLUMNS: &'static [&'static str] =
        &["video_id", "seq_no", "user_id", "body", "posted_at", "visible"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.video_id),
            SqlValue::Int(self.seq_no),
            SqlValue::Int(self.user_id),
            SqlValue::String(self.body.clone()),
            timestamp(self.posted_at),
            SqlValue::Bool(self.visible),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Donation {
    pub key: CommentKey,
    pub amount: f64,
    pub status: PaymentStatus,
}

impl Record for Donation {
    const TABLE: &'static str = "donation";
    const COLUMNS: &'static [&'static str] = &["video_id", "seq_no", "user_id", "amount", "status"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.key.video_id),
            SqlValue::Int(self.key.seq_no),
            SqlValue::Int(self.key.user_id),
            SqlValue::Float(self.amount),
            SqlValue::String(self.status.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct BitcoinPayment {
    pub donation: CommentKey,
    pub tx_id: String,
}

impl Record for BitcoinPayment {
    const TABLE: &'static str = "bitcoin_payment";
    const COLUMNS: &'static [&'static str] = &["video_id", "seq_no", "user_id", "tx_id"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.donation.video_id),
            SqlValue::Int(self.donation.seq_no),
            SqlValue::Int(self.donation.user_id),
            SqlValue::String(self.tx_id.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CardPayment {
    pub donation: CommentKey,
    pub card_no: String,
    pub provider: String,
}

impl Record for CardPayment {
    const TABLE: &'static str = "card_payment";
    const COLUMNS: &'static [&'static str] = &["video_id", "seq_no", "user_id", "card_no", "provider"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.donation.video_id),
            SqlValue::Int(self.donation.seq_no),
            SqlValue::Int(self.donation.user_id),
            SqlValue::String(self.card_no.clone()),
            SqlValue::String(self.provider.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PaypalPayment {
    pub donation: CommentKey,
    pub paypal_id: i64,
}

impl Record for PaypalPayment {
    const TABLE: &'static str = "paypal_payment";
    const COLUMNS: &'static [&'static str] = &["video_id", "seq_no", "user_id", "paypal_id"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.donation.video_id),
            SqlValue::Int(self.donation.seq_no),
            SqlValue::Int(self.donation.user_id),
            SqlValue::Int(self.paypal_id),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PlatformPayment {
    pub donation: CommentKey,
    pub seq: i64,
}

impl Record for PlatformPayment {
    const TABLE: &'static str = "platform_payment";
    const COLUMNS: &'static [&'static str] = &["video_id", "seq_no", "user_id", "seq"];

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.donation.video_id),
            SqlValue::Int(self.donation.seq_no),
            SqlValue::Int(self.donation.user_id),
            SqlValue::Int(self.seq),
        ]
    }
}

/// Key projection of a streamer user, read back from the store when the full
/// user set has been dropped from memory. The channel generator needs the
/// nick to derive a per-platform-unique channel name.
#[derive(Debug, Clone)]
pub struct StreamerRef {
    pub id: i64,
    pub nick: String,
}
