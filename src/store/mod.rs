//! Embedded DuckDB store.
//!
//! Owns the connection, the schema, transaction control, the bulk insert
//! path, and the key read-backs the orchestrator needs between levels.

mod insert;

pub use insert::{generate_batch_insert, MAX_ROWS_PER_STATEMENT};

use anyhow::{Context, Result};
use duckdb::Connection;
use std::path::Path;

use crate::model::{CommentKey, StreamerRef, TableRows, TABLES};

/// Rows fetched per IN-list when reading keys back for a large id set.
const FETCH_BATCH: usize = 10_000;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a database file, or an in-memory database when `path` is None.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)
                .with_context(|| format!("Failed to open database at {}", p.display()))?,
            None => Connection::open_in_memory().context("Failed to open in-memory database")?,
        };
        Ok(Self { conn })
    }

    pub fn create_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .context("Failed to create schema")
    }

    // ---- transactions ----

    pub fn begin(&self) -> Result<()> {
        self.conn
            .execute("BEGIN TRANSACTION", [])
            .context("Failed to begin transaction")?;
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        self.conn
            .execute("COMMIT", [])
            .context("Failed to commit transaction")?;
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        self.conn
            .execute("ROLLBACK", [])
            .context("Failed to roll back transaction")?;
        Ok(())
    }

    // ---- writes ----

    /// Insert every group in the chunk via multi-row INSERT statements.
    /// Returns the total rows written. Statements run inside whatever
    /// transaction is open; this never commits.
    pub fn insert(&self, groups: &[TableRows]) -> Result<u64> {
        let mut written = 0u64;
        for group in groups {
            if group.rows.is_empty() {
                continue;
            }
            for sql in insert::statements_for(group) {
                let n = self
                    .conn
                    .execute(&sql, [])
                    .with_context(|| format!("Failed to insert into {}", group.table))?;
                written += n as u64;
            }
        }
        Ok(written)
    }

    /// Remove all rows, children before parents so foreign keys never block.
    pub fn truncate_all(&self) -> Result<()> {
        for table in TABLES.iter().rev() {
            self.conn
                .execute(&format!("DELETE FROM \"{}\"", table), [])
                .with_context(|| format!("Failed to clear table {}", table))?;
        }
        Ok(())
    }

    // ---- reads ----

    pub fn count(&self, table: &str) -> Result<u64> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .with_context(|| format!("Failed to prepare count for {}", table))?;
        let n: i64 = stmt
            .query_row([], |row| row.get(0))
            .with_context(|| format!("Failed to count rows in {}", table))?;
        Ok(n as u64)
    }

    pub fn table_counts(&self) -> Result<Vec<(&'static str, u64)>> {
        TABLES
            .iter()
            .map(|table| Ok((*table, self.count(table)?)))
            .collect()
    }

    /// Read back an integer key column in insertion order.
    pub fn query_ids(&self, table: &str, column: &str) -> Result<Vec<i64>> {
        let sql = format!("SELECT \"{}\" FROM \"{}\" ORDER BY \"{}\"", column, table, column);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to prepare id query for {}", table))?;
        let mut rows = stmt
            .query([])
            .with_context(|| format!("Failed to query ids from {}", table))?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get::<_, i64>(0)?);
        }
        Ok(ids)
    }

    /// Fetch (id, nick) for the given user ids, in IN-list chunks so the
    /// statement stays bounded for large streamer sets.
    pub fn query_streamers(&self, user_ids: &[i64]) -> Result<Vec<StreamerRef>> {
        let mut out = Vec::with_capacity(user_ids.len());
        for chunk in user_ids.chunks(FETCH_BATCH) {
            let id_list = chunk
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "SELECT id, nick FROM users WHERE id IN ({}) ORDER BY id",
                id_list
            );
            let mut stmt = self
                .conn
                .prepare(&sql)
                .context("Failed to prepare streamer query")?;
            let mut rows = stmt.query([]).context("Failed to query streamers")?;
            while let Some(row) = rows.next()? {
                out.push(StreamerRef {
                    id: row.get(0)?,
                    nick: row.get(1)?,
                });
            }
        }
        Ok(out)
    }

    /// Read back every comment key.
    pub fn query_comment_keys(&self) -> Result<Vec<CommentKey>> {
        self.query_keys("comment")
    }

    /// Read back every donation key.
    pub fn query_donation_keys(&self) -> Result<Vec<CommentKey>> {
        self.query_keys("donation")
    }

    fn query_keys(&self, table: &str) -> Result<Vec<CommentKey>> {
        let sql = format!(
            "SELECT video_id, seq_no, user_id FROM \"{}\" ORDER BY video_id, seq_no",
            table
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to prepare key query for {}", table))?;
        let mut rows = stmt
            .query([])
            .with_context(|| format!("Failed to query keys from {}", table))?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(CommentKey {
                video_id: row.get(0)?,
                seq_no: row.get(1)?,
                user_id: row.get(2)?,
            });
        }
        Ok(keys)
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS company (
    id BIGINT PRIMARY KEY,
    legal_name VARCHAR NOT NULL UNIQUE,
    trade_name VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS currency_conversion (
    id BIGINT PRIMARY KEY,
    code VARCHAR NOT NULL,
    factor DOUBLE NOT NULL
);

CREATE TABLE IF NOT EXISTS country (
    dial_code BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    currency_id BIGINT NOT NULL REFERENCES currency_conversion(id)
);

CREATE TABLE IF NOT EXISTS platform (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    founded DATE NOT NULL,
    founder_id BIGINT NOT NULL REFERENCES company(id),
    operator_id BIGINT NOT NULL REFERENCES company(id)
);

CREATE TABLE IF NOT EXISTS users (
    id BIGINT PRIMARY KEY,
    nick VARCHAR NOT NULL UNIQUE,
    email VARCHAR NOT NULL UNIQUE,
    born DATE NOT NULL,
    phone VARCHAR NOT NULL,
    country_code BIGINT REFERENCES country(dial_code),
    postal_code VARCHAR NOT NULL,
    deleted_at TIMESTAMP
);

CREATE TABLE IF NOT EXISTS platform_membership (
    platform_id BIGINT NOT NULL REFERENCES platform(id),
    user_id BIGINT NOT NULL REFERENCES users(id),
    member_no BIGINT NOT NULL,
    PRIMARY KEY (platform_id, user_id),
    UNIQUE (platform_id, member_no)
);

CREATE TABLE IF NOT EXISTS streamer_nationality (
    user_id BIGINT NOT NULL REFERENCES users(id),
    dial_code BIGINT NOT NULL REFERENCES country(dial_code),
    passport_no VARCHAR NOT NULL UNIQUE,
    PRIMARY KEY (user_id, dial_code)
);

CREATE TABLE IF NOT EXISTS company_country (
    company_id BIGINT NOT NULL REFERENCES company(id),
    dial_code BIGINT NOT NULL REFERENCES country(dial_code),
    national_id VARCHAR NOT NULL,
    PRIMARY KEY (company_id, dial_code),
    UNIQUE (dial_code, national_id)
);

CREATE TABLE IF NOT EXISTS channel (
    id BIGINT PRIMARY KEY,
    platform_id BIGINT NOT NULL REFERENCES platform(id),
    streamer_id BIGINT NOT NULL REFERENCES users(id),
    name VARCHAR NOT NULL,
    kind VARCHAR NOT NULL,
    created DATE NOT NULL,
    description VARCHAR NOT NULL,
    view_count BIGINT NOT NULL
);

CREATE TABLE IF NOT EXISTS sponsorship (
    company_id BIGINT NOT NULL REFERENCES company(id),
    channel_id BIGINT NOT NULL REFERENCES channel(id),
    amount DOUBLE NOT NULL,
    PRIMARY KEY (company_id, channel_id)
);

CREATE TABLE IF NOT EXISTS channel_tier (
    id BIGINT PRIMARY KEY,
    channel_id BIGINT NOT NULL REFERENCES channel(id),
    label VARCHAR NOT NULL,
    price DOUBLE NOT NULL,
    artwork_url VARCHAR NOT NULL,
    UNIQUE (channel_id, label)
);

CREATE TABLE IF NOT EXISTS subscription (
    tier_id BIGINT NOT NULL REFERENCES channel_tier(id),
    user_id BIGINT NOT NULL REFERENCES users(id),
    PRIMARY KEY (tier_id, user_id)
);

CREATE TABLE IF NOT EXISTS video (
    id BIGINT PRIMARY KEY,
    channel_id BIGINT NOT NULL REFERENCES channel(id),
    title VARCHAR NOT NULL,
    published_at TIMESTAMP NOT NULL,
    theme VARCHAR NOT NULL,
    duration_secs BIGINT NOT NULL,
    peak_viewers BIGINT NOT NULL,
    total_views BIGINT NOT NULL
);

CREATE TABLE IF NOT EXISTS video_appearance (
    video_id BIGINT NOT NULL REFERENCES video(id),
    streamer_id BIGINT NOT NULL REFERENCES users(id),
    PRIMARY KEY (video_id, streamer_id)
);

CREATE TABLE IF NOT EXISTS comment (
    video_id BIGINT NOT NULL REFERENCES video(id),
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL REFERENCES users(id),
    body VARCHAR NOT NULL,
    posted_at TIMESTAMP NOT NULL,
    visible BOOLEAN NOT NULL,
    PRIMARY KEY (video_id, seq_no, user_id),
    UNIQUE (video_id, seq_no)
);

CREATE TABLE IF NOT EXISTS donation (
    video_id BIGINT NOT NULL,
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    amount DOUBLE NOT NULL,
    status VARCHAR NOT NULL,
    PRIMARY KEY (video_id, seq_no, user_id),
    FOREIGN KEY (video_id, seq_no, user_id) REFERENCES comment(video_id, seq_no, user_id)
);

CREATE TABLE IF NOT EXISTS bitcoin_payment (
    video_id BIGINT NOT NULL,
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    tx_id VARCHAR NOT NULL UNIQUE,
    PRIMARY KEY (video_id, seq_no, user_id),
    FOREIGN KEY (video_id, seq_no, user_id) REFERENCES donation(video_id, seq_no, user_id)
);

CREATE TABLE IF NOT EXISTS card_payment (
    video_id BIGINT NOT NULL,
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    card_no VARCHAR NOT NULL,
    provider VARCHAR NOT NULL,
    PRIMARY KEY (video_id, seq_no, user_id),
    UNIQUE (card_no, provider),
    FOREIGN KEY (video_id, seq_no, user_id) REFERENCES donation(video_id, seq_no, user_id)
);

CREATE TABLE IF NOT EXISTS paypal_payment (
    video_id BIGINT NOT NULL,
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    paypal_id BIGINT NOT NULL UNIQUE,
    PRIMARY KEY (video_id, seq_no, user_id),
    FOREIGN KEY (video_id, seq_no, user_id) REFERENCES donation(video_id, seq_no, user_id)
);

CREATE TABLE IF NOT EXISTS platform_payment (
    video_id BIGINT NOT NULL,
    seq_no BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    seq BIGINT NOT NULL UNIQUE,
    PRIMARY KEY (video_id, seq_no, user_id),
    FOREIGN KEY (video_id, seq_no, user_id) REFERENCES donation(video_id, seq_no, user_id)
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Company, Record};

    fn store() -> Store {
        let store = Store::open(None).unwrap();
        store.create_schema().unwrap();
        store
    }

    fn companies(n: i64) -> TableRows {
        let records: Vec<Company> = (1..=n)
            .map(|id| Company {
                id,
                legal_name: format!("Company {id}"),
                trade_name: "Co".to_string(),
            })
            .collect();
        TableRows::from_records(&records)
    }

    #[test]
    fn test_schema_insert_count_roundtrip() {
        let store = store();
        let written = store.insert(&[companies(5)]).unwrap();
        assert_eq!(written, 5);
        assert_eq!(store.count(Company::TABLE).unwrap(), 5);
        assert_eq!(store.query_ids("company", "id").unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let store = store();
        let empty = TableRows {
            table: "company",
            columns: Company::COLUMNS,
            rows: vec![],
        };
        assert_eq!(store.insert(&[empty]).unwrap(), 0);
    }

    #[test]
    fn test_rollback_discards_uncommitted_rows() {
        let store = store();
        store.begin().unwrap();
        store.insert(&[companies(3)]).unwrap();
        store.rollback().unwrap();
        assert_eq!(store.count("company").unwrap(), 0);
    }

    #[test]
    fn test_truncate_all_clears_tables() {
        let store = store();
        store.insert(&[companies(3)]).unwrap();
        store.truncate_all().unwrap();
        assert_eq!(store.count("company").unwrap(), 0);
    }
}
