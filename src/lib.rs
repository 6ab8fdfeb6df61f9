//! streamfill library crate.
//!
//! Synthesizes a referentially-consistent dataset for a fictitious streaming
//! platform (companies, platforms, users, channels, videos, comments,
//! donations, payment details) and loads it into an embedded DuckDB database
//! for index and performance testing.
//!
//! The interesting part is the dependency-ordered batch engine: entity groups
//! are generated in nine levels following their foreign-key dependencies,
//! each group is produced and inserted in bounded-memory chunks, and
//! uniqueness constraints that the store would enforce (composite keys,
//! unique columns, per-parent sequence numbers) are enforced in memory via
//! state carried across chunks.

pub mod batch;
pub mod cmd;
pub mod gen;
pub mod model;
pub mod orchestrator;
pub mod plan;
pub mod report;
pub mod store;
pub mod values;

pub use model::{Record, Row, SqlValue, TableRows};
pub use orchestrator::{Orchestrator, RunTimings};
pub use plan::{preset, preset_names, BatchSizes, VolumePlan, VolumeSpec};
pub use store::Store;
pub use values::FakeValues;
