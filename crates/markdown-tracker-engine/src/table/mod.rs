//! # Pipe Tables
//!
//! Recovers table structure from raw markdown text and patches tables back
//! into that text without disturbing anything around them.
//!
//! ## Modules
//!
//! - **`locate`**: finds every pipe-table region in a content string
//! - **`classify`**: header / primary separator / custom separator / data roles
//! - **`parse`**: region text to [`ParsedTable`], reconciling the progress column
//! - **`rewrite`**: re-locates a table by index and patches its progress cells
//! - **`types`**: [`Span`], [`TableRegion`], [`Row`], [`ParsedTable`]
//!
//! ## Key Invariants
//!
//! - Every parsed data row has exactly as many cells as the header, and its
//!   last cell is [`UNCHECKED`] or [`CHECKED`].
//! - A rewrite only changes bytes inside the target region.
//! - Regions are re-located on every rewrite; spans are never reused after
//!   the content they point into has changed.

pub mod classify;
pub mod locate;
pub mod parse;
pub mod rewrite;
pub mod types;

pub use classify::{LineRole, TableLineClassifier};
pub use locate::{locate_table, locate_tables};
pub use parse::{parse_first_table, parse_table};
pub use rewrite::rewrite_table;
pub use types::{ParsedTable, Row, Span, TableRegion};

/// Header label of the progress column.
pub const PROGRESS_LABEL: &str = "进度";

/// Progress marker for an open item; also the default for new cells.
pub const UNCHECKED: &str = "[ ]";

/// Progress marker for a completed item.
pub const CHECKED: &str = "[x]";
