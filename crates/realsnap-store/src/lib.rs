//! # realsnap-store — Content and Record Persistence
//!
//! Two stores with separate ownership:
//!
//! - [`FsContentStore`] owns the uploaded bytes. Each upload lands in its
//!   own file named by a fresh [`ContentRef`](realsnap_core::ContentRef).
//! - [`RecordStore`] owns the `{id → record}` table, materialized as one
//!   pretty-printed JSON document that is rewritten on every insert.
//!
//! A record's `content_ref` points into the content store but does not
//! own the bytes.
//!
//! ## Concurrency
//!
//! `RecordStore` serializes writers behind its own lock, so two intakes
//! racing to persist cannot drop each other's records. Readers take a
//! short read lock and only ever see records that are already durable.

pub mod content;
pub mod error;
pub mod records;

pub use content::{normalize_extension, ContentStore, FsContentStore};
pub use error::StoreError;
pub use records::{PutOutcome, RecordStore};
