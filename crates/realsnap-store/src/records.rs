//! # Record Store
//!
//! The `{id → record}` table behind every verification link.
//!
//! ## Persistence
//!
//! The whole table is a single JSON object keyed by record id, UTF-8 and
//! pretty-printed. Each successful [`put()`](RecordStore::put) rewrites the
//! full document to a sibling temp file, syncs it, and renames it over the
//! table. The in-memory view is swapped only after that rename succeeds,
//! so readers never observe a record that is not on disk.
//!
//! ## Immutability
//!
//! There is no update or delete. A second `put` under an existing id is
//! accepted only when the record is identical (an idempotent retry);
//! otherwise it fails with [`StoreError::DuplicateId`].

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use realsnap_core::{Record, RecordId};

use crate::error::StoreError;

/// Result of a successful [`RecordStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was new and is now durable.
    Inserted,
    /// An identical record was already stored; nothing was written.
    AlreadyPresent,
}

type Table = BTreeMap<RecordId, Record>;

/// Thread-safe record table with a single writer.
///
/// Cloning is cheap and shares the same table.
#[derive(Debug, Clone)]
pub struct RecordStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// `None` for a purely in-memory table.
    path: Option<PathBuf>,
    table: RwLock<Table>,
    /// Held for the whole read-check-persist-swap sequence of a `put`.
    writer: Mutex<()>,
}

impl RecordStore {
    /// Open the table persisted at `path`, creating an empty one if the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = load_table(&path)?;
        tracing::info!(path = %path.display(), records = table.len(), "record table loaded");
        Ok(Self::from_parts(Some(path), table))
    }

    /// A table that lives only in memory.
    pub fn in_memory() -> Self {
        Self::from_parts(None, Table::new())
    }

    fn from_parts(path: Option<PathBuf>, table: Table) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                table: RwLock::new(table),
                writer: Mutex::new(()),
            }),
        }
    }

    /// Backing file, if persistent.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    /// Insert `record` under `record.id` and persist the table.
    pub fn put(&self, record: Record) -> Result<PutOutcome, StoreError> {
        let _writer = self.inner.writer.lock();

        let mut next = {
            let table = self.inner.table.read();
            if let Some(existing) = table.get(&record.id) {
                return if *existing == record {
                    Ok(PutOutcome::AlreadyPresent)
                } else {
                    Err(StoreError::DuplicateId(record.id))
                };
            }
            table.clone()
        };

        let id = record.id;
        next.insert(id, record);

        if let Some(path) = &self.inner.path {
            persist_table(path, &next)?;
        }

        *self.inner.table.write() = next;
        tracing::debug!(record_id = %id, "record persisted");
        Ok(PutOutcome::Inserted)
    }

    /// Look up a record. Missing ids are `None`, never an error.
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.inner.table.read().get(id).cloned()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.inner.table.read().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All record ids, in id order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.inner.table.read().keys().copied().collect()
    }
}

fn load_table(path: &Path) -> Result<Table, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Table::new()),
        Err(e) => return Err(e.into()),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Table::new());
    }

    let corrupt = |reason: String| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };
    let table: Table = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if let Some((key, record)) = table.iter().find(|(key, record)| **key != record.id) {
        return Err(corrupt(format!(
            "entry {key} holds record with id {}",
            record.id
        )));
    }
    Ok(table)
}

fn persist_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(table)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = (|| -> std::io::Result<()> {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(&json)?;
        f.write_all(b"\n")?;
        f.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use realsnap_core::{sha256_digest, verify_ref, ContentRef, Timestamp};

    fn record_for(bytes: &[u8]) -> Record {
        let id = RecordId::new();
        Record {
            id,
            content_ref: ContentRef::new(format!("{}.bin", uuid::Uuid::new_v4())).unwrap(),
            verify_ref: verify_ref("http://localhost:3000", &id),
            integrity_hash: sha256_digest(bytes),
            size_bytes: bytes.len() as u64,
            media_type: None,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn get_missing_is_none() {
        let store = RecordStore::in_memory();
        assert!(store.get(&RecordId::new()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn put_then_get() {
        let store = RecordStore::in_memory();
        let record = record_for(b"hello");
        assert_eq!(store.put(record.clone()).unwrap(), PutOutcome::Inserted);
        assert_eq!(store.get(&record.id), Some(record.clone()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids(), vec![record.id]);
    }

    #[test]
    fn identical_put_is_idempotent() {
        let store = RecordStore::in_memory();
        let record = record_for(b"hello");
        store.put(record.clone()).unwrap();
        assert_eq!(store.put(record).unwrap(), PutOutcome::AlreadyPresent);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn conflicting_put_is_rejected() {
        let store = RecordStore::in_memory();
        let original = record_for(b"hello");
        store.put(original.clone()).unwrap();

        let mut conflicting = record_for(b"other");
        conflicting.id = original.id;
        match store.put(conflicting) {
            Err(StoreError::DuplicateId(id)) => assert_eq!(id, original.id),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
        assert_eq!(store.get(&original.id), Some(original));
    }

    #[test]
    fn table_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let a = record_for(b"a");
        let b = record_for(b"b");
        {
            let store = RecordStore::open(&path).unwrap();
            store.put(a.clone()).unwrap();
            store.put(b.clone()).unwrap();
        }
        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get(&a.id), Some(a));
        assert_eq!(reopened.get(&b.id), Some(b));
    }

    #[test]
    fn on_disk_shape_is_object_keyed_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = RecordStore::open(&path).unwrap();
        let record = record_for(b"shape");
        store.put(record.clone()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entry = &value[record.id.to_string()];
        assert_eq!(entry["id"], record.id.to_string());
        assert_eq!(entry["integrity_hash"], record.integrity_hash.to_hex());
        assert!(text.contains('\n'), "table should be pretty-printed");
    }

    #[test]
    fn open_missing_or_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RecordStore::open(dir.path().join("absent.json")).unwrap().is_empty());
        let blank = dir.path().join("blank.json");
        fs::write(&blank, "  \n").unwrap();
        assert!(RecordStore::open(&blank).unwrap().is_empty());
    }

    #[test]
    fn open_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(RecordStore::open(&path), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn open_rejects_mismatched_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let record = record_for(b"x");
        let other = RecordId::new();
        let doc = serde_json::json!({ (other.to_string()): record });
        fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
        assert!(matches!(RecordStore::open(&path), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn failed_persist_leaves_no_visible_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = RecordStore::open(&path).unwrap();
        // A directory squatting on the temp name makes the rewrite fail.
        fs::create_dir(dir.path().join("records.json.tmp")).unwrap();
        let record = record_for(b"lost");
        assert!(store.put(record.clone()).is_err());
        assert!(store.get(&record.id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_writers_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = RecordStore::open(&path).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..10)
                        .map(|i| {
                            let record = record_for(format!("{t}-{i}").as_bytes());
                            store.put(record.clone()).unwrap();
                            record.id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<RecordId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(store.len(), 80);

        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 80);
        assert!(ids.iter().all(|id| reopened.get(id).is_some()));
    }

    proptest! {
        #[test]
        fn prop_persisted_records_reload_unchanged(
            payloads in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..256), 1..8),
            media_type in proptest::option::of("[a-z]{1,8}/[a-z0-9.+-]{1,16}"),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("records.json");
            let store = RecordStore::open(&path).unwrap();

            let mut written = Vec::new();
            for payload in &payloads {
                let mut record = record_for(payload);
                record.media_type = media_type.clone();
                prop_assert_eq!(store.put(record.clone()).unwrap(), PutOutcome::Inserted);
                written.push(record);
            }

            let reopened = RecordStore::open(&path).unwrap();
            prop_assert_eq!(reopened.len(), written.len());
            for record in &written {
                let fetched = reopened.get(&record.id);
                prop_assert_eq!(fetched.as_ref(), Some(record));
            }
        }
    }
}
