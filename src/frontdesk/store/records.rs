//! The in-memory record collection and its persistence mirror.
//!
//! A [`RecordStore`] owns the records of one kind. Memory is authoritative: every
//! mutation is applied to the collection first, then the whole collection is written
//! through the [`Storage`] port. A failed write is logged and marks the store dirty;
//! it never fails the mutation. Callers that need to know can use [`RecordStore::save`].

use super::ids::{self, IdPolicy};
use super::{sequence_key, Storage};
use crate::error::{FrontdeskError, Result};
use crate::model::{Doctor, DoctorStatus, Patient, Record};
use chrono::Utc;

pub type PatientStore<S> = RecordStore<Patient, S>;
pub type DoctorStore<S> = RecordStore<Doctor, S>;

pub struct RecordStore<R: Record, S: Storage> {
    storage: S,
    key: String,
    policy: IdPolicy,
    seed: fn() -> Vec<R>,
    records: Vec<R>,
    high_water: u32,
    dirty: bool,
}

impl<R: Record, S: Storage> RecordStore<R, S> {
    /// Loads the collection persisted under `key`, falling back to `seed` when
    /// nothing is stored or the stored value does not parse.
    pub fn open(storage: S, key: &str, policy: IdPolicy, seed: fn() -> Vec<R>) -> Self {
        let records = load_records(&storage, key).unwrap_or_else(seed);

        let dupes = ids::duplicate_ids(&records);
        if !dupes.is_empty() {
            tracing::warn!(key, ?dupes, "stored {} ids are not unique", R::KIND);
        }

        let high_water = match policy {
            IdPolicy::Stable => load_high_water(&storage, key).max(ids::max_id(&records)),
            IdPolicy::Renumber => 0,
        };

        Self {
            storage,
            key: key.to_string(),
            policy,
            seed,
            records,
            high_water,
            dirty: false,
        }
    }

    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// True when the last write through the storage port failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, id: u32) -> Result<&R> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(FrontdeskError::not_found(R::KIND, id))
    }

    /// Records matching `term` (case-insensitive), in collection order.
    pub fn search(&self, term: &str) -> Vec<&R> {
        let term = term.trim().to_lowercase();
        self.records.iter().filter(|r| r.matches(&term)).collect()
    }

    pub fn add(&mut self, draft: R::Draft) -> R {
        let id = ids::next_id(&self.records, self.high_water);
        if self.policy == IdPolicy::Stable {
            self.high_water = id;
        }

        let record = R::build(id, draft, Utc::now());
        self.records.push(record.clone());
        tracing::debug!(id, "added {}", R::KIND);
        self.persist();
        record
    }

    /// Replaces the editable fields of record `id`. Other records are untouched.
    pub fn update(&mut self, id: u32, draft: R::Draft) -> Result<R> {
        self.modify(id, |record| record.replace(draft, Utc::now()))
    }

    /// Removes record `id`. Under [`IdPolicy::Renumber`] the survivors are renumbered.
    pub fn remove(&mut self, id: u32) -> Result<R> {
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(FrontdeskError::not_found(R::KIND, id))?;

        let removed = self.records.remove(position);
        if self.policy == IdPolicy::Renumber {
            ids::renumber(&mut self.records, Utc::now());
        }
        tracing::debug!(id, policy = %self.policy, "removed {}", R::KIND);
        self.persist();
        Ok(removed)
    }

    /// Drops the persisted state and goes back to the seed dataset.
    ///
    /// If a stored key cannot be removed the store stays dirty, and under
    /// [`IdPolicy::Stable`] the high-water mark is not lowered.
    pub fn reset(&mut self) {
        let mut cleared = true;
        for key in [self.key.clone(), sequence_key(&self.key)] {
            if let Err(e) = self.storage.remove(&key) {
                tracing::warn!(key = %key, error = %e, "failed to clear stored key");
                cleared = false;
            }
        }
        self.records = (self.seed)();
        self.high_water = match self.policy {
            IdPolicy::Stable if cleared => ids::max_id(&self.records),
            IdPolicy::Stable => self.high_water.max(ids::max_id(&self.records)),
            IdPolicy::Renumber => 0,
        };
        self.dirty = !cleared;
        tracing::info!(key = %self.key, count = self.records.len(), "reset to seed data");
    }

    /// Writes the collection now, reporting failure to the caller.
    pub fn save(&mut self) -> Result<()> {
        let outcome = self.write();
        self.dirty = outcome.is_err();
        outcome
    }

    fn modify(&mut self, id: u32, change: impl FnOnce(&mut R)) -> Result<R> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(FrontdeskError::not_found(R::KIND, id))?;

        change(record);
        let updated = record.clone();
        tracing::debug!(id, "updated {}", R::KIND);
        self.persist();
        Ok(updated)
    }

    fn persist(&mut self) {
        match self.write() {
            Ok(()) => self.dirty = false,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "failed to persist {} records; keeping changes in memory",
                    R::KIND
                );
                self.dirty = true;
            }
        }
    }

    fn write(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.storage.set(&self.key, &json)?;
        if self.policy == IdPolicy::Stable {
            self.storage
                .set(&sequence_key(&self.key), &self.high_water.to_string())?;
        }
        Ok(())
    }
}

impl<S: Storage> RecordStore<Doctor, S> {
    pub fn set_status(&mut self, id: u32, status: DoctorStatus) -> Result<Doctor> {
        self.modify(id, |doctor| {
            doctor.status = status;
            doctor.touch(Utc::now());
        })
    }
}

fn load_records<R: Record, S: Storage>(storage: &S, key: &str) -> Option<Vec<R>> {
    match storage.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored records do not parse; using seed data");
                None
            }
        },
        Ok(None) => {
            tracing::debug!(key, "nothing stored; using seed data");
            None
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored records; using seed data");
            None
        }
    }
}

fn load_high_water<S: Storage>(storage: &S, key: &str) -> u32 {
    match storage.get(&sequence_key(key)) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable id sequence");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read id sequence");
            0
        }
    }
}
