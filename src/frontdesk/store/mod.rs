//! # Storage Layer
//!
//! Records live in memory inside a [`records::RecordStore`]; durable state is a
//! mirror of that collection written through the [`Storage`] port after every
//! mutation.
//!
//! ## Design Rationale
//!
//! Persistence is abstracted behind a key-value trait to:
//! - Enable **testing** with [`memory::InMemoryStorage`] (no filesystem, and writes
//!   can be made to fail on demand)
//! - Keep record logic **decoupled** from where the bytes end up
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: Production storage, one JSON file per key
//! - [`memory::InMemoryStorage`]: Shared in-memory map for tests
//!
//! ## Storage Format
//!
//! For `FileStorage`:
//! ```text
//! <data dir>/
//! ├── patient_management_data.json   # Patients (JSON array)
//! ├── doctors.json                   # Doctors (JSON array)
//! ├── doctors.seq.json               # Highest doctor id ever handed out
//! └── config.json                    # Configuration
//! ```
//!
//! There is no schema version. A change in record shape needs a `reset`.

use crate::error::Result;

pub mod fs;
pub mod ids;
pub mod memory;
pub mod records;

/// Storage key for the patient collection.
pub const PATIENTS_KEY: &str = "patient_management_data";

/// Storage key for the doctor collection.
pub const DOCTORS_KEY: &str = "doctors";

/// Companion key holding the id high-water mark for `key`.
pub fn sequence_key(key: &str) -> String {
    format!("{}.seq", key)
}

/// Synchronous key-value persistence port.
///
/// Values are opaque strings; the record store decides the encoding.
pub trait Storage {
    /// Read the value for `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (create or overwrite) the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
