//! # Frontdesk Architecture
//!
//! Frontdesk keeps the records of a hospital front office: patients with their
//! contact, medical and emergency details, and the doctors on staff. It is a
//! library that happens to have a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders screens, handles terminal I/O  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns one record store per collection                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, id handling, paging, search                  │
//! │  - Returns `CmdResult` with records, view and messages      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `RecordStore` keeps the in-memory collection             │
//! │  - `Storage` trait: FileStorage (production),               │
//! │    InMemoryStorage (testing)                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records and ids
//!
//! Each collection is persisted as a single JSON array under its own key
//! ([`store::PATIENTS_KEY`] is `patient_management_data`,
//! [`store::DOCTORS_KEY`] is `doctors`). Ids are positive integers. Under
//! [`store::ids::IdPolicy::Renumber`] ids are always `1..=n` in list order and
//! deleting a record shifts the ones after it down. Under
//! [`store::ids::IdPolicy::Stable`] ids are never reused.
//!
//! Persistence is best-effort: the in-memory collection is the source of truth
//! for the running process. A failed write is logged and flags the store dirty.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each screen
//! - [`store`]: Storage abstraction, id policies, record stores
//! - [`model`]: `Patient`, `Doctor` and their enums
//! - [`validation`]: Field rules and error collection
//! - [`forms`]: Patient and doctor form schemas and binding
//! - [`routes`]: Path to view resolution
//! - [`seed`]: Sample records for empty stores
//! - [`config`]: Configuration management
//! - [`init`]: Data directory discovery
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod init;
pub mod logging;
pub mod model;
pub mod routes;
pub mod seed;
pub mod store;
pub mod validation;
