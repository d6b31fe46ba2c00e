//! # CLI Behavior
//!
//! This is one UI client for the frontdesk library, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit codes
//! and output formatting. For the overall architecture, see the crate-level
//! documentation of the library.
//!
//! ## Screens as commands
//!
//! Each screen of the front office maps to a subcommand:
//!
//! - `frontdesk` with no arguments prints the landing summary.
//! - `frontdesk patients list|show|add|edit|delete|search|reset`
//! - `frontdesk doctors list|show|add|edit|delete|search|activate|deactivate|reset`
//! - `frontdesk open <path>` renders whatever screen a route path points at,
//!   e.g. `/patient-details/3` or `/doctor-registration`.
//! - `frontdesk config [key] [value]`
//!
//! ## Forms
//!
//! Add and edit take one `--flag` per form field. Only the flags given are
//! set, so `edit` changes just those fields and keeps the rest. Invalid input
//! prints every failing field with its message on stderr and exits with 1.
//!
//! ## Destructive commands
//!
//! `delete` and `reset` ask for confirmation on a terminal. `--yes` skips the
//! prompt; without a terminal they refuse to run unless it is given.

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
