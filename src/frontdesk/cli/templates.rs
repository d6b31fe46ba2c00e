//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone
//! files next to this module and embedded as string constants.
//!
//! The environment runs with `trim_blocks` and `lstrip_blocks`, so a block tag
//! on its own line produces no output. Content lines must not end in a block
//! tag or they lose their newline; branch in Rust and pass the result instead.
//!
//! Layout (column widths, truncation, padding) is computed in Rust. Templates
//! only arrange lines and choose styles by semantic name.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const DETAILS_TEMPLATE: &str = include_str!("templates/details.tmp");
pub const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.tmp");
pub const FORM_TEMPLATE: &str = include_str!("templates/form.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const NOT_FOUND_TEMPLATE: &str = include_str!("templates/not_found.tmp");
pub const VALIDATION_TEMPLATE: &str = include_str!("templates/validation.tmp");

/// Every template, registered under its name.
pub const ALL: [(&str, &str); 8] = [
    ("list", LIST_TEMPLATE),
    ("details", DETAILS_TEMPLATE),
    ("summary", SUMMARY_TEMPLATE),
    ("form", FORM_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
    ("not_found", NOT_FOUND_TEMPLATE),
    ("validation", VALIDATION_TEMPLATE),
];
