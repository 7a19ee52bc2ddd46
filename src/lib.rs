//! # policy-history
//!
//! Time-windowed alert history for scheduled snapshot policies.
//!
//! The core lives in [`history`]: a window selector, a controller that
//! drives fetches against an [`source::AlertSource`] and owns the row list,
//! and the pure row renderer. [`store`] is a SQLite-backed alert source and
//! [`ui`] is the ratatui presentation used by the `policy-history` binary.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

pub mod config;
pub mod constants;
pub mod history;
pub mod logging;
pub mod models;
pub mod source;
pub mod store;
pub mod ui;
pub mod utils;
