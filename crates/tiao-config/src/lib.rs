#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Runtime configuration for the economy panel UI.
//!
//! Layout: `defaults.rs` (baseline values), `model.rs` (typed config),
//! `validate.rs` (field validation), `loader.rs` (JSON loading + overrides).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_or_default;
pub use model::{NumberLocale, Timings, UiConfig};
