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

//! Logging primitives shared across the economy panel workspace.
//!
//! Layout: `init.rs` (subscriber installation and configuration),
//! `console.rs` (browser console writer, wasm32 only).

#[cfg(target_arch = "wasm32")]
mod console;
pub mod init;

pub use init::{
    COMPILED_BUILD_SHA, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging,
};
