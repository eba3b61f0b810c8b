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
#![allow(clippy::module_name_repetitions)]
//! Wire contract between the economy panel UI and the host process.
//!
//! The host pushes JSON objects tagged by `action` into the browser surface and
//! the UI answers with fire-and-forget POSTs named by event. Both directions are
//! modelled here so the UI core never touches raw attribute strings or untyped
//! documents beyond the edges.
//!
//! Layout: `inbound.rs` (host → UI messages and payloads), `outbound.rs`
//! (UI → host requests), `settings.rs` (typed admin settings schema),
//! `catalog.rs` (tax type descriptors), `records.rs` (display-only records),
//! `lenient.rs` (tolerant decoding of host-supplied scalars).

pub mod catalog;
pub mod error;
pub mod inbound;
pub mod lenient;
pub mod outbound;
pub mod records;
pub mod settings;

pub use catalog::{TaxMode, TaxTypeDescriptor, catalog_from_value, default_tax_catalog};
pub use error::{ProtocolError, ProtocolResult};
pub use inbound::{
    AdminDataKey, AdminLogsPayload, AdminStatePayload, HostMessage, OpenMode, PaymentPayload,
    VaultBalancePayload, decode_payload,
};
pub use outbound::{AdminRequest, AmountPayload, HostRequest, IssueTaxPayload, TaxDecision};
pub use records::{AuditLogEntry, DebtRecord, Metrics};
pub use settings::{AdminSettings, ManualSettings, ModeSettings, ModeTarget, SettingField, SettingMode};
