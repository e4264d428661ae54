//! Core library for Quest Ledger.
//! Keeps the file, added and historic campaign collections of an editing session, and
//! reconciles them into an exported copy of the source file and a persisted history.

pub mod catalog;
pub mod config;
mod disk;
mod error;
pub mod export;
pub mod field;
mod gui;
pub mod history;
pub mod logging;
pub mod record;
pub mod session;
pub mod statics;
pub mod store;

pub use catalog::{Catalog, CatalogKind};
pub use config::Config;
pub use error::{ParseFailure, Result, SessionError};
pub use export::{ExportReport, export_path, reconcile};
pub use field::{CampaignDraft, Field, FieldValue, apply_sentinel};
pub use gui::run_gui;
pub use history::{load_history, persist};
pub use record::CampaignRecord;
pub use session::{Command, Origin, Outcome, PendingChanges, Session};
pub use store::{DirtySet, RecordStore};
