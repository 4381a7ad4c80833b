//! # hesap_core - Calculation & Reporting Engine
//!
//! `hesap_core` runs a fixed catalogue of engineering formulas from typed
//! numeric inputs and turns successful results into immutable reports that
//! can be rendered to PDF. All data types are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Declarative catalog**: each calculator is data (fields, precondition,
//!   formula, result unit), not a hand-written page
//! - **Gate before trust**: a result exists only if the precondition held for
//!   exactly those inputs
//! - **Append-only reports**: snapshots are copied at save time and never change
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use hesap_core::{Engine, Identity};
//!
//! let engine = Engine::default();
//! let user = Identity::signed_in("Mehmet");
//!
//! let mut session = engine.open(&user, "pompa-gucu").unwrap();
//! session.update_field("Q", "0.01").unwrap();
//! session.update_field("H", "20").unwrap();
//! assert!(session.can_save());
//!
//! let id = engine.save(&user, &mut session).unwrap();
//! let json = serde_json::to_string_pretty(&engine.report(&id).unwrap()).unwrap();
//! assert!(json.contains("Pompa Gücü Hesaplama"));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The nine calculator definitions and lookup
//! - [`input`] - Form state and fail-soft number parsing
//! - [`gate`] - `evaluate` and the per-page calculator session
//! - [`report`] - Reports and the append-only report store
//! - [`render`] - Pagination and PDF serialization
//! - [`engine`] - Composition root with identity checks
//! - [`settings`] - TOML configuration
//! - [`export`] - Atomic PDF export to disk
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod export;
pub mod gate;
pub mod input;
pub mod render;
pub mod report;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use catalog::{CalculatorDefinition, InputField};
pub use engine::{Engine, Identity};
pub use errors::{CalcError, CalcResult};
pub use export::{export_pdf, export_pdf_async};
pub use gate::{evaluate, CalculationOutcome, CalculatorSession};
pub use render::{Document, PageLayout};
pub use report::{Report, ReportId, ReportStore};
pub use settings::EngineSettings;
