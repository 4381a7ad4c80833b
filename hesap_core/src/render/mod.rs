//! # Report Rendering
//!
//! Turns a stored [`Report`] into a paginated [`Document`] and, through the
//! Typst backend, into PDF bytes.
//!
//! ## Line order
//!
//! ```text
//! <title> Raporu          title style
//! Tarih: <createdAt>      meta style
//! <label>: <value>        body style, one per snapshot entry
//!                         separator
//! Sonuç: <result>         result style
//! ```
//!
//! Page breaking happens in [`DocumentBuilder`]; the backend only draws what
//! it is given.

pub mod document;
pub mod layout;
mod pdf;

pub use document::{Document, DocumentBuilder, Page, PlacedLine};
pub use layout::{LineKind, LineStyle, PageLayout};

use tracing::info_span;

use crate::report::Report;

/// Lay out `report` on pages described by `layout`.
///
/// Deterministic: the same report and layout always give the same document.
pub fn render(report: &Report, layout: &PageLayout) -> Document {
    let _span = info_span!("render", report = %report.id()).entered();

    let mut builder = DocumentBuilder::new(*layout, report.title(), suggested_filename(report.title()));
    builder
        .add_line(LineKind::Title, format!("{} Raporu", report.title()))
        .add_line(LineKind::Meta, format!("Tarih: {}", report.created_at()));

    for entry in report.inputs_snapshot() {
        builder.add_line(LineKind::Body, format!("{}: {}", entry.label, entry.value));
    }

    builder
        .add_spacer(layout.separator_mm)
        .add_line(LineKind::Result, format!("Sonuç: {}", report.result()));

    builder.finish()
}

/// Lower-case `title` and collapse each whitespace run into one hyphen.
pub fn slug(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// `slug(title) + "-rapor.pdf"`
pub fn suggested_filename(title: &str) -> String {
    format!("{}-rapor.pdf", slug(title))
}
