//! # PDF Backend
//!
//! Serializes a [`Document`] to PDF bytes with Typst.
//!
//! ## Architecture
//!
//! - Each placed line becomes an absolutely positioned `#place` call, so the
//!   page breaks decided by [`DocumentBuilder`](super::DocumentBuilder) are
//!   kept exactly; Typst never reflows the text.
//! - User text is passed as Typst string literals, never as markup.
//! - Fonts come from `typst-assets` and are loaded once per process.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use tracing::{info_span, warn};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use super::document::{Document, PlacedLine};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Typst World Implementation
// ============================================================================

static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    fonts
});

/// A minimal Typst world for compiling one in-memory document.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Local::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Source Generation
// ============================================================================

/// Build the Typst source for `document`.
pub(crate) fn typst_source(document: &Document) -> String {
    let (width, height) = document.page_size_mm();
    let mut source = format!(
        "#set page(width: {}mm, height: {}mm, margin: 0mm)\n#set text(size: 10pt)\n",
        width, height
    );

    for (index, page) in document.pages().iter().enumerate() {
        if index > 0 {
            source.push_str("#pagebreak()\n");
        }
        for line in &page.lines {
            source.push_str(&place_line(line));
        }
    }

    source
}

fn place_line(line: &PlacedLine) -> String {
    let weight = if line.bold { "bold" } else { "regular" };
    format!(
        "#place(top + left, dx: {}mm, dy: {}mm, text(size: {}pt, weight: \"{}\", \"{}\"))\n",
        line.x_mm,
        line.y_mm,
        line.font_size_pt,
        weight,
        escape_typst_string(&line.text)
    )
}

/// Escape text for use inside a Typst string literal.
fn escape_typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// PDF Rendering
// ============================================================================

/// Compile `document` to PDF bytes.
pub(crate) fn render_pdf(document: &Document) -> CalcResult<Vec<u8>> {
    let _span = info_span!("render_pdf", file = document.suggested_filename(), pages = document.page_count())
        .entered();

    let world = PdfWorld::new(typst_source(document));
    let warned = typst::compile(&world);

    let compiled = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        warn!(errors = ?error_msgs, "typst compilation failed");
        CalcError::render_failure(
            document.suggested_filename(),
            format!("Typst compilation failed: {}", error_msgs.join("; ")),
        )
    })?;

    typst_pdf::pdf(&compiled, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        warn!(errors = ?error_msgs, "pdf export failed");
        CalcError::render_failure(
            document.suggested_filename(),
            format!("PDF rendering failed: {}", error_msgs.join("; ")),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DocumentBuilder, LineKind, PageLayout};

    fn two_page_document() -> Document {
        let mut builder = DocumentBuilder::new(PageLayout::default(), "Basınç Hesaplama", "basınç-hesaplama-rapor.pdf");
        builder
            .add_line(LineKind::Title, "Basınç Hesaplama Raporu")
            .add_line(LineKind::Body, "Not: \"alıntı\" \\ #ref $x$")
            .new_page()
            .add_line(LineKind::Result, "Sonuç: Basınç (P) = 5.00 Pa");
        builder.finish()
    }

    #[test]
    fn test_escape_typst_string() {
        assert_eq!(escape_typst_string(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_typst_string("#*_$"), "#*_$");
        assert_eq!(escape_typst_string("x\ny"), "x\\ny");
    }

    #[test]
    fn test_typst_source_keeps_page_breaks() {
        let source = typst_source(&two_page_document());
        assert!(source.starts_with("#set page(width: 210mm, height: 297mm, margin: 0mm)"));
        assert_eq!(source.matches("#pagebreak()").count(), 1);
        assert_eq!(source.matches("#place(").count(), 3);
        assert!(source.contains("weight: \"bold\", \"Basınç Hesaplama Raporu\""));
        assert!(source.contains(r#""Not: \"alıntı\" \\ #ref $x$""#));
    }

    fn broken_document() -> Document {
        let mut layout = PageLayout::default();
        layout.body.x_mm = f64::NAN;
        let mut builder = DocumentBuilder::new(layout, "Basınç Hesaplama", "basınç-hesaplama-rapor.pdf");
        builder
            .add_line(LineKind::Title, "Basınç Hesaplama Raporu")
            .add_line(LineKind::Body, "Kuvvet (F): 10 N");
        builder.finish()
    }

    #[test]
    fn test_compile_error_is_render_failure() {
        assert!(typst_source(&broken_document()).contains("dx: NaNmm"));

        let err = render_pdf(&broken_document()).unwrap_err();
        match err {
            CalcError::RenderFailure { document, reason } => {
                assert_eq!(document, "basınç-hesaplama-rapor.pdf");
                assert!(reason.starts_with("Typst compilation failed"));
            }
            other => panic!("expected RenderFailure, got {other:?}"),
        }
        assert!(matches!(broken_document().serialize(), Err(CalcError::RenderFailure { .. })));
    }

    #[tokio::test]
    async fn test_async_compile_error_is_render_failure() {
        let result = broken_document().serialize_async().await;
        assert!(matches!(result, Err(CalcError::RenderFailure { .. })));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = two_page_document().serialize();
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
