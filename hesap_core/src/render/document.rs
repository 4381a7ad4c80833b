//! Backend-independent paginated document.
//!
//! [`DocumentBuilder`] owns the vertical cursor and does the page breaking;
//! [`Document`] is the finished, immutable result. Turning it into bytes is
//! the job of the PDF backend in [`super::pdf`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::{LineKind, PageLayout};
use super::pdf;
use crate::errors::{CalcError, CalcResult};

/// One line of text at a fixed position on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub text: String,
    pub x_mm: f64,
    pub y_mm: f64,
    pub font_size_pt: f64,
    pub bold: bool,
}

/// One page of placed lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Builds a [`Document`] line by line.
///
/// A line whose box would reach below the usable bottom of the page goes to
/// a fresh page instead, at the top margin. Lines are anchored at the top of
/// their box.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    layout: PageLayout,
    title: String,
    filename: String,
    pages: Vec<Page>,
    cursor_mm: f64,
}

impl DocumentBuilder {
    pub fn new(layout: PageLayout, title: impl Into<String>, filename: impl Into<String>) -> Self {
        DocumentBuilder {
            cursor_mm: layout.top_margin_mm,
            layout,
            title: title.into(),
            filename: filename.into(),
            pages: vec![Page::default()],
        }
    }

    /// Emit one line, breaking the page first if it would not fit.
    ///
    /// A line taller than the whole usable height is still placed once the
    /// cursor is back at the top margin.
    pub fn add_line(&mut self, kind: LineKind, text: impl Into<String>) -> &mut Self {
        let style = *self.layout.style(kind);
        let overflows = self.cursor_mm + style.height_mm() > self.layout.usable_bottom_mm();
        if overflows && self.cursor_mm > self.layout.top_margin_mm {
            self.new_page();
        }
        let line = PlacedLine {
            kind,
            text: text.into(),
            x_mm: style.x_mm,
            y_mm: self.cursor_mm,
            font_size_pt: style.font_size_pt,
            bold: style.bold,
        };
        self.current_page().lines.push(line);
        self.cursor_mm += style.advance_mm;
        self
    }

    /// Move the cursor down without drawing anything.
    pub fn add_spacer(&mut self, height_mm: f64) -> &mut Self {
        self.cursor_mm += height_mm;
        self
    }

    /// Start a new page and reset the cursor to the top margin.
    pub fn new_page(&mut self) -> &mut Self {
        debug!(page = self.pages.len() + 1, "page break");
        self.pages.push(Page::default());
        self.cursor_mm = self.layout.top_margin_mm;
        self
    }

    /// Current vertical position in millimetres.
    pub fn cursor_mm(&self) -> f64 {
        self.cursor_mm
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn finish(self) -> Document {
        Document {
            title: self.title,
            filename: self.filename,
            page_width_mm: self.layout.page_width_mm,
            page_height_mm: self.layout.page_height_mm,
            pages: self.pages,
        }
    }
}

/// A rendered, paginated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    title: String,
    filename: String,
    page_width_mm: f64,
    page_height_mm: f64,
    pages: Vec<Page>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Filename to offer for download (e.g. `basınç-hesaplama-rapor.pdf`).
    pub fn suggested_filename(&self) -> &str {
        &self.filename
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_size_mm(&self) -> (f64, f64) {
        (self.page_width_mm, self.page_height_mm)
    }

    /// All lines across pages, in emission order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Serialize to PDF bytes.
    ///
    /// Fails with [`CalcError::RenderFailure`]; an empty output is treated as
    /// a failure too.
    pub fn serialize(&self) -> CalcResult<Vec<u8>> {
        let bytes = pdf::render_pdf(self)?;
        if bytes.is_empty() {
            return Err(CalcError::render_failure(&self.filename, "PDF backend produced no bytes"));
        }
        Ok(bytes)
    }

    /// Serialize on tokio's blocking pool.
    ///
    /// A panicked or cancelled export task surfaces as [`CalcError::Internal`].
    pub async fn serialize_async(self) -> CalcResult<Vec<u8>> {
        let filename = self.filename.clone();
        tokio::task::spawn_blocking(move || self.serialize())
            .await
            .map_err(|e| CalcError::internal(format!("export task for '{}' failed: {}", filename, e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> PageLayout {
        PageLayout {
            page_height_mm: 60.0,
            ..PageLayout::default()
        }
    }

    #[test]
    fn test_lines_advance_cursor() {
        let mut builder = DocumentBuilder::new(PageLayout::default(), "T", "t-rapor.pdf");
        builder.add_line(LineKind::Title, "T Raporu");
        assert_eq!(builder.cursor_mm(), 20.0);
        builder.add_line(LineKind::Meta, "Tarih: x");
        assert_eq!(builder.cursor_mm(), 40.0);
        builder.add_spacer(5.0);
        assert_eq!(builder.cursor_mm(), 45.0);

        let doc = builder.finish();
        assert_eq!(doc.page_count(), 1);
        let ys: Vec<f64> = doc.lines().map(|l| l.y_mm).collect();
        assert_eq!(ys, vec![10.0, 20.0]);
    }

    #[test]
    fn test_overflow_breaks_page() {
        // usable bottom = 50 mm: a body line at 50 would end at ~53.5
        let layout = small_layout();
        let mut builder = DocumentBuilder::new(layout, "T", "t-rapor.pdf");
        for i in 0..7 {
            builder.add_line(LineKind::Body, format!("line {i}"));
        }
        let doc = builder.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[0].lines.len(), 4);
        assert_eq!(doc.pages()[1].lines[0].y_mm, 10.0);
        assert_eq!(doc.pages()[1].lines[0].text, "line 4");

        for line in doc.lines() {
            let bottom = line.y_mm + layout.style(line.kind).height_mm();
            assert!(bottom <= layout.usable_bottom_mm(), "{} ends at {bottom}", line.text);
        }
    }

    #[test]
    fn test_line_that_exactly_fits_stays() {
        // body box is 10pt = 3.5278 mm; cursor 40 -> bottom 43.53 <= 43.6
        let layout = PageLayout {
            page_height_mm: 53.6,
            ..PageLayout::default()
        };
        let mut builder = DocumentBuilder::new(layout, "T", "t-rapor.pdf");
        for i in 0..4 {
            builder.add_line(LineKind::Body, format!("line {i}"));
        }
        assert_eq!(builder.finish().page_count(), 1);
    }

    #[test]
    fn test_oversized_line_does_not_loop() {
        let mut layout = small_layout();
        layout.title.font_size_pt = 200.0;
        let mut builder = DocumentBuilder::new(layout, "T", "t-rapor.pdf");
        builder.add_line(LineKind::Title, "big").add_line(LineKind::Title, "big");
        let doc = builder.finish();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages().iter().all(|p| p.lines.len() == 1));
    }

    #[test]
    fn test_explicit_new_page_resets_cursor() {
        let mut builder = DocumentBuilder::new(PageLayout::default(), "T", "t-rapor.pdf");
        builder.add_line(LineKind::Body, "a").new_page().add_line(LineKind::Body, "b");
        let doc = builder.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[1].lines[0].y_mm, 10.0);
    }

    #[test]
    fn test_line_style_applied() {
        let mut builder = DocumentBuilder::new(PageLayout::default(), "T", "t-rapor.pdf");
        builder.add_line(LineKind::Body, "Kuvvet (F): 10 N");
        let doc = builder.finish();
        let line = doc.lines().next().unwrap();
        assert_eq!(line.x_mm, 20.0);
        assert_eq!(line.font_size_pt, 10.0);
        assert!(!line.bold);
    }
}
