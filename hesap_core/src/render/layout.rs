//! Page geometry and line styles for rendered reports.
//!
//! All lengths are millimetres, font sizes are points. The defaults reproduce
//! the A4 report the web application produced: title at 10 mm, date at 20 mm,
//! inputs from 40 mm in 10 mm steps, then a blank line and the result.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

const MM_PER_PT: f64 = 25.4 / 72.0;

/// Which kind of line is being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Title,
    Meta,
    Body,
    Result,
}

/// Font and spacing for one [`LineKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub font_size_pt: f64,
    pub bold: bool,
    /// Horizontal offset from the left page edge
    pub x_mm: f64,
    /// Cursor advance after the line
    pub advance_mm: f64,
}

impl LineStyle {
    pub const fn new(font_size_pt: f64, bold: bool, x_mm: f64, advance_mm: f64) -> Self {
        Self {
            font_size_pt,
            bold,
            x_mm,
            advance_mm,
        }
    }

    /// Height of the line box in millimetres (one em).
    pub fn height_mm(&self) -> f64 {
        self.font_size_pt * MM_PER_PT
    }
}

/// Page geometry used by the renderer's pagination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub top_margin_mm: f64,
    pub bottom_margin_mm: f64,
    /// Gap between the inputs and the result line
    pub separator_mm: f64,
    pub title: LineStyle,
    pub meta: LineStyle,
    pub body: LineStyle,
    pub result: LineStyle,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            top_margin_mm: 10.0,
            bottom_margin_mm: 10.0,
            separator_mm: 10.0,
            title: LineStyle::new(16.0, true, 10.0, 10.0),
            meta: LineStyle::new(10.0, false, 10.0, 20.0),
            body: LineStyle::new(10.0, false, 20.0, 10.0),
            result: LineStyle::new(12.0, true, 10.0, 10.0),
        }
    }
}

impl PageLayout {
    pub fn style(&self, kind: LineKind) -> &LineStyle {
        match kind {
            LineKind::Title => &self.title,
            LineKind::Meta => &self.meta,
            LineKind::Body => &self.body,
            LineKind::Result => &self.result,
        }
    }

    /// Lowest point a line box may reach.
    pub fn usable_bottom_mm(&self) -> f64 {
        self.page_height_mm - self.bottom_margin_mm
    }

    /// Height available between the margins.
    pub fn usable_height_mm(&self) -> f64 {
        self.usable_bottom_mm() - self.top_margin_mm
    }

    /// Reject geometry the pagination cannot work with.
    pub fn validate(&self) -> CalcResult<()> {
        let lengths = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("top_margin_mm", self.top_margin_mm),
            ("bottom_margin_mm", self.bottom_margin_mm),
            ("separator_mm", self.separator_mm),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input("layout", format!("{name} must be a non-negative length")));
            }
        }
        if self.page_width_mm <= 0.0 || self.usable_height_mm() <= 0.0 {
            return Err(CalcError::invalid_input("layout", "margins leave no usable page area"));
        }
        for kind in [LineKind::Title, LineKind::Meta, LineKind::Body, LineKind::Result] {
            let style = self.style(kind);
            if !(style.font_size_pt > 0.0 && style.advance_mm >= 0.0 && style.x_mm >= 0.0) {
                return Err(CalcError::invalid_input("layout", format!("invalid {kind:?} line style")));
            }
        }
        Ok(())
    }
}
