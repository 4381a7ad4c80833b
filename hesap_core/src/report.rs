//! # Reports
//!
//! A [`Report`] is the frozen record of one successful calculation. The
//! [`ReportStore`] is the in-process, append-only list of them: reports come
//! back in insertion order, never change, and are never removed.
//!
//! ## Structure
//!
//! ```text
//! ReportStore
//! └── RwLock
//!     ├── reports: Vec<Report>   (insertion order)
//!     └── last_id: ReportId      (id clock)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hesap_core::report::{ReportDraft, ReportStore};
//! use hesap_core::input::InputEntry;
//!
//! let store = ReportStore::new();
//! let id = store.append(ReportDraft {
//!     calculator_id: "basinc".to_string(),
//!     title: "Basınç Hesaplama".to_string(),
//!     inputs_snapshot: vec![InputEntry::new("Kuvvet (F)", "10 N")],
//!     result: "Basınç (P) = 5.00 Pa".to_string(),
//!     created_at: "01.01.2025 10:00:00".to_string(),
//! });
//!
//! let reports = store.list();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].id(), &id);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::input::InputEntry;

// ============================================================================
// Report Id
// ============================================================================

/// Report identifier: creation millisecond plus a sequence number.
///
/// Ids compare by `(millis, seq)` and strictly increase in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportId {
    pub millis: i64,
    pub seq: u32,
}

impl ReportId {
    /// Next id after `last`, given the current clock reading.
    ///
    /// A new millisecond restarts the sequence; the same millisecond, or a
    /// clock that stepped back, bumps the sequence on the previous one.
    fn next(last: Option<ReportId>, now_millis: i64) -> ReportId {
        match last {
            Some(prev) if now_millis <= prev.millis => ReportId {
                millis: prev.millis,
                seq: prev.seq + 1,
            },
            _ => ReportId {
                millis: now_millis,
                seq: 0,
            },
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

impl FromStr for ReportId {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let (millis, seq) = s.split_once('-').unwrap_or((s, "0"));
        match (millis.parse(), seq.parse()) {
            (Ok(millis), Ok(seq)) => Ok(ReportId { millis, seq }),
            _ => Err(CalcError::report_not_found(s)),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything a report holds before the store gives it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    /// Route id of the originating calculator
    pub calculator_id: String,
    /// Calculator title at save time
    pub title: String,
    /// Ordered `label -> value` echo of the inputs
    pub inputs_snapshot: Vec<InputEntry>,
    /// `"<Label> (<symbol>) = <value> <unit>"`
    pub result: String,
    /// Locale-formatted creation time
    pub created_at: String,
}

/// A saved calculation. Immutable: fields are only readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,
    calculator_id: String,
    title: String,
    inputs_snapshot: Vec<InputEntry>,
    result: String,
    created_at: String,
}

impl Report {
    fn from_draft(id: ReportId, draft: ReportDraft) -> Self {
        Report {
            id,
            calculator_id: draft.calculator_id,
            title: draft.title,
            inputs_snapshot: draft.inputs_snapshot,
            result: draft.result,
            created_at: draft.created_at,
        }
    }

    pub fn id(&self) -> &ReportId {
        &self.id
    }

    pub fn calculator_id(&self) -> &str {
        &self.calculator_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn inputs_snapshot(&self) -> &[InputEntry] {
        &self.inputs_snapshot
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

// ============================================================================
// Report Store
// ============================================================================

#[derive(Debug, Default)]
struct StoreInner {
    reports: Vec<Report>,
    last_id: Option<ReportId>,
}

/// Append-only, insertion-ordered collection of reports.
///
/// `append` assigns the id and inserts under one write lock, so concurrent
/// appends land in the list in the same order as their ids.
#[derive(Debug, Default)]
pub struct ReportStore {
    inner: RwLock<StoreInner>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a report at the end of the list and return its id.
    pub fn append(&self, draft: ReportDraft) -> ReportId {
        self.append_at(draft, Utc::now().timestamp_millis())
    }

    fn append_at(&self, draft: ReportDraft, now_millis: i64) -> ReportId {
        let mut inner = self.inner.write();
        let id = ReportId::next(inner.last_id, now_millis);
        inner.last_id = Some(id);
        info!(report = %id, calculator = %draft.calculator_id, "report saved");
        inner.reports.push(Report::from_draft(id, draft));
        id
    }

    /// Copy of the current contents, in insertion order.
    pub fn list(&self) -> Vec<Report> {
        self.inner.read().reports.clone()
    }

    /// Copy of one report.
    pub fn get(&self, id: &ReportId) -> Option<Report> {
        self.inner.read().reports.iter().find(|r| &r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().reports.is_empty()
    }
}
