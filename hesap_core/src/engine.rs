//! # Engine
//!
//! Composition root. The engine owns the settings and the single
//! [`ReportStore`] for the process; callers pass it around by reference.
//!
//! Opening a calculator and saving a report both require a signed-in
//! [`Identity`]. Listing and rendering are not gated.
//!
//! ```rust
//! use hesap_core::engine::{Engine, Identity};
//!
//! let engine = Engine::default();
//! let user = Identity::signed_in("Ayşe");
//!
//! let mut session = engine.open(&user, "basinc").unwrap();
//! session.update_field("F", "10").unwrap();
//! session.update_field("A", "2").unwrap();
//!
//! let id = engine.save(&user, &mut session).unwrap();
//! let doc = engine.render_by_id(&id).unwrap();
//! assert_eq!(doc.suggested_filename(), "basınç-hesaplama-rapor.pdf");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog;
use crate::errors::{CalcError, CalcResult};
use crate::gate::CalculatorSession;
use crate::render::{self, Document};
use crate::report::{Report, ReportId, ReportStore};
use crate::settings::EngineSettings;

/// What the session collaborator tells us about the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub authenticated: bool,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn signed_in(display_name: impl Into<String>) -> Self {
        Identity {
            authenticated: true,
            display_name: Some(display_name.into()),
        }
    }

    pub fn anonymous() -> Self {
        Identity::default()
    }

    fn require(&self, action: &str) -> CalcResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            warn!(action, "rejected: not authenticated");
            Err(CalcError::not_authenticated(action))
        }
    }
}

#[derive(Debug, Default)]
pub struct Engine {
    settings: EngineSettings,
    store: ReportStore,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Engine {
            settings,
            store: ReportStore::new(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Open the calculator page for `calculator_id` with default inputs.
    pub fn open(&self, identity: &Identity, calculator_id: &str) -> CalcResult<CalculatorSession> {
        identity.require("open calculator")?;
        let definition = catalog::get(calculator_id)?;
        Ok(CalculatorSession::new(definition))
    }

    /// Save the session's current outcome as a new report.
    ///
    /// The inputs echo, result text and timestamp are copied at this moment;
    /// editing the session afterwards does not reach the stored report.
    pub fn save(&self, identity: &Identity, session: &mut CalculatorSession) -> CalcResult<ReportId> {
        identity.require("save report")?;
        let draft = session.report_draft(&self.settings.report.date_format).map_err(|e| {
            warn!(calculator = session.definition().id, error = %e, "save rejected");
            e
        })?;
        let id = self.store.append(draft);
        session.mark_saved(id);
        Ok(id)
    }

    /// All reports in insertion order.
    pub fn reports(&self) -> Vec<Report> {
        self.store.list()
    }

    pub fn report(&self, id: &ReportId) -> CalcResult<Report> {
        self.store
            .get(id)
            .ok_or_else(|| CalcError::report_not_found(id.to_string()))
    }

    /// Lay out `report` with the configured page geometry.
    pub fn render(&self, report: &Report) -> Document {
        render::render(report, &self.settings.layout)
    }

    pub fn render_by_id(&self, id: &ReportId) -> CalcResult<Document> {
        let report = self.report(id)?;
        let document = self.render(&report);
        info!(report = %id, pages = document.page_count(), "report rendered");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Identity {
        Identity::signed_in("Ayşe")
    }

    #[test]
    fn test_saved_snapshot_survives_later_edits() {
        let engine = Engine::default();
        let mut session = engine.open(&user(), "basinc").unwrap();
        session.update_field("F", "10").unwrap();
        session.update_field("A", "2").unwrap();

        let id = engine.save(&user(), &mut session).unwrap();
        assert_eq!(session.saved_report(), Some(&id));

        session.update_field("F", "99").unwrap();
        session.update_field("A", "3").unwrap();
        assert!(session.saved_report().is_none());

        let report = engine.report(&id).unwrap();
        assert_eq!(report.inputs_snapshot()[0].label, "Kuvvet (F)");
        assert_eq!(report.inputs_snapshot()[0].value, "10 N");
        assert_eq!(report.inputs_snapshot()[1].value, "2 m²");
        assert_eq!(report.result(), "Basınç (P) = 5.00 Pa");
        assert_eq!(report.calculator_id(), "basinc");
    }

    #[test]
    fn test_anonymous_identity_rejected() {
        let engine = Engine::default();
        let err = engine.open(&Identity::anonymous(), "basinc").unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHENTICATED");

        let mut session = engine.open(&user(), "basinc").unwrap();
        session.update_field("F", "10").unwrap();
        session.update_field("A", "2").unwrap();
        assert!(engine.save(&Identity::anonymous(), &mut session).is_err());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_unknown_calculator_and_report() {
        let engine = Engine::default();
        let err = engine.open(&user(), "yok").unwrap_err();
        assert!(matches!(err, CalcError::NotFound { .. }));

        let missing = ReportId { millis: 1, seq: 0 };
        assert!(matches!(engine.render_by_id(&missing), Err(CalcError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_session_not_saved() {
        let engine = Engine::default();
        let mut session = engine.open(&user(), "basinc").unwrap();
        session.update_field("F", "10").unwrap();
        let err = engine.save(&user(), &mut session).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(engine.reports().len(), 0);
    }

    #[test]
    fn test_configured_date_format_used() {
        let mut settings = EngineSettings::default();
        settings.report.date_format = "fixed".to_string();
        let engine = Engine::new(settings);

        let mut session = engine.open(&user(), "mekanik-guc").unwrap();
        session.set_value("T", 2.0).unwrap();
        session.set_value("w", 3.0).unwrap();
        let id = engine.save(&user(), &mut session).unwrap();

        let doc = engine.render_by_id(&id).unwrap();
        let texts: Vec<&str> = doc.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[1], "Tarih: fixed");
        assert_eq!(texts.last().copied(), Some("Sonuç: Mekanik Güç (P) = 6.00 W"));
    }

    #[test]
    fn test_unvalidated_date_format_is_an_error() {
        let mut settings = EngineSettings::default();
        settings.report.date_format = "%d.%m.%Y %".to_string();
        let engine = Engine::new(settings);

        let mut session = engine.open(&user(), "basinc").unwrap();
        session.update_field("F", "10").unwrap();
        session.update_field("A", "2").unwrap();

        let err = engine.save(&user(), &mut session).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(engine.store().is_empty());
        assert!(session.saved_report().is_none());
    }

    #[test]
    fn test_reports_listed_in_save_order() {
        let engine = Engine::default();
        let mut a = engine.open(&user(), "basinc").unwrap();
        a.update_field("F", "10").unwrap();
        a.update_field("A", "2").unwrap();
        let mut b = engine.open(&user(), "donme-momentumu").unwrap();
        b.update_field("I", "2").unwrap();
        b.update_field("w", "4").unwrap();

        let r1 = engine.save(&user(), &mut a).unwrap();
        let r2 = engine.save(&user(), &mut b).unwrap();
        let ids: Vec<ReportId> = engine.reports().iter().map(|r| *r.id()).collect();
        assert_eq!(ids, vec![r1, r2]);
    }
}
