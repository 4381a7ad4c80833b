//! # Validation Gate
//!
//! Decides whether a result can be trusted. [`evaluate`] checks the
//! calculator's precondition and only then runs its formula, so a
//! [`CalculationOutcome::Valid`] always comes from inputs that passed the
//! precondition.
//!
//! [`CalculatorSession`] is the page-level model built on top of it: it owns the
//! form, re-runs the gate on every change and exposes `can_save` derived from
//! the latest outcome only. An outcome computed from inputs that have since
//! been edited is never offered for saving.
//!
//! ```rust
//! use hesap_core::catalog;
//! use hesap_core::gate::{CalculatorSession, CalculationOutcome};
//!
//! let mut session = CalculatorSession::new(catalog::get("basinc").unwrap());
//! session.update_field("F", "10").unwrap();
//! session.update_field("A", "2").unwrap();
//! assert_eq!(session.outcome(), CalculationOutcome::Valid { value: 5.0 });
//! assert!(session.can_save());
//!
//! session.update_field("A", "0").unwrap();
//! assert!(!session.can_save());
//! ```

use std::fmt::Write;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CalculatorDefinition;
use crate::errors::{CalcError, CalcResult};
use crate::input::{FormState, InputValues};
use crate::report::{ReportDraft, ReportId};

/// Result of running a calculator against one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CalculationOutcome {
    Valid { value: f64 },
    Invalid,
}

impl CalculationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, CalculationOutcome::Valid { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            CalculationOutcome::Valid { value } => Some(*value),
            CalculationOutcome::Invalid => None,
        }
    }
}

/// Run `definition` against `inputs`.
///
/// Pure: no side effects, identical inputs give identical outcomes.
pub fn evaluate(definition: &CalculatorDefinition, inputs: &InputValues) -> CalculationOutcome {
    if definition.is_valid(inputs) {
        CalculationOutcome::Valid {
            value: definition.compute(inputs),
        }
    } else {
        CalculationOutcome::Invalid
    }
}

/// One open calculator page: form state plus the outcome for exactly those
/// inputs.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    form: FormState,
    outcome: CalculationOutcome,
    saved: Option<ReportId>,
}

impl CalculatorSession {
    pub fn new(definition: &'static CalculatorDefinition) -> Self {
        let form = FormState::new(definition);
        let outcome = evaluate(definition, form.values());
        CalculatorSession {
            form,
            outcome,
            saved: None,
        }
    }

    pub fn definition(&self) -> &'static CalculatorDefinition {
        self.form.definition()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Apply raw text to one field and re-evaluate.
    pub fn update_field(&mut self, key: &str, raw: &str) -> CalcResult<CalculationOutcome> {
        self.form.update_field(key, raw)?;
        Ok(self.refresh())
    }

    /// Set one field from a typed number and re-evaluate.
    pub fn set_value(&mut self, key: &str, value: f64) -> CalcResult<CalculationOutcome> {
        self.form.set_value(key, value)?;
        Ok(self.refresh())
    }

    /// Restore defaults and re-evaluate.
    pub fn reset(&mut self) -> CalculationOutcome {
        self.form.reset();
        self.refresh()
    }

    fn refresh(&mut self) -> CalculationOutcome {
        self.outcome = evaluate(self.definition(), self.form.values());
        self.saved = None;
        debug!(calculator = self.definition().id, outcome = ?self.outcome, "re-evaluated");
        self.outcome
    }

    /// Outcome for the inputs currently in the form.
    pub fn outcome(&self) -> CalculationOutcome {
        self.outcome
    }

    /// Formatted result for display, `None` while invalid.
    pub fn result_text(&self) -> Option<String> {
        self.outcome.value().map(|v| self.definition().format_result(v))
    }

    /// Whether the save affordance should be offered.
    pub fn can_save(&self) -> bool {
        self.outcome.is_valid()
    }

    /// Id of the report saved from the current inputs, if any.
    pub fn saved_report(&self) -> Option<&ReportId> {
        self.saved.as_ref()
    }

    pub(crate) fn mark_saved(&mut self, id: ReportId) {
        self.saved = Some(id);
    }

    /// Snapshot the current valid outcome into a report draft.
    ///
    /// Everything is copied out of the form, so later edits cannot reach the
    /// draft. Fails with [`CalcError::InvalidInput`] when the current outcome
    /// is invalid or `date_format` is not a usable strftime pattern.
    pub fn report_draft(&self, date_format: &str) -> CalcResult<ReportDraft> {
        let definition = self.definition();
        let value = self.outcome.value().ok_or_else(|| {
            CalcError::invalid_input(
                definition.id,
                format!("precondition not met: {}", definition.precondition_text),
            )
        })?;

        let mut created_at = String::new();
        write!(created_at, "{}", Local::now().format(date_format)).map_err(|_| {
            CalcError::invalid_input(
                definition.id,
                format!("date_format '{date_format}' is not a valid strftime pattern"),
            )
        })?;

        Ok(ReportDraft {
            calculator_id: definition.id.to_string(),
            title: definition.title.to_string(),
            inputs_snapshot: definition.format_inputs(self.form.values()),
            result: definition.format_result(value),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    fn session(id: &str, pairs: &[(&str, &str)]) -> CalculatorSession {
        let mut s = CalculatorSession::new(catalog::get(id).unwrap());
        for (k, v) in pairs {
            s.update_field(k, v).unwrap();
        }
        s
    }

    #[test]
    fn test_basinc_boundary() {
        let s = session("basinc", &[("F", "10"), ("A", "2")]);
        assert_eq!(s.outcome(), CalculationOutcome::Valid { value: 5.0 });
        assert_eq!(s.result_text().unwrap(), "Basınç (P) = 5.00 Pa");

        let s = session("basinc", &[("F", "10"), ("A", "0")]);
        assert_eq!(s.outcome(), CalculationOutcome::Invalid);
        assert!(s.result_text().is_none());
    }

    #[test]
    fn test_deprem_yuku() {
        let s = session(
            "deprem-yuku",
            &[("SDS", "1"), ("Wp", "10"), ("z", "5"), ("h", "10"), ("Rp", "2"), ("Ip", "1")],
        );
        assert_eq!(s.result_text().unwrap(), "Deprem Yükü (F) = 10.00 kN");
    }

    #[test]
    fn test_isil_genlesme_six_decimals_and_zero_delta() {
        let s = session("isil-genlesme", &[("L0", "2"), ("alpha", "0.00001"), ("deltaT", "50")]);
        assert_eq!(s.result_text().unwrap(), "Uzama (ΔL) = 0.001000 m");

        let s = session("isil-genlesme", &[("L0", "1000"), ("alpha", "5"), ("deltaT", "0")]);
        assert_eq!(s.outcome(), CalculationOutcome::Invalid);
    }

    #[test]
    fn test_non_numeric_input_reads_as_zero() {
        let s = session("basinc", &[("F", "10"), ("A", "iki")]);
        assert_eq!(s.form().values().get("A"), 0.0);
        assert!(!s.can_save());
    }

    #[test]
    fn test_stale_valid_outcome_not_saveable() {
        let mut s = session("basinc", &[("F", "10"), ("A", "2")]);
        assert!(s.can_save());
        s.update_field("A", "-1").unwrap();
        assert!(!s.can_save());
        assert!(s.report_draft("%Y").is_err());
        s.update_field("A", "4").unwrap();
        assert_eq!(s.outcome().value(), Some(2.5));
    }

    #[test]
    fn test_unknown_field_keeps_outcome() {
        let mut s = session("basinc", &[("F", "10"), ("A", "2")]);
        assert!(s.update_field("X", "1").is_err());
        assert!(s.can_save());
    }

    #[test]
    fn test_defaults_make_fan_evaluable() {
        let s = session("fan-gucu", &[("Q", "2"), ("dp", "100")]);
        assert_eq!(s.outcome().value(), Some(200.0));
    }

    #[test]
    fn test_report_draft_snapshot() {
        let s = session("basinc", &[("F", "10"), ("A", "2")]);
        let draft = s.report_draft("%d.%m.%Y").unwrap();
        assert_eq!(draft.title, "Basınç Hesaplama");
        assert_eq!(draft.inputs_snapshot[0].value, "10 N");
        assert_eq!(draft.inputs_snapshot[1].value, "2 m²");
        assert_eq!(draft.result, "Basınç (P) = 5.00 Pa");
    }

    #[test]
    fn test_report_draft_rejects_bad_date_format() {
        let s = session("basinc", &[("F", "10"), ("A", "2")]);
        let err = s.report_draft("%Y-%").unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
        assert!(s.report_draft("%Y").is_ok());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&CalculationOutcome::Valid { value: 5.0 }).unwrap();
        assert_eq!(json, r#"{"status":"Valid","value":5.0}"#);
        let json = serde_json::to_string(&CalculationOutcome::Invalid).unwrap();
        assert_eq!(json, r#"{"status":"Invalid"}"#);
    }

    proptest! {
        #[test]
        fn evaluate_is_deterministic(
            idx in 0usize..9,
            raw in proptest::collection::vec(-1.0e6f64..1.0e6, 6),
        ) {
            let def = &catalog::all()[idx];
            let inputs = InputValues::from_pairs(
                def.input_fields.iter().zip(raw.iter()).map(|(f, v)| (f.key, *v)),
            );
            let first = evaluate(def, &inputs);
            let second = evaluate(def, &inputs);
            prop_assert_eq!(first.is_valid(), def.is_valid(&inputs));
            match (first, second) {
                (CalculationOutcome::Valid { value: a }, CalculationOutcome::Valid { value: b }) => {
                    prop_assert!(a.to_bits() == b.to_bits());
                }
                (CalculationOutcome::Invalid, CalculationOutcome::Invalid) => {}
                _ => prop_assert!(false, "outcome changed between runs"),
            }
        }
    }
}
