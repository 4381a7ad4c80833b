//! # Form Input
//!
//! Typed form state for a calculator page. Every calculator declares an
//! ordered input schema; [`FormState`] keeps one raw text and one parsed
//! number per schema key and refuses keys the schema does not know.
//!
//! Parsing is fail-soft: anything that is not a finite number reads as `0.0`,
//! so the form is always computable.
//!
//! ```rust
//! use hesap_core::catalog;
//! use hesap_core::input::FormState;
//!
//! let mut form = FormState::new(catalog::get("basinc").unwrap());
//! form.update_field("F", "10").unwrap();
//! form.update_field("A", "abc").unwrap();
//! assert_eq!(form.values().get("F"), 10.0);
//! assert_eq!(form.values().get("A"), 0.0);
//! assert!(form.update_field("Z", "1").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CalculatorDefinition;
use crate::errors::{CalcError, CalcResult};

/// Parse raw text the way the form does: trimmed, and `0.0` for anything
/// that is not a finite number.
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Numeric inputs keyed by schema key. Missing keys read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues(BTreeMap<String, f64>);

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        InputValues(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Value for `key`, `0.0` when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }
}

/// One human-readable `label: value` pair, as echoed into a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEntry {
    pub label: String,
    pub value: String,
}

impl InputEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        InputEntry {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Live state of one calculator form.
#[derive(Debug, Clone)]
pub struct FormState {
    definition: &'static CalculatorDefinition,
    raw: BTreeMap<&'static str, String>,
    values: InputValues,
}

impl FormState {
    /// New form pre-filled with the schema defaults.
    pub fn new(definition: &'static CalculatorDefinition) -> Self {
        let mut form = FormState {
            definition,
            raw: BTreeMap::new(),
            values: InputValues::new(),
        };
        form.reset();
        form
    }

    pub fn definition(&self) -> &'static CalculatorDefinition {
        self.definition
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        for field in self.definition.input_fields {
            self.raw.insert(field.key, format_number(field.default));
            self.values.set(field.key, field.default);
        }
    }

    /// Apply raw text typed into field `key`. Returns the parsed number.
    ///
    /// Fails with [`CalcError::UnknownField`] when `key` is not in the schema;
    /// the form is left untouched in that case.
    pub fn update_field(&mut self, key: &str, raw: &str) -> CalcResult<f64> {
        let field = self
            .definition
            .field(key)
            .ok_or_else(|| CalcError::unknown_field(self.definition.id, key))?;
        let value = parse_number(raw);
        self.raw.insert(field.key, raw.to_string());
        self.values.set(field.key, value);
        Ok(value)
    }

    /// Set a field from an already-typed number.
    pub fn set_value(&mut self, key: &str, value: f64) -> CalcResult<()> {
        let field = self
            .definition
            .field(key)
            .ok_or_else(|| CalcError::unknown_field(self.definition.id, key))?;
        let value = if value.is_finite() { value } else { 0.0 };
        self.raw.insert(field.key, format_number(value));
        self.values.set(field.key, value);
        Ok(())
    }

    /// Text currently shown in field `key`.
    pub fn raw_text(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &InputValues {
        &self.values
    }
}

/// Plain number rendering used in input echoes (`10`, `0.85`, `0.00001`).
///
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`), the way the web form echoed them.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        format!("{}", value)
    }
}
