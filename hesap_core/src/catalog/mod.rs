//! # Calculator Catalog
//!
//! Static table of every formula the application offers. A calculator is data,
//! not a code path: its input schema, precondition, formula and formatting
//! rules all live in one [`CalculatorDefinition`], so the gate, the report
//! builder and the renderer treat all nine the same way.
//!
//! ## Usage
//!
//! ```rust
//! use hesap_core::catalog;
//! use hesap_core::input::InputValues;
//!
//! let def = catalog::get("basinc").unwrap();
//! let inputs = InputValues::from_pairs([("F", 10.0), ("A", 2.0)]);
//!
//! assert!(def.is_valid(&inputs));
//! assert_eq!(def.compute(&inputs), 5.0);
//! assert_eq!(def.format_result(5.0), "Basınç (P) = 5.00 Pa");
//! ```

mod definitions;

use crate::errors::{CalcError, CalcResult};
use crate::input::{format_number, InputEntry, InputValues};

pub use definitions::DEFINITIONS;

// ============================================================================
// Input Schema
// ============================================================================

/// One numeric field of a calculator form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputField {
    /// Schema key (e.g. "F", "deltaT")
    pub key: &'static str,
    /// Symbol shown next to the form input (e.g. "F", "ΔT")
    pub symbol: &'static str,
    /// Report label (e.g. "Kuvvet (F)")
    pub label: &'static str,
    /// Unit baked into the report echo; empty for dimensionless fields
    pub unit: &'static str,
    /// Value the form starts with
    pub default: f64,
}

impl InputField {
    pub const fn new(
        key: &'static str,
        symbol: &'static str,
        label: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            key,
            symbol,
            label,
            unit,
            default: 0.0,
        }
    }

    pub const fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    /// Human-readable echo of `value`, unit included when there is one.
    pub fn echo(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format_number(value)
        } else {
            format!("{} {}", format_number(value), self.unit)
        }
    }
}

// ============================================================================
// Calculator Definition
// ============================================================================

/// Everything needed to run, gate and report one formula.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorDefinition {
    /// Route slug (e.g. "basinc")
    pub id: &'static str,
    /// Report title and filename seed (e.g. "Basınç Hesaplama")
    pub title: &'static str,
    /// Short menu label (e.g. "Basınç")
    pub nav_label: &'static str,
    /// Formula in plain text
    pub formula: &'static str,
    /// Precondition in plain text
    pub precondition_text: &'static str,
    /// Ordered input schema
    pub input_fields: &'static [InputField],
    /// Name of the computed quantity (e.g. "Basınç")
    pub result_label: &'static str,
    /// Symbol of the computed quantity (e.g. "P")
    pub result_symbol: &'static str,
    /// Unit of the computed quantity
    pub result_unit: &'static str,
    /// Decimals used when formatting the result
    pub precision: usize,
    compute: fn(&InputValues) -> f64,
    precondition: fn(&InputValues) -> bool,
}

impl CalculatorDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        id: &'static str,
        title: &'static str,
        nav_label: &'static str,
        formula: &'static str,
        precondition_text: &'static str,
        input_fields: &'static [InputField],
        result: (&'static str, &'static str, &'static str),
        precision: usize,
        compute: fn(&InputValues) -> f64,
        precondition: fn(&InputValues) -> bool,
    ) -> Self {
        Self {
            id,
            title,
            nav_label,
            formula,
            precondition_text,
            input_fields,
            result_label: result.0,
            result_symbol: result.1,
            result_unit: result.2,
            precision,
            compute,
            precondition,
        }
    }

    /// Apply the formula. Only meaningful when [`is_valid`](Self::is_valid)
    /// holds for the same inputs; go through [`crate::gate::evaluate`] to get
    /// that guarantee.
    pub fn compute(&self, inputs: &InputValues) -> f64 {
        (self.compute)(inputs)
    }

    /// Domain precondition (e.g. denominator > 0).
    pub fn is_valid(&self, inputs: &InputValues) -> bool {
        (self.precondition)(inputs)
    }

    /// Schema field by key.
    pub fn field(&self, key: &str) -> Option<&'static InputField> {
        self.input_fields.iter().find(|f| f.key == key)
    }

    /// Ordered `label -> "value unit"` echo of the inputs.
    pub fn format_inputs(&self, inputs: &InputValues) -> Vec<InputEntry> {
        self.input_fields
            .iter()
            .map(|f| InputEntry::new(f.label, f.echo(inputs.get(f.key))))
            .collect()
    }

    /// `"<Label> (<symbol>) = <value> <unit>"` at the definition's precision.
    pub fn format_result(&self, value: f64) -> String {
        format!(
            "{} ({}) = {} {}",
            self.result_label,
            self.result_symbol,
            self.format_value(value),
            self.result_unit
        )
    }

    /// Value only, at the definition's precision (e.g. "5.00").
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Look up a calculator by route id.
pub fn get(id: &str) -> CalcResult<&'static CalculatorDefinition> {
    DEFINITIONS
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| CalcError::calculator_not_found(id))
}

/// All calculators in menu order.
pub fn all() -> &'static [CalculatorDefinition] {
    DEFINITIONS
}

/// All route ids in menu order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    DEFINITIONS.iter().map(|d| d.id)
}

// ============================================================================
// Markdown Generation for CALCULATORS.md
// ============================================================================

/// Generate a markdown reference of the whole catalog.
///
/// ```rust
/// use hesap_core::catalog::generate_catalog_markdown;
///
/// let md = generate_catalog_markdown();
/// assert!(md.contains("## Basınç Hesaplama (`basinc`)"));
/// assert!(md.contains("P = F / A"));
/// ```
pub fn generate_catalog_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str("# Hesap Calculator Reference\n\n");
    output.push_str("> Generated by `cargo run --bin gen-catalog`. Do not edit by hand.\n\n");

    output.push_str("| Id | Title | Formula | Valid when | Unit |\n");
    output.push_str("|---|---|---|---|---|\n");
    for def in all() {
        output.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            def.id, def.title, def.formula, def.precondition_text, def.result_unit
        ));
    }
    output.push('\n');

    for def in all() {
        output.push_str(&format!("## {} (`{}`)\n\n", def.title, def.id));
        output.push_str(&format!("**Formula:** `{}`\n\n", def.formula));
        output.push_str(&format!("**Valid when:** {}\n\n", def.precondition_text));
        output.push_str(&format!(
            "**Result:** {} ({}) in {} with {} decimals\n\n",
            def.result_label, def.result_symbol, def.result_unit, def.precision
        ));
        output.push_str("| Key | Symbol | Label | Unit | Default |\n");
        output.push_str("|---|---|---|---|---|\n");
        for field in def.input_fields {
            let unit = if field.unit.is_empty() { "-" } else { field.unit };
            output.push_str(&format!(
                "| `{}` | {} | {} | {} | {} |\n",
                field.key,
                field.symbol,
                field.label,
                unit,
                format_number(field.default)
            ));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_nine_unique_ids() {
        assert_eq!(all().len(), 9);
        let ids: HashSet<_> = ids().collect();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_field_keys_unique_per_definition() {
        for def in all() {
            let keys: HashSet<_> = def.input_fields.iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), def.input_fields.len(), "duplicate key in {}", def.id);
            assert!(!def.input_fields.is_empty());
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let err = get("kiris").unwrap_err();
        assert_eq!(
            err,
            CalcError::NotFound {
                kind: "Calculator".to_string(),
                id: "kiris".to_string()
            }
        );
    }

    #[test]
    fn test_format_inputs_order_and_units() {
        let def = get("basinc").unwrap();
        let inputs = InputValues::from_pairs([("F", 10.0), ("A", 2.0)]);
        let echo = def.format_inputs(&inputs);
        assert_eq!(
            echo,
            vec![
                InputEntry::new("Kuvvet (F)", "10 N"),
                InputEntry::new("Alan (A)", "2 m²"),
            ]
        );
    }

    #[test]
    fn test_dimensionless_echo_has_no_unit() {
        let def = get("deprem-yuku").unwrap();
        let inputs = InputValues::from_pairs([("SDS", 1.2), ("Rp", 2.0)]);
        let echo = def.format_inputs(&inputs);
        assert_eq!(echo[0], InputEntry::new("SDS", "1.2"));
        assert_eq!(echo[4], InputEntry::new("Davranış Katsayısı (Rp)", "2"));
    }

    #[test]
    fn test_format_result_precision() {
        assert_eq!(get("isil-genlesme").unwrap().format_result(0.001), "Uzama (ΔL) = 0.001000 m");
        assert_eq!(
            get("donme-momentumu").unwrap().format_result(12.346),
            "Dönme Momentumu (L) = 12.35 kg·m²/s"
        );
    }

    #[test]
    fn test_generate_catalog_markdown() {
        let md = generate_catalog_markdown();
        for def in all() {
            assert!(md.contains(def.title), "{} missing", def.id);
        }
        assert!(md.contains("| `eta` | η | Verim (η) | - | 0.85 |"));
    }
}
