use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::blood_test::{Analyte, LabPanel, PanelError};

/// A form field whose value could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedField {
    /// Field name as submitted
    pub field: String,
    /// Raw value as submitted
    pub raw: String,
}

/// Result of parsing raw form input into a panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPanel {
    pub panel: LabPanel,
    /// Values that were dropped because they are not usable numbers
    pub rejected: Vec<RejectedField>,
}

/// Parse one raw value. Accepts a decimal comma.
fn parse_value(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Turn raw form input keyed by analyte name into a validated panel.
///
/// Unknown field names are an error, as are two non-blank fields naming the
/// same analyte (`glucose` and `Glukoz`). Blank values are skipped, and values
/// that do not parse to a finite non-negative number are dropped and listed
/// in [`ParsedPanel::rejected`].
pub fn parse_panel_input(raw: &BTreeMap<String, String>) -> Result<ParsedPanel, PanelError> {
    let mut parsed = ParsedPanel::default();
    let mut seen = BTreeSet::new();

    for (field, value) in raw {
        let analyte: Analyte = field.parse()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.insert(analyte) {
            return Err(PanelError::DuplicateAnalyte(analyte));
        }

        match parse_value(trimmed) {
            Some(number) => {
                parsed.panel.insert(analyte, number)?;
            }
            None => parsed.rejected.push(RejectedField {
                field: field.clone(),
                raw: value.clone(),
            }),
        }
    }

    Ok(parsed)
}

/// Whether any field carries a non-blank value
pub fn has_any_value(raw: &BTreeMap<String, String>) -> bool {
    raw.values().any(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parses_trimmed_values_and_decimal_comma() {
        let parsed = parse_panel_input(&input(&[
            ("glucose", " 95 "),
            ("white_blood_cells", "5,4"),
            ("Kreatinin", "0.9"),
        ]))
        .unwrap();

        assert_eq!(parsed.panel.get(Analyte::Glucose), Some(95.0));
        assert_eq!(parsed.panel.get(Analyte::WhiteBloodCells), Some(5.4));
        assert_eq!(parsed.panel.get(Analyte::Creatinine), Some(0.9));
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let parsed = parse_panel_input(&input(&[("glucose", "  "), ("iron", "")])).unwrap();
        assert!(parsed.panel.is_empty());
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_unusable_values_are_rejected() {
        let parsed = parse_panel_input(&input(&[
            ("glucose", "abc"),
            ("iron", "-5"),
            ("platelets", "NaN"),
            ("hemoglobin", "inf"),
            ("cholesterol", "185"),
        ]))
        .unwrap();

        assert_eq!(parsed.panel.len(), 1);
        assert_eq!(parsed.panel.get(Analyte::Cholesterol), Some(185.0));

        let fields: Vec<&str> = parsed.rejected.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, vec!["glucose", "hemoglobin", "iron", "platelets"]);
        assert_eq!(parsed.rejected[0].raw, "abc");
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let result = parse_panel_input(&input(&[("glucoze", "90")]));
        assert_eq!(result, Err(PanelError::UnknownAnalyte("glucoze".to_string())));
    }

    #[test]
    fn test_same_analyte_under_two_keys_is_an_error() {
        let result = parse_panel_input(&input(&[("glucose", "90"), ("Glukoz", "140")]));
        assert_eq!(result, Err(PanelError::DuplicateAnalyte(Analyte::Glucose)));

        let result = parse_panel_input(&input(&[("iron", "abc"), ("Demir", "80")]));
        assert_eq!(result, Err(PanelError::DuplicateAnalyte(Analyte::Iron)));

        // A blank duplicate carries nothing to conflict with
        let parsed = parse_panel_input(&input(&[("glucose", "90"), ("Glukoz", " ")])).unwrap();
        assert_eq!(parsed.panel.get(Analyte::Glucose), Some(90.0));
    }

    #[test]
    fn test_has_any_value() {
        assert!(!has_any_value(&input(&[("glucose", " ")])));
        assert!(has_any_value(&input(&[("glucose", " "), ("iron", "80")])));
        assert!(!has_any_value(&BTreeMap::new()));
    }
}
