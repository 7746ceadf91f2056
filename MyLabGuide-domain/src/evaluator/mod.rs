//! Rule-based blood test evaluator.
//!
//! Classifies every present analyte against the rule table, compares it with
//! the most recent previous test, and sums the band weights into a risk score
//! that selects the tier and recommendation. Evaluation is pure and never
//! fails.

pub mod messages;
pub mod rules;

pub use messages::Locale;
pub use rules::{AnalyteRule, Band, Cutoff, Outcome, RuleTable, RuleTableError};

use crate::config::EvaluatorConfig;
use crate::entities::blood_test::{
    AnalysisLine, AnalysisResult, BloodTestRecord, LineKind, RiskTier, TrendDirection,
};

/// Evaluates blood tests against a rule table
#[derive(Debug, Clone, PartialEq)]
pub struct BloodTestEvaluator {
    rules: RuleTable,
    locale: Locale,
    empty_panel_placeholder: bool,
}

impl Default for BloodTestEvaluator {
    fn default() -> Self {
        Self::new(RuleTable::standard(), Locale::English)
    }
}

impl BloodTestEvaluator {
    pub fn new(rules: RuleTable, locale: Locale) -> Self {
        Self {
            rules,
            locale,
            empty_panel_placeholder: true,
        }
    }

    /// Whether an empty panel yields a placeholder line or no lines at all
    pub fn with_empty_panel_placeholder(mut self, enabled: bool) -> Self {
        self.empty_panel_placeholder = enabled;
        self
    }

    /// Build an evaluator from configuration, loading a custom rule table if one is set
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self, RuleTableError> {
        let rules = match &config.rules_path {
            Some(path) => RuleTable::from_json_file(path)?,
            None => RuleTable::standard(),
        };
        Ok(Self::new(rules, config.locale).with_empty_panel_placeholder(config.empty_panel_placeholder))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Evaluate `current`. `previous` holds earlier tests newest first;
    /// only the first one is used for trends.
    pub fn evaluate(&self, current: &BloodTestRecord, previous: &[BloodTestRecord]) -> AnalysisResult {
        let prior = previous.first().map(|record| &record.panel);
        let mut lines = Vec::new();
        let mut risk_score = 0u32;

        for (analyte, value) in current.panel.iter() {
            let outcome = self.rules.classify(analyte, value);
            risk_score = risk_score.saturating_add(outcome.weight);
            lines.push(AnalysisLine {
                analyte: Some(analyte),
                kind: LineKind::Classification(outcome.level),
                text: messages::classification_line(self.locale, analyte, outcome.level, value),
            });

            if let Some(before) = prior.and_then(|panel| panel.get(analyte)) {
                let direction = TrendDirection::between(before, value);
                lines.push(AnalysisLine {
                    analyte: Some(analyte),
                    kind: LineKind::Trend(direction),
                    text: messages::trend_line(self.locale, analyte, direction, before, value),
                });
            }
        }

        if lines.is_empty() && self.empty_panel_placeholder {
            lines.push(AnalysisLine {
                analyte: None,
                kind: LineKind::Placeholder,
                text: messages::placeholder(self.locale).to_string(),
            });
        }

        let risk_tier = RiskTier::from_score(risk_score);
        AnalysisResult {
            lines,
            risk_score,
            risk_tier,
            recommendation: messages::recommendation(self.locale, risk_tier).to_string(),
        }
    }
}

/// Evaluate with the standard rule table and English text
pub fn evaluate(current: &BloodTestRecord, previous: &[BloodTestRecord]) -> AnalysisResult {
    BloodTestEvaluator::default().evaluate(current, previous)
}
