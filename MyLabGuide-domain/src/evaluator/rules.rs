//! Threshold table used to classify analyte values.
//!
//! Each analyte has an ordered list of bounded bands followed by an
//! unbounded `otherwise` outcome, so every value lands in exactly one band.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::blood_test::{Analyte, Level};

/// Errors raised while loading or validating a rule table
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("Failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rule table has no rule for {0}")]
    MissingAnalyte(Analyte),

    #[error("Band {index} of {analyte} can never match; cutoffs must increase")]
    UnreachableBand { analyte: Analyte, index: usize },

    #[error("Band {index} of {analyte} has a non-finite cutoff")]
    NonFiniteCutoff { analyte: Analyte, index: usize },
}

/// Upper bound of a band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    /// Strictly below the value
    Below(f64),
    /// Below or equal to the value
    AtMost(f64),
}

impl Cutoff {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Cutoff::Below(limit) => value < limit,
            Cutoff::AtMost(limit) => value <= limit,
        }
    }

    pub fn limit(self) -> f64 {
        match self {
            Cutoff::Below(limit) | Cutoff::AtMost(limit) => limit,
        }
    }

    /// Whether `next` admits strictly more values than `self`
    fn is_below(self, next: Cutoff) -> bool {
        let (a, b) = (self.limit(), next.limit());
        a < b || (a == b && matches!((self, next), (Cutoff::Below(_), Cutoff::AtMost(_))))
    }
}

/// Classification level plus the risk weight it contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub level: Level,
    pub weight: u32,
}

impl Outcome {
    pub const fn new(level: Level, weight: u32) -> Self {
        Self { level, weight }
    }
}

/// A bounded band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub upper: Cutoff,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Bands of one analyte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyteRule {
    /// Ascending bounded bands; the first that admits the value wins
    #[serde(default)]
    pub bands: Vec<Band>,
    /// Outcome for values above every band
    pub otherwise: Outcome,
}

impl AnalyteRule {
    fn band(upper: Cutoff, level: Level, weight: u32) -> Band {
        Band {
            upper,
            outcome: Outcome::new(level, weight),
        }
    }

    pub fn classify(&self, value: f64) -> Outcome {
        self.bands
            .iter()
            .find(|band| band.upper.admits(value))
            .map(|band| band.outcome)
            .unwrap_or(self.otherwise)
    }

    fn validate(&self, analyte: Analyte) -> Result<(), RuleTableError> {
        for (index, band) in self.bands.iter().enumerate() {
            if !band.upper.limit().is_finite() {
                return Err(RuleTableError::NonFiniteCutoff { analyte, index });
            }
            if index > 0 && !self.bands[index - 1].upper.is_below(band.upper) {
                return Err(RuleTableError::UnreachableBand { analyte, index });
            }
        }
        Ok(())
    }
}

/// Complete rule table, one rule per analyte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Analyte, AnalyteRule>",
    into = "BTreeMap<Analyte, AnalyteRule>"
)]
pub struct RuleTable {
    // Indexed by Analyte::index
    rules: Vec<AnalyteRule>,
}

impl RuleTable {
    /// The clinical reference table
    pub fn standard() -> Self {
        use Cutoff::{AtMost, Below};
        use Level::{Borderline, High, Low, Normal};

        let rule = |bands: Vec<Band>, level: Level, weight: u32| AnalyteRule {
            bands,
            otherwise: Outcome::new(level, weight),
        };

        let rules = Analyte::ALL
            .into_iter()
            .map(|analyte| match analyte {
                Analyte::Glucose => rule(
                    vec![
                        AnalyteRule::band(Below(70.0), Low, 2),
                        AnalyteRule::band(AtMost(110.0), Normal, 0),
                        AnalyteRule::band(AtMost(126.0), Borderline, 1),
                    ],
                    High,
                    3,
                ),
                Analyte::Iron => rule(
                    vec![
                        AnalyteRule::band(Below(60.0), Low, 2),
                        AnalyteRule::band(AtMost(170.0), Normal, 0),
                    ],
                    High,
                    1,
                ),
                Analyte::Hemoglobin => rule(vec![AnalyteRule::band(Below(12.0), Low, 2)], Normal, 0),
                Analyte::Platelets => rule(
                    vec![
                        AnalyteRule::band(Below(150.0), Low, 2),
                        AnalyteRule::band(AtMost(450.0), Normal, 0),
                    ],
                    High,
                    2,
                ),
                Analyte::WhiteBloodCells => rule(
                    vec![
                        AnalyteRule::band(Below(4.0), Low, 2),
                        AnalyteRule::band(AtMost(11.0), Normal, 0),
                    ],
                    High,
                    2,
                ),
                Analyte::Creatinine => rule(vec![AnalyteRule::band(AtMost(1.3), Normal, 0)], High, 3),
                Analyte::Cholesterol => rule(
                    vec![
                        AnalyteRule::band(Below(200.0), Normal, 0),
                        AnalyteRule::band(Below(240.0), Borderline, 1),
                    ],
                    High,
                    3,
                ),
            })
            .collect();

        Self { rules }
    }

    /// Build a table from per-analyte rules. Every analyte needs a rule.
    pub fn from_rules(mut rules: BTreeMap<Analyte, AnalyteRule>) -> Result<Self, RuleTableError> {
        let mut ordered = Vec::with_capacity(Analyte::ALL.len());
        for analyte in Analyte::ALL {
            let rule = rules
                .remove(&analyte)
                .ok_or(RuleTableError::MissingAnalyte(analyte))?;
            rule.validate(analyte)?;
            ordered.push(rule);
        }
        Ok(Self { rules: ordered })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RuleTableError> {
        let rules: BTreeMap<Analyte, AnalyteRule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RuleTableError> {
        let json = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn rule(&self, analyte: Analyte) -> &AnalyteRule {
        &self.rules[analyte.index()]
    }

    pub fn classify(&self, analyte: Analyte, value: f64) -> Outcome {
        self.rule(analyte).classify(value)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<Analyte, AnalyteRule>> for RuleTable {
    type Error = RuleTableError;

    fn try_from(rules: BTreeMap<Analyte, AnalyteRule>) -> Result<Self, Self::Error> {
        Self::from_rules(rules)
    }
}

impl From<RuleTable> for BTreeMap<Analyte, AnalyteRule> {
    fn from(table: RuleTable) -> Self {
        Analyte::ALL.into_iter().zip(table.rules).collect()
    }
}
