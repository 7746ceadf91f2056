//! Evaluator configuration read from the environment

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::evaluator::Locale;

/// Settings for the blood test evaluator
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Language of analysis lines and recommendations
    pub locale: Locale,
    /// JSON rule table replacing the standard one
    pub rules_path: Option<PathBuf>,
    /// Emit a placeholder line when nothing could be evaluated
    pub empty_panel_placeholder: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::English,
            rules_path: None,
            empty_panel_placeholder: true,
        }
    }
}

impl EvaluatorConfig {
    /// Load from `ANALYSIS_LOCALE`, `BLOOD_RULES_PATH` and `ANALYSIS_EMPTY_PLACEHOLDER`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let locale = match lookup("ANALYSIS_LOCALE") {
            Some(raw) => raw.parse::<Locale>().unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, defaults.locale);
                defaults.locale
            }),
            None => defaults.locale,
        };

        let rules_path = lookup("BLOOD_RULES_PATH")
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let empty_panel_placeholder = match lookup("ANALYSIS_EMPTY_PLACEHOLDER") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    warn!("Invalid ANALYSIS_EMPTY_PLACEHOLDER value '{}', using default", other);
                    defaults.empty_panel_placeholder
                }
            },
            None => defaults.empty_panel_placeholder,
        };

        info!(
            "Evaluator configuration: locale={}, custom_rules={}, empty_panel_placeholder={}",
            locale,
            rules_path.is_some(),
            empty_panel_placeholder
        );

        Self {
            locale,
            rules_path,
            empty_panel_placeholder,
        }
    }
}
