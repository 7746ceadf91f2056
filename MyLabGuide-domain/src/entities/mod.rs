pub mod conversions;
pub mod panel_input;

// Re-export common types for easier imports
pub use blood_test::{
    Analyte, AnalysisLine, AnalysisResult, AnalyzedBloodTest, BloodTestRecord,
    CreateBloodTestRequest, LabPanel, Level, LineKind, PanelError, RiskTier, TrendDirection,
};
pub use panel_input::{parse_panel_input, ParsedPanel, RejectedField};
