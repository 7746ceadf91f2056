use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use my_lab_guide_data::models::blood_test::{CreateStoredBloodTest, StoredBloodTest};
use tracing::warn;
use uuid::Uuid;

use crate::entities::blood_test::{
    Analyte, AnalysisResult, AnalyzedBloodTest, BloodTestRecord, LabPanel, RiskTier,
    TEST_DATE_FORMAT,
};

// Conversion functions between domain entities and data models.
// Names follow convert_to_[target_layer]_[model_name].

/// Parse a string ID to UUID with a descriptive error
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert an evaluated record to the data layer's create model
pub fn convert_to_data_create_request(
    user_id: &str,
    record: &BloodTestRecord,
    analysis: &AnalysisResult,
) -> CreateStoredBloodTest {
    let values: BTreeMap<String, f64> = record
        .panel
        .iter()
        .map(|(analyte, value)| (analyte.key().to_string(), value))
        .collect();

    CreateStoredBloodTest {
        user_id: user_id.to_string(),
        test_date: record.date.format(TEST_DATE_FORMAT).to_string(),
        values,
        analysis: analysis.texts(),
        recommendation: analysis.recommendation.clone(),
        risk_tier: analysis.risk_tier.as_str().to_string(),
        risk_score: analysis.risk_score,
    }
}

/// Rebuild a panel from stored values. Entries that no longer map to a valid
/// analyte value are skipped with a warning so old rows stay readable.
fn convert_to_domain_panel(test_id: &str, values: &BTreeMap<String, f64>) -> LabPanel {
    let mut panel = LabPanel::new();
    for (key, value) in values {
        let analyte = match key.parse::<Analyte>() {
            Ok(analyte) => analyte,
            Err(e) => {
                warn!("Skipping stored value of test {}: {}", test_id, e);
                continue;
            }
        };
        if let Err(e) = panel.insert(analyte, *value) {
            warn!("Skipping stored value of test {}: {}", test_id, e);
        }
    }
    panel
}

/// Convert from the data model to the domain entity
pub fn convert_to_domain_test(stored: StoredBloodTest) -> Result<AnalyzedBloodTest, String> {
    let id = parse_string_to_uuid(&stored.id)?;
    let date = NaiveDate::parse_from_str(&stored.test_date, TEST_DATE_FORMAT)
        .map_err(|e| format!("Invalid test date '{}': {}", stored.test_date, e))?;
    let created_at = DateTime::parse_from_rfc3339(&stored.created_at)
        .map_err(|e| format!("Invalid creation time '{}': {}", stored.created_at, e))?
        .with_timezone(&Utc);
    let risk_tier = stored.risk_tier.parse::<RiskTier>()?;
    let panel = convert_to_domain_panel(&stored.id, &stored.values);

    Ok(AnalyzedBloodTest {
        id,
        user_id: stored.user_id,
        record: BloodTestRecord::new(date, panel),
        analysis: stored.analysis,
        recommendation: stored.recommendation,
        risk_tier,
        risk_score: stored.risk_score,
        created_at,
    })
}
