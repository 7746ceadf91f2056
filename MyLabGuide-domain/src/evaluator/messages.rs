//! Localized analysis text.
//!
//! Analytes and levels stay enums everywhere else; this is the only place
//! that turns them into words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::blood_test::{Analyte, Level, RiskTier, TrendDirection};

/// Language of the generated text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Turkish,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Turkish => "tr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "tr" | "turkish" => Ok(Locale::Turkish),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Display name of an analyte
pub fn label(locale: Locale, analyte: Analyte) -> &'static str {
    match (locale, analyte) {
        (Locale::English, Analyte::Glucose) => "Glucose",
        (Locale::English, Analyte::Iron) => "Iron",
        (Locale::English, Analyte::Hemoglobin) => "Hemoglobin",
        (Locale::English, Analyte::Platelets) => "Platelets",
        (Locale::English, Analyte::WhiteBloodCells) => "White blood cells",
        (Locale::English, Analyte::Creatinine) => "Creatinine",
        (Locale::English, Analyte::Cholesterol) => "Cholesterol",
        (Locale::Turkish, Analyte::Glucose) => "Glukoz",
        (Locale::Turkish, Analyte::Iron) => "Demir",
        (Locale::Turkish, Analyte::Hemoglobin) => "Hemoglobin",
        (Locale::Turkish, Analyte::Platelets) => "Trombosit",
        (Locale::Turkish, Analyte::WhiteBloodCells) => "Beyaz küre",
        (Locale::Turkish, Analyte::Creatinine) => "Kreatinin",
        (Locale::Turkish, Analyte::Cholesterol) => "Kolesterol",
    }
}

pub fn level_word(locale: Locale, level: Level) -> &'static str {
    match (locale, level) {
        (Locale::English, Level::Low) => "low",
        (Locale::English, Level::Normal) => "normal",
        (Locale::English, Level::Borderline) => "borderline high",
        (Locale::English, Level::High) => "high",
        (Locale::Turkish, Level::Low) => "düşük",
        (Locale::Turkish, Level::Normal) => "normal",
        (Locale::Turkish, Level::Borderline) => "sınırda yüksek",
        (Locale::Turkish, Level::High) => "yüksek",
    }
}

/// Short advice appended to a classification line, if any
pub fn advice(locale: Locale, analyte: Analyte, level: Level) -> Option<&'static str> {
    use Analyte::*;

    let text = match (locale, analyte, level) {
        (_, _, Level::Normal) => return None,

        (Locale::English, Glucose, Level::Low) => "Hypoglycemia risk possible.",
        (Locale::English, Glucose, Level::Borderline) => "Follow-up advised.",
        (Locale::English, Glucose, Level::High) => "Diabetes risk possible.",
        (Locale::English, Iron, Level::Low) => "May cause fatigue.",
        (Locale::English, Iron, _) => "Doctor check-up advised.",
        (Locale::English, Hemoglobin, Level::Low) => "Possible sign of anemia.",
        (Locale::English, Platelets, Level::Low) => "Bleeding risk possible.",
        (Locale::English, Platelets, _) => "Clotting risk possible.",
        (Locale::English, WhiteBloodCells, Level::Low) => "Immunity may be weakened.",
        (Locale::English, WhiteBloodCells, _) => "Possible sign of infection.",
        (Locale::English, Creatinine, Level::High) => "Kidney function should be evaluated.",
        (Locale::English, Cholesterol, Level::High) => "Cardiovascular risk may increase.",

        (Locale::Turkish, Glucose, Level::Low) => "Hipoglisemi riski olabilir.",
        (Locale::Turkish, Glucose, Level::Borderline) => "Takip önerilir.",
        (Locale::Turkish, Glucose, Level::High) => "Diyabet riski olabilir.",
        (Locale::Turkish, Iron, Level::Low) => "Halsizlik yapabilir.",
        (Locale::Turkish, Iron, _) => "Doktor kontrolü önerilir.",
        (Locale::Turkish, Hemoglobin, Level::Low) => "Kansızlık belirtisi olabilir.",
        (Locale::Turkish, Platelets, Level::Low) => "Kanama riski olabilir.",
        (Locale::Turkish, Platelets, _) => "Pıhtı riski olabilir.",
        (Locale::Turkish, WhiteBloodCells, Level::Low) => "Bağışıklık zayıflamış olabilir.",
        (Locale::Turkish, WhiteBloodCells, _) => "Enfeksiyon belirtisi olabilir.",
        (Locale::Turkish, Creatinine, Level::High) => "Böbrek fonksiyonları değerlendirilmelidir.",
        (Locale::Turkish, Cholesterol, Level::High) => "Kalp-damar riski artabilir.",

        // Bands a custom rule table may introduce that carry no advice
        _ => return None,
    };
    Some(text)
}

/// Shortest decimal form: 130, 1.2, 5.45
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

pub fn classification_line(locale: Locale, analyte: Analyte, level: Level, value: f64) -> String {
    let mut line = format!(
        "{} {} ({}).",
        label(locale, analyte),
        level_word(locale, level),
        format_value(value)
    );
    if let Some(advice) = advice(locale, analyte, level) {
        line.push(' ');
        line.push_str(advice);
    }
    line
}

pub fn trend_line(
    locale: Locale,
    analyte: Analyte,
    direction: TrendDirection,
    previous: f64,
    current: f64,
) -> String {
    let name = label(locale, analyte);
    let (prev, cur) = (format_value(previous), format_value(current));

    match (locale, direction) {
        (Locale::English, TrendDirection::Increased) => format!(
            "{} increased relative to previous measurement ({} → {}).",
            name, prev, cur
        ),
        (Locale::English, TrendDirection::Decreased) => format!(
            "{} decreased relative to previous measurement ({} → {}).",
            name, prev, cur
        ),
        (Locale::English, TrendDirection::Unchanged) => {
            format!("{} unchanged relative to previous measurement.", name)
        }
        (Locale::Turkish, TrendDirection::Increased) => {
            format!("{} önceki ölçüme göre artmış ({} → {}).", name, prev, cur)
        }
        (Locale::Turkish, TrendDirection::Decreased) => {
            format!("{} önceki ölçüme göre düşmüş ({} → {}).", name, prev, cur)
        }
        (Locale::Turkish, TrendDirection::Unchanged) => {
            format!("{} önceki ölçüme göre değişmemiş.", name)
        }
    }
}

pub fn recommendation(locale: Locale, tier: RiskTier) -> &'static str {
    match (locale, tier) {
        (Locale::English, RiskTier::Low) => {
            "Your values are broadly within the normal range. Regular check-ups are recommended."
        }
        (Locale::English, RiskTier::Medium) => {
            "Some values are outside the reference range. Follow-up and lifestyle adjustments are recommended."
        }
        (Locale::English, RiskTier::High) => {
            "Multiple abnormal values were found. Please consult a physician for a clinical evaluation."
        }
        (Locale::Turkish, RiskTier::Low) => "Değerleriniz genel olarak normal aralıktadır.",
        (Locale::Turkish, RiskTier::Medium) => {
            "Bazı değerler sınır dışıdır. Takip ve yaşam tarzı düzenlemesi önerilir."
        }
        (Locale::Turkish, RiskTier::High) => {
            "Birden fazla anormal değer var. Doktora başvurmanız önerilir."
        }
    }
}

/// Line shown when nothing could be evaluated
pub fn placeholder(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "No automatic assessment could be made from the values provided.",
        Locale::Turkish => "Girilen değerlere göre otomatik bir değerlendirme yapılamadı.",
    }
}
