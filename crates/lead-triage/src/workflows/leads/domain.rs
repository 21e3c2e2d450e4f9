use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier assigned by the backing store to each assessment document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl AssessmentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One assessment submission as stored by the intake form.
///
/// Only the fields the scoring and reporting pipeline reads are typed. Every
/// other key of the source document is preserved untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    /// Submission date as typed by the form, usually `dd/mm/yyyy`.
    #[serde(
        rename = "data",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_on: Option<String>,
    #[serde(
        rename = "empresa",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    #[serde(
        rename = "nome",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        rename = "celular",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "receitaAnual",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub annual_revenue: Option<String>,
    #[serde(
        rename = "setor",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<String>,
    #[serde(
        rename = "nivelMaturidadeSelecionado",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub maturity_level: Option<String>,
    /// Final assessment score (0-100) computed by the intake form.
    #[serde(
        rename = "pontuacaoTotalFinal",
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_score: Option<f64>,
    #[serde(
        rename = "cargo",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AssessmentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: AssessmentId(id.into()),
            ..Self::default()
        }
    }
}

/// Lead temperature derived from the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadFlag {
    Hot,
    Warm,
    Cold,
}

impl LeadFlag {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Warm => "WARM",
            Self::Cold => "COLD",
        }
    }

    pub const fn ordered() -> [LeadFlag; 3] {
        [Self::Hot, Self::Warm, Self::Cold]
    }
}

impl std::fmt::Display for LeadFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Role tier matched against the high-potential role lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTier {
    Hot,
    Warm,
}

impl RoleTier {
    pub const fn points(self) -> f64 {
        match self {
            Self::Hot => 100.0,
            Self::Warm => 50.0,
        }
    }
}

/// Assessment extended with its derived score and temperature.
///
/// Built once per load of the collection and never written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAssessment {
    #[serde(flatten)]
    pub record: AssessmentRecord,
    #[serde(rename = "_score")]
    pub score: u8,
    #[serde(rename = "_flag")]
    pub flag: LeadFlag,
}

impl ScoredAssessment {
    pub fn id(&self) -> &AssessmentId {
        &self.record.id
    }
}

/// Text field decoder. Numbers and booleans are kept as their text form; blank
/// strings, arrays, and objects are treated as missing.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(raw)) => Some(raw),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    };
    Ok(text.filter(|value| !value.trim().is_empty()))
}

/// Accepts numbers and numeric strings; anything else is treated as missing.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let score = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    Ok(score.filter(|score| score.is_finite()))
}
