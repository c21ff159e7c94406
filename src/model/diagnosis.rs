use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Condition label reported in a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    #[serde(rename = "CNV")]
    Cnv,
    #[serde(rename = "DME")]
    Dme,
    Drusen,
    Normal,
    #[serde(rename = "Requires further evaluation")]
    RequiresFurtherEvaluation,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Condition::Cnv => "CNV",
            Condition::Dme => "DME",
            Condition::Drusen => "Drusen",
            Condition::Normal => "Normal",
            Condition::RequiresFurtherEvaluation => "Requires further evaluation",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImageQuality {
    Poor,
    Good,
    Excellent,
}

/// Structured finding derived from a diagnostic narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticFinding {
    /// Never empty; falls back to "Requires further evaluation"
    pub primary_conditions: Vec<Condition>,
    /// Word preceding a percentage in the narrative, mapped to that percentage
    pub confidence_scores: BTreeMap<String, u8>,
    pub severity: Severity,
    /// Comma-joined anatomical terms, or "Not specified"
    pub location: String,
    /// Never empty
    pub recommendations: Vec<String>,
    pub image_quality: ImageQuality,
    /// Always within [50, 95]
    pub reliability_score: u8,
}

/// Imaging modality the caller says the image comes from
///
/// A hint only: matching is case-insensitive and anything unrecognised,
/// including `null`, is treated as `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Oct,
    Fundus,
    #[default]
    General,
}

impl AnalysisType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "oct" => AnalysisType::Oct,
            "fundus" => AnalysisType::Fundus,
            _ => AnalysisType::General,
        }
    }
}

impl<'de> Deserialize<'de> for AnalysisType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map_or_else(AnalysisType::default, AnalysisType::from_label))
    }
}

/// Body of `POST /v1/diagnosis`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub image_url: Option<String>,
    pub image_data: Option<String>,
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

/// Finding plus the envelope returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub analysis_type: AnalysisType,
    #[serde(flatten)]
    pub finding: DiagnosticFinding,
    /// Model narrative the finding was extracted from, verbatim
    pub full_analysis: String,
    pub disclaimer: String,
}
