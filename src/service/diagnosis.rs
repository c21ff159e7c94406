//! Diagnosis service
//!
//! Runs one image through the relay, extracts a structured finding from the
//! narrative and wraps it with an id, timestamp and disclaimer.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::model::{DiagnosisReport, DiagnosisRequest};
use crate::service::extraction::DiagnosticExtractor;
use crate::service::prompts::DIAGNOSIS_DISCLAIMER;
use crate::service::relay::{RelayError, RelayService};

pub struct DiagnosisService {
    relay: Arc<RelayService>,
    extractor: DiagnosticExtractor,
}

impl DiagnosisService {
    pub fn new(relay: Arc<RelayService>) -> Self {
        Self {
            relay,
            extractor: DiagnosticExtractor::new(),
        }
    }

    pub async fn diagnose(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<DiagnosisReport, RelayError> {
        let image = select_image(request)?;

        let narrative = self.relay.analyze_image(image, request.analysis_type).await?;
        let finding = self.extractor.extract(&narrative);

        let report = DiagnosisReport {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            analysis_type: request.analysis_type,
            finding,
            full_analysis: narrative,
            disclaimer: DIAGNOSIS_DISCLAIMER.to_string(),
        };

        let conditions: Vec<String> = report
            .finding
            .primary_conditions
            .iter()
            .map(ToString::to_string)
            .collect();
        tracing::info!(
            id = %report.id,
            analysis_type = ?report.analysis_type,
            conditions = %conditions.join(", "),
            severity = ?report.finding.severity,
            reliability = report.finding.reliability_score,
            "Diagnosis completed"
        );

        Ok(report)
    }
}

/// `imageUrl` takes precedence over `imageData`
fn select_image(request: &DiagnosisRequest) -> Result<&str, RelayError> {
    [&request.image_url, &request.image_data]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|image| !image.trim().is_empty())
        .ok_or_else(|| {
            RelayError::InvalidRequest("Image URL or image data is required".to_string())
        })
}
