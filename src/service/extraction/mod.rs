//! Rule-based extraction of diagnostic findings from free-text narratives
//!
//! Every field is derived independently by case-insensitive keyword search over
//! the whole narrative. There is no tokenization and no positional link between
//! a condition and its confidence score. Extraction cannot fail: text without
//! any known keyword yields the default for each field.

use std::collections::BTreeMap;

use regex::Regex;

use crate::model::{Condition, DiagnosticFinding, ImageQuality, Severity};

pub mod keywords;

use keywords::{
    CONDITION_KEYWORDS, DEFAULT_RECOMMENDATION, IMAGE_QUALITY_TIERS, LOCATION_NOT_SPECIFIED,
    LOCATION_TERMS, NORMAL_KEYWORD, RECOMMENDATION_TRIGGERS, RELIABILITY_ADJUSTMENTS,
    RELIABILITY_BASE, RELIABILITY_MAX, RELIABILITY_MIN, SEVERITY_TIERS,
};

/// Extracts a [`DiagnosticFinding`] from a model narrative
#[derive(Debug, Clone)]
pub struct DiagnosticExtractor {
    /// A word, then the nearest following one or two digit percentage
    confidence_pattern: Regex,
}

impl DiagnosticExtractor {
    pub fn new() -> Self {
        Self {
            confidence_pattern: Regex::new(r"([0-9A-Za-z_]+).*?([0-9]{1,2})%").unwrap(),
        }
    }

    /// Build a finding from the narrative
    pub fn extract(&self, text: &str) -> DiagnosticFinding {
        let lower = text.to_lowercase();

        DiagnosticFinding {
            primary_conditions: primary_conditions(&lower),
            confidence_scores: self.confidence_scores(text),
            severity: severity(&lower),
            location: location(&lower),
            recommendations: recommendations(&lower),
            image_quality: image_quality(&lower),
            reliability_score: reliability_score(&lower),
        }
    }

    /// Later matches for the same word overwrite earlier ones
    fn confidence_scores(&self, text: &str) -> BTreeMap<String, u8> {
        let mut scores = BTreeMap::new();
        for caps in self.confidence_pattern.captures_iter(text) {
            if let Ok(value) = caps[2].parse::<u8>() {
                scores.insert(caps[1].to_string(), value);
            }
        }
        scores
    }
}

impl Default for DiagnosticExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn primary_conditions(text: &str) -> Vec<Condition> {
    let mut conditions: Vec<Condition> = CONDITION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(condition, _)| *condition)
        .collect();

    if conditions.is_empty() {
        if text.contains(NORMAL_KEYWORD) {
            conditions.push(Condition::Normal);
        } else {
            conditions.push(Condition::RequiresFurtherEvaluation);
        }
    }

    conditions
}

fn severity(text: &str) -> Severity {
    SEVERITY_TIERS
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(severity, _)| *severity)
        .unwrap_or(Severity::Low)
}

fn location(text: &str) -> String {
    let found: Vec<&str> = LOCATION_TERMS
        .iter()
        .copied()
        .filter(|term| text.contains(term))
        .collect();

    if found.is_empty() {
        LOCATION_NOT_SPECIFIED.to_string()
    } else {
        found.join(", ")
    }
}

fn recommendations(text: &str) -> Vec<String> {
    let mut recommendations: Vec<String> = RECOMMENDATION_TRIGGERS
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(recommendation, _)| recommendation.to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }

    recommendations
}

fn image_quality(text: &str) -> ImageQuality {
    IMAGE_QUALITY_TIERS
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(quality, _)| *quality)
        .unwrap_or(ImageQuality::Good)
}

// "unclear" also contains "clear", so both adjustments fire on it.
fn reliability_score(text: &str) -> u8 {
    let score = RELIABILITY_ADJUSTMENTS
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .fold(RELIABILITY_BASE, |score, (delta, _)| score + delta);

    score.clamp(RELIABILITY_MIN, RELIABILITY_MAX) as u8
}
