//! Keyword tables for diagnostic finding extraction
//!
//! All keywords are lowercase; callers match them against lowercased text.

use crate::model::{Condition, ImageQuality, Severity};

/// Disease conditions, in reporting order. "Normal" is not listed: it is
/// only reported when none of these match.
pub const CONDITION_KEYWORDS: &[(Condition, &[&str])] = &[
    (Condition::Cnv, &["cnv", "choroidal neovascularization"]),
    (Condition::Dme, &["dme", "diabetic macular edema"]),
    (Condition::Drusen, &["drusen"]),
];

pub const NORMAL_KEYWORD: &str = "normal";

/// Severity tiers, highest first; the first tier that matches wins
pub const SEVERITY_TIERS: &[(Severity, &[&str])] = &[
    (Severity::High, &["urgent", "immediate"]),
    (Severity::Medium, &["monitor", "follow"]),
];

/// Anatomical locations, in reporting order
pub const LOCATION_TERMS: &[&str] = &[
    "macula",
    "fovea",
    "optic disc",
    "peripheral",
    "central",
    "temporal",
    "nasal",
];

pub const LOCATION_NOT_SPECIFIED: &str = "Not specified";

pub const CONSULT_RECOMMENDATION: &str =
    "Consult with a retinal specialist or ophthalmologist for comprehensive evaluation";
pub const MONITOR_RECOMMENDATION: &str =
    "Schedule regular monitoring and follow-up examinations";
pub const URGENT_RECOMMENDATION: &str = "Seek immediate medical attention";
pub const DEFAULT_RECOMMENDATION: &str =
    "Continue routine eye examinations as advised by your healthcare provider";

/// Recommendation triggers, in reporting order; every match is included
pub const RECOMMENDATION_TRIGGERS: &[(&str, &[&str])] = &[
    (CONSULT_RECOMMENDATION, &["specialist", "ophthalmologist"]),
    (MONITOR_RECOMMENDATION, &["monitor"]),
    (URGENT_RECOMMENDATION, &["urgent", "immediate"]),
];

/// Image quality tiers; the first tier that matches wins
pub const IMAGE_QUALITY_TIERS: &[(ImageQuality, &[&str])] = &[
    (ImageQuality::Poor, &["poor quality", "blurry"]),
    (ImageQuality::Excellent, &["excellent", "high quality"]),
];

pub const RELIABILITY_BASE: i32 = 85;
pub const RELIABILITY_MIN: i32 = 50;
pub const RELIABILITY_MAX: i32 = 95;

/// Independent reliability adjustments; several may apply at once
pub const RELIABILITY_ADJUSTMENTS: &[(i32, &[&str])] = &[
    (10, &["clear", "distinct"]),
    (-15, &["unclear", "artifact"]),
];
