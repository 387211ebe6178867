use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::endpoint::Endpoint;

/// Body returned by `POST /predict/{endpoint}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: String,
    pub result: PredictionPayload,
    pub message: String,
}

/// Recognized keys of a prediction payload. Anything else lands in `extra`
/// and is serialized back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_healthy: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for AgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeValue::Number(n) => write!(f, "{}", n),
            AgeValue::Text(s) => f.write_str(s),
        }
    }
}

/// A single classification call failed. Carries no status code or cause;
/// those are logged where the failure happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Prediction failed")]
pub struct PredictionFailed;

/// Body of the inference service's `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl PredictionResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Confidence as a whole percentage, rounded half up.
    pub fn confidence_percent(&self) -> Option<u32> {
        self.result.confidence.map(confidence_percent)
    }

    pub fn format_confidence(&self) -> Option<String> {
        self.confidence_percent().map(|p| format!("{}%", p))
    }

    /// Which category a stored result most likely came from, judged by the
    /// keys it carries.
    pub fn kind(&self) -> Endpoint {
        let payload = &self.result;
        if payload.disease.as_deref().is_some_and(|d| !d.is_empty()) {
            Endpoint::Disease
        } else if payload.variety.as_deref().is_some_and(|v| !v.is_empty()) {
            Endpoint::Variety
        } else if payload.age_days.is_some() || payload.age.is_some() {
            Endpoint::Age
        } else {
            Endpoint::Disease
        }
    }

    /// `age_days` wins over `age` when both are present.
    pub fn age_label(&self) -> Option<(&'static str, String)> {
        match (&self.result.age_days, &self.result.age) {
            (Some(days), _) => Some(("Age (days)", days.to_string())),
            (None, Some(age)) => Some(("Age", age.to_string())),
            (None, None) => None,
        }
    }

    /// Labelled lines in display order: disease, variety, age, confidence.
    pub fn detail_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = Vec::new();
        if let Some(disease) = self.result.disease.as_deref().filter(|d| !d.is_empty()) {
            lines.push(("Disease", disease.to_string()));
        }
        if let Some(variety) = self.result.variety.as_deref().filter(|v| !v.is_empty()) {
            lines.push(("Variety", variety.to_string()));
        }
        if let Some(age) = self.age_label() {
            lines.push(age);
        }
        if let Some(confidence) = self.format_confidence() {
            lines.push(("Confidence", confidence));
        }
        lines
    }
}

pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0).round().max(0.0) as u32
}

/// First `is_healthy` verdict found in a result group.
pub fn health_of(group: &[PredictionResult]) -> Option<bool> {
    group.iter().find_map(|r| r.result.is_healthy)
}

pub fn health_label(healthy: bool) -> &'static str {
    if healthy { "Healthy" } else { "Unhealthy" }
}
