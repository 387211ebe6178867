use std::fmt::Write;

use shared::{Endpoint, HealthStatus, HistoryBatch, Image, PredictionResult, health_label, health_of};

/// Plain-text report of a completed batch, one block per image.
pub fn render_batch(batch: &HistoryBatch) -> String {
    let mut out = format!(
        "Batch {} ({}) - {} image(s)\n",
        batch.id(),
        batch.category(),
        batch.len()
    );
    let endpoints = batch.category().expand();
    for (image, group) in batch.entries() {
        out.push_str(&render_entry(image, endpoints, group));
    }
    out
}

pub fn render_entry(image: &Image, endpoints: &[Endpoint], group: &[PredictionResult]) -> String {
    let mut out = format!("{} ({} bytes)", image.name(), image.size());
    if let Some(healthy) = health_of(group) {
        let _ = write!(out, " [{}]", health_label(healthy));
    }
    out.push('\n');

    for (endpoint, result) in endpoints.iter().zip(group) {
        let details = result
            .detail_lines()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "  [{}]", endpoint);
        if !details.is_empty() {
            let _ = write!(out, " {}", details);
        }
        if !result.is_success() {
            let _ = write!(out, " ({})", result.status);
        }
        out.push('\n');
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    if health.is_healthy() {
        "Inference service is healthy".to_string()
    } else {
        format!("Inference service reported status: {}", health.status)
    }
}
