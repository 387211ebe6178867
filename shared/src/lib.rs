mod batch;
mod endpoint;
mod flow;
mod history;
mod image;
mod prediction;

pub use batch::{BatchError, Classifier, run_batch};
pub use endpoint::{Category, Endpoint};
pub use flow::{FlowStatus, PredictionFlow};
pub use history::{HistoryBatch, HistoryLog, ResultGroup};
pub use image::{Image, ImageSelection, mime_type_for};
pub use prediction::{
    AgeValue, HealthStatus, PredictionFailed, PredictionPayload, PredictionResult,
    confidence_percent, health_label, health_of,
};
