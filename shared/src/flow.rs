use crate::batch::{BatchError, Classifier, run_batch};
use crate::endpoint::Category;
use crate::history::{HistoryBatch, HistoryLog};
use crate::image::Image;

/// What a display surface should show for the latest submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlowStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Succeeded(HistoryBatch),
}

impl FlowStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn batch(&self) -> Option<&HistoryBatch> {
        match self {
            FlowStatus::Succeeded(batch) => Some(batch),
            _ => None,
        }
    }

    /// Status after a batch settles.
    pub fn settled(outcome: &Result<HistoryBatch, BatchError>) -> Self {
        match outcome {
            Ok(batch) => FlowStatus::Succeeded(batch.clone()),
            Err(e) => FlowStatus::Failed(e.to_string()),
        }
    }
}

/// A prediction session: one classifier, the chosen category, the current
/// status and the history of completed batches.
pub struct PredictionFlow<C> {
    classifier: C,
    category: Category,
    status: FlowStatus,
    history: HistoryLog,
}

impl<C: Classifier> PredictionFlow<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            category: Category::default(),
            status: FlowStatus::Idle,
            history: HistoryLog::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Runs one batch over `images`. On success the batch is prepended to the
    /// history; on failure the history is left as it was.
    pub async fn submit(&mut self, images: &[Image]) -> Result<HistoryBatch, BatchError> {
        if images.is_empty() {
            return Err(BatchError::NoImages);
        }

        self.status = FlowStatus::Loading;
        let outcome = run_batch(&self.classifier, images, self.category).await;
        self.status = FlowStatus::settled(&outcome);

        let batch = outcome?;
        self.history.record(batch.clone());
        Ok(batch)
    }
}
