use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::endpoint::Category;
use crate::image::Image;
use crate::prediction::PredictionResult;

/// Results for one image in one batch, in endpoint order.
pub type ResultGroup = Vec<PredictionResult>;

/// A completed batch. `images[i]` produced `result_groups[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryBatch {
    id: Uuid,
    category: Category,
    completed_at: DateTime<Utc>,
    images: Vec<Image>,
    result_groups: Vec<ResultGroup>,
}

impl HistoryBatch {
    pub(crate) fn new(category: Category, images: Vec<Image>, result_groups: Vec<ResultGroup>) -> Self {
        debug_assert_eq!(images.len(), result_groups.len());
        Self {
            id: Uuid::new_v4(),
            category,
            completed_at: Utc::now(),
            images,
            result_groups,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn result_groups(&self) -> &[ResultGroup] {
        &self.result_groups
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Each image paired with its result group.
    pub fn entries(&self) -> impl Iterator<Item = (&Image, &[PredictionResult])> {
        self.images
            .iter()
            .zip(self.result_groups.iter().map(Vec::as_slice))
    }
}

/// Completed batches for this session, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    batches: VecDeque<HistoryBatch>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, batch: HistoryBatch) {
        self.batches.push_front(batch);
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryBatch> {
        self.batches.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryBatch> {
        self.batches.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryBatch> {
        self.batches.iter()
    }

    /// At most `limit` of the newest batches.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryBatch> {
        self.batches.iter().take(limit)
    }

    /// Batches paired with their display number; the newest is numbered `len()`.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &HistoryBatch)> {
        let len = self.batches.len();
        self.batches.iter().enumerate().map(move |(i, b)| (len - i, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(name: &str) -> HistoryBatch {
        HistoryBatch::new(
            Category::Disease,
            vec![Image::from_file_name(name, vec![1])],
            vec![Vec::new()],
        )
    }

    #[test]
    fn newest_batch_is_first() {
        let mut log = HistoryLog::new();
        log.record(batch("first.jpg"));
        log.record(batch("second.jpg"));
        log.record(batch("third.jpg"));

        let names: Vec<_> = log.iter().map(|b| b.images()[0].name().to_string()).collect();
        assert_eq!(names, ["third.jpg", "second.jpg", "first.jpg"]);
        assert_eq!(log.latest().map(|b| b.images()[0].name()), Some("third.jpg"));
    }

    #[test]
    fn recent_caps_without_dropping() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.record(batch(&format!("{i}.jpg")));
        }

        assert_eq!(log.recent(2).count(), 2);
        assert_eq!(log.len(), 5);
        let numbers: Vec<_> = log.numbered().map(|(n, _)| n).collect();
        assert_eq!(numbers, [5, 4, 3, 2, 1]);
    }
}
