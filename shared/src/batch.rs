use std::future::Future;

use futures::future::try_join_all;

use crate::endpoint::{Category, Endpoint};
use crate::history::HistoryBatch;
use crate::image::Image;
use crate::prediction::{PredictionFailed, PredictionResult};

/// Classifies one image against one endpoint.
///
/// Implementations must be safe to call many times concurrently from the
/// same caller. The returned future need not be `Send`, so browser
/// implementations fit as well as native ones.
pub trait Classifier {
    fn classify(
        &self,
        image: &Image,
        endpoint: Endpoint,
    ) -> impl Future<Output = Result<PredictionResult, PredictionFailed>>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(
        &self,
        image: &Image,
        endpoint: Endpoint,
    ) -> impl Future<Output = Result<PredictionResult, PredictionFailed>> {
        (**self).classify(image, endpoint)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("No images selected")]
    NoImages,
    #[error(transparent)]
    Failed(#[from] PredictionFailed),
}

/// Runs every (image, endpoint) pair for `category` concurrently and groups
/// the results per image.
///
/// The whole cross product is in flight at once. The first failure fails the
/// batch; the remaining calls are dropped, which cancels them for
/// implementations whose futures own their request.
pub async fn run_batch<C: Classifier>(
    classifier: &C,
    images: &[Image],
    category: Category,
) -> Result<HistoryBatch, BatchError> {
    if images.is_empty() {
        return Err(BatchError::NoImages);
    }

    let endpoints = category.expand();
    log::info!(
        "Dispatching batch: {} image(s) x {} endpoint(s) for category {}",
        images.len(),
        endpoints.len(),
        category
    );

    let per_image = images.iter().map(|image| {
        try_join_all(
            endpoints
                .iter()
                .map(move |&endpoint| classifier.classify(image, endpoint)),
        )
    });

    match try_join_all(per_image).await {
        Ok(result_groups) => {
            log::info!("Batch completed: {} result group(s)", result_groups.len());
            Ok(HistoryBatch::new(category, images.to_vec(), result_groups))
        }
        Err(e) => {
            log::warn!("Batch failed, discarding all results: {}", e);
            Err(BatchError::Failed(e))
        }
    }
}
