use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use shared::{
    BatchError, Category, Classifier, Endpoint, FlowStatus, Image, PredictionFailed,
    PredictionFlow, PredictionPayload, PredictionResult, run_batch,
};

/// Answers every call after an endpoint-specific delay so that age finishes
/// first and disease last. Optionally fails one (image, endpoint) pair.
#[derive(Default)]
struct ScriptedClassifier {
    calls: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_on: Option<(&'static str, Endpoint)>,
}

impl ScriptedClassifier {
    fn failing_on(image: &'static str, endpoint: Endpoint) -> Self {
        Self {
            fail_on: Some((image, endpoint)),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn delay_for(endpoint: Endpoint) -> Duration {
    match endpoint {
        Endpoint::Disease => Duration::from_millis(30),
        Endpoint::Variety => Duration::from_millis(20),
        Endpoint::Age => Duration::from_millis(10),
    }
}

fn canned_result(image: &Image, endpoint: Endpoint) -> PredictionResult {
    let mut payload = PredictionPayload::default();
    match endpoint {
        Endpoint::Disease => {
            payload.disease = Some("blast".into());
            payload.confidence = Some(0.91);
            payload.is_healthy = Some(false);
        }
        Endpoint::Variety => {
            payload.variety = Some("ADT45".into());
            payload.confidence = Some(0.66);
        }
        Endpoint::Age => payload.age_days = Some(54.0),
    }
    PredictionResult {
        status: "success".into(),
        result: payload,
        message: format!("{}:{}", image.name(), endpoint),
    }
}

impl Classifier for ScriptedClassifier {
    async fn classify(
        &self,
        image: &Image,
        endpoint: Endpoint,
    ) -> Result<PredictionResult, PredictionFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some((image.name(), endpoint)) {
            return Err(PredictionFailed);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(delay_for(endpoint)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);

        Ok(canned_result(image, endpoint))
    }
}

fn images(names: &[&str]) -> Vec<Image> {
    names
        .iter()
        .map(|name| Image::from_file_name(*name, name.as_bytes().to_vec()))
        .collect()
}

#[tokio::test]
async fn single_category_issues_one_call_per_image() {
    let classifier = ScriptedClassifier::default();
    let input = images(&["a.jpg", "b.jpg", "c.jpg"]);

    let batch = run_batch(&classifier, &input, Category::Variety).await.unwrap();

    assert_eq!(classifier.calls(), 3);
    assert_eq!(batch.images().len(), batch.result_groups().len());
    assert!(batch.result_groups().iter().all(|group| group.len() == 1));
    assert_eq!(batch.result_groups()[1][0].message, "b.jpg:variety");
    assert_eq!(batch.category(), Category::Variety);
}

#[tokio::test]
async fn all_category_keeps_endpoint_order_despite_completion_order() {
    let classifier = ScriptedClassifier::default();
    let input = images(&["a.jpg", "b.jpg"]);

    let batch = run_batch(&classifier, &input, Category::All).await.unwrap();

    assert_eq!(classifier.calls(), 6);
    assert_eq!(batch.images().len(), 2);
    assert_eq!(batch.result_groups().len(), 2);
    for (image, group) in batch.entries() {
        let messages: Vec<_> = group.iter().map(|r| r.message.clone()).collect();
        assert_eq!(
            messages,
            [
                format!("{}:disease", image.name()),
                format!("{}:variety", image.name()),
                format!("{}:age", image.name()),
            ]
        );
        let kinds: Vec<_> = group.iter().map(PredictionResult::kind).collect();
        assert_eq!(kinds, [Endpoint::Disease, Endpoint::Variety, Endpoint::Age]);
    }
}

#[tokio::test]
async fn whole_cross_product_is_in_flight_at_once() {
    let classifier = ScriptedClassifier::default();
    let input = images(&["a.jpg", "b.jpg", "c.jpg"]);

    run_batch(&classifier, &input, Category::All).await.unwrap();

    assert_eq!(classifier.max_in_flight.load(Ordering::SeqCst), 9);
}

#[tokio::test]
async fn image_order_matches_submission_order() {
    let classifier = ScriptedClassifier::default();
    let input = images(&["z.jpg", "m.jpg", "a.jpg"]);

    let batch = run_batch(&classifier, &input, Category::Age).await.unwrap();

    let names: Vec<_> = batch.images().iter().map(Image::name).collect();
    assert_eq!(names, ["z.jpg", "m.jpg", "a.jpg"]);
    let messages: Vec<_> = batch.result_groups().iter().map(|g| g[0].message.as_str()).collect();
    assert_eq!(messages, ["z.jpg:age", "m.jpg:age", "a.jpg:age"]);
}

#[tokio::test]
async fn one_failure_fails_the_batch_and_drops_siblings() {
    let classifier = ScriptedClassifier::failing_on("b.jpg", Endpoint::Variety);
    let input = images(&["a.jpg", "b.jpg"]);

    let outcome = run_batch(&classifier, &input, Category::All).await;
    assert_eq!(outcome, Err(BatchError::Failed(PredictionFailed)));

    // siblings were dropped before they could finish
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(classifier.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_input_dispatches_nothing() {
    let classifier = ScriptedClassifier::default();

    let outcome = run_batch(&classifier, &[], Category::All).await;

    assert_eq!(outcome, Err(BatchError::NoImages));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn flow_prepends_successful_batches() {
    let mut flow = PredictionFlow::new(ScriptedClassifier::default());
    assert_eq!(flow.status(), &FlowStatus::Idle);

    flow.submit(&images(&["first.jpg"])).await.unwrap();
    flow.set_category(Category::All);
    let before = flow.history().len();
    let batch = flow.submit(&images(&["a.jpg", "b.jpg"])).await.unwrap();

    assert_eq!(flow.history().len(), before + 1);
    assert_eq!(flow.history().get(0), Some(&batch));
    assert_eq!(flow.history().get(1).map(|b| b.images()[0].name()), Some("first.jpg"));
    assert_eq!(flow.status().batch(), Some(&batch));
    assert!(batch.result_groups().iter().all(|g| g.len() == 3));
}

#[tokio::test]
async fn flow_failure_leaves_history_untouched() {
    let classifier = ScriptedClassifier::failing_on("bad.jpg", Endpoint::Disease);
    let mut flow = PredictionFlow::new(classifier).with_category(Category::Disease);
    flow.submit(&images(&["good.jpg"])).await.unwrap();

    let outcome = flow.submit(&images(&["good.jpg", "bad.jpg"])).await;

    assert!(matches!(outcome, Err(BatchError::Failed(_))));
    assert_eq!(flow.history().len(), 1);
    assert_eq!(flow.status().error(), Some("Prediction failed"));

    // the caller may retry right away
    flow.submit(&images(&["good.jpg"])).await.unwrap();
    assert_eq!(flow.history().len(), 2);
}

#[tokio::test]
async fn flow_ignores_empty_submission() {
    let mut flow = PredictionFlow::new(ScriptedClassifier::default());

    assert_eq!(flow.submit(&[]).await, Err(BatchError::NoImages));
    assert_eq!(flow.status(), &FlowStatus::Idle);
    assert!(flow.history().is_empty());
}
