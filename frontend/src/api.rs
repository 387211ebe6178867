use gloo_file::Blob;
use gloo_net::http::Request;
use shared::{Classifier, Endpoint, Image, PredictionFailed, PredictionResult};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Browser-side client for the inference service, built on `fetch`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlooClassifier {
    base_url: String,
}

impl Default for GlooClassifier {
    fn default() -> Self {
        Self::new(option_env!("PREDICT_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }
}

impl GlooClassifier {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Classifier for GlooClassifier {
    async fn classify(
        &self,
        image: &Image,
        endpoint: Endpoint,
    ) -> Result<PredictionResult, PredictionFailed> {
        if image.is_empty() {
            log::warn!("Refusing to send empty image {}", image.name());
            return Err(PredictionFailed);
        }

        let blob = Blob::new_with_options(image.bytes(), Some(image.mime_type()));
        let form_data = web_sys::FormData::new().map_err(|e| {
            log::warn!("Failed to create form data: {:?}", e);
            PredictionFailed
        })?;
        form_data
            .append_with_blob_and_filename("file", blob.as_ref(), image.name())
            .map_err(|e| {
                log::warn!("Failed to attach {}: {:?}", image.name(), e);
                PredictionFailed
            })?;

        let request = Request::post(&self.endpoint_url(endpoint))
            .body(form_data)
            .map_err(|e| {
                log::warn!("Failed to build request: {}", e);
                PredictionFailed
            })?;

        let response = request.send().await.map_err(|e| {
            log::warn!("Network error for {} on {}: {}", image.name(), endpoint, e);
            PredictionFailed
        })?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("Server error: {} - {}", status, body);
            return Err(PredictionFailed);
        }

        response.json::<PredictionResult>().await.map_err(|e| {
            log::warn!("Failed to parse response: {}", e);
            PredictionFailed
        })
    }
}
