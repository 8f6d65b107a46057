use page_logging::page_debug;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::types::map_reqwest_error;
use crate::{ClientSettings, FailureKind, RatingSubmission, ReactionSubmission, SubmitError};

/// Sends feedback labels. Success is any 2xx answer.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<(), SubmitError>;
    async fn submit_reaction(&self, submission: &ReactionSubmission) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: ClientSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), SubmitError> {
        let url = self
            .settings
            .endpoint(path)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| SubmitError::new(FailureKind::InvalidBody, err.to_string()))?;
        let client = self.build_client()?;

        page_debug!("POST {} ({} bytes)", url, payload.len());
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| SubmitError::new(map_reqwest_error(&err), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<(), SubmitError> {
        self.post_json(&self.settings.rating_path, submission).await
    }

    async fn submit_reaction(&self, submission: &ReactionSubmission) -> Result<(), SubmitError> {
        self.post_json(&self.settings.reaction_path, submission).await
    }
}
