use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use crate::{error::SubmitError, form::SignupValues};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001/users";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What the backend answered to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub status: u16,
}

/// Posts finished forms to the sign-up backend.
///
/// One request per call, no retries. The response body is not inspected;
/// any 2xx counts as success.
#[derive(Debug, Clone)]
pub struct Submitter {
    client: Client,
    endpoint: Url,
}

impl Submitter {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let endpoint = Url::parse(endpoint).map_err(|e| SubmitError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SubmitError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme {:?}", endpoint.scheme()),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn submit(&self, values: &SignupValues) -> Result<SubmitReceipt, SubmitError> {
        debug!(endpoint = %self.endpoint, "posting sign-up form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(values)
            .send()
            .await
            .map_err(|e| {
                error!("Network error: {e}");
                SubmitError::Network(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "form submitted");
            Ok(SubmitReceipt {
                status: status.as_u16(),
            })
        } else {
            error!(status = status.as_u16(), "Error submitting form");
            Err(SubmitError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
