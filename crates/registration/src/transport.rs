//! HTTP transport to the spreadsheet endpoint.
//!
//! The endpoint is an opaque collaborator: the request is dispatched and any
//! HTTP response at all counts as delivered. The body is never read and the
//! status code is only logged. Only local failures (DNS, connect, TLS,
//! building the request) are reported as errors. No timeout is applied.

use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::draft::RegistrationPayload;
use crate::errors::TransportError;
use crate::submission::{SubmitReceipt, Submitter};

/// Google Apps Script web app the form posts to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbxi_PCcPlgEvB-3VMQTifnUiMgRQqGfcXyJPvIMgqTf8r5OU-L78AbMDsI1ddfIc0WiXA/exec";

#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: reqwest::Url,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self, TransportError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &RegistrationPayload) -> Result<SubmitReceipt, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        debug!("Endpoint answered {status}; response body is not inspected");
        Ok(SubmitReceipt {
            status: Some(status.as_u16()),
        })
    }
}
