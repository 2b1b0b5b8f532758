//! Transport: one POST per submission, bounded by a timeout.
//!
//! The request body is `{"file": "<base64>"}`. The whole exchange, sending
//! and reading the body, runs under [`tokio::time::timeout`]; when it fires
//! the in-flight future is dropped, which aborts the request, and the caller
//! gets [`AutofillError::Timeout`] rather than a generic transport failure.

use crate::config::AutofillConfig;
use crate::error::AutofillError;
use crate::pipeline::bind::PersonalInfo;
use crate::pipeline::encode::EncodedPayload;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sends an encoded file to the document-processing collaborator.
///
/// [`HttpTransport`] is the production implementation; tests substitute
/// their own.
pub trait Transport {
    /// Submit one payload and return the extracted personal info.
    fn submit(
        &self,
        payload: &EncodedPayload,
    ) -> impl Future<Output = Result<PersonalInfo, AutofillError>> + Send;
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    file: &'a str,
}

/// JSON-over-HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for `config.endpoint` with `config.request_timeout`.
    pub fn new(config: &AutofillConfig) -> Result<Self, AutofillError> {
        let endpoint = reqwest::Url::parse(&config.endpoint)
            .map_err(|e| AutofillError::InvalidConfig(format!("endpoint: {e}")))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AutofillError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    async fn exchange(&self, payload: &EncodedPayload) -> Result<PersonalInfo, AutofillError> {
        info!("POST {} ({} chars payload)", self.endpoint, payload.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SubmitRequest {
                file: payload.as_str(),
            })
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        debug!("HTTP {} with {} byte body", status, body.len());

        if !status.is_success() {
            return Err(AutofillError::Transport {
                status: Some(status.as_u16()),
                message: failure_message(status, &body),
            });
        }

        let value: Value = serde_json::from_slice(&body).map_err(|e| AutofillError::ResponseShape {
            detail: format!("body is not JSON: {e}"),
        })?;
        extract_personal_info(&value)
    }
}

impl Transport for HttpTransport {
    async fn submit(&self, payload: &EncodedPayload) -> Result<PersonalInfo, AutofillError> {
        match tokio::time::timeout(self.timeout, self.exchange(payload)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!("POST {} aborted after {}ms", self.endpoint, timeout_ms);
                Err(AutofillError::Timeout { timeout_ms })
            }
        }
    }
}

/// Pull the `personalInfo` object out of a success body.
pub fn extract_personal_info(body: &Value) -> Result<PersonalInfo, AutofillError> {
    match body.get("personalInfo") {
        Some(Value::Object(map)) => Ok(PersonalInfo::from_json_object(map)),
        Some(_) => Err(AutofillError::ResponseShape {
            detail: "`personalInfo` is not an object".into(),
        }),
        None => Err(AutofillError::ResponseShape {
            detail: "missing `personalInfo`".into(),
        }),
    }
}

/// Human-readable message for a non-success response.
///
/// Prefers a non-empty `message` string in a JSON body, then the canonical
/// status text, then `HTTP <code>`.
pub fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn network_error(e: reqwest::Error) -> AutofillError {
    AutofillError::Transport {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}
