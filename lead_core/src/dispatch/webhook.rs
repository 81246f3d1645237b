use super::{Delivery, Dispatch};
use crate::config::DispatchConfig;
use crate::error::{LeadError, Result};
use crate::models::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{info, warn};

pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: String,
}

impl WebhookDispatcher {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &DispatchConfig) -> Result<Self> {
        Self::new(
            config.webhook_url.trim(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Dispatch for WebhookDispatcher {
    async fn dispatch(&self, payload: &SubmissionPayload) -> Result<Delivery> {
        let body = payload.to_json()?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "webhook request failed");
                LeadError::Http(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "lead delivered to webhook");
            Ok(Delivery::Webhook { status })
        } else {
            warn!(status = status.as_u16(), url = %self.url, "webhook rejected lead");
            Err(LeadError::WebhookStatus(status))
        }
    }
}
