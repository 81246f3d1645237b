//! Delivery of finished submissions
//!
//! Exactly one path is active per deployment: the webhook when an endpoint is
//! configured, otherwise a pre-filled `mailto:` hand-off.

pub mod mailto;
pub mod webhook;

pub use mailto::{compose_mail_body, mailto_url, MailtoDispatcher};
pub use webhook::WebhookDispatcher;

use crate::config::DispatchConfig;
use crate::error::Result;
use crate::host::Navigator;
use crate::models::SubmissionPayload;
use async_trait::async_trait;
use http::StatusCode;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Webhook { status: StatusCode },
    /// The mail client was opened. Whether anything was sent is unknowable.
    Mailto { url: String },
}

#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, payload: &SubmissionPayload) -> Result<Delivery>;
}

pub enum SubmissionDispatcher {
    Webhook(WebhookDispatcher),
    Mailto(MailtoDispatcher),
}

impl SubmissionDispatcher {
    pub fn from_config(config: &DispatchConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        if config.has_webhook() {
            info!(url = %config.webhook_url.trim(), "submissions go to webhook");
            Ok(SubmissionDispatcher::Webhook(WebhookDispatcher::from_config(config)?))
        } else {
            info!(address = %config.mailto_address, "no webhook configured, using mail fallback");
            Ok(SubmissionDispatcher::Mailto(MailtoDispatcher::new(
                config.mailto_address.clone(),
                config.mail_subject.clone(),
                navigator,
            )))
        }
    }

    pub fn is_webhook(&self) -> bool {
        matches!(self, SubmissionDispatcher::Webhook(_))
    }
}

#[async_trait]
impl Dispatch for SubmissionDispatcher {
    async fn dispatch(&self, payload: &SubmissionPayload) -> Result<Delivery> {
        match self {
            SubmissionDispatcher::Webhook(webhook) => webhook.dispatch(payload).await,
            SubmissionDispatcher::Mailto(mailto) => mailto.dispatch(payload).await,
        }
    }
}
