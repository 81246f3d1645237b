use super::{Delivery, Dispatch};
use crate::error::Result;
use crate::host::Navigator;
use crate::models::SubmissionPayload;
use async_trait::async_trait;
use std::fmt::Write;
use std::sync::Arc;
use tracing::info;

pub struct MailtoDispatcher {
    address: String,
    subject: String,
    navigator: Arc<dyn Navigator>,
}

impl MailtoDispatcher {
    pub fn new(address: String, subject: String, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            address,
            subject,
            navigator,
        }
    }
}

#[async_trait]
impl Dispatch for MailtoDispatcher {
    /// Leaving the page for the mail client gives no delivery signal, so a
    /// successful navigation counts as a successful dispatch.
    async fn dispatch(&self, payload: &SubmissionPayload) -> Result<Delivery> {
        let url = mailto_url(&self.address, &self.subject, &compose_mail_body(payload));
        self.navigator.navigate(&url)?;
        info!(address = %self.address, "lead handed to mail client");
        Ok(Delivery::Mailto { url })
    }
}

pub fn mailto_url(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Plain-text summary of a lead, one field per line.
pub fn compose_mail_body(payload: &SubmissionPayload) -> String {
    let values = &payload.values;
    let utm = &values.attribution;
    let mut body = String::from("Neuer Lead:\n\n");

    // Writing into a String cannot fail.
    let _ = writeln!(body, "Name: {}", values.name);
    let _ = writeln!(body, "Telefon: {}", values.phone);
    let _ = writeln!(body, "E-Mail: {}", or_dash(&values.email));
    let _ = writeln!(body, "Thema: {}", values.topic);
    let _ = writeln!(body, "Kontaktweg: {}", values.contact_pref.as_deref().unwrap_or(""));
    let _ = writeln!(body, "Nachricht: {}", or_dash(&values.msg));
    body.push('\n');
    let _ = writeln!(
        body,
        "UTM: {}/{}/{}/{}/{}",
        utm.utm_source, utm.utm_medium, utm.utm_campaign, utm.utm_content, utm.utm_term
    );
    let _ = writeln!(body, "Referrer: {}", or_dash(&utm.referrer));
    let _ = writeln!(body, "Seite: {}", payload.page);
    let _ = writeln!(body, "Zeit: {}", payload.timestamp);

    body
}
