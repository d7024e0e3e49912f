//! Outbound email via the Resend HTTP API.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::traits::BaseEmailService;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Resend-backed email sender.
#[derive(Debug, Clone)]
pub struct ResendEmailClient {
    api_key: String,
    from_address: String,
    client: reqwest::Client,
}

impl ResendEmailClient {
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            api_key,
            from_address,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BaseEmailService for ResendEmailClient {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let body = SendEmailRequest {
            from: &self.from_address,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Resend returned {}: {}", status, error_body));
        }

        Ok(())
    }
}
