//! HTTP mail API client.

use crate::{DeliveryFuture, MailSink, MailSinkError, MailSinkResult, OutgoingMail};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Connection settings for the mail API.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Endpoint receiving send requests.
    pub api_url: String,
    /// Bearer token for the mail API.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Send request payload for the mail API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailRequest {
    to: String,
    subject: String,
    html_body: String,
}

/// Mail API client delivering digests over HTTP.
///
/// Each digest is a single POST. A transport error or non-2xx response is
/// returned to the caller; there is no retry here.
pub struct HttpMailer {
    config: MailerConfig,
    client: Client,
}

impl HttpMailer {
    /// Create a new mailer.
    ///
    /// Fails when the endpoint URL does not parse, the token is empty, or
    /// the HTTP client cannot be built, so a broken mail setup is caught
    /// before the daemon starts accepting command events.
    pub fn new(config: MailerConfig) -> MailSinkResult<Self> {
        Url::parse(&config.api_url)
            .map_err(|e| MailSinkError::Config(format!("invalid mail API URL {:?}: {}", config.api_url, e)))?;
        if config.api_token.is_empty() {
            return Err(MailSinkError::Config("mail API token is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailSinkError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

impl MailSink for HttpMailer {
    fn deliver(&self, mail: OutgoingMail) -> DeliveryFuture {
        let client = self.client.clone();
        let url = self.config.api_url.clone();
        let token = self.config.api_token.clone();

        Box::pin(async move {
            debug!(to = %mail.to, subject = %mail.subject, "Sending mail");

            let request = SendMailRequest {
                to: mail.to,
                subject: mail.subject,
                html_body: mail.html_body,
            };

            let response = client
                .post(&url)
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(MailSinkError::Send(format!("HTTP {}: {}", status, body)));
            }

            Ok(())
        })
    }
}
