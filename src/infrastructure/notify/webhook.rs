use async_trait::async_trait;
use reqwest::Client;

use crate::errors::AppError;
use crate::interfaces::repositories::notifier::Notifier;

/// DingTalk-style chat webhook. The robot endpoint accepts
/// `{"msgtype": "text", "text": {"content": ...}}`.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        WebhookNotifier {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_text(&self, message: &str) -> Result<(), AppError> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::InternalError("Notify webhook URL is not configured".into()))?;

        let payload = serde_json::json!({
            "msgtype": "text",
            "text": { "content": message }
        });

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }

        tracing::info!("Webhook notification delivered");
        Ok(())
    }
}
