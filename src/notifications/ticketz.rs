use reqwest::Client;
use serde::Serialize;
use tokio::runtime::Handle;

use crate::notifications::{NotificationError, NotificationSender};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    number: &'a str,
    body: &'a str,
}

/// Delivers messages through the Ticketz WhatsApp gateway.
///
/// `send` only schedules the request on the current tokio runtime and returns
/// immediately; delivery errors are logged by the detached task.
#[derive(Debug, Clone)]
pub struct TicketzSender {
    client: Client,
    endpoint: String,
    token: String,
}

impl TicketzSender {
    pub fn new(api_url: &str, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/messages/send", api_url.trim_end_matches('/')),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn deliver(
        client: Client,
        endpoint: String,
        token: String,
        number: String,
        body: String,
    ) -> Result<(), NotificationError> {
        let response = client
            .post(&endpoint)
            .bearer_auth(token)
            .json(&SendMessageRequest {
                number: &number,
                body: &body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected(status.as_u16()));
        }

        log::info!("Message delivered to {number} via Ticketz");
        Ok(())
    }
}

impl NotificationSender for TicketzSender {
    fn send(&self, phone: &str, body: &str) -> Result<(), NotificationError> {
        let handle = Handle::try_current().map_err(|_| NotificationError::NoRuntime)?;

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let token = self.token.clone();
        let number = phone.to_string();
        let body = body.to_string();

        handle.spawn(async move {
            if let Err(err) = Self::deliver(client, endpoint, token, number.clone(), body).await {
                log::error!("Failed to send message to {number} via Ticketz: {err}");
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_base_url() {
        let sender = TicketzSender::new("https://ticketz.example.com/", "token");
        assert_eq!(
            sender.endpoint(),
            "https://ticketz.example.com/api/messages/send"
        );
    }

    #[test]
    fn send_without_runtime_reports_error() {
        let sender = TicketzSender::new("https://ticketz.example.com", "token");
        let result = sender.send("5511999998888", "hello");
        assert!(matches!(result, Err(NotificationError::NoRuntime)));
    }
}
