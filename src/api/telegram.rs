use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::FetchError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GetMeResponse {
    ok: bool,
    result: Option<BotUser>,
    description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl TelegramClient {
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(TELEGRAM_API_URL, token, timeout)
    }

    pub fn with_base_url(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout,
        })
    }

    /// `getMe`: validates the bot token and returns the bot account.
    pub async fn get_me(&self) -> Result<BotUser, FetchError> {
        let url = format!("{}/bot{}/getMe", self.base_url, self.token);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: GetMeResponse = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        match (body.ok, body.result) {
            (true, Some(user)) => Ok(user),
            _ => Err(FetchError::Decode(
                body.description.unwrap_or_else(|| "getMe returned no bot".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_me() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bot123:abc/getMe")
            .with_status(200)
            .with_body(r#"{"ok": true, "result": {"id": 42, "is_bot": true, "first_name": "Chassis", "username": "chassis_bot"}}"#)
            .create_async()
            .await;

        let client = TelegramClient::with_base_url(&server.url(), "123:abc", Duration::from_secs(5)).unwrap();
        let bot = client.get_me().await.unwrap();
        assert_eq!(bot.id, 42);
        assert_eq!(bot.username.as_deref(), Some("chassis_bot"));
    }

    #[tokio::test]
    async fn test_get_me_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/botbad/getMe")
            .with_status(401)
            .with_body(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
            .create_async()
            .await;

        let client = TelegramClient::with_base_url(&server.url(), "bad", Duration::from_secs(5)).unwrap();
        assert_eq!(client.get_me().await.unwrap_err(), FetchError::Status(401));
    }
}
