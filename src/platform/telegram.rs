use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::BotSession;
use crate::platform::{ApiError, BotApi, Update};

/// Seconds the server may hold a `getUpdates` request open
pub const LONG_POLL_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
    #[serde(default)]
    description: Option<String>,
}

/// Form fields for a `getUpdates` request
fn get_updates_form(offset: Option<i64>) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("allowed_updates", r#"["message"]"#.to_string()),
        ("timeout", LONG_POLL_TIMEOUT_SECS.to_string()),
    ];
    if let Some(offset) = offset {
        form.push(("offset", offset.to_string()));
    }
    form
}

fn kick_form(chat_id: &str, user_id: i64) -> Vec<(&'static str, String)> {
    vec![
        ("chat_id", chat_id.to_string()),
        ("user_id", user_id.to_string()),
    ]
}

fn delete_form(chat_id: &str, message_id: i64) -> Vec<(&'static str, String)> {
    vec![
        ("chat_id", chat_id.to_string()),
        ("message_id", message_id.to_string()),
    ]
}

fn decode_updates(body: &str) -> Result<Vec<Update>, ApiError> {
    let response: UpdatesResponse = serde_json::from_str(body)?;
    if !response.ok {
        return Err(ApiError::Rejected {
            description: response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }
    Ok(response.result)
}

/// Error replies carry `ok: false` and a description, so the body is decoded
/// before the status is looked at.
fn classify_updates(status: reqwest::StatusCode, body: String) -> Result<Vec<Update>, ApiError> {
    match decode_updates(&body) {
        Err(ApiError::Decode(_)) if !status.is_success() => Err(ApiError::Status { status, body }),
        other => other,
    }
}

fn check_status(status: reqwest::StatusCode, body: String) -> Result<String, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

/// Bot API client speaking form-encoded POSTs.
///
/// The underlying client has no request timeout; `getUpdates` returns
/// whenever the server's long poll ends.
pub struct TelegramClient {
    client: reqwest::Client,
    session: BotSession,
    get_updates_url: reqwest::Url,
    kick_url: reqwest::Url,
    delete_url: reqwest::Url,
}

impl TelegramClient {
    pub fn new(session: BotSession) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            get_updates_url: session.endpoint("getUpdates")?,
            kick_url: session.endpoint("kickChatMember")?,
            delete_url: session.endpoint("deleteMessage")?,
            session,
        })
    }

    async fn post_form(
        &self,
        url: &reqwest::Url,
        form: &[(&'static str, String)],
    ) -> Result<(reqwest::StatusCode, String), ApiError> {
        let response = self.client.post(url.clone()).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// POST and return the body as-is, failing only on non-2xx statuses.
    async fn call_opaque(
        &self,
        url: &reqwest::Url,
        form: &[(&'static str, String)],
    ) -> Result<String, ApiError> {
        let (status, body) = self.post_form(url, form).await?;
        check_status(status, body)
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, ApiError> {
        let (status, body) = self
            .post_form(&self.get_updates_url, &get_updates_form(offset))
            .await?;
        classify_updates(status, body)
    }

    async fn kick_chat_member(&self, user_id: i64) -> Result<String, ApiError> {
        self.call_opaque(
            &self.kick_url,
            &kick_form(&self.session.chat_id, user_id),
        )
        .await
    }

    async fn delete_message(&self, message_id: i64) -> Result<String, ApiError> {
        self.call_opaque(
            &self.delete_url,
            &delete_form(&self.session.chat_id, message_id),
        )
        .await
    }
}
