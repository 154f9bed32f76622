//! Message sending: text with keyboards, callback answers, and command registration.

use super::TelegramChannel;
use crate::utils::split_message;
use crewbot_core::{error::CrewError, message::Keyboard};
use serde_json::json;
use tracing::{info, warn};

/// Telegram's per-message text limit in bytes.
const MAX_MESSAGE_LEN: usize = 4096;

impl TelegramChannel {
    /// Send a text message to a specific chat.
    ///
    /// Long texts are split; the keyboard rides on the last chunk.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), CrewError> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.into_iter().enumerate() {
            let mut body = json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            if let Some(kb) = keyboard.filter(|_| i == last) {
                body["reply_markup"] = reply_markup(kb);
            }

            let resp = self
                .client
                .post(format!("{}/sendMessage", self.base_url))
                .json(&body)
                .send()
                .await
                .map_err(|e| CrewError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(CrewError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Acknowledge an inline button press.
    pub(crate) async fn answer_callback_query(&self, callback_id: &str) -> Result<(), CrewError> {
        let body = json!({ "callback_query_id": callback_id });

        let resp = self
            .client
            .post(format!("{}/answerCallbackQuery", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CrewError::Channel(format!("telegram answerCallbackQuery failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(CrewError::Channel(format!(
                "telegram answerCallbackQuery failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        for (language_code, commands) in [(None, command_menu_en()), (Some("uk"), command_menu_uk())]
        {
            let mut body = json!({ "commands": commands });
            if let Some(code) = language_code {
                body["language_code"] = json!(code);
            }

            let url = format!("{}/setMyCommands", self.base_url);
            match self.client.post(&url).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!(
                        "registered Telegram bot commands ({})",
                        language_code.unwrap_or("default")
                    );
                }
                Ok(resp) => {
                    let body = resp.text().await.unwrap_or_default();
                    warn!("failed to register Telegram bot commands: {body}");
                }
                Err(e) => {
                    warn!("failed to register Telegram bot commands: {e}");
                }
            }
        }
    }
}

pub(crate) fn command_menu_en() -> serde_json::Value {
    json!([
        { "command": "start", "description": "Choose a language" },
        { "command": "services", "description": "What we do" },
        { "command": "contacts", "description": "How to reach us" },
        { "command": "appointment", "description": "Request a visit" },
        { "command": "language", "description": "Change language" },
        { "command": "help", "description": "About this bot" },
    ])
}

/// Telegram only accepts latin command names, so the Ukrainian menu keeps
/// the English commands with Ukrainian descriptions.
pub(crate) fn command_menu_uk() -> serde_json::Value {
    json!([
        { "command": "start", "description": "Обрати мову" },
        { "command": "services", "description": "Наші послуги" },
        { "command": "contacts", "description": "Контакти" },
        { "command": "appointment", "description": "Замовити візит" },
        { "command": "language", "description": "Змінити мову" },
        { "command": "help", "description": "Про бота" },
    ])
}

/// Bot API `reply_markup` object for a keyboard.
pub(crate) fn reply_markup(keyboard: &Keyboard) -> serde_json::Value {
    match keyboard {
        Keyboard::Reply { rows, resize } => {
            let rows: Vec<Vec<serde_json::Value>> = rows
                .iter()
                .map(|row| row.iter().map(|label| json!({ "text": label })).collect())
                .collect();
            json!({
                "keyboard": rows,
                "resize_keyboard": resize,
            })
        }
        Keyboard::Inline { rows } => {
            let rows: Vec<Vec<serde_json::Value>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| json!({ "text": b.label, "callback_data": b.payload }))
                        .collect()
                })
                .collect();
            json!({ "inline_keyboard": rows })
        }
    }
}
