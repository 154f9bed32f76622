//! Long-polling update loop and Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use crewbot_core::{
    error::CrewError,
    message::{ConversationId, InboundEvent, OutgoingMessage, SenderInfo},
    traits::Channel,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Update kinds requested from `getUpdates`.
const ALLOWED_UPDATES: &str = r#"["message","callback_query"]"#;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<InboundEvent>, CrewError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let allowed_users = self.config.allowed_users.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut query = vec![
                    ("timeout", "30".to_string()),
                    ("allowed_updates", ALLOWED_UPDATES.to_string()),
                ];
                if let Some(off) = offset {
                    query.push(("offset", off.to_string()));
                }

                let resp = match client
                    .get(format!("{base_url}/getUpdates"))
                    .query(&query)
                    .timeout(Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(event) = update_to_event(update, &allowed_users) else {
                        continue;
                    };

                    if tx.send(event).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), CrewError> {
        let chat_id: i64 = message.conversation_id.as_str().parse().map_err(|e| {
            CrewError::Channel(format!(
                "invalid telegram chat_id '{}': {e}",
                message.conversation_id
            ))
        })?;

        self.send_text(chat_id, &message.text, message.keyboard.as_ref())
            .await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), CrewError> {
        self.answer_callback_query(callback_id).await
    }

    async fn stop(&self) -> Result<(), CrewError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Turn a raw update into an inbound event.
///
/// Returns `None` for updates the bot does not handle (non-text messages,
/// group chats, unauthorized users). A callback whose message is gone is
/// still forwarded, without a conversation id.
pub(crate) fn update_to_event(update: TgUpdate, allowed_users: &[i64]) -> Option<InboundEvent> {
    if let Some(query) = update.callback_query {
        if !allowed_users.is_empty() && !allowed_users.contains(&query.from.id) {
            warn!("ignoring callback from unauthorized user {}", query.from.id);
            return None;
        }
        let conversation_id = query.message.map(|m| ConversationId::from(m.chat.id));
        if conversation_id.is_none() {
            debug!("telegram: callback {} has no originating message", query.id);
        }
        return Some(InboundEvent::CallbackAction {
            conversation_id,
            callback_id: query.id,
            payload: query.data,
        });
    }

    let msg = update.message?;
    let text = msg.text?;
    let user = msg.from?;

    // Auth check.
    if !allowed_users.is_empty() && !allowed_users.contains(&user.id) {
        warn!("ignoring message from unauthorized user {}", user.id);
        return None;
    }

    // Drop group messages -- the bot only talks person-to-person.
    if msg.chat.is_group() {
        debug!("telegram: ignoring group message from chat {}", msg.chat.id);
        return None;
    }

    Some(InboundEvent::TextMessage {
        conversation_id: ConversationId::from(msg.chat.id),
        text,
        sender: SenderInfo {
            id: user.id.to_string(),
            name: Some(user.display_name()),
        },
    })
}
