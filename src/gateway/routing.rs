//! Conversation state machine: decides what each inbound event does.

use crate::commands::Command;
use crewbot_core::message::{ConversationId, InboundEvent, Locale};
use crewbot_memory::{AppointmentIntake, ConversationState, SessionStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Prefix of language-selection callback payloads (`lang_en`, `lang_ua`).
pub(super) const LANGUAGE_PAYLOAD_PREFIX: &str = "lang_";

/// What to reply with once an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LanguagePicker,
    MainMenu(Locale),
    Services,
    Contacts,
    StartAppointment,
    AppointmentReceived { details: String },
    AppointmentFailed,
    BotInfo,
    UnknownCommand,
}

/// A routed event: the reply to render and, for button presses, the
/// callback to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub conversation_id: ConversationId,
    pub action: Action,
    pub callback_id: Option<String>,
}

/// Applies the routing rules to inbound events, mutating session state.
#[derive(Clone)]
pub struct Router {
    sessions: Arc<SessionStore>,
    intake: AppointmentIntake,
}

impl Router {
    pub fn new(sessions: Arc<SessionStore>, intake: AppointmentIntake) -> Self {
        Self { sessions, intake }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Route one event. Returns `None` when the event is dropped.
    ///
    /// Rules, first match wins:
    /// 1. `lang_<code>` callback: set the locale (default if unsupported), show the menu.
    /// 2. No locale yet: show the language picker.
    /// 3. A known command alias in the text or payload.
    /// 4. Awaiting appointment details and a typed message: record it.
    /// 5. Anything else: unknown command.
    ///
    /// Every state change is applied before this returns.
    pub async fn route(&self, event: &InboundEvent) -> Option<Routed> {
        let (conversation_id, content, callback_id) = match event {
            InboundEvent::TextMessage {
                conversation_id,
                text,
                sender,
            } => {
                if text.trim().is_empty() {
                    debug!("dropping empty message from {conversation_id}");
                    return None;
                }
                debug!(
                    "message from {conversation_id} (sender {} {})",
                    sender.id,
                    sender.name.as_deref().unwrap_or("-")
                );
                (conversation_id, text.as_str(), None)
            }
            InboundEvent::CallbackAction {
                conversation_id,
                callback_id,
                payload,
            } => {
                let Some(conversation_id) = conversation_id else {
                    debug!("dropping callback {callback_id}: no conversation");
                    return None;
                };
                let Some(payload) = payload.as_deref().filter(|p| !p.trim().is_empty()) else {
                    debug!("dropping callback {callback_id}: no payload");
                    return None;
                };
                (conversation_id, payload, Some(callback_id.clone()))
            }
        };

        let routed = |action| Routed {
            conversation_id: conversation_id.clone(),
            action,
            callback_id: callback_id.clone(),
        };

        if callback_id.is_some() {
            if let Some(locale) = language_choice(content) {
                self.sessions.set_locale(conversation_id, locale).await;
                info!("{conversation_id} switched language to {locale}");
                return Some(routed(Action::MainMenu(locale)));
            }
        }

        let state = self.sessions.state(conversation_id).await;
        let Some(locale) = state.locale() else {
            return Some(routed(Action::LanguagePicker));
        };
        debug!("routing {conversation_id} in {locale}");

        let action = match Command::parse(content) {
            Some(Command::Services) => Action::Services,
            Some(Command::Contacts) => Action::Contacts,
            Some(Command::Appointment) => {
                self.sessions.set_awaiting(conversation_id, true).await;
                Action::StartAppointment
            }
            Some(Command::Language) => Action::LanguagePicker,
            Some(Command::Info) => Action::BotInfo,
            None => match (state, callback_id.is_none()) {
                (ConversationState::AwaitingAppointment(_), true) => {
                    match self.intake.submit(conversation_id, content).await {
                        Ok(record) => Action::AppointmentReceived {
                            details: record.details,
                        },
                        Err(e) => {
                            debug!("appointment intake for {conversation_id} failed: {e}");
                            Action::AppointmentFailed
                        }
                    }
                }
                _ => Action::UnknownCommand,
            },
        };

        Some(routed(action))
    }
}

/// Locale chosen by a `lang_<code>` payload.
///
/// An unsupported code selects the default locale.
fn language_choice(payload: &str) -> Option<Locale> {
    payload
        .strip_prefix(LANGUAGE_PAYLOAD_PREFIX)
        .map(|code| Locale::from_code(code).unwrap_or(Locale::DEFAULT))
}
