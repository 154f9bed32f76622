use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a single chat with one user.
///
/// Telegram hands out numeric chat ids; other transports may use strings,
/// so the id is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supported interface languages.
///
/// Adding a language means adding a variant here, a translation module
/// and a row in the command alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ua,
}

impl Locale {
    /// Every supported locale, in the order they are offered to the user.
    pub const ALL: [Locale; 2] = [Locale::Ua, Locale::En];

    /// Locale used when a requested one is not supported.
    pub const DEFAULT: Locale = Locale::En;

    /// Short code used in callback payloads and the translation table.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ua => "ua",
        }
    }

    /// Parse a locale code. Codes are case-sensitive, like callback payloads.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "ua" => Some(Self::Ua),
            _ => None,
        }
    }

    /// Label shown on the language picker button.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English 🇬🇧",
            Self::Ua => "Українська 🇺🇦",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Who sent a text message. Only used for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderInfo {
    /// Platform-specific user ID.
    pub id: String,
    /// Human-readable sender name.
    pub name: Option<String>,
}

/// An inbound chat event from a channel.
///
/// Exactly one shape per event; consumers branch on the variant, never on
/// the content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InboundEvent {
    /// A typed message (or a reply-keyboard button, which re-sends its label).
    TextMessage {
        conversation_id: ConversationId,
        text: String,
        sender: SenderInfo,
    },
    /// An inline button press.
    CallbackAction {
        /// `None` when the platform could not tell which chat the button lived in.
        conversation_id: Option<ConversationId>,
        /// Platform handle used to acknowledge the press.
        callback_id: String,
        payload: Option<String>,
    },
}

impl InboundEvent {
    /// Conversation the event belongs to, if it can be resolved.
    pub fn conversation_id(&self) -> Option<&ConversationId> {
        match self {
            Self::TextMessage {
                conversation_id, ..
            } => Some(conversation_id),
            Self::CallbackAction {
                conversation_id, ..
            } => conversation_id.as_ref(),
        }
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub conversation_id: ConversationId,
    pub text: String,
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
}

impl OutgoingMessage {
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Interactive keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyboard {
    /// Persistent keyboard whose buttons send their label back as text.
    Reply { rows: Vec<Vec<String>>, resize: bool },
    /// Buttons under the message carrying an opaque payload.
    Inline { rows: Vec<Vec<InlineButton>> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    pub payload: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes_roundtrip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
    }

    #[test]
    fn test_locale_codes_are_case_sensitive() {
        assert_eq!(Locale::from_code("EN"), None);
        assert_eq!(Locale::from_code("xx"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_default_locale_is_supported() {
        assert!(Locale::ALL.contains(&Locale::DEFAULT));
    }

    #[test]
    fn test_conversation_id_from_chat_id() {
        let id = ConversationId::from(-100123_i64);
        assert_eq!(id.as_str(), "-100123");
        assert_eq!(id.to_string(), "-100123");
    }

    #[test]
    fn test_event_conversation_id() {
        let text = InboundEvent::TextMessage {
            conversation_id: ConversationId::from(42),
            text: "hi".into(),
            sender: SenderInfo::default(),
        };
        assert_eq!(text.conversation_id(), Some(&ConversationId::from(42)));

        let orphan = InboundEvent::CallbackAction {
            conversation_id: None,
            callback_id: "cb".into(),
            payload: Some("lang_en".into()),
        };
        assert!(orphan.conversation_id().is_none());
    }
}
