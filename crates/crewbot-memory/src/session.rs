//! Per-conversation session state.
//!
//! A session exists implicitly: an unseen conversation reads as
//! "no locale, not awaiting". Entries are created lazily and never removed.
//! Each entry has its own lock, so work on one conversation never waits on
//! another.

use crewbot_core::message::{ConversationId, Locale};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// Mutable state kept for one conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub locale: Option<Locale>,
    pub awaiting_appointment: bool,
}

/// Where a conversation stands, derived from its [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// No language chosen yet.
    NoLocale,
    /// Language chosen, nothing pending.
    Idle(Locale),
    /// Language chosen and the next text message is an appointment request.
    AwaitingAppointment(Locale),
}

impl ConversationState {
    pub fn locale(&self) -> Option<Locale> {
        match self {
            Self::NoLocale => None,
            Self::Idle(l) | Self::AwaitingAppointment(l) => Some(*l),
        }
    }
}

impl Session {
    /// Without a locale the awaiting flag is ignored.
    pub fn state(&self) -> ConversationState {
        match (self.locale, self.awaiting_appointment) {
            (None, _) => ConversationState::NoLocale,
            (Some(locale), false) => ConversationState::Idle(locale),
            (Some(locale), true) => ConversationState::AwaitingAppointment(locale),
        }
    }
}

/// In-memory, conversation-keyed session store.
///
/// The outer map lock is only held to look up or insert an entry and never
/// across an `.await`.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<ConversationId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding one conversation's session, created on first use.
    pub fn entry(&self, id: &ConversationId) -> Arc<Mutex<Session>> {
        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
        {
            return entry.clone();
        }
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(id.clone())
            .or_default()
            .clone()
    }

    /// Snapshot of a conversation's session.
    pub async fn session(&self, id: &ConversationId) -> Session {
        *self.entry(id).lock().await
    }

    pub async fn state(&self, id: &ConversationId) -> ConversationState {
        self.session(id).await.state()
    }

    pub async fn get_locale(&self, id: &ConversationId) -> Option<Locale> {
        self.entry(id).lock().await.locale
    }

    pub async fn set_locale(&self, id: &ConversationId, locale: Locale) {
        self.entry(id).lock().await.locale = Some(locale);
    }

    /// False for conversations never seen.
    pub async fn is_awaiting_appointment(&self, id: &ConversationId) -> bool {
        self.entry(id).lock().await.awaiting_appointment
    }

    pub async fn set_awaiting(&self, id: &ConversationId, awaiting: bool) {
        self.entry(id).lock().await.awaiting_appointment = awaiting;
    }

    /// Number of conversations with a session entry.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unseen_conversation_defaults() {
        let store = SessionStore::new();
        let id = ConversationId::from(7);
        assert_eq!(store.get_locale(&id).await, None);
        assert!(!store.is_awaiting_appointment(&id).await);
        assert_eq!(store.state(&id).await, ConversationState::NoLocale);
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let store = SessionStore::new();
        let id = ConversationId::from(7);

        store.set_locale(&id, Locale::Ua).await;
        assert_eq!(store.state(&id).await, ConversationState::Idle(Locale::Ua));

        store.set_awaiting(&id, true).await;
        assert_eq!(
            store.state(&id).await,
            ConversationState::AwaitingAppointment(Locale::Ua)
        );

        store.set_awaiting(&id, false).await;
        assert_eq!(store.state(&id).await, ConversationState::Idle(Locale::Ua));
    }

    #[test]
    fn test_awaiting_without_locale_is_no_locale() {
        let session = Session {
            locale: None,
            awaiting_appointment: true,
        };
        assert_eq!(session.state(), ConversationState::NoLocale);
        assert_eq!(session.state().locale(), None);
    }

    #[test]
    fn test_state_locale() {
        assert_eq!(ConversationState::Idle(Locale::En).locale(), Some(Locale::En));
        assert_eq!(
            ConversationState::AwaitingAppointment(Locale::Ua).locale(),
            Some(Locale::Ua)
        );
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let store = SessionStore::new();
        let a = ConversationId::from(1);
        let b = ConversationId::from(2);
        store.set_locale(&a, Locale::En).await;
        store.set_awaiting(&a, true).await;
        assert_eq!(store.state(&b).await, ConversationState::NoLocale);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_entry_is_shared_per_conversation() {
        let store = SessionStore::new();
        let id = ConversationId::from(3);
        let first = store.entry(&id);
        let second = store.entry(&id);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_held_entry_does_not_block_other_conversations() {
        let store = Arc::new(SessionStore::new());
        let busy = ConversationId::from(1);
        let _guard = store.entry(&busy).lock_owned().await;

        let other = ConversationId::from(2);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            store.set_locale(&other, Locale::En),
        )
        .await;
        assert!(result.is_ok(), "unrelated conversation should not wait");
        assert_eq!(store.get_locale(&other).await, Some(Locale::En));
    }

    #[tokio::test]
    async fn test_concurrent_updates_across_conversations() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for i in 0..32_i64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = ConversationId::from(i);
                store.set_locale(&id, Locale::Ua).await;
                store.set_awaiting(&id, i % 2 == 0).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.len(), 32);
        assert!(store.is_awaiting_appointment(&ConversationId::from(4)).await);
        assert!(!store.is_awaiting_appointment(&ConversationId::from(5)).await);
    }
}
