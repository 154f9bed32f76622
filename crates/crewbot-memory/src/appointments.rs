//! Appointment intake: storing a free-text request and closing the
//! conversation's intake flow in one step.

use crate::session::SessionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crewbot_core::{error::CrewError, message::ConversationId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// The most recent appointment request of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub conversation_id: ConversationId,
    /// Raw text as the user sent it. Not validated.
    pub details: String,
    pub submitted_at: DateTime<Utc>,
}

impl AppointmentRecord {
    pub fn new(conversation_id: ConversationId, details: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            details: details.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// Durable destination for appointment requests.
///
/// `append` upserts: a conversation keeps at most one current record.
#[async_trait]
pub trait AppointmentLog: Send + Sync {
    async fn append(&self, record: &AppointmentRecord) -> Result<(), CrewError>;

    async fn latest(&self, id: &ConversationId) -> Result<Option<AppointmentRecord>, CrewError>;

    /// Number of conversations with a stored request.
    async fn count(&self) -> Result<usize, CrewError>;
}

/// Appointment log kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryAppointmentLog {
    records: Mutex<HashMap<ConversationId, AppointmentRecord>>,
}

impl MemoryAppointmentLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentLog for MemoryAppointmentLog {
    async fn append(&self, record: &AppointmentRecord) -> Result<(), CrewError> {
        self.records
            .lock()
            .map_err(|e| CrewError::Store(format!("appointment log poisoned: {e}")))?
            .insert(record.conversation_id.clone(), record.clone());
        Ok(())
    }

    async fn latest(&self, id: &ConversationId) -> Result<Option<AppointmentRecord>, CrewError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| CrewError::Store(format!("appointment log poisoned: {e}")))?
            .get(id)
            .cloned())
    }

    async fn count(&self) -> Result<usize, CrewError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| CrewError::Store(format!("appointment log poisoned: {e}")))?
            .len())
    }
}

/// Records submissions and clears the conversation's awaiting flag.
#[derive(Clone)]
pub struct AppointmentIntake {
    sessions: Arc<SessionStore>,
    log: Arc<dyn AppointmentLog>,
}

impl AppointmentIntake {
    pub fn new(sessions: Arc<SessionStore>, log: Arc<dyn AppointmentLog>) -> Self {
        Self { sessions, log }
    }

    /// Store `text` as the conversation's appointment request.
    ///
    /// Runs under the conversation's session lock: the flag is cleared only
    /// once the record is written. On a store failure the flag stays set and
    /// the error is returned.
    pub async fn submit(
        &self,
        id: &ConversationId,
        text: &str,
    ) -> Result<AppointmentRecord, CrewError> {
        let entry = self.sessions.entry(id);
        let mut session = entry.lock().await;

        let record = AppointmentRecord::new(id.clone(), text);
        if let Err(e) = self.log.append(&record).await {
            warn!("appointment from {id} not stored: {e}");
            return Err(e);
        }
        session.awaiting_appointment = false;

        info!(
            "new appointment from {id}: {}",
            preview(&record.details, 80).replace('\n', " | ")
        );
        Ok(record)
    }
}

/// First `max` bytes of `s`, cut on a char boundary.
fn preview(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewbot_core::message::Locale;

    /// Log that rejects every write.
    struct FailingLog;

    #[async_trait]
    impl AppointmentLog for FailingLog {
        async fn append(&self, _record: &AppointmentRecord) -> Result<(), CrewError> {
            Err(CrewError::Store("disk full".into()))
        }

        async fn latest(
            &self,
            _id: &ConversationId,
        ) -> Result<Option<AppointmentRecord>, CrewError> {
            Ok(None)
        }

        async fn count(&self) -> Result<usize, CrewError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_submit_writes_record_and_clears_flag() {
        let sessions = Arc::new(SessionStore::new());
        let log = Arc::new(MemoryAppointmentLog::new());
        let intake = AppointmentIntake::new(sessions.clone(), log.clone());
        let id = ConversationId::from(42);
        sessions.set_locale(&id, Locale::Ua).await;
        sessions.set_awaiting(&id, true).await;

        let record = intake.submit(&id, "Kyiv\n+380\n15/05/2025\n14:00").await.unwrap();

        assert_eq!(record.details, "Kyiv\n+380\n15/05/2025\n14:00");
        assert!(!sessions.is_awaiting_appointment(&id).await);
        assert_eq!(log.count().await.unwrap(), 1);
        assert_eq!(log.latest(&id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_resubmission_overwrites() {
        let sessions = Arc::new(SessionStore::new());
        let log = Arc::new(MemoryAppointmentLog::new());
        let intake = AppointmentIntake::new(sessions, log.clone());
        let id = ConversationId::from(1);

        intake.submit(&id, "first").await.unwrap();
        intake.submit(&id, "second").await.unwrap();

        assert_eq!(log.count().await.unwrap(), 1);
        assert_eq!(log.latest(&id).await.unwrap().unwrap().details, "second");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_flag() {
        let sessions = Arc::new(SessionStore::new());
        let intake = AppointmentIntake::new(sessions.clone(), Arc::new(FailingLog));
        let id = ConversationId::from(9);
        sessions.set_locale(&id, Locale::En).await;
        sessions.set_awaiting(&id, true).await;

        let err = intake.submit(&id, "anything").await.unwrap_err();

        assert!(matches!(err, CrewError::Store(_)));
        assert!(sessions.is_awaiting_appointment(&id).await);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "Б".repeat(10);
        assert_eq!(preview(&text, 5), "ББ");
        assert_eq!(preview("short", 80), "short");
    }
}
