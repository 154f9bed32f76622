use crate::{
    error::CrewError,
    message::{InboundEvent, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to deliver inbound
/// events and send replies.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for inbound events.
    /// Returns a receiver that yields text messages and button callbacks.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<InboundEvent>, CrewError>;

    /// Send a message, with an optional keyboard, back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), CrewError>;

    /// Acknowledge a button press so the client stops showing a spinner.
    /// Independent of any message being sent.
    async fn answer_callback(&self, _callback_id: &str) -> Result<(), CrewError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), CrewError>;
}
