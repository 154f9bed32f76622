//! # crewbot-memory
//!
//! Per-conversation session state and appointment storage.

pub mod appointments;
pub mod session;
pub mod store;

pub use appointments::{AppointmentIntake, AppointmentLog, AppointmentRecord, MemoryAppointmentLog};
pub use session::{ConversationState, Session, SessionStore};
pub use store::SqliteAppointmentLog;
