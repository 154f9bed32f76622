//! # crewbot-channels
//!
//! Messaging platform integrations for crewbot.

pub mod telegram;
pub(crate) mod utils;
