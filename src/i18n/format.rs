//! Format helpers for strings with interpolation.

use super::resolve;
use crewbot_core::message::Locale;

/// Confirmation for a received appointment request, echoing the submission as-is.
pub fn appointment_confirmation(locale: Locale, details: &str) -> String {
    format!("{}{details}", resolve(locale, "appointment_received"))
}

