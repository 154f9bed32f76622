//! Reply rendering: turns a routed action into the message to send.

use super::routing::{Action, Routed, LANGUAGE_PAYLOAD_PREFIX};
use crate::commands::Command;
use crate::i18n::{self, resolve};
use crewbot_core::message::{InlineButton, Keyboard, Locale, OutgoingMessage};

/// Build the reply for `routed` in `locale`. Pure; at most one message per event.
pub fn render(routed: &Routed, locale: Locale) -> OutgoingMessage {
    let id = routed.conversation_id.clone();
    match &routed.action {
        Action::LanguagePicker => {
            OutgoingMessage::text(id, resolve(locale, "choose_language"))
                .with_keyboard(language_picker())
        }
        Action::MainMenu(locale) => {
            OutgoingMessage::text(id, resolve(*locale, "welcome_message"))
                .with_keyboard(main_menu(*locale))
        }
        Action::Services => OutgoingMessage::text(id, resolve(locale, "services_list"))
            .with_keyboard(Keyboard::Inline {
                rows: vec![vec![InlineButton::new(
                    resolve(locale, "services_book_button"),
                    Command::Appointment.payload(),
                )]],
            }),
        Action::Contacts => OutgoingMessage::text(id, resolve(locale, "contact_information")),
        Action::StartAppointment => {
            OutgoingMessage::text(id, resolve(locale, "appointment_information"))
        }
        Action::AppointmentReceived { details } => {
            OutgoingMessage::text(id, i18n::appointment_confirmation(locale, details))
        }
        Action::AppointmentFailed => {
            OutgoingMessage::text(id, resolve(locale, "appointment_failed"))
        }
        Action::BotInfo => OutgoingMessage::text(id, resolve(locale, "bot_info")),
        Action::UnknownCommand => OutgoingMessage::text(id, resolve(locale, "unknown_command")),
    }
}

/// Inline keyboard with one `lang_<code>` button per supported locale.
fn language_picker() -> Keyboard {
    Keyboard::Inline {
        rows: vec![Locale::ALL
            .into_iter()
            .map(|l| {
                InlineButton::new(
                    l.display_name(),
                    format!("{LANGUAGE_PAYLOAD_PREFIX}{}", l.code()),
                )
            })
            .collect()],
    }
}

/// Persistent reply keyboard: services and contacts, then appointment and language.
fn main_menu(locale: Locale) -> Keyboard {
    let label = |key: &str| resolve(locale, key).to_string();
    Keyboard::Reply {
        rows: vec![
            vec![label("services"), label("contacts")],
            vec![label("appointment"), label("language")],
        ],
        resize: true,
    }
}
