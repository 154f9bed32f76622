//! Command alias table: every text or button payload that names a menu entry.

#[cfg(test)]
mod tests;

use crate::i18n;
use crewbot_core::message::Locale;

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Services,
    Contacts,
    Appointment,
    Language,
    Info,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Services,
        Command::Contacts,
        Command::Appointment,
        Command::Language,
        Command::Info,
    ];

    /// Inline-button payload that triggers this command.
    pub fn payload(self) -> &'static str {
        match self {
            Self::Services => "cmd_services",
            Self::Contacts => "cmd_contacts",
            Self::Appointment => "cmd_appointment",
            Self::Language => "cmd_language",
            Self::Info => "cmd_info",
        }
    }

    /// Translation key of the main-menu button, if the command has one.
    pub fn label_key(self) -> Option<&'static str> {
        match self {
            Self::Services => Some("services"),
            Self::Contacts => Some("contacts"),
            Self::Appointment => Some("appointment"),
            Self::Language => Some("language"),
            Self::Info => None,
        }
    }

    /// Parse a command from message text or a callback payload.
    ///
    /// Matching is case-sensitive and spans every locale. Slash commands
    /// are read from the first word with any `@botname` suffix removed;
    /// button labels and payloads must equal the whole trimmed text.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/services@crew_bot" → "/services").
        let slash = first.split('@').next().unwrap_or(first);

        AliasTable::rows()
            .into_iter()
            .find(|row| match row.kind {
                AliasKind::Slash => row.alias == slash,
                AliasKind::Label | AliasKind::Payload => row.alias == text,
            })
            .map(|row| row.command)
    }
}

/// How an alias reaches the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    /// Typed slash command.
    Slash,
    /// Reply-keyboard label, sent back as plain text.
    Label,
    /// Inline-button callback payload.
    Payload,
}

/// One alias of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRow {
    /// `None` for payloads, which are the same in every locale.
    pub locale: Option<Locale>,
    pub kind: AliasKind,
    pub alias: &'static str,
    pub command: Command,
}

/// The full alias table.
pub struct AliasTable;

impl AliasTable {
    /// All aliases: slash commands and menu labels per locale, then payloads.
    pub fn rows() -> Vec<AliasRow> {
        let mut rows = Vec::new();
        for locale in Locale::ALL {
            rows.extend(
                slash_commands(locale)
                    .iter()
                    .map(|&(alias, command)| AliasRow {
                        locale: Some(locale),
                        kind: AliasKind::Slash,
                        alias,
                        command,
                    }),
            );
            rows.extend(Command::ALL.into_iter().filter_map(|command| {
                let key = command.label_key()?;
                Some(AliasRow {
                    locale: Some(locale),
                    kind: AliasKind::Label,
                    alias: i18n::t(key, locale.code()),
                    command,
                })
            }));
        }
        rows.extend(Command::ALL.into_iter().map(|command| AliasRow {
            locale: None,
            kind: AliasKind::Payload,
            alias: command.payload(),
            command,
        }));
        rows
    }
}

fn slash_commands(locale: Locale) -> &'static [(&'static str, Command)] {
    match locale {
        Locale::En => &[
            ("/services", Command::Services),
            ("/contacts", Command::Contacts),
            ("/appointment", Command::Appointment),
            ("/start", Command::Language),
            ("/language", Command::Language),
            ("/lang", Command::Language),
            ("/help", Command::Info),
            ("/info", Command::Info),
        ],
        Locale::Ua => &[
            ("/послуги", Command::Services),
            ("/контакти", Command::Contacts),
            ("/запис", Command::Appointment),
            ("/мова", Command::Language),
            ("/довідка", Command::Info),
        ],
    }
}
