//! Internationalization: localized strings for every bot reply.
//!
//! `t(key, code)` resolves a static string for a locale code, and the
//! `format` helpers build replies that interpolate user input.
//! Supported locales: English (fallback) and Ukrainian.

mod en;
mod format;
mod ua;

#[cfg(test)]
mod tests;

pub use format::*;

use crewbot_core::message::Locale;

/// Return the localized string for `key` in the locale named by `code`.
///
/// Unsupported codes fall back to English. A key missing from the table
/// comes back verbatim so the gap shows up in the chat instead of crashing.
pub fn t<'a>(key: &'a str, code: &str) -> &'a str {
    resolve(Locale::from_code(code).unwrap_or(Locale::DEFAULT), key)
}

/// Same as [`t`] for an already-parsed locale.
pub fn resolve(locale: Locale, key: &str) -> &str {
    lookup(locale, key).unwrap_or(key)
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::En => en::lookup(key),
        Locale::Ua => ua::lookup(key),
    }
}
