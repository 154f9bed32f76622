use super::*;

/// Keys every locale must define.
const KEYS: &[&str] = &[
    "services",
    "contacts",
    "appointment",
    "language",
    "welcome_message",
    "choose_language",
    "unknown_command",
    "appointment_information",
    "appointment_received",
    "appointment_failed",
    "contact_information",
    "services_list",
    "bot_info",
    "services_book_button",
];

#[test]
fn test_all_keys_defined_in_every_locale() {
    for locale in Locale::ALL {
        for key in KEYS {
            assert!(
                lookup(locale, key).is_some(),
                "key '{key}' missing for {locale}"
            );
        }
    }
}

#[test]
fn test_unsupported_locale_falls_back_to_english() {
    assert_eq!(t("services", "xx"), t("services", "en"));
    assert_eq!(t("services", ""), "📋 Services");
    assert_eq!(t("welcome_message", "de"), resolve(Locale::En, "welcome_message"));
}

#[test]
fn test_missing_key_returns_key_verbatim() {
    assert_eq!(t("no_such_key", "en"), "no_such_key");
    assert_eq!(t("no_such_key", "ua"), "no_such_key");
    assert_eq!(resolve(Locale::Ua, "Services"), "Services");
}

#[test]
fn test_resolve_is_stable() {
    for locale in Locale::ALL {
        for key in KEYS {
            assert_eq!(resolve(locale, key), resolve(locale, key));
        }
    }
}

#[test]
fn test_ukrainian_labels_differ_from_english() {
    for key in ["services", "contacts", "appointment", "language", "welcome_message"] {
        assert_ne!(t(key, "ua"), t(key, "en"), "'{key}' not translated");
    }
}

#[test]
fn test_menu_labels_are_unique_per_locale() {
    for locale in Locale::ALL {
        let labels = ["services", "contacts", "appointment", "language"].map(|k| resolve(locale, k));
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn test_contact_information_has_phone() {
    for locale in Locale::ALL {
        assert!(resolve(locale, "contact_information").contains("+38 (097) 050 60 70"));
    }
}

#[test]
fn test_appointment_confirmation_echoes_details_verbatim() {
    let details = "Kyiv, <b>Main</b> St.\n+380 97 000 00 00\n15/05/2025\n14:00";
    for locale in Locale::ALL {
        let text = appointment_confirmation(locale, details);
        assert!(text.starts_with(resolve(locale, "appointment_received")));
        assert!(text.ends_with(details));
    }
}
