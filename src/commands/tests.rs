use super::*;

#[test]
fn test_parse_english_slash_commands() {
    assert_eq!(Command::parse("/services"), Some(Command::Services));
    assert_eq!(Command::parse("/contacts"), Some(Command::Contacts));
    assert_eq!(Command::parse("/appointment"), Some(Command::Appointment));
    assert_eq!(Command::parse("/language"), Some(Command::Language));
    assert_eq!(Command::parse("/lang"), Some(Command::Language));
    assert_eq!(Command::parse("/start"), Some(Command::Language));
    assert_eq!(Command::parse("/help"), Some(Command::Info));
    assert_eq!(Command::parse("/info"), Some(Command::Info));
}

#[test]
fn test_parse_ukrainian_slash_commands() {
    assert_eq!(Command::parse("/послуги"), Some(Command::Services));
    assert_eq!(Command::parse("/контакти"), Some(Command::Contacts));
    assert_eq!(Command::parse("/запис"), Some(Command::Appointment));
    assert_eq!(Command::parse("/мова"), Some(Command::Language));
    assert_eq!(Command::parse("/довідка"), Some(Command::Info));
}

#[test]
fn test_parse_strips_botname_and_arguments() {
    assert_eq!(
        Command::parse("/services@crew_bot"),
        Some(Command::Services)
    );
    assert_eq!(Command::parse("/запис@crew_bot"), Some(Command::Appointment));
    assert_eq!(Command::parse("/contacts please"), Some(Command::Contacts));
    assert_eq!(Command::parse("  /info  "), Some(Command::Info));
}

#[test]
fn test_parse_menu_labels_in_every_locale() {
    assert_eq!(Command::parse("📋 Services"), Some(Command::Services));
    assert_eq!(Command::parse("📋 Послуги"), Some(Command::Services));
    assert_eq!(Command::parse("📞 Contacts"), Some(Command::Contacts));
    assert_eq!(Command::parse("📞 Контакти"), Some(Command::Contacts));
    assert_eq!(
        Command::parse("📅 Make an appointment"),
        Some(Command::Appointment)
    );
    assert_eq!(Command::parse("📅 Замовити візит"), Some(Command::Appointment));
    assert_eq!(Command::parse("🌐 Language"), Some(Command::Language));
    assert_eq!(Command::parse("🌐 Мова"), Some(Command::Language));
}

#[test]
fn test_labels_match_whole_text_only() {
    assert_eq!(Command::parse("📋 Services please"), None);
    assert_eq!(Command::parse("📋"), None);
}

#[test]
fn test_parse_payloads() {
    for command in Command::ALL {
        assert_eq!(Command::parse(command.payload()), Some(command));
    }
}

#[test]
fn test_parse_is_case_sensitive() {
    assert_eq!(Command::parse("/Services"), None);
    assert_eq!(Command::parse("📋 SERVICES"), None);
    assert_eq!(Command::parse("CMD_SERVICES"), None);
}

#[test]
fn test_parse_unknown_and_empty() {
    assert_eq!(Command::parse("hello"), None);
    assert_eq!(Command::parse("/unknown"), None);
    assert_eq!(Command::parse("lang_en"), None);
    assert_eq!(Command::parse(""), None);
    assert_eq!(Command::parse("   "), None);
}

#[test]
fn test_alias_table_has_no_conflicting_entries() {
    let rows = AliasTable::rows();
    for (i, a) in rows.iter().enumerate() {
        for b in &rows[i + 1..] {
            if a.alias == b.alias {
                assert_eq!(a.command, b.command, "alias '{}' is ambiguous", a.alias);
            }
        }
    }
}

#[test]
fn test_alias_table_covers_every_locale() {
    let rows = AliasTable::rows();
    for locale in Locale::ALL {
        for command in [
            Command::Services,
            Command::Contacts,
            Command::Appointment,
            Command::Language,
        ] {
            for kind in [AliasKind::Slash, AliasKind::Label] {
                assert!(
                    rows.iter().any(|r| r.locale == Some(locale)
                        && r.kind == kind
                        && r.command == command),
                    "{command:?} has no {kind:?} alias for {locale}"
                );
            }
        }
    }
    assert_eq!(
        rows.iter().filter(|r| r.kind == AliasKind::Payload).count(),
        Command::ALL.len()
    );
}
