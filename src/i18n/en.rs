//! English strings.

pub(super) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        // Menu labels. Reply-keyboard buttons send these back verbatim.
        "services" => "📋 Services",
        "contacts" => "📞 Contacts",
        "appointment" => "📅 Make an appointment",
        "language" => "🌐 Language",
        "services_book_button" => "📅 Book a visit",

        "welcome_message" => "Welcome! Please, choose an option from the menu below:",
        "choose_language" => {
            "Привіт! Будь ласка, оберіть бажану мову спілкування / \
             Welcome! Please select your preferred language"
        }
        "unknown_command" => {
            "I don't understand that command. Please use one of the available options."
        }
        "services_list" => {
            "Our Services:\n\n\
             🏗️ New Construction\n\
             🔨 Renovations\n\
             🏠 Home Extensions\n\
             🛠️ Repairs and Maintenance\n\
             🏢 Commercial Construction\n\
             ⚡ Electrical Work\n\
             🚿 Plumbing Services"
        }
        "contact_information" => "Contact Information:\n\n📞 Phone: +38 (097) 050 60 70",
        "appointment_information" => {
            "To make an appointment, please send one message with:\n\n\
             1. Your address\n\
             2. Your phone number\n\
             3. Preferred date (DD/MM/YYYY)\n\
             4. Preferred time\n\n\
             Example:\n\
             Kyiv, Khreshchatyk St. 1\n\
             +380 97 123 45 67\n\
             15/05/2025\n\
             14:00"
        }
        "appointment_received" => {
            "Thank you! Your appointment request has been received.\n\n\
             We will contact you shortly to confirm the details.\n\n\
             Your provided information:\n"
        }
        "appointment_failed" => {
            "Sorry, we could not save your request. Please send your details again."
        }
        "bot_info" => {
            "I am the assistant of our construction company. Use the menu to see \
             our services, get our contacts, or request a visit from a specialist."
        }
        _ => return None,
    })
}
