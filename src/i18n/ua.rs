//! Ukrainian strings.

pub(super) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        "services" => "📋 Послуги",
        "contacts" => "📞 Контакти",
        "appointment" => "📅 Замовити візит",
        "language" => "🌐 Мова",
        "services_book_button" => "📅 Записатися на візит",

        "welcome_message" => "Вітаємо! Будь ласка, оберіть послугу з меню нижче:",
        "choose_language" => {
            "Привіт! Будь ласка, оберіть бажану мову спілкування / \
             Welcome! Please select your preferred language"
        }
        "unknown_command" => {
            "Я не розумію цю команду. Будь ласка, скористайтеся одним із доступних варіантів."
        }
        "services_list" => {
            "Наші послуги:\n\n\
             🏗️ Нове будівництво\n\
             🔨 Ремонт приміщень\n\
             🏠 Прибудови до будинку\n\
             🛠️ Ремонт та обслуговування\n\
             🏢 Комерційне будівництво\n\
             ⚡ Електромонтажні роботи\n\
             🚿 Сантехнічні роботи"
        }
        "contact_information" => "Контактна інформація:\n\n📞 Телефон: +38 (097) 050 60 70",
        "appointment_information" => {
            "Щоб замовити візит, надішліть одним повідомленням:\n\n\
             1. Вашу адресу\n\
             2. Ваш номер телефону\n\
             3. Бажану дату (ДД/ММ/РРРР)\n\
             4. Бажаний час\n\n\
             Приклад:\n\
             Київ, вул. Хрещатик, 1\n\
             +380 97 123 45 67\n\
             15/05/2025\n\
             14:00"
        }
        "appointment_received" => {
            "Дякуємо! Ваш запит на візит отримано.\n\n\
             Ми зв'яжемося з вами найближчим часом, щоб підтвердити деталі.\n\n\
             Надана вами інформація:\n"
        }
        "appointment_failed" => {
            "Вибачте, не вдалося зберегти ваш запит. Будь ласка, надішліть дані ще раз."
        }
        "bot_info" => {
            "Я помічник нашої будівельної компанії. Скористайтеся меню, щоб переглянути \
             послуги, отримати контакти або замовити візит фахівця."
        }
        _ => return None,
    })
}
