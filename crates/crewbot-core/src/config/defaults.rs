//! Default value functions used by serde for config deserialization.

use super::StoreBackend;

pub fn default_name() -> String {
    "crewbot".to_string()
}

pub fn default_data_dir() -> String {
    "~/.crewbot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_store_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

pub fn default_db_path() -> String {
    "~/.crewbot/data/appointments.db".to_string()
}
