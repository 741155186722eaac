use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Поле с отображаемым текстом
pub const TEXT_FIELD: &str = "text";

/// Настройки источника как хранилище ключ-значение
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkSettings {
    values: BTreeMap<String, String>,
}

impl SinkSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn text(&self) -> &str {
        self.get_string(TEXT_FIELD).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_defaults_to_empty() {
        let mut settings = SinkSettings::new();
        assert_eq!(settings.text(), "");

        settings.set_string(TEXT_FIELD, "Now Playing: Song");
        assert_eq!(settings.text(), "Now Playing: Song");
        assert_eq!(settings.get_string("font"), None);
    }
}
