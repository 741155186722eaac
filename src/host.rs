use crate::config::{MonitorConfig, DEFAULT_FILTER_RULE};
use std::fmt::Write;

pub const DESCRIPTION: &str = "Фильтр заголовков окон: находит окно по ключевому слову и выводит \
часть его заголовка в текстовый источник";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Bool,
    Text,
}

/// Описание одной настройки для панели параметров
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub label: &'static str,
    pub default: String,
}

pub fn properties() -> Vec<Property> {
    let defaults = MonitorConfig::default();

    vec![
        Property {
            name: "enabled",
            kind: PropertyKind::Bool,
            label: "Включено",
            default: defaults.enabled.to_string(),
        },
        Property {
            name: "text_source",
            kind: PropertyKind::Text,
            label: "Имя текстового источника",
            default: defaults.text_source,
        },
        Property {
            name: "filter_keyword",
            kind: PropertyKind::Text,
            label: "Ключевое слово в заголовке",
            default: defaults.filter_keyword,
        },
        Property {
            name: "filter_rule",
            kind: PropertyKind::Text,
            label: "Правило фильтрации (регулярное выражение)",
            default: defaults.filter_rule,
        },
        Property {
            name: "prefix",
            kind: PropertyKind::Text,
            label: "Префикс (необязательно)",
            default: defaults.prefix,
        },
    ]
}

/// Текст для `--describe`: описание, пример правила и список настроек секции `[monitor]`
pub fn describe() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", DESCRIPTION);
    let _ = writeln!(out, "Пример правила: {}", DEFAULT_FILTER_RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "[monitor]");

    for property in properties() {
        let kind = match property.kind {
            PropertyKind::Bool => "bool",
            PropertyKind::Text => "string",
        };
        let _ = writeln!(
            out,
            "  {:<15} {:<7} {} (по умолчанию: {:?})",
            property.name, kind, property.label, property.default
        );
    }

    out
}
