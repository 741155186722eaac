use crate::events::WindowTitle;
use fancy_regex::Regex;
use tracing::{debug, warn};

/// Первый заголовок, содержащий ключевое слово без учёта регистра.
///
/// Пустое ключевое слово совпадает с любым заголовком, поэтому возвращается первый.
pub fn find_first_matching<'a>(titles: &'a [WindowTitle], keyword: &str) -> Option<&'a WindowTitle> {
    let keyword_lower = keyword.to_lowercase();
    titles
        .iter()
        .find(|title| title.contains_keyword(&keyword_lower))
}

/// Правило фильтрации заголовка, скомпилированное один раз при реконфигурации.
///
/// Пустое, состоящее из пробелов или некорректное правило превращается в тождественное
/// преобразование.
#[derive(Debug, Clone)]
pub struct FilterRule {
    source: String,
    regex: Option<Regex>,
}

impl FilterRule {
    pub fn new(rule: &str) -> Self {
        let regex = if rule.trim().is_empty() {
            None
        } else {
            match Regex::new(rule) {
                Ok(regex) => {
                    if regex.captures_len() < 2 {
                        warn!("Правило '{}' не содержит групп захвата, используется всё совпадение", rule);
                    }
                    Some(regex)
                }
                Err(e) => {
                    warn!("Некорректное правило фильтрации '{}': {}. Заголовок не фильтруется", rule, e);
                    None
                }
            }
        };

        Self {
            source: rule.to_string(),
            regex,
        }
    }

    pub fn identity() -> Self {
        Self {
            source: String::new(),
            regex: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    #[allow(dead_code)]
    pub fn is_identity(&self) -> bool {
        self.regex.is_none()
    }

    /// Первая группа захвата при совпадении, иначе исходный заголовок.
    ///
    /// Без групп захвата возвращается всё совпадение; группа, не участвовавшая
    /// в совпадении, даёт пустую строку.
    pub fn apply(&self, title: &str) -> String {
        let Some(regex) = &self.regex else {
            return title.to_string();
        };

        // Нулевая группа всегда есть; первая - если правило содержит группы захвата
        let group = if regex.captures_len() > 1 { 1 } else { 0 };

        match regex.captures(title) {
            Ok(Some(captures)) => captures
                .get(group)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            Ok(None) => title.to_string(),
            Err(e) => {
                // Например, превышен лимит возвратов на патологическом правиле
                debug!("Правило '{}' не применилось к {:?}: {}", self.source, title, e);
                title.to_string()
            }
        }
    }
}

impl Default for FilterRule {
    fn default() -> Self {
        Self::identity()
    }
}

/// Компилирует `rule` и применяет к `title`; никогда не завершается ошибкой
pub fn apply_filter(title: &str, rule: &str) -> String {
    FilterRule::new(rule).apply(title)
}
