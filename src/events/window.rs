use std::fmt;
use std::sync::Arc;

/// Заголовок видимого окна верхнего уровня, полученный за один проход перечисления
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowTitle(Arc<str>);

impl WindowTitle {
    pub fn new(title: impl Into<Arc<str>>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Регистронезависимый поиск подстроки; пустое ключевое слово совпадает с любым заголовком
    pub fn contains_keyword(&self, keyword_lower: &str) -> bool {
        if keyword_lower.is_empty() {
            return true;
        }
        self.0.to_lowercase().contains(keyword_lower)
    }
}

impl From<&str> for WindowTitle {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for WindowTitle {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

impl AsRef<str> for WindowTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WindowTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title_creation() {
        let title = WindowTitle::from("Test Window");
        assert_eq!(title.as_str(), "Test Window");
        assert!(!title.is_empty());
        assert_eq!(title.to_string(), "\"Test Window\"");
    }

    #[test]
    fn test_keyword_matching() {
        let title = WindowTitle::from("Song [FOOBAR2000 v2.1]");

        assert!(title.contains_keyword("foobar2000"));
        assert!(title.contains_keyword("song"));
        assert!(!title.contains_keyword("winamp"));
        assert!(title.contains_keyword(""));
    }
}
