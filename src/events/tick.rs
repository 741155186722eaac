use std::fmt;

/// Итог одного срабатывания таймера
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Отслеживание выключено или имя источника пустое
    Skipped,
    /// Источник с таким именем сейчас не существует
    SinkMissing,
    /// Текст записан в источник
    Written(String),
    /// Источник найден, но запись не удалась
    WriteFailed,
}

impl TickOutcome {
    #[allow(dead_code)]
    pub fn written_text(&self) -> Option<&str> {
        match self {
            TickOutcome::Written(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::Skipped => write!(f, "пропущено"),
            TickOutcome::SinkMissing => write!(f, "источник не найден"),
            TickOutcome::Written(text) => write!(f, "записано: \"{}\"", text),
            TickOutcome::WriteFailed => write!(f, "ошибка записи"),
        }
    }
}
