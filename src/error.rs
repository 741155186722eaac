use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Не удалось перечислить окна: {0}")]
    Enumeration(String),

    #[error("Текстовый источник не найден: {0}")]
    SinkNotFound(String),

    #[error("Ошибка текстового источника: {0}")]
    Sink(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl BridgeError {
    pub fn enumeration<T>(msg: impl Into<String>) -> Result<T> {
        Err(BridgeError::Enumeration(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! bridge_error {
    (enumeration, $($arg:tt)*) => {
        $crate::error::BridgeError::Enumeration(format!($($arg)*))
    };
    (sink_not_found, $($arg:tt)*) => {
        $crate::error::BridgeError::SinkNotFound(format!($($arg)*))
    };
    (sink, $($arg:tt)*) => {
        $crate::error::BridgeError::Sink(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::BridgeError::Internal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_helper_returns_err() {
        let result: Result<()> = BridgeError::enumeration("wmctrl вернул ошибку");
        assert!(matches!(result, Err(BridgeError::Enumeration(msg)) if msg == "wmctrl вернул ошибку"));
    }

    #[test]
    fn macro_formats_message() {
        let err = bridge_error!(sink_not_found, "{}.txt", "now_playing");
        assert_eq!(err.to_string(), "Текстовый источник не найден: now_playing.txt");
    }
}
