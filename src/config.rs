use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Правило по умолчанию: название трека из заголовка окна foobar2000
pub const DEFAULT_FILTER_RULE: &str = r"^(.*?)\s*\[foobar2000[^\]]*\]";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Настройки отслеживания: то, что пользователь меняет при реконфигурации
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub text_source: String,
    #[serde(default)]
    pub filter_keyword: String,
    // Отсутствующий ключ даёт правило по умолчанию, явная пустая строка отключает фильтр
    #[serde(default = "default_filter_rule")]
    pub filter_rule: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_detection_mode")]
    pub detection_mode: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkConfig {
    #[serde(default = "default_sink_directory")]
    pub directory: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_filter_rule() -> String {
    DEFAULT_FILTER_RULE.to_string()
}

fn default_detection_mode() -> String {
    "auto".to_string()
}

fn default_sink_directory() -> PathBuf {
    PathBuf::from("sources")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            text_source: String::new(),
            filter_keyword: String::new(),
            filter_rule: default_filter_rule(),
            prefix: String::new(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            detection_mode: default_detection_mode(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            directory: default_sink_directory(),
        }
    }
}

impl MonitorConfig {
    /// Нужно ли держать таймер запущенным
    pub fn should_run(&self) -> bool {
        self.enabled && !self.text_source.is_empty()
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TITLE_BRIDGE_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "pretty" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек окон
        match self.window.detection_mode.as_str() {
            "auto" | "wmctrl" | "xdotool" | "sway" | "win32" => {}
            _ => anyhow::bail!(
                "Неверный режим детекции окон: {}",
                self.window.detection_mode
            ),
        }

        if self.window.detection_mode == "win32" && !cfg!(windows) {
            anyhow::bail!("Режим win32 доступен только в Windows");
        }

        Ok(())
    }
}
