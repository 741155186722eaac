use crate::config::MonitorConfig;
use crate::debug_if_enabled;
use crate::error::BridgeError;
use crate::events::TickOutcome;
use crate::services::display_sink::{DisplaySink, TEXT_FIELD};
use crate::services::title_filter::{find_first_matching, FilterRule};
use crate::services::window_enumerator::WindowEnumerator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Текст, если ни одно окно не содержит ключевое слово
pub const NOT_FOUND_TEXT: &str = "(window not found)";

/// Снимок настроек, с которым работает цикл; заменяется целиком при реконфигурации
#[derive(Debug, Clone, Default)]
pub struct CycleSettings {
    pub enabled: bool,
    pub source_name: String,
    pub keyword: String,
    pub rule: FilterRule,
    pub prefix: String,
}

impl CycleSettings {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            enabled: config.enabled,
            source_name: config.text_source.clone(),
            keyword: config.filter_keyword.clone(),
            rule: FilterRule::new(&config.filter_rule),
            prefix: config.prefix.clone(),
        }
    }

    pub fn should_run(&self) -> bool {
        self.enabled && !self.source_name.is_empty()
    }
}

/// Один проход: окна -> ключевое слово -> фильтр -> префикс -> источник
pub struct UpdateCycle {
    enumerator: Arc<dyn WindowEnumerator>,
    sink: Arc<dyn DisplaySink>,
    // Предупреждение пишется только при переходе в состояние ошибки
    enumeration_failing: AtomicBool,
}

impl UpdateCycle {
    pub fn new(enumerator: Arc<dyn WindowEnumerator>, sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            enumerator,
            sink,
            enumeration_failing: AtomicBool::new(false),
        }
    }

    /// Итоговый текст для текущего набора окон.
    ///
    /// Ошибка перечисления окон считается отсутствием окон.
    pub async fn compose_text(&self, settings: &CycleSettings) -> String {
        let titles = match self.enumerator.enumerate_visible_titles().await {
            Ok(titles) => {
                if self.enumeration_failing.swap(false, Ordering::Relaxed) {
                    info!("Перечисление окон восстановилось");
                }
                titles
            }
            Err(e) => {
                if self.enumeration_failing.swap(true, Ordering::Relaxed) {
                    debug!("Перечисление окон по-прежнему не удаётся: {}", e);
                } else {
                    warn!("Перечисление окон не удалось: {}", e);
                }
                Vec::new()
            }
        };

        let filtered = match find_first_matching(&titles, &settings.keyword) {
            Some(title) => {
                debug_if_enabled!("Найдено окно {} по ключевому слову '{}'", title, settings.keyword);
                settings.rule.apply(title.as_str())
            }
            None => NOT_FOUND_TEXT.to_string(),
        };

        format!("{}{}", settings.prefix, filtered)
    }

    /// Срабатывание таймера. Никогда не возвращает ошибку: все сбои сводятся к
    /// пропуску или тексту-заглушке.
    pub async fn tick(&self, settings: &CycleSettings) -> TickOutcome {
        if !settings.should_run() {
            return TickOutcome::Skipped;
        }

        let text = self.compose_text(settings).await;
        self.write(&settings.source_name, text)
    }

    fn write(&self, source_name: &str, text: String) -> TickOutcome {
        // Источник ищется заново на каждом тике: его могли пересоздать или переименовать
        let Some(mut handle) = self.sink.resolve(source_name) else {
            debug!("{}, пропускаем тик", BridgeError::SinkNotFound(source_name.to_string()));
            return TickOutcome::SinkMissing;
        };

        let mut sink_settings = match handle.settings() {
            Ok(sink_settings) => sink_settings,
            Err(e) => {
                warn!("Не удалось прочитать настройки источника '{}': {}", source_name, e);
                Default::default()
            }
        };
        sink_settings.set_string(TEXT_FIELD, text.as_str());

        match handle.update(&sink_settings) {
            Ok(()) => TickOutcome::Written(text),
            Err(e) => {
                warn!("Не удалось обновить источник '{}': {}", source_name, e);
                TickOutcome::WriteFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FILTER_RULE;
    use crate::services::display_sink::MemorySink;
    use crate::services::test_support::StaticEnumerator;

    fn settings(keyword: &str, prefix: &str) -> CycleSettings {
        CycleSettings::from_config(&MonitorConfig {
            enabled: true,
            text_source: "overlay".to_string(),
            filter_keyword: keyword.to_string(),
            filter_rule: DEFAULT_FILTER_RULE.to_string(),
            prefix: prefix.to_string(),
        })
    }

    fn cycle(titles: &[&str], sink: &MemorySink) -> UpdateCycle {
        UpdateCycle::new(Arc::new(StaticEnumerator::new(titles)), Arc::new(sink.clone()))
    }

    #[tokio::test]
    async fn writes_filtered_title_with_prefix() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["Song Name [foobar2000 v2.1]", "Notepad"], &sink);

        let outcome = cycle.tick(&settings("foobar2000", "Now Playing: ")).await;

        assert_eq!(outcome, TickOutcome::Written("Now Playing: Song Name".to_string()));
        assert_eq!(sink.text_of("overlay").as_deref(), Some("Now Playing: Song Name"));
    }

    #[tokio::test]
    async fn lazy_group_keeps_text_before_bracket() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["foobar2000 - Song Name [foobar2000 v2.1]", "Notepad"], &sink);

        let outcome = cycle.tick(&settings("foobar2000", "Now Playing: ")).await;

        assert_eq!(outcome.written_text(), Some("Now Playing: foobar2000 - Song Name"));
    }

    #[tokio::test]
    async fn no_windows_writes_placeholder() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&[], &sink);

        let outcome = cycle.tick(&settings("foobar2000", "Now Playing: ")).await;

        let expected = format!("Now Playing: {}", NOT_FOUND_TEXT);
        assert_eq!(outcome.written_text(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn enumeration_failure_writes_placeholder() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = UpdateCycle::new(Arc::new(StaticEnumerator::failing()), Arc::new(sink.clone()));

        let outcome = cycle.tick(&settings("foobar2000", "")).await;

        assert_eq!(outcome.written_text(), Some(NOT_FOUND_TEXT));
    }

    #[tokio::test]
    async fn enumeration_failure_state_follows_enumerator() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let enumerator = Arc::new(StaticEnumerator::new(&["Song [foobar2000 v2.1]"]));
        let cycle = UpdateCycle::new(enumerator.clone(), Arc::new(sink.clone()));
        let settings = settings("foobar2000", "");

        assert_eq!(cycle.tick(&settings).await.written_text(), Some("Song"));
        assert!(!cycle.enumeration_failing.load(Ordering::Relaxed));

        enumerator.set_failing(true);
        for _ in 0..3 {
            assert_eq!(cycle.tick(&settings).await.written_text(), Some(NOT_FOUND_TEXT));
            assert!(cycle.enumeration_failing.load(Ordering::Relaxed));
        }

        enumerator.set_failing(false);
        assert_eq!(cycle.tick(&settings).await.written_text(), Some("Song"));
        assert!(!cycle.enumeration_failing.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn disabled_never_touches_sink() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let enumerator = Arc::new(StaticEnumerator::new(&["Song [foobar2000 v2.1]"]));
        let cycle = UpdateCycle::new(enumerator.clone(), Arc::new(sink.clone()));

        let mut disabled = settings("foobar2000", "");
        disabled.enabled = false;

        assert_eq!(cycle.tick(&disabled).await, TickOutcome::Skipped);
        assert!(sink.writes().is_empty());
        assert_eq!(enumerator.calls(), 0);
    }

    #[tokio::test]
    async fn empty_source_name_is_skipped() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["Song [foobar2000 v2.1]"], &sink);

        let mut unnamed = settings("foobar2000", "");
        unnamed.source_name.clear();

        assert_eq!(cycle.tick(&unnamed).await, TickOutcome::Skipped);
        assert!(sink.writes().is_empty());
    }

    #[tokio::test]
    async fn missing_source_is_silent_and_retried() {
        let sink = MemorySink::with_sources(&["other"]);
        let cycle = cycle(&["Song [foobar2000 v2.1]"], &sink);
        let settings = settings("foobar2000", "");

        assert_eq!(cycle.tick(&settings).await, TickOutcome::SinkMissing);
        assert!(sink.writes().is_empty());

        // Источник появился - следующий тик пишет
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = UpdateCycle::new(
            Arc::new(StaticEnumerator::new(&["Song [foobar2000 v2.1]"])),
            Arc::new(sink.clone()),
        );
        assert_eq!(cycle.tick(&settings).await.written_text(), Some("Song"));
    }

    #[tokio::test]
    async fn source_removed_between_ticks() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["Song [foobar2000 v2.1]"], &sink);
        let settings = settings("foobar2000", "");

        assert!(cycle.tick(&settings).await.written_text().is_some());
        sink.remove_source("overlay");
        assert_eq!(cycle.tick(&settings).await, TickOutcome::SinkMissing);
        assert_eq!(sink.writes().len(), 1);
    }

    #[tokio::test]
    async fn malformed_rule_writes_raw_title() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["Notepad", "Song [foobar2000 v2.1]"], &sink);

        let mut broken = settings("FOOBAR", "> ");
        broken.rule = FilterRule::new("[invalid(regex");

        let outcome = cycle.tick(&broken).await;
        assert_eq!(outcome.written_text(), Some("> Song [foobar2000 v2.1]"));
    }

    #[tokio::test]
    async fn compose_text_ignores_enabled_flag() {
        let sink = MemorySink::with_sources(&["overlay"]);
        let cycle = cycle(&["Song [foobar2000 v2.1]"], &sink);

        let mut disabled = settings("foobar2000", "");
        disabled.enabled = false;

        assert_eq!(cycle.compose_text(&disabled).await, "Song");
        assert!(sink.writes().is_empty());
    }
}
