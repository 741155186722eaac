use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::r#trait::{DisplaySink, SinkHandle};
use super::settings::SinkSettings;

#[derive(Default)]
struct MemoryState {
    sources: HashMap<String, SinkSettings>,
    // История записей ведётся только для тестового источника, dry-run хранит последний текст
    record_writes: bool,
    writes: Vec<(String, String)>,
}

/// Источники в памяти процесса: dry-run режим и тесты.
///
/// В режиме `accepting_any` любое имя создаёт источник при первом обращении, а для
/// каждого источника хранятся только последние настройки.
#[derive(Clone)]
pub struct MemorySink {
    accept_any: bool,
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn accepting_any() -> Self {
        info!("Dry-run режим - текстовые источники только логируются");
        Self {
            accept_any: true,
            state: Arc::default(),
        }
    }

    #[allow(dead_code)]
    pub fn with_sources(names: &[&str]) -> Self {
        let sources = names
            .iter()
            .map(|name| (name.to_string(), SinkSettings::new()))
            .collect();

        Self {
            accept_any: false,
            state: Arc::new(Mutex::new(MemoryState {
                sources,
                record_writes: true,
                writes: Vec::new(),
            })),
        }
    }

    /// Все записи в порядке поступления: (имя источника, текст)
    #[allow(dead_code)]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.state.lock().writes.clone()
    }

    #[allow(dead_code)]
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .sources
            .get(name)
            .map(|settings| settings.text().to_string())
    }

    #[allow(dead_code)]
    pub fn remove_source(&self, name: &str) {
        self.state.lock().sources.remove(name);
    }
}

impl DisplaySink for MemorySink {
    fn resolve(&self, name: &str) -> Option<Box<dyn SinkHandle>> {
        let mut state = self.state.lock();

        if !state.sources.contains_key(name) {
            if !self.accept_any || name.is_empty() {
                return None;
            }
            state.sources.insert(name.to_string(), SinkSettings::new());
        }

        Some(Box::new(MemorySinkHandle {
            name: name.to_string(),
            accept_any: self.accept_any,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MemorySinkHandle {
    name: String,
    accept_any: bool,
    state: Arc<Mutex<MemoryState>>,
}

impl SinkHandle for MemorySinkHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> Result<SinkSettings> {
        Ok(self
            .state
            .lock()
            .sources
            .get(&self.name)
            .cloned()
            .unwrap_or_default())
    }

    fn update(&mut self, settings: &SinkSettings) -> Result<()> {
        if self.accept_any {
            info!("Dry-run: источник '{}' <- \"{}\"", self.name, settings.text());
        }

        let mut state = self.state.lock();
        state.sources.insert(self.name.clone(), settings.clone());
        if state.record_writes {
            state
                .writes
                .push((self.name.clone(), settings.text().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::display_sink::TEXT_FIELD;

    #[test]
    fn known_sources_only() {
        let sink = MemorySink::with_sources(&["overlay"]);
        assert!(sink.resolve("overlay").is_some());
        assert!(sink.resolve("missing").is_none());
    }

    #[test]
    fn accepting_any_creates_sources() {
        let sink = MemorySink::accepting_any();
        assert!(sink.resolve("anything").is_some());
        assert!(sink.resolve("").is_none());
    }

    #[test]
    fn records_writes() {
        let sink = MemorySink::with_sources(&["overlay"]);

        let mut handle = sink.resolve("overlay").unwrap();
        let mut settings = handle.settings().unwrap();
        settings.set_string(TEXT_FIELD, "hello");
        handle.update(&settings).unwrap();

        assert_eq!(sink.writes(), vec![("overlay".to_string(), "hello".to_string())]);
        assert_eq!(sink.text_of("overlay").as_deref(), Some("hello"));
    }

    #[test]
    fn accepting_any_keeps_only_latest_text() {
        let sink = MemorySink::accepting_any();

        for i in 0..1000 {
            let mut handle = sink.resolve("overlay").unwrap();
            let mut settings = handle.settings().unwrap();
            settings.set_string(TEXT_FIELD, format!("track {}", i));
            handle.update(&settings).unwrap();
        }

        assert!(sink.writes().is_empty());
        assert_eq!(sink.state.lock().sources.len(), 1);
        assert_eq!(sink.text_of("overlay").as_deref(), Some("track 999"));
    }
}
