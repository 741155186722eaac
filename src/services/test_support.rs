use crate::error::{BridgeError, Result};
use crate::events::WindowTitle;
use crate::services::window_enumerator::WindowEnumerator;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Перечислитель с заранее заданным списком окон
pub struct StaticEnumerator {
    titles: Vec<WindowTitle>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl StaticEnumerator {
    pub fn new(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|title| WindowTitle::from(*title)).collect(),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        let enumerator = Self::new(&[]);
        enumerator.set_failing(true);
        enumerator
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl WindowEnumerator for StaticEnumerator {
    async fn enumerate_visible_titles(&self) -> Result<Vec<WindowTitle>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::Relaxed) {
            return Err(BridgeError::Enumeration("эмуляция сбоя".to_string()));
        }
        Ok(self.titles.clone())
    }
}
