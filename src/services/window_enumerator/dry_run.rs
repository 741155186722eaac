use crate::error::Result;
use crate::events::WindowTitle;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use super::r#trait::WindowEnumerator;

const FAKE_TRACKS: [&str; 3] = [
    "First Song - dry_run",
    "Second Song - dry_run",
    "Third Song - dry_run",
];

/// Эмулирует набор окон; название трека меняется при каждом перечислении
pub struct DryRunEnumerator {
    calls: AtomicUsize,
}

impl DryRunEnumerator {
    pub fn new() -> Self {
        info!("Dry-run режим - WindowEnumerator работает в режиме эмуляции");
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl Default for DryRunEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WindowEnumerator for DryRunEnumerator {
    async fn enumerate_visible_titles(&self) -> Result<Vec<WindowTitle>> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        let track = FAKE_TRACKS[call % FAKE_TRACKS.len()];

        Ok(vec![
            WindowTitle::from("Terminal - dry_run"),
            WindowTitle::from(format!("{} [foobar2000 v2.1]", track)),
            WindowTitle::from("Browser - dry_run"),
        ])
    }
}
