use crate::config::WindowConfig;
use crate::error::Result;
use crate::events::WindowTitle;
use std::sync::Arc;

/// Trait for sources of visible top-level window titles
#[async_trait::async_trait]
pub trait WindowEnumerator: Send + Sync {
    /// Titles of all visible top-level windows with non-empty text, in platform order
    async fn enumerate_visible_titles(&self) -> Result<Vec<WindowTitle>>;
}

/// Factory function to create an appropriate window enumerator based on the dry_run flag
pub fn create_window_enumerator(
    config: &WindowConfig,
    dry_run: bool,
) -> Result<Arc<dyn WindowEnumerator>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunEnumerator::new()))
    } else {
        Ok(Arc::new(super::enumerator::RealWindowEnumerator::new(config)?))
    }
}
