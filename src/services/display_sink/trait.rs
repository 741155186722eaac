use crate::config::SinkConfig;
use crate::error::Result;
use std::sync::Arc;

use super::settings::SinkSettings;

/// Acquired handle to a named display element; released on drop
pub trait SinkHandle: Send {
    fn name(&self) -> &str;

    /// Current settings of the element
    fn settings(&self) -> Result<SinkSettings>;

    /// Apply settings, making the change visible to the host
    fn update(&mut self, settings: &SinkSettings) -> Result<()>;
}

/// Trait for hosts that own named display elements
pub trait DisplaySink: Send + Sync {
    /// Look up an element by name; `None` if it does not exist right now
    fn resolve(&self, name: &str) -> Option<Box<dyn SinkHandle>>;
}

/// Factory function to create an appropriate display sink based on the dry_run flag
pub fn create_display_sink(config: &SinkConfig, dry_run: bool) -> Result<Arc<dyn DisplaySink>> {
    if dry_run {
        Ok(Arc::new(super::memory::MemorySink::accepting_any()))
    } else {
        Ok(Arc::new(super::file::FileSink::new(config.directory.clone())?))
    }
}
