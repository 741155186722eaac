//! DisplaySink service: named text elements that render the composed string.
//!
//! Handles are looked up by name on every update and released when dropped, so
//! an element that was recreated or renamed between updates is picked up again.

mod file;
mod memory;
mod settings;
mod r#trait;

#[cfg(test)]
pub use self::memory::MemorySink;
pub use self::r#trait::{create_display_sink, DisplaySink};
pub use self::settings::TEXT_FIELD;
