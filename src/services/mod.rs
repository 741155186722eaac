pub mod display_sink;
pub mod monitor;
pub mod title_filter;
pub mod update_cycle;
pub mod window_enumerator;

#[cfg(test)]
pub(crate) mod test_support;

pub use display_sink::create_display_sink;
pub use monitor::Monitor;
pub use update_cycle::{CycleSettings, UpdateCycle};
pub use window_enumerator::create_window_enumerator;
