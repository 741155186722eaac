//! WindowEnumerator service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for listing the titles of
//! visible top-level windows in the order the platform reports them. It MUST NOT
//! look for keywords or apply filter rules: those decisions belong to the update
//! cycle and the title filter.

mod backend;
mod dry_run;
mod enumerator;
mod sway;
mod r#trait;
#[cfg(windows)]
mod win32;
mod wmctrl;
mod xdotool;

pub use self::r#trait::{create_window_enumerator, WindowEnumerator};
