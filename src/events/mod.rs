pub mod tick;
pub mod window;

pub use tick::TickOutcome;
pub use window::WindowTitle;
