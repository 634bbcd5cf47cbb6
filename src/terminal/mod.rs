// Terminal input/output surfaces

pub mod console;
pub mod renderer;

pub use console::Console;
pub use renderer::{BoardRenderer, TerminalRenderer};
