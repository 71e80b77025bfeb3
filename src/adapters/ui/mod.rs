pub mod banner;
pub mod notify;
pub mod pages;
pub mod progress;
pub mod prompt;
pub mod theme;
pub mod tui;
pub mod widgets;

pub use tui::{Services, TuiInputPort};

/// Prints the welcome banner and applies the prompt theme for all subsequent inquire prompts.
/// Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
    theme::apply_theme();
}
