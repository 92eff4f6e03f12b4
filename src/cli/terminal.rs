//! Terminal colouring for audit output

use audit::Fulfillment;
use owo_colors::{OwoColorize, Style};

/// Columns below which matched courses are left out of the table.
const NARROW: u16 = 80;

fn colour_enabled() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is too narrow for the detailed table.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW)
}

fn styled(text: &str, style: Style) -> String {
    if colour_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colouring output, a no-op when colour is off
pub trait Colorize {
    /// Green
    fn success(&self) -> String;
    /// Yellow
    fn warning(&self) -> String;
    /// Red
    fn failure(&self) -> String;
    /// Dimmed
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        styled(self.as_ref(), Style::new().green())
    }

    fn warning(&self) -> String {
        styled(self.as_ref(), Style::new().yellow())
    }

    fn failure(&self) -> String {
        styled(self.as_ref(), Style::new().red())
    }

    fn dim(&self) -> String {
        styled(self.as_ref(), Style::new().dimmed())
    }
}

/// A fixed-width marker for a fulfillment state.
pub const fn marker(state: Fulfillment) -> &'static str {
    match state {
        Fulfillment::Unfulfilled => "[ ]",
        Fulfillment::Partial { .. } => "[~]",
        Fulfillment::Fulfilled => "[x]",
    }
}

/// Colour `text` by fulfillment state.
pub fn paint(text: &str, state: Fulfillment) -> String {
    match state {
        Fulfillment::Unfulfilled => text.failure(),
        Fulfillment::Partial { .. } => text.warning(),
        Fulfillment::Fulfilled => text.success(),
    }
}
