//! Terminal capability detection and colour helpers for the board views.

use owo_colors::{colors::css, Color, OwoColorize};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Check if the terminal is too narrow for the full 14-column table
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(w, _)| w.0 < 100)
}

fn tint<C: Color>(text: &str) -> String {
    if supports_color() {
        text.fg::<C>().to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as danger (red)
    fn danger(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        tint::<css::Green>(self)
    }

    fn warning(&self) -> String {
        tint::<css::Orange>(self)
    }

    fn danger(&self) -> String {
        tint::<css::Tomato>(self)
    }

    fn info(&self) -> String {
        tint::<css::LightBlue>(self)
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn danger(&self) -> String {
        self.as_str().danger()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
