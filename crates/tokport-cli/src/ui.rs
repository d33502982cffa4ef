// Console output helpers. Diagnostics go through `tracing`; these are for the
// user-facing lines of a command.

use owo_colors::OwoColorize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, Default)]
pub struct UiStyle {
    pub color: bool,
    pub quiet: bool,
}

static STYLE: OnceLock<UiStyle> = OnceLock::new();

pub fn init(style: UiStyle) {
    let _ = STYLE.set(style);
}

fn style() -> UiStyle {
    STYLE.get().copied().unwrap_or_default()
}

pub fn ok(msg: &str) {
    if style().color {
        println!("{} {msg}", "✔".green());
    } else {
        println!("✔ {msg}");
    }
}

pub fn info(msg: &str) {
    let s = style();
    if s.quiet {
        return;
    }
    if s.color {
        eprintln!("{} {msg}", "ℹ".cyan());
    } else {
        eprintln!("ℹ {msg}");
    }
}

pub fn warn(msg: &str) {
    if style().color {
        eprintln!("{} {msg}", "⚠".yellow());
    } else {
        eprintln!("⚠ {msg}");
    }
}

/// A path or name, highlighted when color is on.
pub fn em(text: &str) -> String {
    if style().color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {
        $crate::ui::ok(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {
        $crate::ui::info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! ui_warn {
    ($($arg:tt)*) => {
        $crate::ui::warn(&format!($($arg)*))
    };
}
