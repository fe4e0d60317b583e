//! Terminal banners. Uses `console` for colors, which auto-disables styling
//! when stdout is not a terminal (and respects NO_COLOR).

use console::style;

pub fn info(text: &str) {
    println!("{} {}", style("::").cyan().bold(), text);
}

pub fn success(text: &str) {
    println!("{} {}", style("✓").green(), text);
}

pub fn warning(text: &str) {
    println!("{} {}", style("!").yellow(), style(text).bright());
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red(), style(text).bright());
}

/// Key-value line for the version banners.
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", style(key).cyan().bold(), value);
}
