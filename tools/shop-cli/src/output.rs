//! Output formatting for the CLI.

use console::{style, StyledObject};
use shop_commerce::notify::{Notice, NoticeLevel, Notifier};
use shop_commerce::Money;

/// Terminal output for the `shop` binary.
///
/// In JSON mode only `json` and `error` write anything, so stdout carries
/// a single document.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn status(&self, mark: StyledObject<&str>, msg: &str, stderr: bool) {
        if self.json {
            return;
        }
        if stderr {
            eprintln!("{} {}", mark, msg);
        } else {
            println!("{} {}", mark, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg, false);
    }

    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg, false);
    }

    pub fn warn(&self, msg: &str) {
        self.status(style("⚠").yellow(), msg, true);
    }

    /// Errors are reported in JSON mode too, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.status(style("→").dim(), &style(msg).dim().to_string(), true);
        }
    }

    /// Section title, preceded by a blank line.
    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(document) => println!("{}", document),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Left-aligned columns. Widths count chars, so styled cells misalign.
    pub fn table_row(&self, cells: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", row.trim_end());
    }
}

/// Shows store notices on the terminal, like toasts.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    output: Output,
}

impl ConsoleNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let line = format!("{} {}", style(&notice.title).bold(), notice.description);
        match notice.level {
            NoticeLevel::Success => self.output.success(&line),
            NoticeLevel::Info => self.output.info(&line),
            NoticeLevel::Destructive => self.output.warn(&line),
        }
        tracing::debug!(title = %notice.title, level = ?notice.level, "notice");
    }
}

/// Stock label, red when low.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("Out of stock").red().to_string(),
        n if n < 5 => style(format!("{} in stock", n)).red().to_string(),
        n => style(format!("{} in stock", n)).green().to_string(),
    }
}

/// Money with the amount emphasised.
pub fn price(money: &Money) -> String {
    style(money.display()).bold().to_string()
}

/// Rating as stars, e.g. "★★★★☆ 4.5 (128)".
pub fn rating(rating: f32, reviews: u32) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!(
        "{}{} {:.1} ({})",
        style("★".repeat(full)).yellow(),
        style("☆".repeat(5 - full)).dim(),
        rating,
        reviews
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_stars() {
        console::set_colors_enabled(false);
        assert_eq!(rating(4.5, 128), "★★★★★ 4.5 (128)");
        assert_eq!(rating(4.2, 98), "★★★★☆ 4.2 (98)");
    }

    #[test]
    fn test_stock_badge() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(0), "Out of stock");
        assert_eq!(stock_badge(3), "3 in stock");
    }
}
