//! zodforge CLI UI primitives.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal color palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const VIOLET: Color = Color::Color256(135);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}";          // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}";  // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}";    // ◉
    pub const TRIANGLE: &str = "\u{25B8}";         // ▸
    pub const PROGRESS_FILLED: &str = "\u{25B0}";  // ▰
    pub const PROGRESS_EMPTY: &str = "\u{25B1}";   // ▱
    pub const DOT: &str = "\u{00B7}";              // ·
}

const BAR_WIDTH: usize = 8;

/// Print a success message
pub fn success(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        msg
    );
}

/// Print an error message
pub fn error(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

/// Print an info message
pub fn info(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        msg
    );
}

/// Print a dim/secondary message
pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Spinner shown while a generation run is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

/// Top border of a box, with `title` set into it.
pub fn box_top(title: &str) -> String {
    let width: usize = 55;
    let title_padded = format!(" {} ", title);
    let title_len = title_padded.chars().count();
    let dashes = width.saturating_sub(title_len + 4);

    format!(
        "{}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::CYAN), // ╭─
        style(title_padded).fg(colors::CYAN).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::CYAN),
        style("\u{256E}").fg(colors::CYAN) // ╮
    )
}

/// Print a box header
pub fn box_header(title: &str) {
    println!("  {}", box_top(title));
}

/// Print a box line
pub fn box_line(content: &str) {
    let width: usize = 53;
    let content_len = content.chars().count();
    let padding = width.saturating_sub(content_len);
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::CYAN), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::CYAN)
    );
}

/// Print a box footer
pub fn box_footer() {
    let width = 55;
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::CYAN), // ╰
        style("\u{2500}".repeat(width - 2)).fg(colors::CYAN),
        style("\u{256F}").fg(colors::CYAN) // ╯
    );
}

/// Share of `count` in `total`, drawn as a fixed-width bar.
pub fn share_bar(count: usize, total: usize) -> String {
    let filled = ((count * BAR_WIDTH) / total.max(1)).min(BAR_WIDTH);
    format!(
        "{}{}",
        symbols::PROGRESS_FILLED.repeat(filled),
        symbols::PROGRESS_EMPTY.repeat(BAR_WIDTH - filled)
    )
}

/// Print one unit family with its share of all generated modules.
pub fn unit_line(family: &str, count: usize, total: usize) {
    println!(
        "  {}   {:12} {:>5} modules   {}",
        style(symbols::TRIANGLE).fg(colors::CYAN),
        style(family).bold(),
        count,
        style(share_bar(count, total)).fg(colors::VIOLET)
    );
}

/// Print timing information
pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        label,
        duration_ms
    );
}

/// Print "Nope" error header (for check failures)
pub fn nope_header() {
    println!();
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA).bold(),
        style("Nope.").fg(colors::MAGENTA).bold()
    );
    println!();
}

/// Print "Looking good" success for check
pub fn looking_good() {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        style("Looking good.").bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_top_spans_the_box_width() {
        let top = console::strip_ansi_codes(&box_top("schemas")).to_string();
        assert_eq!(top.chars().count(), 54);
        assert!(top.starts_with("\u{256D}\u{2500} schemas "));
    }

    #[test]
    fn box_top_survives_long_titles() {
        let title = "x".repeat(80);
        let top = console::strip_ansi_codes(&box_top(&title)).to_string();
        assert!(top.contains(&title));
    }

    #[test]
    fn share_bar_is_fixed_width() {
        for (count, total) in [(0, 0), (0, 10), (3, 10), (10, 10), (12, 10)] {
            assert_eq!(share_bar(count, total).chars().count(), BAR_WIDTH);
        }
    }

    #[test]
    fn share_bar_fills_proportionally() {
        assert_eq!(share_bar(5, 10), "▰▰▰▰▱▱▱▱");
        assert_eq!(share_bar(10, 10), "▰".repeat(BAR_WIDTH));
        assert_eq!(share_bar(0, 10), "▱".repeat(BAR_WIDTH));
    }
}
