//! Styled terminal output for compwiz
//!
//! Prompts render through inquire on the terminal, so regular output uses
//! stdout to keep ordering with the prompts. Fatal errors are reported by
//! `main` on stderr.

use owo_colors::OwoColorize;

type Rgb = (u8, u8, u8);

const MINT: Rgb = (152, 225, 152);
const CREAM: Rgb = (255, 230, 160);
const SKY: Rgb = (160, 200, 255);
const LAVENDER: Rgb = (181, 174, 254);
const TEAL: Rgb = (120, 180, 195);
const GREY: Rgb = (160, 160, 160);

fn paint(text: &str, (r, g, b): Rgb) -> String {
    text.truecolor(r, g, b).to_string()
}

fn paint_bold(text: &str, (r, g, b): Rgb) -> String {
    text.truecolor(r, g, b).bold().to_string()
}

pub fn success(message: &str) {
    println!("{} {}", paint_bold("✓", MINT), message.bright_white());
}

pub fn warning(message: &str) {
    println!("{} {}", paint_bold("⚠", CREAM), message.bright_white());
}

pub fn info(message: &str) {
    println!("{} {}", paint_bold("ℹ", SKY), message.bright_white());
}

/// Section header followed by a full-width rule
pub fn section(title: &str) {
    println!("\n{}", paint_bold(title, LAVENDER));
    println!("{}", paint(&"─".repeat(50), GREY));
}

/// Lighter header for groups inside a section
pub fn subsection(title: &str) {
    println!("\n{}", paint(title, TEAL));
    println!("{}", paint(&"·".repeat(30), GREY));
}

pub fn key_value(key: &str, value: &str) {
    println!("  {} {}", paint(&format!("{}:", key), GREY), value.bright_white());
}

/// Key-value pair with the value emphasized
pub fn key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {}",
        paint(&format!("{}:", key), GREY),
        paint_bold(value, TEAL)
    );
}

pub fn dimmed(message: &str) {
    println!("{}", paint(message, GREY));
}

pub fn list_item(text: &str) {
    println!("  {} {}", "•".bright_white(), text.bright_white());
}

pub fn blank() {
    println!();
}
