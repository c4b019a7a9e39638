use crate::{Styler, Tag};

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn style(&self, tags: &[Tag], text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        if tags.is_empty() {
            return text.to_string();
        }
        // Unconditional, unlike `ColoredString`: redirected log files keep their colors.
        let codes: Vec<_> = tags.iter().map(Tag::sgr_code).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }
}
