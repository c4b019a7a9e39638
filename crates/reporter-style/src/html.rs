use crate::{Styler, Tag};

/// Renders each styled run as a `<span>` carrying one `reporter-<tag>` class per tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStyler;

impl Styler for HtmlStyler {
    fn style(&self, tags: &[Tag], text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let escaped = escape(text);
        if tags.is_empty() {
            return escaped;
        }
        let classes: Vec<String> = tags.iter().map(|t| format!("reporter-{t}")).collect();
        format!("<span class=\"{}\">{}</span>", classes.join(" "), escaped)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
