use crate::{Styler, Tag};

/// Drops all styling. Used when the log is read by tools that don't understand escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn style(&self, _tags: &[Tag], text: &str) -> String {
        text.to_string()
    }
}
