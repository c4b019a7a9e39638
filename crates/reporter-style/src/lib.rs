pub mod ansi;
pub mod error;
pub mod html;
pub mod mode;
pub mod plain;
pub mod tag;

pub use ansi::AnsiStyler;
pub use error::StyleError;
pub use html::HtmlStyler;
pub use mode::StyleMode;
pub use plain::PlainStyler;
pub use tag::Tag;

/// Turns a run of text into its styled form for one output medium.
pub trait Styler: Send + Sync {
    fn style(&self, tags: &[Tag], text: &str) -> String;
}
