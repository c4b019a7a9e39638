use std::borrow::Cow;
use std::fmt;

use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Bold,
    Grey,
    Red,
    Yellow,
    Magenta,
    Cyan,
}

impl Tag {
    /// Foreground color, or `None` for a text attribute.
    pub fn color(&self) -> Option<Color> {
        match self {
            Tag::Bold => None,
            Tag::Grey => Some(Color::BrightBlack),
            Tag::Red => Some(Color::Red),
            Tag::Yellow => Some(Color::Yellow),
            Tag::Magenta => Some(Color::Magenta),
            Tag::Cyan => Some(Color::Cyan),
        }
    }

    /// SGR parameter used by ANSI terminals.
    pub fn sgr_code(&self) -> Cow<'static, str> {
        match self.color() {
            Some(color) => color.to_fg_str(),
            None => Cow::Borrowed("1"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Bold => "bold",
            Tag::Grey => "grey",
            Tag::Red => "red",
            Tag::Yellow => "yellow",
            Tag::Magenta => "magenta",
            Tag::Cyan => "cyan",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_codes() {
        let codes: Vec<_> = [Tag::Bold, Tag::Grey, Tag::Red, Tag::Yellow, Tag::Magenta, Tag::Cyan]
            .iter()
            .map(Tag::sgr_code)
            .collect();
        assert_eq!(codes, ["1", "90", "31", "33", "35", "36"]);
    }
}
