use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AnsiStyler, HtmlStyler, PlainStyler, StyleError, Styler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    #[default]
    Ansi,
    Plain,
    Html,
}

impl StyleMode {
    pub fn styler(&self) -> Box<dyn Styler> {
        match self {
            StyleMode::Ansi => Box::new(AnsiStyler),
            StyleMode::Plain => Box::new(PlainStyler),
            StyleMode::Html => Box::new(HtmlStyler),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleMode::Ansi => "ansi",
            StyleMode::Plain => "plain",
            StyleMode::Html => "html",
        }
    }
}

impl FromStr for StyleMode {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "color" => Ok(StyleMode::Ansi),
            "plain" | "none" => Ok(StyleMode::Plain),
            "html" => Ok(StyleMode::Html),
            _ => Err(StyleError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;

    #[test]
    fn parses_known_modes() {
        assert_eq!("ANSI".parse::<StyleMode>().unwrap(), StyleMode::Ansi);
        assert_eq!("plain".parse::<StyleMode>().unwrap(), StyleMode::Plain);
        assert_eq!("html".parse::<StyleMode>().unwrap(), StyleMode::Html);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(matches!(
            "sepia".parse::<StyleMode>(),
            Err(StyleError::UnknownMode(m)) if m == "sepia"
        ));
    }

    #[test]
    fn styler_matches_mode() {
        let plain = StyleMode::Plain.styler();
        assert_eq!(plain.style(&[Tag::Red], "x"), "x");
        let ansi = StyleMode::Ansi.styler();
        assert_eq!(ansi.style(&[Tag::Red], "x"), "\x1b[31mx\x1b[0m");
    }
}
