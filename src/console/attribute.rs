//! Terminal display attributes (SGR parameters).
//!
//! # Responsibilities
//! - Name the well-known SGR codes (reset, emphasis, colors)
//! - Parse attributes from human-readable names or decimal numbers
//!
//! # Design Decisions
//! - Codes are opaque: any `u32` is accepted and emitted verbatim
//! - Serialized as the bare number, deserialized from a number or a name

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A single terminal rendering instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Attribute(pub u32);

impl Attribute {
    /// Resets all current attributes.
    pub const RESET: Attribute = Attribute(0);

    pub const BOLD: Attribute = Attribute(1);
    pub const FAINT: Attribute = Attribute(2);
    pub const ITALIC: Attribute = Attribute(3);
    pub const UNDERLINE: Attribute = Attribute(4);
    pub const BLINK_SLOW: Attribute = Attribute(5);
    pub const BLINK_FAST: Attribute = Attribute(6);
    pub const REVERSE_VIDEO: Attribute = Attribute(7);
    pub const CONCEALED: Attribute = Attribute(8);
    pub const CROSSED_OUT: Attribute = Attribute(9);

    pub const FG_BLACK: Attribute = Attribute(30);
    pub const FG_RED: Attribute = Attribute(31);
    pub const FG_GREEN: Attribute = Attribute(32);
    pub const FG_YELLOW: Attribute = Attribute(33);
    pub const FG_BLUE: Attribute = Attribute(34);
    pub const FG_MAGENTA: Attribute = Attribute(35);
    pub const FG_CYAN: Attribute = Attribute(36);
    pub const FG_WHITE: Attribute = Attribute(37);

    /// Introduces an extended foreground color (`38;5;n` or `38;2;r;g;b`).
    pub const FG_EXTENDED: Attribute = Attribute(38);

    pub const BG_BLACK: Attribute = Attribute(40);
    pub const BG_RED: Attribute = Attribute(41);
    pub const BG_GREEN: Attribute = Attribute(42);
    pub const BG_YELLOW: Attribute = Attribute(43);
    pub const BG_BLUE: Attribute = Attribute(44);
    pub const BG_MAGENTA: Attribute = Attribute(45);
    pub const BG_CYAN: Attribute = Attribute(46);
    pub const BG_WHITE: Attribute = Attribute(47);

    /// Introduces an extended background color (`48;5;n` or `48;2;r;g;b`).
    pub const BG_EXTENDED: Attribute = Attribute(48);

    pub const FG_INTENSE_BLACK: Attribute = Attribute(90);
    pub const FG_INTENSE_RED: Attribute = Attribute(91);
    pub const FG_INTENSE_GREEN: Attribute = Attribute(92);
    pub const FG_INTENSE_YELLOW: Attribute = Attribute(93);
    pub const FG_INTENSE_BLUE: Attribute = Attribute(94);
    pub const FG_INTENSE_MAGENTA: Attribute = Attribute(95);
    pub const FG_INTENSE_CYAN: Attribute = Attribute(96);
    pub const FG_INTENSE_WHITE: Attribute = Attribute(97);

    pub const BG_INTENSE_BLACK: Attribute = Attribute(100);
    pub const BG_INTENSE_RED: Attribute = Attribute(101);
    pub const BG_INTENSE_GREEN: Attribute = Attribute(102);
    pub const BG_INTENSE_YELLOW: Attribute = Attribute(103);
    pub const BG_INTENSE_BLUE: Attribute = Attribute(104);
    pub const BG_INTENSE_MAGENTA: Attribute = Attribute(105);
    pub const BG_INTENSE_CYAN: Attribute = Attribute(106);
    pub const BG_INTENSE_WHITE: Attribute = Attribute(107);

    /// Returns the raw numeric code.
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for Attribute {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when an attribute name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display attribute `{0}`")]
pub struct ParseAttributeError(pub String);

const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

fn color_offset(name: &str) -> Option<u32> {
    COLOR_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| index as u32)
}

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    /// Accepts a decimal code or a name such as `bold`, `red`, `fg-red`,
    /// `bright-red`, `bg-blue` or `bg-bright-white`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(Attribute(code));
        }

        let name = trimmed.to_ascii_lowercase().replace('_', "-");
        let emphasis = match name.as_str() {
            "reset" => Some(Attribute::RESET),
            "bold" => Some(Attribute::BOLD),
            "faint" | "dim" => Some(Attribute::FAINT),
            "italic" => Some(Attribute::ITALIC),
            "underline" => Some(Attribute::UNDERLINE),
            "blink" | "blink-slow" => Some(Attribute::BLINK_SLOW),
            "blink-fast" => Some(Attribute::BLINK_FAST),
            "reverse" => Some(Attribute::REVERSE_VIDEO),
            "concealed" | "hidden" => Some(Attribute::CONCEALED),
            "crossed-out" | "strikethrough" => Some(Attribute::CROSSED_OUT),
            _ => None,
        };
        if let Some(attribute) = emphasis {
            return Ok(attribute);
        }

        let (base, rest) = match name.strip_prefix("bg-") {
            Some(rest) => (40, rest),
            None => (30, name.strip_prefix("fg-").unwrap_or(&name)),
        };
        let (base, color) = match rest
            .strip_prefix("bright-")
            .or_else(|| rest.strip_prefix("intense-"))
        {
            Some(color) => (base + 60, color),
            None => (base, rest),
        };

        color_offset(color)
            .map(|offset| Attribute(base + offset))
            .ok_or_else(|| ParseAttributeError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u32),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(Attribute(code)),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("red".parse::<Attribute>().unwrap(), Attribute::FG_RED);
        assert_eq!("fg-cyan".parse::<Attribute>().unwrap(), Attribute::FG_CYAN);
        assert_eq!("Bright-Red".parse::<Attribute>().unwrap(), Attribute::FG_INTENSE_RED);
        assert_eq!("bg-blue".parse::<Attribute>().unwrap(), Attribute::BG_BLUE);
        assert_eq!("bg_bright_white".parse::<Attribute>().unwrap(), Attribute::BG_INTENSE_WHITE);
        assert_eq!("bold".parse::<Attribute>().unwrap(), Attribute::BOLD);
        assert_eq!("strikethrough".parse::<Attribute>().unwrap(), Attribute::CROSSED_OUT);
    }

    #[test]
    fn test_parse_numbers_verbatim() {
        assert_eq!("31".parse::<Attribute>().unwrap(), Attribute(31));
        // Meaningless codes still pass through.
        assert_eq!("4242".parse::<Attribute>().unwrap(), Attribute(4242));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "chartreuse".parse::<Attribute>().unwrap_err();
        assert_eq!(err, ParseAttributeError("chartreuse".to_string()));
        assert!("bg-".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_deserialize_number_or_name() {
        let attrs: Vec<Attribute> = serde_json::from_str(r#"[1, "yellow", "bg-red"]"#).unwrap();
        assert_eq!(attrs, vec![Attribute::BOLD, Attribute::FG_YELLOW, Attribute::BG_RED]);

        let serialized = serde_json::to_string(&attrs).unwrap();
        assert_eq!(serialized, "[1,33,41]");
    }
}
