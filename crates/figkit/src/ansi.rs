//! ANSI foreground colors and the policy deciding when to emit them.
use std::fmt;
use std::str::FromStr;

use crate::error::FontError;

/// Set by Xcode for processes it launches; its console shows escape codes verbatim.
pub const XCODE_ENV_MARKER: &str = "__XCODE_BUILT_PRODUCTS_DIR_PATHS";

const RESET: &str = "\x1B[0m";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnsiColor {
    #[default]
    None,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl AnsiColor {
    pub const ALL: [AnsiColor; 9] = [
        AnsiColor::None,
        AnsiColor::Black,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Magenta,
        AnsiColor::Cyan,
        AnsiColor::White,
    ];

    /// Escape sequence selecting this color, empty for [`AnsiColor::None`].
    pub fn code(self) -> &'static str {
        match self {
            AnsiColor::None => "",
            AnsiColor::Black => "\x1B[30m",
            AnsiColor::Red => "\x1B[31m",
            AnsiColor::Green => "\x1B[32m",
            AnsiColor::Yellow => "\x1B[33m",
            AnsiColor::Blue => "\x1B[34m",
            AnsiColor::Magenta => "\x1B[35m",
            AnsiColor::Cyan => "\x1B[36m",
            AnsiColor::White => "\x1B[37m",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnsiColor::None => "none",
            AnsiColor::Black => "black",
            AnsiColor::Red => "red",
            AnsiColor::Green => "green",
            AnsiColor::Yellow => "yellow",
            AnsiColor::Blue => "blue",
            AnsiColor::Magenta => "magenta",
            AnsiColor::Cyan => "cyan",
            AnsiColor::White => "white",
        }
    }
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnsiColor {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AnsiColor::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| FontError::UnknownColor(s.to_string()))
    }
}

/// Returns true when running inside an Xcode console.
pub fn xcode_console_detected() -> bool {
    std::env::var_os(XCODE_ENV_MARKER).is_some()
}

/// Decides whether escape codes are written.
///
/// `ide_console` is the only place the process environment is consulted;
/// tests swap it for a constant.
#[derive(Copy, Clone, Debug)]
pub struct ColorPolicy {
    pub force: bool,
    pub disable_in_ide: bool,
    pub ide_console: fn() -> bool,
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self {
            force: false,
            disable_in_ide: true,
            ide_console: xcode_console_detected,
        }
    }
}

impl ColorPolicy {
    /// Always emit escape codes.
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    pub fn allows_color(&self) -> bool {
        self.force || !self.disable_in_ide || !(self.ide_console)()
    }

    /// Wraps `text` in `color` and a reset, or returns it unchanged when the
    /// color is [`AnsiColor::None`] or color is suppressed.
    pub fn wrap(&self, text: &str, color: AnsiColor) -> String {
        if color == AnsiColor::None || !self.allows_color() {
            return text.to_string();
        }
        format!("{}{text}{RESET}", color.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_ide() -> bool {
        true
    }

    fn outside_ide() -> bool {
        false
    }

    fn policy(force: bool, disable_in_ide: bool, ide_console: fn() -> bool) -> ColorPolicy {
        ColorPolicy {
            force,
            disable_in_ide,
            ide_console,
        }
    }

    #[test]
    fn test_wrap() {
        let p = policy(false, true, outside_ide);
        assert_eq!(p.wrap("hi", AnsiColor::Red), "\x1B[31mhi\x1B[0m");
        assert_eq!(p.wrap("hi", AnsiColor::None), "hi");
    }

    #[test]
    fn test_suppressed_in_ide() {
        assert_eq!(policy(false, true, in_ide).wrap("hi", AnsiColor::Red), "hi");
        assert_eq!(
            policy(true, true, in_ide).wrap("hi", AnsiColor::Red),
            "\x1B[31mhi\x1B[0m"
        );
        assert_eq!(
            policy(false, false, in_ide).wrap("hi", AnsiColor::Red),
            "\x1B[31mhi\x1B[0m"
        );
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("Cyan".parse::<AnsiColor>().unwrap(), AnsiColor::Cyan);
        assert_eq!(" none ".parse::<AnsiColor>().unwrap(), AnsiColor::None);
        assert!("purple".parse::<AnsiColor>().is_err());
        for c in AnsiColor::ALL {
            assert_eq!(c.to_string().parse::<AnsiColor>().unwrap(), c);
        }
    }
}
