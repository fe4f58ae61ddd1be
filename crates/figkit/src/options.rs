use crate::ansi::{xcode_console_detected, ColorPolicy};

/// Options for the high level banner helpers in [`crate::strategy`].
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Placed before the text, rendered with it.
    pub prefix: Option<String>,
    /// Placed after the text, rendered with it.
    pub suffix: Option<String>,
    /// Append `\n` when falling back to a plain text line.
    pub newline: bool,
    /// Accepted but unused; no wrapping is done.
    pub wrap_width: Option<usize>,
    /// Makes every random font and color choice a function of this seed.
    pub seed: Option<u64>,
    pub force_color: bool,
    pub disable_color_in_xcode: bool,
    pub ide_console_probe: fn() -> bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            newline: false,
            wrap_width: None,
            seed: None,
            force_color: false,
            disable_color_in_xcode: true,
            ide_console_probe: xcode_console_detected,
        }
    }
}

impl RenderOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn color_policy(&self) -> ColorPolicy {
        ColorPolicy {
            force: self.force_color,
            disable_in_ide: self.disable_color_in_xcode,
            ide_console: self.ide_console_probe,
        }
    }

    /// `prefix + text + suffix`.
    pub fn decorate(&self, text: &str) -> String {
        let mut out = String::new();
        out.push_str(self.prefix.as_deref().unwrap_or(""));
        out.push_str(text);
        out.push_str(self.suffix.as_deref().unwrap_or(""));
        out
    }
}
