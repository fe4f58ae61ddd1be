//! Banner composition.
//!
//! Row `i` of a banner is the concatenation of row `i` of every glyph in the
//! text. Characters the font does not define add nothing to any row.
use std::path::Path;

use crate::{
    ansi::{AnsiColor, ColorPolicy},
    catalog::FontCatalog,
    glyph::GlyphFont,
};

/// Font used by [`render_named`] when no name is given.
pub const DEFAULT_FONT: &str = "Block";

/// Font name that selects a random catalog entry in [`render_named`].
pub const RANDOM_FONT: &str = "random";

pub fn build_lines(text: &str, font: &GlyphFont) -> Vec<String> {
    (0..font.height())
        .map(|row| {
            text.chars()
                .filter_map(|ch| font.glyph(ch))
                .filter_map(|glyph| glyph.row(row))
                .collect()
        })
        .collect()
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Plain banner, rows joined by `\n` and terminated by a trailing `\n`.
pub fn render(text: &str, font: &GlyphFont) -> String {
    join_lines(&build_lines(text, font))
}

/// Banner wrapped as a whole in one color.
pub fn render_colored(
    text: &str,
    font: &GlyphFont,
    color: AnsiColor,
    policy: &ColorPolicy,
) -> String {
    policy.wrap(&render(text, font), color)
}

/// Banner with every row wrapped in `palette[row % palette.len()]`. An empty
/// palette yields the plain banner.
pub fn render_gradient_lines(
    text: &str,
    font: &GlyphFont,
    palette: &[AnsiColor],
    policy: &ColorPolicy,
) -> String {
    let lines = build_lines(text, font);
    if palette.is_empty() {
        return join_lines(&lines);
    }
    let colored: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(row, line)| policy.wrap(line, palette[row % palette.len()]))
        .collect();
    join_lines(&colored)
}

/// Loads the font at `path` and renders `text` with it; `None` when the font
/// cannot be read or parsed.
pub fn render_path(
    text: &str,
    path: &Path,
    color: AnsiColor,
    policy: &ColorPolicy,
) -> Option<String> {
    match GlyphFont::load(path) {
        Ok(font) => Some(render_colored(text, &font, color, policy)),
        Err(err) => {
            log::warn!("cannot load font {}: {err}", path.display());
            None
        }
    }
}

/// Renders with a catalog font picked by name. `None` or an empty name selects
/// [`DEFAULT_FONT`], `"random"` any catalog font.
pub fn render_named(
    catalog: &FontCatalog,
    text: &str,
    name: Option<&str>,
    color: AnsiColor,
    policy: &ColorPolicy,
) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let entry = match name {
        Some(n) if n.eq_ignore_ascii_case(RANDOM_FONT) => catalog.random_entry(),
        Some(n) => catalog.find(n),
        None => catalog.find(DEFAULT_FONT),
    }?;
    let font = entry.load()?;
    Some(render_colored(text, &font, color, policy))
}
