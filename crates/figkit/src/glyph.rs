use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::{
    error::{FontError, Result},
    figlet::FigletFile,
    header::FontHeader,
};

/// Code points of the seven "Deutsch" glyphs that follow ASCII 32..=126 in
/// every FIGlet font: Ä Ö Ü ä ö ü ß.
pub const DEUTSCH_CODES: [u32; 7] = [196, 214, 220, 228, 246, 252, 223];

/// Number of glyph blocks addressed by position rather than by code tag.
pub const FIXED_GLYPH_COUNT: usize = 95 + DEUTSCH_CODES.len();

fn fixed_codes() -> impl Iterator<Item = u32> {
    (32..=126).chain(DEUTSCH_CODES)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Rows with end markers stripped and hard blanks replaced by spaces.
    rows: Vec<String>,
}

impl Glyph {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, in chars.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Character map derived from a [`FigletFile`].
///
/// The file stays reachable through a shared handle for introspection; the
/// font never owns it exclusively.
#[derive(Clone, Debug)]
pub struct GlyphFont {
    height: usize,
    glyphs: HashMap<char, Glyph>,
    file: Arc<FigletFile>,
}

struct ShortBlock {
    code: i64,
    rows: usize,
}

impl GlyphFont {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_file(Arc::new(FigletFile::load(path)?)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_file(Arc::new(FigletFile::from_bytes(bytes)?)))
    }

    /// Builds the glyph map. A glyph block cut short by the end of the file is
    /// kept with the rows that exist.
    pub fn from_file(file: Arc<FigletFile>) -> Self {
        let (font, short) = Self::build(file);
        if let Some(short) = short {
            log::warn!(
                "glyph for code {} has only {} of {} rows",
                short.code,
                short.rows,
                font.height
            );
        }
        font
    }

    /// Like [`GlyphFont::from_file`] but rejects fonts whose glyph data ends
    /// in the middle of a glyph.
    pub fn from_file_strict(file: Arc<FigletFile>) -> Result<Self> {
        let (font, short) = Self::build(file);
        match short {
            Some(short) => Err(FontError::TruncatedGlyph {
                code: short.code,
                rows: short.rows,
                expected: font.height,
            }),
            None => Ok(font),
        }
    }

    fn build(file: Arc<FigletFile>) -> (Self, Option<ShortBlock>) {
        let header = file.header();
        let height = header.height;
        let hard_blank = header.hard_blank;
        let lines = file.lines();

        let mut glyphs = HashMap::new();
        let mut cursor = 0;
        let mut short = None;

        for code in fixed_codes() {
            if cursor >= lines.len() {
                break;
            }
            let rows = read_block(lines, &mut cursor, height, hard_blank);
            let complete = rows.len() == height;
            if !complete {
                short = Some(ShortBlock {
                    code: i64::from(code),
                    rows: rows.len(),
                });
            }
            if let Some(ch) = char::from_u32(code) {
                glyphs.insert(ch, Glyph::new(rows));
            }
            if !complete {
                break;
            }
        }

        while short.is_none() && cursor < lines.len() {
            let Some(code) = parse_code_tag(&lines[cursor]) else {
                log::debug!("stopping at unreadable code tag {:?}", lines[cursor]);
                break;
            };
            cursor += 1;
            let rows = read_block(lines, &mut cursor, height, hard_blank);
            if rows.len() < height {
                short = Some(ShortBlock {
                    code,
                    rows: rows.len(),
                });
            }
            let ch = u32::try_from(code).ok().and_then(char::from_u32);
            match ch {
                Some(ch) if !rows.is_empty() => {
                    glyphs.insert(ch, Glyph::new(rows));
                }
                Some(_) => {}
                None => log::debug!("skipping glyph with code tag {code}"),
            }
        }

        (
            Self {
                height,
                glyphs,
                file,
            },
            short,
        )
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Characters defined by this font, in code point order.
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    pub fn header(&self) -> &FontHeader {
        self.file.header()
    }

    pub fn file(&self) -> &Arc<FigletFile> {
        &self.file
    }
}

/// Consumes up to `height` lines starting at `cursor`.
fn read_block(
    lines: &[String],
    cursor: &mut usize,
    height: usize,
    hard_blank: char,
) -> Vec<String> {
    let end = (*cursor + height).min(lines.len());
    let rows = lines[*cursor..end]
        .iter()
        .enumerate()
        .map(|(i, raw)| strip_end_marker(raw, i + 1 == height).replace(hard_blank, " "))
        .collect();
    *cursor = end;
    rows
}

/// Removes the end-of-row marker: the last non-blank char of the row, once on
/// interior rows and twice on the final row of a glyph.
pub(crate) fn strip_end_marker(row: &str, last_row: bool) -> &str {
    let row = row.trim_end();
    let Some(marker) = row.chars().next_back() else {
        return row;
    };
    let row = &row[..row.len() - marker.len_utf8()];
    if last_row {
        row.strip_suffix(marker).unwrap_or(row)
    } else {
        row
    }
}

/// Reads the code point from a code tag line (`196`, `0x00C4`, `0304`, `-2`).
/// Anything after the number is a free text description.
pub(crate) fn parse_code_tag(line: &str) -> Option<i64> {
    let token = line.split_whitespace().next()?;
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}
