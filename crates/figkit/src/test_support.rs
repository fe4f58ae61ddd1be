//! Test support utilities for figkit.
//!
//! This module provides helpers that are useful for testing font parsing and
//! rendering, but are not part of the stable API.

use std::collections::HashMap;

use crate::glyph::DEUTSCH_CODES;

/// Writes FIGlet font text in memory.
///
/// Unless overridden, the glyph for `c` has the rows `"{c}0"`, `"{c}1"`, ...
/// and the space glyph is two hard blanks wide.
pub struct FontBuilder {
    height: usize,
    hard_blank: char,
    marker: char,
    comments: Vec<String>,
    fixed_glyphs: usize,
    overrides: HashMap<char, Vec<String>>,
    tagged: Vec<(String, Vec<String>)>,
}

impl FontBuilder {
    pub fn new(height: usize) -> Self {
        Self {
            height,
            hard_blank: '$',
            marker: '@',
            comments: Vec::new(),
            fixed_glyphs: 95 + DEUTSCH_CODES.len(),
            overrides: HashMap::new(),
            tagged: Vec::new(),
        }
    }

    pub fn hard_blank(mut self, ch: char) -> Self {
        self.hard_blank = ch;
        self
    }

    pub fn marker(mut self, ch: char) -> Self {
        self.marker = ch;
        self
    }

    pub fn comment(mut self, line: &str) -> Self {
        self.comments.push(line.to_string());
        self
    }

    /// Emit only the first `count` positional glyphs.
    pub fn fixed_glyphs(mut self, count: usize) -> Self {
        self.fixed_glyphs = count;
        self
    }

    pub fn glyph(mut self, ch: char, rows: &[&str]) -> Self {
        self.overrides
            .insert(ch, rows.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn tagged(mut self, tag: &str, rows: &[&str]) -> Self {
        self.tagged.push((
            tag.to_string(),
            rows.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    fn default_rows(&self, ch: char) -> Vec<String> {
        if ch == ' ' {
            vec![self.hard_blank.to_string().repeat(2); self.height]
        } else {
            (0..self.height).map(|i| format!("{ch}{i}")).collect()
        }
    }

    fn push_rows(&self, out: &mut Vec<String>, rows: &[String]) {
        for (i, row) in rows.iter().enumerate() {
            let markers = if i + 1 == rows.len() { 2 } else { 1 };
            out.push(format!("{row}{}", self.marker.to_string().repeat(markers)));
        }
    }

    pub fn build(&self) -> String {
        let mut out = vec![format!(
            "flf2a{} {} {} 10 -1 {} 0 0 {}",
            self.hard_blank,
            self.height,
            self.height,
            self.comments.len(),
            self.tagged.len()
        )];
        out.extend(self.comments.iter().cloned());

        let fixed = (32..=126u32)
            .chain(DEUTSCH_CODES)
            .filter_map(char::from_u32)
            .take(self.fixed_glyphs);
        for ch in fixed {
            let rows = self
                .overrides
                .get(&ch)
                .cloned()
                .unwrap_or_else(|| self.default_rows(ch));
            self.push_rows(&mut out, &rows);
        }
        for (tag, rows) in &self.tagged {
            out.push(tag.clone());
            self.push_rows(&mut out, rows);
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}
