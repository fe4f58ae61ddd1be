//! figkit: FIGlet banner toolkit.
//! Parses `.flf` / `.flf.gz` fonts, composes banners and colors them with
//! ANSI escapes, optionally choosing font and colors from a seeded generator.

pub mod ansi;
pub mod catalog;
mod error;
pub mod figlet;
mod glyph;
mod header;
mod options;
pub mod render;
pub mod strategy;
pub use ansi::{AnsiColor, ColorPolicy};
pub use catalog::{FontCatalog, FontEntry};
pub use error::{FontError, Result};
pub use figlet::FigletFile;
pub use glyph::{Glyph, GlyphFont, DEUTSCH_CODES, FIXED_GLYPH_COUNT};
pub use header::{FontHeader, PrintDirection, SIGNATURE};
pub use options::RenderOptions;
pub use strategy::{ColorPlan, ColorStrategy, FontStrategy, RandomSource, SeededLcg};

// Test utilities
pub mod test_support;
