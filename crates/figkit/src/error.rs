use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("read error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("empty font data")]
    Empty,
    #[error("invalid flf2a header: {0:?}")]
    InvalidHeader(String),
    #[error("gzip inflate error: {0}")]
    Gzip(std::io::Error),
    #[error("zip archive error: {0}")]
    Zip(String),
    #[error("zip archive contained no .flf")]
    NoFontInArchive,
    #[error("{0} compressed fonts are not supported by this build")]
    UnsupportedCompression(&'static str),
    #[error("glyph for code {code} has {rows} of {expected} rows")]
    TruncatedGlyph { code: i64, rows: usize, expected: usize },
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

pub type Result<T> = std::result::Result<T, FontError>;
