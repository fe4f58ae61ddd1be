//! FIGlet font file parsing.
//!
//! Accepts plain `.flf` text, gzip compressed `.flf.gz` resources (picked by
//! file name, not by sniffing) and zip packed fonts as produced for FIGlet 2.2.
//! Text is decoded as UTF-8 with a Latin-1 fallback, so no byte sequence is
//! ever rejected for encoding reasons.
use std::borrow::Cow;
use std::io::Read;
use std::{fs, path::Path};

use crate::{
    error::{FontError, Result},
    header::FontHeader,
};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed but uninterpreted font file: header, header/comment lines and
/// raw glyph lines (end markers and hard blanks still present).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigletFile {
    header: FontHeader,
    header_lines: Vec<String>,
    lines: Vec<String>,
}

impl FigletFile {
    /// Reads a font resource from disk, inflating it first when the file name
    /// ends in `.gz`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if is_gzip_path(path) {
            Self::from_gzip_bytes(&bytes)
        } else {
            Self::from_bytes(&bytes)
        }
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(|source| FontError::Io {
            path: "<reader>".into(),
            source,
        })?;
        Self::from_bytes(&buf)
    }

    pub fn from_gzip_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(&inflate_gzip(bytes)?)
    }

    /// Parses already inflated font bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FontError::Empty);
        }
        if bytes.starts_with(ZIP_MAGIC) {
            let inner = unpack_zip(bytes)?;
            return Self::parse(&decode_text(&inner));
        }
        Self::parse(&decode_text(bytes))
    }

    /// Parses font text. Line 0 must be a valid header, the next
    /// `comment_lines` lines are kept as comments and everything after that
    /// is glyph content, kept verbatim.
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized.lines();

        let header_line = lines.next().ok_or(FontError::Empty)?;
        let header = FontHeader::parse(header_line)
            .ok_or_else(|| FontError::InvalidHeader(header_line.to_string()))?;

        let header_lines = std::iter::once(header_line)
            .chain(lines.by_ref().take(header.comment_lines))
            .map(str::to_string)
            .collect();

        let lines = lines.map(str::to_string).collect();
        Ok(Self {
            header,
            header_lines,
            lines,
        })
    }

    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    /// The raw header line followed by the comment lines.
    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    pub fn comments(&self) -> &[String] {
        &self.header_lines[1..]
    }

    /// Glyph content lines in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            log::debug!("font is not utf-8 ({e}), decoding as latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

#[cfg(feature = "gzip")]
fn inflate_gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    flate2::read::GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(FontError::Gzip)?;
    Ok(out)
}

#[cfg(not(feature = "gzip"))]
fn inflate_gzip(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(FontError::UnsupportedCompression("gzip"))
}

#[cfg(feature = "zip")]
fn unpack_zip(bytes: &[u8]) -> Result<Vec<u8>> {
    use std::io::Cursor;
    use zip::ZipArchive;

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| FontError::Zip(format!("open: {e}")))?;
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FontError::Zip(format!("entry {i}: {e}")))?;
        if file.name().to_ascii_lowercase().ends_with(".flf") {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| FontError::Zip(format!("read {}: {e}", file.name())))?;
            return Ok(buf);
        }
    }
    Err(FontError::NoFontInArchive)
}

#[cfg(not(feature = "zip"))]
fn unpack_zip(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(FontError::UnsupportedCompression("zip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::PrintDirection;

    const SMALL: &str = "flf2a$ 2 1 8 -1 2\ncomment one\ncomment two\nA@\nA@@\nB@\nB@@\n";

    #[test]
    fn test_parse_sections() {
        let file = FigletFile::parse(SMALL).unwrap();
        assert_eq!(file.header().height, 2);
        assert_eq!(file.header().print_direction, PrintDirection::LeftToRight);
        assert_eq!(
            file.header_lines(),
            &["flf2a$ 2 1 8 -1 2", "comment one", "comment two"]
        );
        assert_eq!(file.comments(), &["comment one", "comment two"]);
        assert_eq!(file.lines(), &["A@", "A@@", "B@", "B@@"]);
    }

    #[test]
    fn test_line_endings_normalized() {
        let crlf = SMALL.replace('\n', "\r\n");
        let cr = SMALL.replace('\n', "\r");
        let plain = FigletFile::parse(SMALL).unwrap();
        assert_eq!(FigletFile::parse(&crlf).unwrap(), plain);
        assert_eq!(FigletFile::parse(&cr).unwrap(), plain);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(FigletFile::from_bytes(b""), Err(FontError::Empty)));
        assert!(matches!(FigletFile::parse(""), Err(FontError::Empty)));
    }

    #[test]
    fn test_bad_header() {
        let err = FigletFile::parse("flf2 2 1\nA@@\n").unwrap_err();
        assert!(matches!(err, FontError::InvalidHeader(line) if line == "flf2 2 1"));
    }

    #[test]
    fn test_short_comment_block_is_accepted() {
        let file = FigletFile::parse("flf2a$ 1 1 1 0 5\nonly one comment\n").unwrap();
        assert_eq!(file.comments().len(), 1);
        assert!(file.lines().is_empty());
    }

    #[test]
    fn test_huge_comment_count() {
        for count in ["18446744073709551615", "4000000000000000000"] {
            let file = FigletFile::parse(&format!("flf2a$ 1 1 1 0 {count}\nA@@\n")).unwrap();
            assert_eq!(file.comments(), &["A@@"]);
            assert!(file.lines().is_empty());
        }
    }

    #[test]
    fn test_read_from_reader() {
        let file = FigletFile::read(std::io::Cursor::new(SMALL.as_bytes())).unwrap();
        assert_eq!(file, FigletFile::parse(SMALL).unwrap());
        assert!(matches!(
            FigletFile::read(std::io::empty()),
            Err(FontError::Empty)
        ));
    }

    #[test]
    fn test_latin1_fallback() {
        let bytes = b"flf2a$ 1 1 1 0 1\ncaf\xe9\n\xb0@@\n";
        let file = FigletFile::from_bytes(bytes).unwrap();
        assert_eq!(file.comments(), &["caf\u{e9}"]);
        assert_eq!(file.lines(), &["\u{b0}@@"]);
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let file = FigletFile::parse(&format!("\u{feff}{SMALL}")).unwrap();
        assert_eq!(file.header().hard_blank, '$');
    }

    #[test]
    fn test_gzip_name_detection() {
        assert!(is_gzip_path(Path::new("fonts/Block.flf.gz")));
        assert!(is_gzip_path(Path::new("BLOCK.FLF.GZ")));
        assert!(!is_gzip_path(Path::new("fonts/Block.flf")));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gzip_bytes() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SMALL.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(
            FigletFile::from_gzip_bytes(&compressed).unwrap(),
            FigletFile::parse(SMALL).unwrap()
        );
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_corrupt_gzip() {
        assert!(matches!(
            FigletFile::from_gzip_bytes(b"\x1f\x8bnot really gzip"),
            Err(FontError::Gzip(_))
        ));
    }
}
