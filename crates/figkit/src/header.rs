//! FIGlet header line, e.g. `flf2a$ 6 5 20 15 3 0 143 229`.
//!
//! Fields in order: signature + hard blank, height, baseline, max length,
//! old layout, comment lines, print direction, full layout, codetag count.
//! Only the first three are required.

/// Five character magic every FIGlet 2 font starts with.
pub const SIGNATURE: &str = "flf2a";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl PrintDirection {
    fn from_field(field: Option<&str>) -> Self {
        match field.and_then(|s| s.parse::<i32>().ok()) {
            Some(1) => PrintDirection::RightToLeft,
            _ => PrintDirection::LeftToRight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontHeader {
    /// Placeholder for "blank but significant" pixels, rendered as a space.
    pub hard_blank: char,
    /// Rows per glyph, always > 0.
    pub height: usize,
    pub baseline: i32,
    pub max_length: i32,
    pub old_layout: i32,
    pub comment_lines: usize,
    pub print_direction: PrintDirection,
    pub full_layout: Option<i32>,
    pub codetag_count: Option<i32>,
}

impl FontHeader {
    /// Parses a header line. Returns `None` when the signature, hard blank,
    /// height or baseline is missing or malformed; every later field falls
    /// back to its default on its own.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();

        let hard_blank = fields.next()?.strip_prefix(SIGNATURE)?.chars().next()?;
        let height = fields
            .next()?
            .parse::<i64>()
            .ok()
            .filter(|h| *h > 0)
            .and_then(|h| usize::try_from(h).ok())?;
        let baseline = fields.next()?.parse::<i32>().ok()?;

        let rest: Vec<&str> = fields.collect();
        let int = |idx: usize| rest.get(idx).and_then(|s| s.parse::<i32>().ok());

        Some(Self {
            hard_blank,
            height,
            baseline,
            max_length: int(0).unwrap_or(0),
            old_layout: int(1).unwrap_or(0),
            comment_lines: rest.get(2).and_then(|s| s.parse().ok()).unwrap_or(0),
            print_direction: PrintDirection::from_field(rest.get(3).copied()),
            full_layout: int(4),
            codetag_count: int(5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_header() {
        assert_eq!(FontHeader::parse(""), None);
    }

    #[test]
    fn test_wrong_signature() {
        assert_eq!(FontHeader::parse("flf$ 2 1 8 -1 13"), None);
        assert_eq!(FontHeader::parse("tlf2a$ 2 1 8 -1 13"), None);
    }

    #[test]
    fn test_missing_hard_blank() {
        assert_eq!(FontHeader::parse("flf2a 2 1 8 -1 13"), None);
    }

    #[test]
    fn test_header() {
        let header = FontHeader::parse("flf2a$ 2 1 8 -1 13").unwrap();
        assert_eq!(header.hard_blank, '$');
        assert_eq!(header.height, 2);
        assert_eq!(header.baseline, 1);
        assert_eq!(header.max_length, 8);
        assert_eq!(header.old_layout, -1);
        assert_eq!(header.comment_lines, 13);
        assert_eq!(header.print_direction, PrintDirection::LeftToRight);
        assert_eq!(header.full_layout, None);
        assert_eq!(header.codetag_count, None);
    }

    #[test]
    fn test_short_header() {
        let header = FontHeader::parse("flf2a$ 2 1").unwrap();
        assert_eq!(header.hard_blank, '$');
        assert_eq!(header.height, 2);
        assert_eq!(header.baseline, 1);
        assert_eq!(header.max_length, 0);
        assert_eq!(header.old_layout, 0);
        assert_eq!(header.comment_lines, 0);
        assert_eq!(header.print_direction, PrintDirection::LeftToRight);
    }

    #[test]
    fn test_full_header() {
        let header = FontHeader::parse("flf2a\u{7f} 6 5 20 15 3 1 143 229").unwrap();
        assert_eq!(header.hard_blank, '\u{7f}');
        assert_eq!(header.comment_lines, 3);
        assert_eq!(header.print_direction, PrintDirection::RightToLeft);
        assert_eq!(header.full_layout, Some(143));
        assert_eq!(header.codetag_count, Some(229));
    }

    #[test]
    fn test_required_fields_must_be_numeric() {
        assert_eq!(FontHeader::parse("flf2a$ x 1 8"), None);
        assert_eq!(FontHeader::parse("flf2a$ 2 y 8"), None);
        assert_eq!(FontHeader::parse("flf2a$ 0 1"), None);
        assert_eq!(FontHeader::parse("flf2a$ -3 1"), None);
        assert_eq!(FontHeader::parse("flf2a$ 2"), None);
    }

    #[test]
    fn test_optional_fields_default_individually() {
        let header = FontHeader::parse("flf2a$ 4 3 abc 7 xx 9").unwrap();
        assert_eq!(header.max_length, 0);
        assert_eq!(header.old_layout, 7);
        assert_eq!(header.comment_lines, 0);
        assert_eq!(header.print_direction, PrintDirection::LeftToRight);

        let header = FontHeader::parse("flf2a$ 4 3 10 0 -2").unwrap();
        assert_eq!(header.comment_lines, 0);
    }
}
