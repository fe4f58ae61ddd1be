//! Font catalog: enumerates `.flf` / `.flf.gz` resources below a directory and
//! resolves them by forgiving name lookup.
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use walkdir::WalkDir;

use crate::glyph::GlyphFont;

pub const FONT_EXTENSION: &str = "flf";
pub const GZIP_EXTENSION: &str = "gz";

/// Overrides the directory [`FontCatalog::bundled`] reads from.
pub const FONT_DIR_ENV: &str = "FIGKIT_FONT_DIR";

/// Lower-cases, trims and treats `_` like a space.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', " ").trim().to_lowercase()
}

/// Splits `Name.flf` / `Name.flf.gz` into the logical name and whether it is
/// compressed. Other files are not fonts.
fn font_base_name(file_name: &str) -> Option<(&str, bool)> {
    let (rest, compressed) = match strip_extension(file_name, GZIP_EXTENSION) {
        Some(rest) => (rest, true),
        None => (file_name, false),
    };
    let base = strip_extension(rest, FONT_EXTENSION)?;
    (!base.is_empty()).then_some((base, compressed))
}

fn strip_extension<'a>(name: &'a str, ext: &str) -> Option<&'a str> {
    let (base, found) = name.rsplit_once('.')?;
    found.eq_ignore_ascii_case(ext).then_some(base)
}

#[derive(Debug)]
pub struct FontEntry {
    path: PathBuf,
    name: String,
    compressed: bool,
    font: OnceCell<Option<Arc<GlyphFont>>>,
}

impl FontEntry {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let path = path.into();
        let compressed = crate::figlet::is_gzip_path(&path);
        Self {
            path,
            name: name.into(),
            compressed,
            font: OnceCell::new(),
        }
    }

    /// Entry for a font file, named after the file minus its extensions.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?;
        let (base, _) = font_base_name(file_name)?;
        let name = base.to_string();
        Some(Self::new(path, name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    fn matches(&self, wanted: &str) -> bool {
        if normalize_name(&self.name) == wanted {
            return true;
        }
        if self.file_name().is_some_and(|f| normalize_name(f) == wanted) {
            return true;
        }
        normalize_name(&format!("{}.{FONT_EXTENSION}", self.name)) == wanted
    }

    /// Loads the font on first use and caches the result, failures included.
    pub fn load(&self) -> Option<Arc<GlyphFont>> {
        self.font
            .get_or_init(|| match GlyphFont::load(&self.path) {
                Ok(font) => {
                    log::debug!(
                        "loaded font {} ({} glyphs)",
                        self.name,
                        font.glyph_count()
                    );
                    Some(Arc::new(font))
                }
                Err(err) => {
                    log::warn!("font {} is unusable: {err}", self.path.display());
                    None
                }
            })
            .clone()
    }
}

/// Read-only catalog of fonts. Enumeration happens on first access; a
/// missing or unreadable directory gives an empty catalog.
#[derive(Debug)]
pub struct FontCatalog {
    root: Option<PathBuf>,
    entries: OnceCell<Vec<FontEntry>>,
}

impl FontCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            entries: OnceCell::new(),
        }
    }

    /// Catalog over entries supplied by the caller, e.g. from a packaging layer.
    pub fn from_entries(entries: impl IntoIterator<Item = FontEntry>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(index(entries.into_iter().collect()));
        Self { root: None, entries: cell }
    }

    /// The fonts shipped with this crate, or the directory named by
    /// `FIGKIT_FONT_DIR` when set.
    pub fn bundled() -> Self {
        let root = std::env::var_os(FONT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts"));
        Self::new(root)
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// All entries, sorted case-insensitively by name.
    pub fn entries(&self) -> &[FontEntry] {
        self.entries.get_or_init(|| match &self.root {
            Some(root) => index(scan(root)),
            None => Vec::new(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn list_names(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.name.clone()).collect()
    }

    /// Exact match after normalization against each entry's name and file name.
    pub fn find(&self, name: &str) -> Option<&FontEntry> {
        let wanted = normalize_name(name);
        self.entries().iter().find(|e| e.matches(&wanted))
    }

    pub fn load(&self, name: &str) -> Option<Arc<GlyphFont>> {
        self.find(name)?.load()
    }

    pub fn random_entry(&self) -> Option<&FontEntry> {
        let entries = self.entries();
        if entries.is_empty() {
            return None;
        }
        entries.get(fastrand::usize(..entries.len()))
    }

    pub fn random_name(&self) -> Option<&str> {
        self.random_entry().map(FontEntry::name)
    }

    pub fn random_path(&self) -> Option<&Path> {
        self.random_entry().map(FontEntry::path)
    }
}

fn scan(root: &Path) -> Vec<FontEntry> {
    let entries: Vec<FontEntry> = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("skipping font resource: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| FontEntry::from_path(entry.into_path()))
        .collect();
    log::debug!("found {} font files below {}", entries.len(), root.display());
    entries
}

/// Drops plain fonts shadowed by a compressed font of the same name and sorts
/// the rest by name.
fn index(candidates: Vec<FontEntry>) -> Vec<FontEntry> {
    let mut by_name: HashMap<String, FontEntry> = HashMap::new();
    for entry in candidates {
        match by_name.entry(entry.name.clone()) {
            Entry::Occupied(mut slot) => {
                if entry.compressed && !slot.get().compressed {
                    slot.insert(entry);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
    let mut entries: Vec<FontEntry> = by_name.into_values().collect();
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(font_base_name("Block.flf"), Some(("Block", false)));
        assert_eq!(font_base_name("Block_Shade.flf.gz"), Some(("Block_Shade", true)));
        assert_eq!(font_base_name("big.FLF.GZ"), Some(("big", true)));
        assert_eq!(font_base_name("notes.txt"), None);
        assert_eq!(font_base_name("archive.gz"), None);
        assert_eq!(font_base_name(".flf"), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_name("  My_Font "), "my font");
        assert_eq!(normalize_name("MY FONT"), "my font");
    }

    #[test]
    fn test_compressed_preferred() {
        let catalog = FontCatalog::from_entries([
            FontEntry::new("a/Slant.flf", "Slant"),
            FontEntry::new("a/Slant.flf.gz", "Slant"),
            FontEntry::new("a/big.flf", "big"),
        ]);
        assert_eq!(catalog.list_names(), vec!["big", "Slant"]);
        assert!(catalog.find("slant").unwrap().is_compressed());
    }

    #[test]
    fn test_find_variants() {
        let catalog = FontCatalog::from_entries([
            FontEntry::new("fonts/My_Font.flf.gz", "My_Font"),
            FontEntry::new("fonts/Other.flf", "Other"),
        ]);
        let path = Path::new("fonts/My_Font.flf.gz");
        let queries = [
            "my_font",
            "My Font",
            "my font",
            " MY_FONT ",
            "my_font.flf",
            "My_Font.flf.gz",
        ];
        for query in queries {
            assert_eq!(catalog.find(query).map(FontEntry::path), Some(path), "{query}");
        }
        assert!(catalog.find("my").is_none());
        assert!(catalog.find("font").is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = FontCatalog::from_entries(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.random_name(), None);
        assert_eq!(catalog.random_path(), None);
        assert!(catalog.find("anything").is_none());
    }

    #[test]
    fn test_missing_directory() {
        let catalog = FontCatalog::new("/definitely/not/a/font/dir");
        assert!(catalog.is_empty());
        assert!(catalog.list_names().is_empty());
    }

    #[test]
    fn test_unreadable_font_is_cached_as_none() {
        let entry = FontEntry::new("/definitely/not/here.flf", "here");
        assert!(entry.load().is_none());
        assert!(entry.load().is_none());
    }
}
