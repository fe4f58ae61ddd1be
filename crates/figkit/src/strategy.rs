//! Randomized banner rendering.
//!
//! A [`FontStrategy`] picks the font and a [`ColorStrategy`] the colors. With
//! a seed in [`RenderOptions`], every choice comes from one [`SeededLcg`]
//! owned by the call, so equal seeds give byte-identical output on every
//! platform. Without one, choices use `fastrand`.
//!
//! The font is resolved before the colors, and a `MixedRandom` strategy
//! keeps drawing from the same generator after its coin flip.
use crate::{
    ansi::AnsiColor,
    catalog::{normalize_name, FontCatalog, FontEntry},
    options::RenderOptions,
    render::{render_colored, render_gradient_lines},
};

/// Default palette for single color rendering.
pub const SINGLE_PALETTE: [AnsiColor; 7] = [
    AnsiColor::Red,
    AnsiColor::Yellow,
    AnsiColor::Green,
    AnsiColor::Cyan,
    AnsiColor::Blue,
    AnsiColor::Magenta,
    AnsiColor::White,
];

/// Default palette for gradient rendering, cycled by row.
pub const GRADIENT_PALETTE: [AnsiColor; 6] = [
    AnsiColor::Red,
    AnsiColor::Yellow,
    AnsiColor::Green,
    AnsiColor::Cyan,
    AnsiColor::Blue,
    AnsiColor::Magenta,
];

/// Color used when a palette turns out to be empty.
const FALLBACK_COLOR: AnsiColor = AnsiColor::White;

/// 64-bit linear congruential generator.
#[derive(Clone, Debug)]
pub struct SeededLcg {
    state: u64,
}

impl SeededLcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(2862933555777941757)
            .wrapping_add(3037000493);
        self.state
    }
}

/// Source of every random choice made during one render call.
#[derive(Clone, Debug)]
pub enum RandomSource {
    Seeded(SeededLcg),
    System,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RandomSource::Seeded(SeededLcg::new(seed)),
            None => RandomSource::System,
        }
    }

    /// Index in `0..len`, `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            RandomSource::Seeded(lcg) => (lcg.next_u64() % len as u64) as usize,
            RandomSource::System => fastrand::usize(..len),
        })
    }

    /// Value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        match self {
            RandomSource::Seeded(lcg) => (lcg.next_u64() % 1_000_000) as f64 / 1_000_000.0,
            RandomSource::System => fastrand::f64(),
        }
    }

    /// Fisher-Yates from the last index down to 1.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        match self {
            RandomSource::Seeded(_) => {
                for i in (1..items.len()).rev() {
                    if let Some(j) = self.index(i + 1) {
                        items.swap(i, j);
                    }
                }
            }
            RandomSource::System => fastrand::shuffle(items),
        }
    }

    fn pick(&mut self, palette: &[AnsiColor]) -> AnsiColor {
        self.index(palette.len())
            .map_or(FALLBACK_COLOR, |i| palette[i])
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStrategy {
    /// A catalog font, matched like [`FontCatalog::find`].
    Named(String),
    /// Any catalog font whose name is not excluded.
    Random { excluding: Vec<String> },
}

impl FontStrategy {
    pub fn random() -> Self {
        FontStrategy::Random {
            excluding: Vec::new(),
        }
    }

    /// When every font is excluded the pick falls back to the whole catalog.
    pub fn resolve<'a>(
        &self,
        catalog: &'a FontCatalog,
        source: &mut RandomSource,
    ) -> Option<&'a FontEntry> {
        match self {
            FontStrategy::Named(name) => catalog.find(name),
            FontStrategy::Random { excluding } => {
                let excluded: Vec<String> = excluding.iter().map(|n| normalize_name(n)).collect();
                let mut pool: Vec<&FontEntry> = catalog
                    .entries()
                    .iter()
                    .filter(|e| !excluded.contains(&normalize_name(e.name())))
                    .collect();
                if pool.is_empty() {
                    if !catalog.is_empty() {
                        log::debug!("all fonts excluded, picking from the full catalog");
                    }
                    pool = catalog.entries().iter().collect();
                }
                source.index(pool.len()).map(|i| pool[i])
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorStrategy {
    Single(AnsiColor),
    /// One color from the palette, [`SINGLE_PALETTE`] by default.
    SingleRandom { palette: Option<Vec<AnsiColor>> },
    /// Fixed palette cycled per row.
    Gradient { palette: Vec<AnsiColor> },
    /// Palette ([`GRADIENT_PALETTE`] by default) cycled per row, optionally
    /// shuffled first.
    GradientRandom {
        palette: Option<Vec<AnsiColor>>,
        shuffle: bool,
    },
    /// Gradient with probability `gradient_probability` (clamped to 0..=1),
    /// otherwise a single random color.
    MixedRandom {
        gradient_probability: f64,
        single_palette: Option<Vec<AnsiColor>>,
        gradient_palette: Option<Vec<AnsiColor>>,
    },
}

impl Default for ColorStrategy {
    fn default() -> Self {
        ColorStrategy::MixedRandom {
            gradient_probability: 0.5,
            single_palette: None,
            gradient_palette: None,
        }
    }
}

/// Concrete colors chosen for one banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorPlan {
    Single(AnsiColor),
    Gradient(Vec<AnsiColor>),
}

impl ColorPlan {
    /// Color of the plain text line emitted when no font could be loaded.
    pub fn fallback_color(&self) -> AnsiColor {
        match self {
            ColorPlan::Single(color) => *color,
            ColorPlan::Gradient(palette) => palette.first().copied().unwrap_or(FALLBACK_COLOR),
        }
    }
}

impl ColorStrategy {
    pub fn resolve(&self, source: &mut RandomSource) -> ColorPlan {
        match self {
            ColorStrategy::Single(color) => ColorPlan::Single(*color),
            ColorStrategy::SingleRandom { palette } => {
                let palette = palette.as_deref().unwrap_or(&SINGLE_PALETTE);
                ColorPlan::Single(source.pick(palette))
            }
            ColorStrategy::Gradient { palette } => ColorPlan::Gradient(palette.clone()),
            ColorStrategy::GradientRandom { palette, shuffle } => {
                let mut palette = palette
                    .clone()
                    .unwrap_or_else(|| GRADIENT_PALETTE.to_vec());
                if *shuffle {
                    source.shuffle(&mut palette);
                }
                ColorPlan::Gradient(palette)
            }
            ColorStrategy::MixedRandom {
                gradient_probability,
                single_palette,
                gradient_palette,
            } => {
                let threshold = gradient_probability.clamp(0.0, 1.0);
                let next = if source.unit() < threshold {
                    ColorStrategy::GradientRandom {
                        palette: gradient_palette.clone(),
                        shuffle: true,
                    }
                } else {
                    ColorStrategy::SingleRandom {
                        palette: single_palette.clone(),
                    }
                };
                next.resolve(source)
            }
        }
    }
}

/// Renders `text` with a font and colors chosen by the strategies.
///
/// Never fails: when no font can be found or loaded the decorated text is
/// returned as a single line in the plan's color (with `\n` if
/// `options.newline`).
pub fn render(
    catalog: &FontCatalog,
    text: &str,
    font: &FontStrategy,
    color: &ColorStrategy,
    options: &RenderOptions,
) -> String {
    let mut source = RandomSource::new(options.seed);
    let entry = font.resolve(catalog, &mut source);
    let plan = color.resolve(&mut source);

    let text = options.decorate(text);
    let policy = options.color_policy();

    let Some(glyph_font) = entry.and_then(FontEntry::load) else {
        log::debug!("no usable font for {font:?}, rendering plain text");
        let mut line = text;
        if options.newline {
            line.push('\n');
        }
        return policy.wrap(&line, plan.fallback_color());
    };

    match &plan {
        ColorPlan::Single(color) => render_colored(&text, &glyph_font, *color, &policy),
        ColorPlan::Gradient(palette) => {
            render_gradient_lines(&text, &glyph_font, palette, &policy)
        }
    }
}

/// Random font with the default mixed color strategy.
pub fn render_random_banner(catalog: &FontCatalog, text: &str, options: &RenderOptions) -> String {
    render(
        catalog,
        text,
        &FontStrategy::random(),
        &ColorStrategy::default(),
        options,
    )
}
