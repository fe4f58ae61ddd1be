use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use figkit::{
    render::{render_named, render_path, DEFAULT_FONT, RANDOM_FONT},
    strategy, AnsiColor, ColorStrategy, FontCatalog, FontStrategy, RenderOptions,
};
use std::path::PathBuf;

use crate::console::{init_logging, print_banner, read_piped_stdin};
mod console;

const PHRASES: &[&str] = &[
    "You've got this",
    "Keep going",
    "One step at a time",
    "Make it happen",
    "Stay focused",
    "Progress over perfection",
    "Ship small, ship often",
    "Curiosity wins",
    "Iterate and learn",
    "Small wins compound",
    "Start where you are",
    "Keep it simple",
    "Clarity over cleverness",
    "Build for users",
];

#[derive(Parser)]
#[command(name = "figkit", about = "Render text as FIGlet banners")]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,
    /// List available fonts and exit
    #[arg(long)]
    list_fonts: bool,
    /// Print a random font name and exit
    #[arg(long)]
    random_font: bool,
    /// Font to use: name, file name or 'random'
    #[arg(short, long)]
    font: Option<String>,
    /// Render with the font file at this path instead of a catalog font
    #[arg(long, conflicts_with_all = ["font", "gradient"])]
    font_file: Option<PathBuf>,
    /// Color the whole banner
    #[arg(short, long)]
    color: Option<AnsiColor>,
    /// Color each row from a shuffled palette
    #[arg(long, conflicts_with = "color")]
    gradient: bool,
    /// Seed making random font and color choices reproducible
    #[arg(long)]
    seed: Option<u64>,
    /// Emit colors even where they would be suppressed
    #[arg(long)]
    force_color: bool,
    /// Font directory (defaults to FIGKIT_FONT_DIR or the bundled fonts)
    #[arg(long, global = true)]
    font_dir: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Text to render; read from stdin when omitted and piped
    text: Vec<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print an encouraging phrase with a random font
    Greet { phrase: Vec<String> },
    /// Inspect font metadata
    Inspect { font: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;
    let catalog = match &cli.font_dir {
        Some(dir) => FontCatalog::new(dir),
        None => FontCatalog::bundled(),
    };
    log::debug!("font directory: {:?}", catalog.root());

    match &cli.command {
        Some(Cmd::Greet { phrase }) => greet(&catalog, phrase, &cli),
        Some(Cmd::Inspect { font }) => inspect(&catalog, font),
        None => run(&catalog, &cli),
    }
}

fn options(cli: &Cli) -> RenderOptions {
    RenderOptions {
        seed: cli.seed,
        force_color: cli.force_color,
        ..RenderOptions::default()
    }
}

fn run(catalog: &FontCatalog, cli: &Cli) -> Result<()> {
    if cli.list_fonts {
        let names = catalog.list_names();
        if names.is_empty() {
            bail!("No fonts found.");
        }
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.random_font {
        let name = catalog
            .random_name()
            .ok_or_else(|| anyhow!("No fonts found."))?;
        println!("{name}");
        return Ok(());
    }

    let message = if cli.text.is_empty() {
        read_piped_stdin()?
    } else {
        Some(cli.text.join(" "))
    };
    let Some(message) = message.filter(|m| !m.is_empty()) else {
        bail!("No text provided (arg or stdin).");
    };

    if let Some(path) = &cli.font_file {
        let policy = options(cli).color_policy();
        let color = cli.color.unwrap_or_default();
        let banner = render_path(&message, path, color, &policy)
            .ok_or_else(|| anyhow!("Failed to load font at {}", path.display()))?;
        print_banner(&banner);
        return Ok(());
    }

    let desired = cli
        .font
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FONT);
    let font = if desired.eq_ignore_ascii_case(RANDOM_FONT) {
        FontStrategy::random()
    } else {
        let entry = catalog
            .find(desired)
            .ok_or_else(|| anyhow!("Unknown or unavailable font: {desired}"))?;
        if entry.load().is_none() {
            bail!("Failed to load font at {}", entry.path().display());
        }
        FontStrategy::Named(desired.to_string())
    };
    let color = if cli.gradient {
        ColorStrategy::GradientRandom {
            palette: None,
            shuffle: true,
        }
    } else {
        ColorStrategy::Single(cli.color.unwrap_or_default())
    };

    let banner = strategy::render(catalog, &message, &font, &color, &options(cli));
    print_banner(&banner);
    Ok(())
}

fn greet(catalog: &FontCatalog, phrase: &[String], cli: &Cli) -> Result<()> {
    let message = if phrase.is_empty() {
        PHRASES[fastrand::usize(..PHRASES.len())].to_string()
    } else {
        phrase.join(" ")
    };
    let policy = options(cli).color_policy();
    let banner = render_named(catalog, &message, Some(RANDOM_FONT), AnsiColor::None, &policy)
        .ok_or_else(|| anyhow!("Failed to render with random font"))?;
    print_banner(&banner);
    Ok(())
}

fn inspect(catalog: &FontCatalog, name: &str) -> Result<()> {
    let entry = catalog
        .find(name)
        .ok_or_else(|| anyhow!("Unknown or unavailable font: {name}"))?;
    let font = entry
        .load()
        .ok_or_else(|| anyhow!("Failed to load font at {}", entry.path().display()))?;
    let header = font.header();
    println!("FIGlet font: {}", entry.name());
    println!("  path: {}", entry.path().display());
    println!("  compressed: {}", entry.is_compressed());
    println!("  height: {}", header.height);
    println!("  baseline: {}", header.baseline);
    println!("  hard blank: {:?}", header.hard_blank);
    println!("  max length: {}", header.max_length);
    println!("  print direction: {:?}", header.print_direction);
    println!("  comment lines: {}", font.file().comments().len());
    println!("  defined characters: {}", font.glyph_count());
    Ok(())
}
