use std::io::{IsTerminal, Read};

use anyhow::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Logs to stderr. `RUST_LOG` wins unless `--verbose` is given.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str("debug")?
    } else {
        Logger::try_with_env_or_str("warn")?
    };
    Ok(logger.start()?)
}

/// Trimmed stdin contents when input is piped, `None` for a terminal or
/// blank input.
pub fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    let trimmed = buf.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Banners already end in a newline.
pub fn print_banner(banner: &str) {
    print!("{banner}");
    if !banner.ends_with('\n') {
        println!();
    }
}
