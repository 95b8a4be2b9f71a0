//! Logging through the progress display.

use std::io::IsTerminal;

use anyhow::Context;
use indicatif::MultiProgress;
use log::Log;
use owo_colors::OwoColorize;

/// Whether stderr output should be colored. `NO_COLOR` always wins.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// Padded level label, colored per level when `color` is set.
fn level_label(level: log::Level, color: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return label.to_string();
    }
    match level {
        log::Level::Error => label.red().to_string(),
        log::Level::Warn => label.yellow().to_string(),
        log::Level::Info => label.green().to_string(),
        log::Level::Debug => label.cyan().to_string(),
        log::Level::Trace => label.magenta().to_string(),
    }
}

/// Filters with `env_logger`, prints above the progress bars.
struct ProgressLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
    color: bool,
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let label = level_label(record.level(), self.color);
            let line = format!("[{label}] {}", record.args());
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the global logger. `RUST_LOG` overrides the level picked from the flags.
pub fn init(verbose: bool, quiet: bool, multi: &MultiProgress) -> anyhow::Result<()> {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let inner =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let max_level = inner.filter();

    log::set_boxed_logger(Box::new(ProgressLogger {
        inner,
        multi: multi.clone(),
        color: use_color(),
    }))
    .context("logger already installed")?;
    log::set_max_level(max_level);
    Ok(())
}
