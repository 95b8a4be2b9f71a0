use std::{collections::HashSet, path::Path};

use anyhow::bail;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::{
    cli::{Cli, Command},
    config::Settings,
    harvest::Harvester,
    merge::Merger,
    source::ScholarSource,
    store::Store,
};

mod cli;
mod config;
mod entry;
mod harvest;
mod logging;
mod merge;
mod record;
mod source;
mod store;
mod validate;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let multi = MultiProgress::new();
    logging::init(args.verbose, args.quiet, &multi)?;

    match args.command {
        Command::Sync(sync_args) => sync(sync_args.into_settings(), &multi),
        Command::Check { store } => check(&store),
    }
}

fn sync(settings: Settings, multi: &MultiProgress) -> anyhow::Result<()> {
    let mut store = Store::open(&settings.store)?;
    log::info!(
        "{} publication(s) in {}",
        store.len(),
        store.path().display()
    );

    let merger = if settings.seed_from_store {
        Merger::seeded(store.titles())
    } else {
        Merger::new()
    };
    log::debug!("{} title(s) already seen", merger.seen());

    let bar = multi.add(ProgressBar::new(settings.authors.len() as u64));
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let source = ScholarSource::new(settings.base_url.clone());
    let mut harvester = Harvester::new(source, merger, &settings);
    let summary = harvester.run(&settings.authors, &mut store, &bar)?;
    bar.finish_and_clear();

    eprintln!("{}", summary.render(logging::use_color()));
    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        bail!("no publication store at {}", path.display());
    }
    let store = Store::open(path)?;

    let mut seen = HashSet::new();
    let mut problems = 0usize;
    for (i, record) in store.records().iter().enumerate() {
        if !seen.insert(record.title()) {
            log::warn!("#{i} {:?}: duplicate title", record.title());
            problems += 1;
        }
        if let Err(reason) = validate::validate(record) {
            log::warn!("#{i} {:?}: {reason}", record.title());
            problems += 1;
        }
    }

    eprintln!(
        "{} publication(s), {} problem(s)",
        store.len(),
        problems
    );
    if problems > 0 {
        bail!("{problems} problem(s) in {}", path.display());
    }
    Ok(())
}
