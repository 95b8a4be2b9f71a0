use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use scraper::Html;
use url::Url;

use crate::{
    config::Settings,
    entry::{Entry, html::page_entries, parse_entry},
    merge::{Merger, Verdict},
    record::Record,
    source::PageSource,
    store::Store,
};

/// Counts for one author's page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorReport {
    /// Whether a page was actually retrieved.
    pub fetched: bool,
    pub entries: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub unparsed: usize,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub authors: usize,
    pub unreachable: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub unparsed: usize,
    /// Size of the store after the run.
    pub total: usize,
}

impl RunSummary {
    fn add(&mut self, report: &AuthorReport) {
        self.authors += 1;
        if !report.fetched {
            self.unreachable += 1;
        }
        self.accepted += report.accepted;
        self.duplicates += report.duplicates;
        self.rejected += report.rejected;
        self.unparsed += report.unparsed;
    }

    /// One-line summary for the terminal.
    pub fn render(&self, color: bool) -> String {
        let ok = format!("✓ {}", self.accepted);
        let bad = format!("✗ {}", self.rejected);
        let dup = format!("↺ {}", self.duplicates);
        let mut tail = format!("stored {}", self.total);
        if self.unparsed > 0 {
            tail.push_str(&format!(", {} unreadable", self.unparsed));
        }
        if self.unreachable > 0 {
            tail.push_str(&format!(", {}/{} profiles unreachable", self.unreachable, self.authors));
        }
        if color {
            format!("{}  {}  {}  {}", ok.green(), bad.red(), dup.yellow(), tail.dimmed())
        } else {
            format!("{ok}  {bad}  {dup}  {tail}")
        }
    }
}

/// Drives fetch, parse, dedup and persistence for a list of authors.
pub struct Harvester<S> {
    source: S,
    merger: Merger,
    base: Url,
    page_size: usize,
}

impl<S: PageSource> Harvester<S> {
    pub fn new(source: S, merger: Merger, settings: &Settings) -> Self {
        Harvester {
            source,
            merger,
            base: settings.base_url.clone(),
            page_size: settings.page_size,
        }
    }

    /// Run every author in order, saving the store after each one that produced new records.
    /// Only persistence failures abort the run.
    pub fn run(
        &mut self,
        authors: &[String],
        store: &mut Store,
        bar: &ProgressBar,
    ) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for author in authors {
            bar.set_message(author.clone());
            let (batch, report) = self.harvest_author(author);
            if !batch.is_empty() {
                log::info!(
                    "{author}: saving {} new publication(s) to {}",
                    batch.len(),
                    store.path().display()
                );
            }
            store.append_and_save(batch)?;
            summary.add(&report);
            log::info!("Publications stored: {}", store.len());
            bar.inc(1);
        }
        summary.total = store.len();
        log::info!("Fetching completed");
        Ok(summary)
    }

    /// Fetch one page of `author`'s list and return its new, valid records in page order.
    /// Fetch failures are logged and give an empty batch.
    pub fn harvest_author(&mut self, author: &str) -> (Vec<Record>, AuthorReport) {
        let mut report = AuthorReport::default();
        let html = match self.source.fetch_page(author, 0, self.page_size) {
            Ok(Some(html)) => html,
            Ok(None) => {
                log::warn!("{author}: no profile page, skipping");
                return (Vec::new(), report);
            }
            Err(e) => {
                log::warn!("{author}: {e:#}");
                return (Vec::new(), report);
            }
        };
        report.fetched = true;

        let document = Html::parse_document(&html);
        let batch = self.merge_entries(page_entries(&document), &mut report);
        if report.entries == 0 {
            log::warn!("{author}: page has no publication list");
        }
        (batch, report)
    }

    /// Parse and classify `entries`, keeping the accepted records.
    pub fn merge_entries<E: Entry>(
        &mut self,
        entries: impl IntoIterator<Item = E>,
        report: &mut AuthorReport,
    ) -> Vec<Record> {
        let mut batch = Vec::new();
        for entry in entries {
            report.entries += 1;
            let record = match parse_entry(&entry, &self.base) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("skipping entry {}: {e}", report.entries);
                    report.unparsed += 1;
                    continue;
                }
            };

            log::info!("Publication: {}", record.title());
            log::debug!("  {}", record.url());
            match self.merger.consider(&record) {
                Verdict::Accepted => {
                    log::debug!("  accepted: {record}");
                    report.accepted += 1;
                    batch.push(record);
                }
                Verdict::Duplicate => {
                    log::info!("  already in the list");
                    report.duplicates += 1;
                }
                Verdict::Rejected(reason) => {
                    log::info!("  not valid: {reason}");
                    report.rejected += 1;
                }
            }
        }
        batch
    }
}
