use std::fmt;

use url::Url;

use crate::record::Record;

pub mod html;

/// The link that identifies a publication: its visible text and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

/// One item of a profile's publication list, as seen through whatever document backend
/// produced it.
pub trait Entry {
    /// The primary title link, if the item has one.
    fn primary_link(&self) -> Option<Anchor>;
    /// Secondary metadata lines in document order. The first holds the authors, the second
    /// a `journal, pages` line.
    fn gray_lines(&self) -> Vec<String>;
    /// The year label, if the item has one.
    fn year_label(&self) -> Option<String>;
}

/// Why an entry produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No title link, or a link without text.
    NoIdentity,
    /// The entry looked like a publication but could not be read.
    Malformed(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoIdentity => f.write_str("no publication identity found"),
            ParseError::Malformed(reason) => write!(f, "malformed entry: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Turn one list entry into a [`Record`]. Links are resolved against `base`.
pub fn parse_entry<E: Entry + ?Sized>(entry: &E, base: &Url) -> Result<Record, ParseError> {
    let anchor = entry.primary_link().ok_or(ParseError::NoIdentity)?;
    let title = anchor.text.trim();
    if title.is_empty() {
        return Err(ParseError::NoIdentity);
    }

    let href = anchor
        .href
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ParseError::Malformed(format!("link for {title:?} has no target")))?;
    let url = resolve_link(base, href)
        .map_err(|e| ParseError::Malformed(format!("cannot resolve {href:?}: {e}")))?;

    let mut record = Record::new(title, url.as_str()).ok_or(ParseError::NoIdentity)?;

    let lines = entry.gray_lines();
    if let Some(authors) = lines.first() {
        record.authors = authors.trim().to_string();
    }
    if let Some((journal, pages)) = lines.get(1).and_then(|line| split_venue(line)) {
        record.journal = journal.to_string();
        record.pages = pages.to_string();
    }

    if let Some(year) = entry.year_label() {
        record.pub_date = year.trim().to_string();
    }

    Ok(record)
}

/// Resolve a publication link against `base`.
///
/// Root-relative links stay under the base path, the same way profile pages are requested, so
/// a mirror such as `http://host/mirror/` keeps its prefix.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    match href.strip_prefix('/') {
        Some(rest) if !rest.starts_with('/') => base.join(rest),
        _ => base.join(href),
    }
}

/// Split a `journal, pages` line on its first comma.
///
/// Without a comma nothing is returned: a venue with no page segment is dropped whole rather
/// than kept half-filled. Anything after a second comma stays in the pages part.
pub fn split_venue(line: &str) -> Option<(&str, &str)> {
    let (journal, pages) = line.split_once(',')?;
    Some((journal.trim(), pages.trim()))
}
