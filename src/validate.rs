use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::Record;

/// A single page number or an inclusive numeric range, e.g. `5` or `5-10`.
static PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(-[0-9]+)?$").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// The first rule a record broke. Only used for diagnostics; validity itself is yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Missing(&'static str),
    Pages,
    Year,
    PagesEqualYear,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Missing(field) => write!(f, "missing {field}"),
            Rejection::Pages => f.write_str("pages is not a number or range"),
            Rejection::Year => f.write_str("publication date is not a four-digit year"),
            Rejection::PagesEqualYear => f.write_str("pages and publication date are identical"),
        }
    }
}

/// Decide whether `record` is complete enough to persist.
pub fn validate(record: &Record) -> Result<(), Rejection> {
    if let Some((name, _)) = record.fields().into_iter().find(|(_, v)| v.is_empty()) {
        return Err(Rejection::Missing(name));
    }
    if !PAGES_RE.is_match(&record.pages) {
        return Err(Rejection::Pages);
    }
    if !YEAR_RE.is_match(&record.pub_date) {
        return Err(Rejection::Year);
    }
    // Same token captured twice means the metadata line was misread.
    if record.pages == record.pub_date {
        return Err(Rejection::PagesEqualYear);
    }
    Ok(())
}
