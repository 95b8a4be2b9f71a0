use std::fmt;

use serde::{Deserialize, Serialize};

/// One publication as listed on a profile page.
///
/// `title` and `url` are fixed at construction and never empty for a record built through
/// [`Record::new`]. The remaining fields start out empty and are filled in by the entry parser
/// when the page provides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    title: String,
    url: String,
    pub authors: String,
    pub journal: String,
    pub pages: String,
    pub pub_date: String,
}

impl Record {
    /// Build a record from its identity. Returns `None` when either part is blank.
    pub fn new(title: &str, url: &str) -> Option<Self> {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() || url.is_empty() {
            return None;
        }
        Some(Record {
            title: title.to_string(),
            url: url.to_string(),
            authors: String::new(),
            journal: String::new(),
            pages: String::new(),
            pub_date: String::new(),
        })
    }

    /// The title, which doubles as the deduplication key.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every field paired with its serialized name, in serialization order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", &self.title),
            ("url", &self.url),
            ("authors", &self.authors),
            ("journal", &self.journal),
            ("pages", &self.pages),
            ("pub_date", &self.pub_date),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {} - {} - {}",
            self.title, self.url, self.authors, self.journal, self.pages, self.pub_date
        )
    }
}
