use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::entry::{Anchor, Entry};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("#gsc_a_b .gsc_a_tr").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".gsc_a_t a").unwrap());
static GRAY: Lazy<Selector> = Lazy::new(|| Selector::parse(".gs_gray").unwrap());
static YEAR: Lazy<Selector> = Lazy::new(|| Selector::parse(".gsc_a_y span").unwrap());

/// A publication row of a profile page.
pub struct HtmlEntry<'a> {
    row: ElementRef<'a>,
}

impl<'a> HtmlEntry<'a> {
    pub fn new(row: ElementRef<'a>) -> Self {
        HtmlEntry { row }
    }
}

impl Entry for HtmlEntry<'_> {
    fn primary_link(&self) -> Option<Anchor> {
        let a = self.row.select(&TITLE_LINK).next()?;
        Some(Anchor {
            text: text_of(a),
            href: a.value().attr("href").map(str::to_string),
        })
    }

    fn gray_lines(&self) -> Vec<String> {
        self.row.select(&GRAY).map(text_of).collect()
    }

    fn year_label(&self) -> Option<String> {
        self.row.select(&YEAR).next().map(text_of)
    }
}

/// Publication rows of a profile page, in document order.
pub fn page_entries(document: &Html) -> impl Iterator<Item = HtmlEntry<'_>> {
    document.select(&ROW).map(HtmlEntry::new)
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
