use std::path::PathBuf;

use url::Url;

/// Profiles harvested when none are given on the command line.
pub const DEFAULT_AUTHORS: &[&str] = &[
    "t-vbHCoAAAAJ",
    "OjFQpxIAAAAJ",
    "u8h7OSYAAAAJ",
    "KgkltygAAAAJ",
    "lOHxkQUAAAAJ",
];

/// Entries requested per profile. Only the first page is fetched.
pub const PAGE_SIZE: u16 = 100;

pub const BASE_URL: &str = "https://scholar.google.com";

pub const STORE_PATH: &str = "publications.json";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Everything a sync run needs to know.
#[derive(Debug, Clone)]
pub struct Settings {
    pub authors: Vec<String>,
    pub store: PathBuf,
    pub page_size: usize,
    /// Profile pages are fetched from here and relative publication links resolved against it.
    pub base_url: Url,
    /// Treat titles already in the store as seen, so re-runs do not append them again.
    pub seed_from_store: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            authors: DEFAULT_AUTHORS.iter().map(|a| a.to_string()).collect(),
            store: PathBuf::from(STORE_PATH),
            page_size: usize::from(PAGE_SIZE),
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            seed_from_store: true,
        }
    }
}
