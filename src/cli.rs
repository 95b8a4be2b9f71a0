use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::config::{self, Settings};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch profile pages and append new publications to the store
    Sync(SyncArgs),
    /// Report stored publications that are incomplete or share a title
    Check {
        #[arg(long, value_name = "PATH", default_value = config::STORE_PATH)]
        store: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Profile identifier to harvest; repeatable. Defaults to the built-in list
    #[arg(short, long = "author", value_name = "ID")]
    pub authors: Vec<String>,
    /// Publication store to read and extend
    #[arg(long, value_name = "PATH", default_value = config::STORE_PATH)]
    pub store: PathBuf,
    /// Entries requested per profile
    #[arg(long, default_value_t = config::PAGE_SIZE, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,
    /// Site to fetch profiles from. Profile pages and root-relative publication links both
    /// resolve under its path
    #[arg(long, value_name = "URL", default_value = config::BASE_URL)]
    pub base_url: Url,
    /// Do not treat titles already in the store as seen
    #[arg(long)]
    pub allow_known: bool,
}

impl SyncArgs {
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            authors: if self.authors.is_empty() {
                defaults.authors
            } else {
                self.authors
            },
            store: self.store,
            page_size: usize::from(self.page_size),
            base_url: self.base_url,
            seed_from_store: !self.allow_known,
        }
    }
}
