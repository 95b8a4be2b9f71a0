use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::record::Record;

/// The persisted publication list: a JSON array of records at a fixed path.
pub struct Store {
    path: PathBuf,
    records: Vec<Record>,
}

impl Store {
    /// Load the store at `path`, or start an empty one if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("malformed publication store {}", path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read publication store {}", path.display()));
            }
        };
        Ok(Store { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::title)
    }

    /// Append `batch` in order and rewrite the whole file. An empty batch touches nothing.
    pub fn append_and_save(&mut self, batch: Vec<Record>) -> anyhow::Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.records.extend(batch);
        self.save()
    }

    /// Write to a temporary file beside the store, then rename it over the store.
    fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.records).context("serialise publications")?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let ctx = || format!("failed to write publication store {}", self.path.display());

        let mut tmp = tempfile::NamedTempFile::new_in(dir).with_context(ctx)?;
        tmp.write_all(json.as_bytes()).with_context(ctx)?;
        tmp.persist(&self.path).map_err(|e| e.error).with_context(ctx)?;
        Ok(())
    }
}
