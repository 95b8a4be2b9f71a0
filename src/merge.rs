use std::collections::HashSet;

use crate::{
    record::Record,
    validate::{Rejection, validate},
};

/// What happened to a parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First time this title was seen and the record is valid.
    Accepted,
    /// The title was already seen during this run; the record was not looked at.
    Duplicate,
    /// First time this title was seen, but the record is incomplete.
    Rejected(Rejection),
}

/// Tracks titles seen during a run and decides which records are new.
#[derive(Debug, Default)]
pub struct Merger {
    seen: HashSet<String>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `titles` already marked as seen, typically those of the persisted store.
    pub fn seeded<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Merger {
            seen: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify `record`. The title is marked seen whether or not the record is valid, so a
    /// later record with the same title is never validated again.
    pub fn consider(&mut self, record: &Record) -> Verdict {
        if !self.seen.insert(record.title().to_string()) {
            return Verdict::Duplicate;
        }
        match validate(record) {
            Ok(()) => Verdict::Accepted,
            Err(reason) => Verdict::Rejected(reason),
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}
