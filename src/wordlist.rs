//! Word lists: the target and attribute sets of a test.
//!
//! A word list file holds one word per line. Surrounding whitespace is
//! trimmed and blank lines are skipped. Order is kept and duplicates are
//! allowed.

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// An ordered sequence of words.
pub type WordSet = Vec<String>;

/// Build a [`WordSet`] from any sequence of string-like values.
pub fn word_set<I, S>(words: I) -> WordSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words.into_iter().map(Into::into).collect()
}

/// Read a word list, one word per line.
pub fn read_word_list<R: BufRead>(reader: R) -> Result<WordSet> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Read a word list from a file.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<WordSet> {
    let path = path.as_ref();
    let words = read_word_list(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), words = words.len(), "loaded word list");
    Ok(words)
}
