//! Embeddings: an in-memory word → vector store.
//!
//! Vectors are loaded from the plain-text format shared by word2vec and
//! GloVe: one word per line followed by its components, separated by
//! whitespace. A leading `<count> <dimensions>` header is accepted and
//! skipped.
//!
//! ```text
//! 2 3
//! flower 0.1 0.7 -0.2
//! insect -0.4 0.1 0.9
//! ```

use crate::error::{Result, WeatError};
use crate::kernel::similarity::SimilarityProvider;
use crate::kernel::vector::Vector;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Norm tolerance for treating a stored vector as unit length.
const UNIT_TOLERANCE: f64 = 1e-6;

/// Word vectors with a fixed dimensionality.
#[derive(Clone, Debug, Default)]
pub struct Embeddings {
    dimensions: usize,
    vectors: HashMap<String, Vector>,
}

impl Embeddings {
    /// Create an empty store for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: HashMap::new(),
        }
    }

    /// Get the dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&Vector> {
        self.vectors.get(word)
    }

    /// Iterate over the vocabulary in arbitrary order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    /// Insert or replace the vector for `word`.
    ///
    /// Returns the previous vector, if any.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vector) -> Result<Option<Vector>> {
        if vector.dimensions() != self.dimensions {
            return Err(WeatError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.dimensions(),
            });
        }
        Ok(self.vectors.insert(word.into(), vector))
    }

    /// Parse vectors from a text reader.
    ///
    /// When `normalize` is set, every vector is scaled to unit length so that
    /// dot products are cosine similarities. Zero vectors cannot be scaled and
    /// are stored as-is.
    pub fn from_reader<R: BufRead>(reader: R, normalize: bool) -> Result<Self> {
        let mut store: Option<Embeddings> = None;
        let mut zero_vectors = 0usize;
        let mut off_unit = 0usize;
        let mut first_line = true;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let word = match fields.next() {
                Some(word) => word,
                None => continue,
            };
            let rest: Vec<&str> = fields.collect();

            // Only the first non-blank line may be a header.
            if std::mem::take(&mut first_line) && is_header(word, &rest) {
                debug!(line = line_no, header = trimmed, "skipping vector file header");
                continue;
            }

            let data = rest
                .iter()
                .map(|field| {
                    field.parse::<f64>().map_err(|e| WeatError::Parse {
                        line: line_no,
                        message: format!("invalid component {:?} for {:?}: {}", field, word, e),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            if data.is_empty() {
                return Err(WeatError::Parse {
                    line: line_no,
                    message: format!("no vector components for {:?}", word),
                });
            }

            let target = store.get_or_insert_with(|| Embeddings::new(data.len()));
            if data.len() != target.dimensions {
                return Err(WeatError::Parse {
                    line: line_no,
                    message: format!(
                        "expected {} components for {:?}, found {}",
                        target.dimensions,
                        word,
                        data.len()
                    ),
                });
            }

            let mut vector = Vector::from_data(data);
            if normalize {
                if vector.norm() < 1e-12 {
                    zero_vectors += 1;
                } else {
                    vector = vector.normalized();
                }
            } else if !vector.is_unit(UNIT_TOLERANCE) {
                off_unit += 1;
            }

            if target.insert(word, vector)?.is_some() {
                warn!(word, line = line_no, "duplicate word in vector file; keeping the last one");
            }
        }

        if zero_vectors > 0 {
            warn!(count = zero_vectors, "zero vectors could not be normalized");
        }
        if off_unit > 0 {
            warn!(
                count = off_unit,
                "vectors are not unit length; similarities are raw dot products"
            );
        }

        let store = store.unwrap_or_default();
        info!(
            words = store.len(),
            dimensions = store.dimensions,
            normalize,
            "loaded embeddings"
        );
        Ok(store)
    }

    /// Load vectors from a text file. See [`from_reader`](Self::from_reader).
    pub fn from_path(path: impl AsRef<Path>, normalize: bool) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening vector file");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), normalize)
    }
}

/// A `<count> <dimensions>` header line: exactly two non-negative integers.
fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<u64>().is_ok() && rest[0].parse::<u64>().is_ok()
}

impl SimilarityProvider for Embeddings {
    fn resolve(&self, word: &str) -> Result<&Vector> {
        self.vectors.get(word).ok_or_else(|| WeatError::lookup(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "3 2\nrose 3 4\nant 0 2\n\nbee -1 0\n";

    #[test]
    fn test_from_reader_skips_header_and_blank_lines() {
        let emb = Embeddings::from_reader(Cursor::new(SAMPLE), false).unwrap();
        assert_eq!(emb.len(), 3);
        assert_eq!(emb.dimensions(), 2);
        assert_eq!(emb.get("rose").unwrap().data(), &[3.0, 4.0]);
    }

    #[test]
    fn test_from_reader_normalizes() {
        let emb = Embeddings::from_reader(Cursor::new(SAMPLE), true).unwrap();
        let rose = emb.get("rose").unwrap();
        assert!(rose.is_unit(1e-12));
        assert!((rose.data()[0] - 0.6).abs() < 1e-12);
        assert!((emb.cosine("rose", "ant").unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_from_reader_without_header() {
        let emb = Embeddings::from_reader(Cursor::new("a 1 0 0\nb 0 1 0\n"), true).unwrap();
        assert_eq!(emb.dimensions(), 3);
        assert!(emb.contains("a"));
        assert!(emb.contains("b"));
    }

    #[test]
    fn test_header_only_on_first_line() {
        let emb = Embeddings::from_reader(Cursor::new("3 1\n10 1\n20 2\n30 3\n"), false).unwrap();
        assert_eq!(emb.len(), 3);
        assert_eq!(emb.dimensions(), 1);
        assert_eq!(emb.get("20").unwrap().data(), &[2.0]);
    }

    #[test]
    fn test_blank_lines_before_header() {
        let emb = Embeddings::from_reader(Cursor::new("\n10 1\n20 2\n"), false).unwrap();
        assert_eq!(emb.len(), 1);
        assert!(emb.contains("20"));
    }

    #[test]
    fn test_from_reader_keeps_zero_vector() {
        let emb = Embeddings::from_reader(Cursor::new("z 0 0\n"), true).unwrap();
        assert_eq!(emb.get("z").unwrap().data(), &[0.0, 0.0]);
    }

    #[test]
    fn test_from_reader_ragged_rows() {
        let err = Embeddings::from_reader(Cursor::new("a 1 0\nb 1 0 0\n"), false).unwrap_err();
        assert!(matches!(err, WeatError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_from_reader_bad_number() {
        let err = Embeddings::from_reader(Cursor::new("a 1 zero\n"), false).unwrap_err();
        assert!(matches!(err, WeatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_from_reader_word_without_components() {
        let err = Embeddings::from_reader(Cursor::new("lonely\n"), false).unwrap_err();
        assert!(matches!(err, WeatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_word_last_wins() {
        let emb = Embeddings::from_reader(Cursor::new("a 1 0\na 0 1\n"), false).unwrap();
        assert_eq!(emb.len(), 1);
        assert_eq!(emb.get("a").unwrap().data(), &[0.0, 1.0]);
    }

    #[test]
    fn test_insert_dimension_mismatch() {
        let mut emb = Embeddings::new(2);
        assert!(emb.insert("ok", Vector::from_data(vec![1.0, 0.0])).unwrap().is_none());
        assert!(matches!(
            emb.insert("bad", Vector::from_data(vec![1.0])),
            Err(WeatError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_resolve_missing_word() {
        let emb = Embeddings::new(2);
        assert!(matches!(emb.resolve("nope"), Err(WeatError::Lookup { .. })));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let emb = Embeddings::from_path(file.path(), true).unwrap();
        assert_eq!(emb.len(), 3);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Embeddings::from_path("/definitely/not/here.txt", true).unwrap_err();
        assert!(matches!(err, WeatError::Io(_)));
    }
}
