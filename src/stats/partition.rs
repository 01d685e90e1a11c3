//! Partition enumeration over the pooled target words.
//!
//! The permutation test needs every way of relabeling `X ++ Y` into two
//! groups of the original sizes. That space has C(n, k) members, so it is
//! walked lazily:
//!
//! - [`Combinations`] is a cursor over the k-subsets of `[0, n)` in
//!   lexicographic order. It can be positioned at any rank, which lets
//!   disjoint rank ranges be enumerated independently (and in parallel).
//! - [`Partitions`] maps each index combination onto the pooled words.
//!
//! Value-equal partitions are never merged: with duplicate words, distinct
//! index assignments that produce identical groups are all counted.
//!
//! # Example
//!
//! ```rust
//! use weat::stats::{binomial, Partitions};
//!
//! let x = ["a", "b"];
//! let y = ["c", "d"];
//! let partitions = Partitions::new(&x, &y)?;
//!
//! assert_eq!(partitions.total(), binomial(4, 2).unwrap());
//! assert_eq!(partitions.count(), 6);
//! # Ok::<(), weat::WeatError>(())
//! ```

use crate::error::{Result, WeatError};

/// Exact binomial coefficient C(n, k).
///
/// Returns `Some(0)` when `k > n` and `None` if the value does not fit in a
/// `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // C(n, i + 1) = C(n, i) * (n - i) / (i + 1). Dividing out the common
        // factor first keeps every intermediate no larger than C(n, i + 1).
        let (numerator, denominator) = ((n - i) as u128, i as u128 + 1);
        let g = gcd(result, denominator);
        result = (result / g).checked_mul(numerator / (denominator / g))?;
    }
    Some(result)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Lexicographic cursor over the k-subsets of `[0, n)`.
///
/// Yields index slices through [`advance`](Self::advance), reusing one
/// buffer. Also usable as an [`Iterator`] of owned `Vec<usize>`.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    start: Vec<usize>,
    count: u128,
    remaining: u128,
    started: bool,
}

impl Combinations {
    /// All C(n, k) combinations, starting from `[0, 1, .., k-1]`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        let total = Self::total_for(n, k)?;
        Self::starting_at(n, k, 0, total)
    }

    /// `count` consecutive combinations beginning at lexicographic `rank`.
    ///
    /// The range must lie within `[0, C(n, k)]`.
    pub fn starting_at(n: usize, k: usize, rank: u128, count: u128) -> Result<Self> {
        let total = Self::total_for(n, k)?;
        let end = rank.checked_add(count).ok_or_else(|| {
            WeatError::InputValidation(format!("combination range {}+{} overflows", rank, count))
        })?;
        if end > total {
            return Err(WeatError::InputValidation(format!(
                "combination range [{}, {}) exceeds C({}, {}) = {}",
                rank, end, n, k, total
            )));
        }

        let start = if count == 0 {
            (0..k).collect()
        } else {
            unrank(n, k, rank)?
        };

        Ok(Self {
            n,
            k,
            indices: start.clone(),
            start,
            count,
            remaining: count,
            started: false,
        })
    }

    fn total_for(n: usize, k: usize) -> Result<u128> {
        binomial(n, k).ok_or_else(|| {
            WeatError::InputValidation(format!("C({}, {}) does not fit in 128 bits", n, k))
        })
    }

    /// Size of the pool indices are drawn from.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Size of each combination.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Combinations not yet produced.
    pub fn remaining(&self) -> u128 {
        self.remaining
    }

    /// Move to the next combination and return it.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            self.step();
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(&self.indices)
    }

    /// Rewind to the first combination of this cursor's range.
    pub fn reset(&mut self) {
        self.indices.clone_from(&self.start);
        self.remaining = self.count;
        self.started = false;
    }

    /// Lexicographic successor. Only called while another combination remains.
    fn step(&mut self) {
        let (n, k) = (self.n, self.k);
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return;
            }
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// The combination at lexicographic `rank` (combinatorial number system).
fn unrank(n: usize, k: usize, rank: u128) -> Result<Vec<usize>> {
    let mut out = Vec::with_capacity(k);
    let mut rank = rank;
    let mut candidate = 0;

    for position in 0..k {
        loop {
            // Combinations that put `candidate` at `position`.
            let with_candidate = binomial(n - 1 - candidate, k - 1 - position).ok_or_else(|| {
                WeatError::InputValidation(format!("cannot unrank C({}, {})", n, k))
            })?;
            if rank < with_candidate {
                out.push(candidate);
                candidate += 1;
                break;
            }
            rank -= with_candidate;
            candidate += 1;
        }
    }

    Ok(out)
}

/// One relabeling of the pooled target words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<'a> {
    pub group1: Vec<&'a str>,
    pub group2: Vec<&'a str>,
}

/// Every split of `X ++ Y` into a group of `|X|` words and a group of `|Y|`
/// words.
///
/// Group 1 takes the words at the chosen indices; group 2 takes the rest, in
/// increasing index order.
#[derive(Clone, Debug)]
pub struct Partitions<'a> {
    pool: Vec<&'a str>,
    combinations: Combinations,
    group1: Vec<&'a str>,
    group2: Vec<&'a str>,
}

impl<'a> Partitions<'a> {
    /// All partitions of `x ++ y` with group sizes `|x|` and `|y|`.
    ///
    /// Fails if C(|x|+|y|, |x|) does not fit in a `u128`.
    pub fn new<S: AsRef<str>>(x: &'a [S], y: &'a [S]) -> Result<Self> {
        let pool = pool(x, y);
        let combinations = Combinations::new(pool.len(), x.len())?;
        Ok(Self::from_parts(pool, combinations))
    }

    /// `count` partitions starting at lexicographic `rank`.
    pub fn range<S: AsRef<str>>(x: &'a [S], y: &'a [S], rank: u128, count: u128) -> Result<Self> {
        let pool = pool(x, y);
        let combinations = Combinations::starting_at(pool.len(), x.len(), rank, count)?;
        Ok(Self::from_parts(pool, combinations))
    }

    fn from_parts(pool: Vec<&'a str>, combinations: Combinations) -> Self {
        let k = combinations.k();
        let rest = pool.len() - k;
        Self {
            pool,
            combinations,
            group1: Vec::with_capacity(k),
            group2: Vec::with_capacity(rest),
        }
    }

    /// Total number of partitions over the whole pool, C(n, k).
    pub fn total(&self) -> u128 {
        // Already checked to fit when the cursor was built.
        binomial(self.combinations.n(), self.combinations.k()).unwrap_or(u128::MAX)
    }

    /// Partitions not yet produced.
    pub fn remaining(&self) -> u128 {
        self.combinations.remaining()
    }

    /// Rewind to the first partition of this range.
    pub fn reset(&mut self) {
        self.combinations.reset();
    }

    /// Move to the next partition and borrow its groups.
    ///
    /// Group buffers are reused between calls.
    pub fn advance(&mut self) -> Option<(&[&'a str], &[&'a str])> {
        let indices = self.combinations.advance()?;
        self.group1.clear();
        self.group2.clear();

        let mut chosen = indices.iter().copied().peekable();
        for (position, &word) in self.pool.iter().enumerate() {
            if chosen.peek() == Some(&position) {
                chosen.next();
                self.group1.push(word);
            } else {
                self.group2.push(word);
            }
        }

        Some((self.group1.as_slice(), self.group2.as_slice()))
    }
}

impl<'a> Iterator for Partitions<'a> {
    type Item = Partition<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|(g1, g2)| Partition {
            group1: g1.to_vec(),
            group2: g2.to_vec(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.combinations.size_hint()
    }
}

fn pool<'a, S: AsRef<str>>(x: &'a [S], y: &'a [S]) -> Vec<&'a str> {
    x.iter().chain(y.iter()).map(AsRef::as_ref).collect()
}
