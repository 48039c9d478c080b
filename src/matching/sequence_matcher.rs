//! Ratcliff/Obershelp block matching.
//!
//! Finds the longest contiguous matching block, then recurses on the pieces to
//! the left and right of it. The ratio is `2 * M / T` where `M` is the total
//! size of all matching blocks and `T` the combined length of both sequences.

use std::collections::HashMap;

/// Sequences at least this long get their most frequent elements treated as
/// "popular" (they may extend a match but never seed one).
const POPULAR_THRESHOLD: usize = 200;

/// A matching block `(i, j, size)`: `a[i..i + size] == b[j..j + size]`.
pub type MatchingBlock = (usize, usize, usize);

pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of every non-popular element of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = b.len();
        if n >= POPULAR_THRESHOLD {
            let max_occurrences = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= max_occurrences);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
    /// Returns a zero-sized block at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0);
                    let size = previous + 1;
                    next_j2len.insert(j, size);
                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular elements never seed a match, but they may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// All matching blocks, ordered by position in `a`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.find_longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            blocks.push((i, j, size));
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }

        blocks.sort_unstable();
        blocks
    }

    /// Similarity in `[0, 1]`. Two empty sequences are identical (`1.0`).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|(_, _, size)| size).sum();
        2.0 * matches as f64 / total as f64
    }
}
