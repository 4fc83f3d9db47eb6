//! Word finder - greedy longest-first, leftmost-first word tiling
//!
//! For each sequence:
//!
//! 1. If the whole sequence is a word, it is the only match.
//! 2. Otherwise window lengths run from `len - 1` down to the minimum word
//!    length, and each window length is scanned left to right.
//! 3. A window overlapping any index claimed by an earlier match is skipped.
//! 4. A window that spells a word is accepted and its indices are claimed.
//!
//! There is no backtracking, so the result is deterministic but not
//! necessarily the tiling with the most words.

use crate::dictionary::WordLookup;
use crate::error::CoreResult;
use crate::sequence::{TileSequence, WordMatch};

/// Half-open character range `[start, start + len)` that spells a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordSpan {
    pub start: usize,
    pub len: usize,
}

impl WordSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn overlaps(&self, other: &WordSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Find non-overlapping words in a plain character sequence.
///
/// `min_len` below 1 is treated as 1. Spans are returned in acceptance order:
/// longest first, then leftmost.
pub fn find_word_spans<L>(lookup: &L, chars: &[char], min_len: usize) -> CoreResult<Vec<WordSpan>>
where
    L: WordLookup + ?Sized,
{
    let n = chars.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let whole: String = chars.iter().collect();
    if lookup.contains(&whole)? {
        return Ok(vec![WordSpan { start: 0, len: n }]);
    }

    let min_len = min_len.max(1);
    let mut spans = Vec::new();
    let mut claimed = vec![false; n];
    let mut window = String::with_capacity(n);

    for len in (min_len..n).rev() {
        for start in 0..=(n - len) {
            if claimed[start..start + len].iter().any(|&c| c) {
                continue;
            }

            window.clear();
            window.extend(&chars[start..start + len]);
            if lookup.contains(&window)? {
                claimed[start..start + len].fill(true);
                spans.push(WordSpan { start, len });
            }
        }
    }

    Ok(spans)
}

/// Find words in one tile sequence
pub fn find_words_in_sequence<L>(
    lookup: &L,
    sequence: &TileSequence,
    min_len: usize,
) -> CoreResult<Vec<WordMatch>>
where
    L: WordLookup + ?Sized,
{
    let chars = sequence.chars();
    let spans = find_word_spans(lookup, &chars, min_len)?;

    Ok(spans
        .into_iter()
        .map(|span| {
            let tiles = sequence.tiles()[span.start..span.end()].to_vec();
            WordMatch {
                line: sequence.line(),
                start: span.start,
                word: chars[span.start..span.end()].iter().collect(),
                tiles,
            }
        })
        .collect())
}

/// Find words across several sequences, in sequence order
pub fn find_words<'a, L, I>(lookup: &L, sequences: I, min_len: usize) -> CoreResult<Vec<WordMatch>>
where
    L: WordLookup + ?Sized,
    I: IntoIterator<Item = &'a TileSequence>,
{
    let mut found = Vec::new();
    for sequence in sequences {
        let words = find_words_in_sequence(lookup, sequence, min_len)?;
        if !words.is_empty() {
            log::debug!(
                "{}: {:?}",
                sequence.line(),
                words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>()
            );
        }
        found.extend(words);
    }
    Ok(found)
}
