//! Weighted alphabet - frequency-weighted random letters
//!
//! Character sets are stored as `<char> <count>` pairs, one per line. At load
//! time each letter is repeated `count` times into a flat population, so a draw
//! is a single uniform index into that vector.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use rand::{Rng, RngCore};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedAlphabet {
    /// Letter and weight, in the order they were declared
    weights: Vec<(char, u32)>,
    /// Every letter repeated by its weight
    population: Vec<char>,
}

impl WeightedAlphabet {
    /// Build from `(letter, weight)` pairs. Zero weights are dropped; letters
    /// are lowercased.
    pub fn from_weights<I>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        let weights: Vec<(char, u32)> = pairs
            .into_iter()
            .filter(|&(_, w)| w > 0)
            .map(|(c, w)| (normalize(c), w))
            .collect();

        let total: usize = weights.iter().map(|&(_, w)| w as usize).sum();
        if total == 0 {
            return Err(CoreError::EmptyCharacterSet);
        }

        let mut population = Vec::with_capacity(total);
        for &(c, w) in &weights {
            population.extend(std::iter::repeat(c).take(w as usize));
        }

        Ok(Self {
            weights,
            population,
        })
    }

    /// Parse the `<char> <count>` character-set format.
    ///
    /// Blank lines are skipped. Any other line must hold exactly one
    /// character followed by a non-negative integer.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let mut pairs = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || CoreError::MalformedCharacterSet {
                line: idx + 1,
                content: raw.to_string(),
            };

            let mut parts = line.split_whitespace();
            let letter = parts.next().ok_or_else(malformed)?;
            let count = parts.next().ok_or_else(malformed)?;
            if parts.next().is_some() {
                return Err(malformed());
            }

            let mut chars = letter.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(malformed());
            };
            let count: u32 = count.parse().map_err(|_| malformed())?;
            pairs.push((c, count));
        }
        Self::from_weights(pairs)
    }

    /// Derive weights from a word list: each letter's occurrence count divided
    /// by the count of the rarest letter (so the rarest letter weighs 1).
    pub fn derive_from_words<'a, I>(words: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: BTreeMap<char, u64> = BTreeMap::new();
        for word in words {
            for c in word.chars() {
                *counts.entry(normalize(c)).or_default() += 1;
            }
        }

        let Some(&lowest) = counts.values().min() else {
            return Err(CoreError::EmptyCharacterSet);
        };

        Self::from_weights(
            counts
                .into_iter()
                .map(|(c, n)| (c, u32::try_from(n / lowest).unwrap_or(u32::MAX))),
        )
    }

    /// Render back to the `<char> <count>` format
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for &(c, w) in &self.weights {
            let _ = writeln!(out, "{c} {w}");
        }
        out
    }

    /// Draw one letter, O(1)
    pub fn sample(&self, rng: &mut dyn RngCore) -> char {
        self.population[rng.random_range(0..self.population.len())]
    }

    pub fn weight_of(&self, c: char) -> u32 {
        let c = normalize(c);
        self.weights
            .iter()
            .find(|&&(l, _)| l == c)
            .map_or(0, |&(_, w)| w)
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.weights.iter().map(|&(c, _)| c)
    }

    /// Number of entries in the expanded population
    pub fn population_len(&self) -> usize {
        self.population.len()
    }
}

fn normalize(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse_character_set() {
        let alphabet = WeightedAlphabet::parse("e 12\na 8\n\nz 1\n").unwrap();
        assert_eq!(alphabet.weight_of('e'), 12);
        assert_eq!(alphabet.weight_of('A'), 8);
        assert_eq!(alphabet.weight_of('z'), 1);
        assert_eq!(alphabet.weight_of('q'), 0);
        assert_eq!(alphabet.population_len(), 21);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let err = WeightedAlphabet::parse("e 12\nab 3\n").unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedCharacterSet { line: 2, .. }
        ));

        let err = WeightedAlphabet::parse("e twelve").unwrap_err();
        assert!(matches!(err, CoreError::MalformedCharacterSet { line: 1, .. }));

        let err = WeightedAlphabet::parse("e 1 2").unwrap_err();
        assert!(matches!(err, CoreError::MalformedCharacterSet { .. }));
    }

    #[test]
    fn test_all_zero_weights_is_empty() {
        assert!(matches!(
            WeightedAlphabet::parse("a 0\nb 0"),
            Err(CoreError::EmptyCharacterSet)
        ));
        assert!(matches!(
            WeightedAlphabet::parse(""),
            Err(CoreError::EmptyCharacterSet)
        ));
    }

    #[test]
    fn test_sample_only_returns_weighted_letters() {
        let alphabet = WeightedAlphabet::parse("x 3\ny 1").unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut xs = 0;
        for _ in 0..4000 {
            match alphabet.sample(&mut rng) {
                'x' => xs += 1,
                'y' => {}
                other => panic!("unexpected letter {other}"),
            }
        }
        // Expect roughly 3000 x's
        assert!((2700..3300).contains(&xs), "x drawn {xs} times");
    }

    #[test]
    fn test_derive_from_words_scales_to_rarest() {
        let alphabet = WeightedAlphabet::derive_from_words(["aab", "aab"]).unwrap();
        assert_eq!(alphabet.weight_of('a'), 2);
        assert_eq!(alphabet.weight_of('b'), 1);
        assert_eq!(alphabet.to_text(), "a 2\nb 1\n");
    }

    #[test]
    fn test_to_text_parses_back() {
        let alphabet = WeightedAlphabet::parse("e 5\nt 3").unwrap();
        assert_eq!(WeightedAlphabet::parse(&alphabet.to_text()).unwrap(), alphabet);
    }
}
