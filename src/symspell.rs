/*!
symspell module

Symmetric-delete candidate index backing the frequency-based corrector.

- `Suggestion` struct for suggestion results
- `SymSpell` struct which stores word frequencies and a deletion index
- `generate_deletes` to produce deletion variants for indexing
- `damerau_levenshtein` to compute edit distances with transposition (via `strsim`)

Every lexicon word is indexed under itself and under each string obtained by
deleting up to `max_distance` characters from it. At lookup time the same
deletions are generated for the query; any word sharing a variant with the
query is a candidate, and candidates are verified with Damerau-Levenshtein.
*/

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::lexicon::Lexicon;

/// A candidate suggestion returned by `lookup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub term: String,
    /// Frequency of the candidate in the lexicon.
    pub frequency: usize,
    /// Edit distance from the queried term to the candidate.
    pub distance: u8,
}

/// Controls which suggestions are returned by `lookup`.
///
/// - `Top`: a single best suggestion (closest distance, then highest frequency)
/// - `Closest`: all suggestions with the minimal edit distance
/// - `All`: all suggestions within max_distance
///
/// Results are ordered by distance asc, frequency desc, then term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Top,
    Closest,
    All,
}

#[derive(Debug, Clone)]
pub struct SymSpell {
    max_distance: u8,
    dictionary: HashMap<String, usize>,
    deletes: HashMap<String, HashSet<String>>,
}

impl SymSpell {
    /// Create an empty index with a configured `max_distance`.
    pub fn new(max_distance: u8) -> Self {
        Self {
            max_distance,
            dictionary: HashMap::new(),
            deletes: HashMap::new(),
        }
    }

    /// Index every word of a lexicon.
    pub fn from_lexicon(max_distance: u8, lexicon: &Lexicon) -> Self {
        let mut sym = SymSpell::new(max_distance);
        sym.load_iter(lexicon.iter());
        sym
    }

    /// Insert entries, replacing the frequency of words already indexed.
    pub fn load_iter<'a, I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        for (word, freq) in iter {
            if word.is_empty() {
                continue;
            }
            self.dictionary.insert(word.to_string(), freq);
            self.deletes
                .entry(word.to_string())
                .or_default()
                .insert(word.to_string());
            for d in generate_deletes(word, self.max_distance) {
                self.deletes.entry(d).or_default().insert(word.to_string());
            }
        }
    }

    /// Look up suggestions for `term`.
    ///
    /// `max_distance` is capped by the instance `max_distance`.
    pub fn lookup(&self, term: &str, max_distance: u8, verbosity: Verbosity) -> Vec<Suggestion> {
        if term.is_empty() {
            return Vec::new();
        }
        let max_distance = max_distance.min(self.max_distance);

        if let Some(&frequency) = self.dictionary.get(term) {
            if verbosity != Verbosity::All {
                return vec![Suggestion {
                    term: term.to_string(),
                    frequency,
                    distance: 0,
                }];
            }
        }

        let mut variants = generate_deletes(term, max_distance);
        variants.insert(term.to_string());

        let mut candidates: HashSet<&str> = HashSet::new();
        for variant in &variants {
            if let Some(words) = self.deletes.get(variant) {
                candidates.extend(words.iter().map(String::as_str));
            }
        }

        let mut results: Vec<Suggestion> = candidates
            .into_iter()
            .filter_map(|cand| {
                let distance = damerau_levenshtein(term, cand);
                (distance <= max_distance).then(|| Suggestion {
                    term: cand.to_string(),
                    frequency: self.dictionary.get(cand).copied().unwrap_or(0),
                    distance,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.term.cmp(&b.term))
        });

        let Some(min_distance) = results.first().map(|r| r.distance) else {
            return results;
        };
        match verbosity {
            Verbosity::Top => {
                results.truncate(1);
                results
            }
            Verbosity::Closest => {
                results.retain(|r| r.distance == min_distance);
                results
            }
            Verbosity::All => results,
        }
    }

    /// The single best suggestion within the configured max distance.
    pub fn find_top(&self, term: &str) -> Option<Suggestion> {
        self.lookup(term, self.max_distance, Verbosity::Top)
            .into_iter()
            .next()
    }
}

/// Generate all deletion variants for `word` up to `max_distance`.
///
/// Deletions work on chars, not bytes. The original word is not included.
fn generate_deletes(word: &str, max_distance: u8) -> HashSet<String> {
    let mut deletes: HashSet<String> = HashSet::new();
    let mut queue: BTreeSet<Vec<char>> = BTreeSet::new();
    queue.insert(word.chars().collect());

    for _d in 0..max_distance {
        let mut next: BTreeSet<Vec<char>> = BTreeSet::new();
        for s in &queue {
            // Keep at least one char; an empty variant would match everything.
            if s.len() <= 1 {
                continue;
            }
            for i in 0..s.len() {
                let mut t = s.clone();
                t.remove(i);
                if deletes.insert(t.iter().collect()) {
                    next.insert(t);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        queue = next;
    }
    deletes
}

/// Damerau-Levenshtein distance (optimal string alignment), capped at 255.
pub(crate) fn damerau_levenshtein(a: &str, b: &str) -> u8 {
    strsim::osa_distance(a, b).min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SymSpell {
        let lexicon = Lexicon::from_iter(vec![
            ("hello", 100usize),
            ("hell", 50),
            ("help", 10),
            ("world", 200),
            ("acne", 5),
            ("ache", 5),
        ]);
        SymSpell::from_lexicon(2, &lexicon)
    }

    #[test]
    fn test_damerau_basic() {
        assert_eq!(damerau_levenshtein("abc", "abc"), 0);
        assert_eq!(damerau_levenshtein("abc", "ab"), 1);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1); // transposition
        assert_eq!(damerau_levenshtein("", "fever"), 5);
    }

    #[test]
    fn test_generate_deletes_on_chars() {
        let dels = generate_deletes("née", 1);
        assert!(dels.contains("ée"));
        assert!(dels.contains("ne"));
        assert!(!dels.contains("née"));
    }

    #[test]
    fn test_lookup_prefers_distance_then_frequency() {
        let sym = sample();
        let top = sym.find_top("helo").unwrap();
        assert_eq!(top.term, "hello");
        assert_eq!(top.distance, 1);

        let closest = sym.lookup("helo", 2, Verbosity::Closest);
        let terms: Vec<&str> = closest.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, vec!["hello", "hell", "help"]);
    }

    #[test]
    fn test_lookup_exact_and_ties() {
        let sym = sample();
        let exact = sym.lookup("world", 2, Verbosity::Top);
        assert_eq!(exact[0].distance, 0);

        // "acn" is one edit from "acne"; "ache" needs two.
        assert_eq!(sym.find_top("acn").unwrap().term, "acne");
        // "acbe" is one substitution from both; equal frequency falls back to term order.
        assert_eq!(sym.find_top("acbe").unwrap().term, "ache");
    }

    #[test]
    fn test_lookup_all_respects_max_distance() {
        let sym = sample();
        let all = sym.lookup("wrld", 1, Verbosity::All);
        assert!(all.iter().all(|s| s.distance <= 1));
        assert_eq!(all[0].term, "world");
        assert!(sym.lookup("xyzzy", 2, Verbosity::All).is_empty());
        assert!(sym.lookup("", 2, Verbosity::Top).is_empty());
    }
}
