//! Fuzzy symptom matching.
//!
//! Matching runs twice per request with the same scorer and threshold:
//! candidate phrases are mapped to canonical names (`extract_symptoms`), then
//! the extracted names are mapped to catalog rows (`match_rows`).

use std::collections::HashSet;

use crate::fuzz;
use crate::normalize::Phrase;

/// A phrase accepted as denoting a symptom. Lives for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub phrase: String,
    pub matched_symptom_name: String,
    pub score: f64,
}

/// Best-scoring choice for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'c> {
    pub index: usize,
    pub name: &'c str,
    pub score: f64,
}

/// Score `query` against every choice with `fuzz::wratio`.
///
/// The first choice reaching the maximum score wins. No choices, no match.
pub fn extract_one<'c, S: AsRef<str>>(query: &str, choices: &'c [S]) -> Option<BestMatch<'c>> {
    let mut best: Option<BestMatch<'c>> = None;
    for (index, choice) in choices.iter().enumerate() {
        let name = choice.as_ref();
        let score = fuzz::wratio(query, name);
        if best.map_or(true, |b| score > b.score) {
            best = Some(BestMatch { index, name, score });
        }
    }
    best
}

/// Threshold-gated matcher over lowercased canonical names.
#[derive(Debug, Clone, Copy)]
pub struct SymptomMatcher<'c> {
    names: &'c [String],
    threshold: f64,
}

impl<'c> SymptomMatcher<'c> {
    pub fn new(names: &'c [String], threshold: f64) -> Self {
        Self { names, threshold }
    }

    /// The best canonical name for `phrase`, if it clears the threshold.
    pub fn best(&self, phrase: &str) -> Option<BestMatch<'c>> {
        extract_one(phrase, self.names).filter(|m| m.score >= self.threshold)
    }

    /// Map phrases to distinct canonical names, in first-seen order.
    ///
    /// A phrase lying inside an already accepted phrase that scored at least
    /// as high is skipped, so "sore" does not compete once "sore eyes"
    /// matched. Shadowing compares scores, never the threshold, so raising
    /// the threshold can only remove names from the result.
    pub fn extract_symptoms<I>(&self, phrases: I) -> Vec<MatchCandidate>
    where
        I: IntoIterator<Item = Phrase>,
    {
        let mut accepted: Vec<(usize, usize, f64)> = Vec::new();
        let mut seen: HashSet<usize> = HashSet::new();
        let mut out = Vec::new();

        for phrase in phrases {
            let Some(best) = self.best(&phrase.text) else {
                continue;
            };
            let shadowed = accepted.iter().any(|&(start, end, score)| {
                start <= phrase.start && phrase.end() <= end && score >= best.score
            });
            if shadowed {
                continue;
            }
            accepted.push((phrase.start, phrase.end(), best.score));
            if seen.insert(best.index) {
                out.push(MatchCandidate {
                    matched_symptom_name: best.name.to_string(),
                    phrase: phrase.text,
                    score: best.score,
                });
            }
        }
        out
    }

    /// Map extracted names to distinct catalog row indices, in first-seen order.
    pub fn match_rows<I, S>(&self, names: I) -> Vec<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter_map(|name| self.best(name.as_ref()))
            .map(|m| m.index)
            .filter(|index| seen.insert(*index))
            .collect()
    }
}
