//! The pipeline orchestrator: correct → normalize → match → resolve.
//!
//! A `Pipeline` owns its catalog and lexicon and never mutates them after
//! construction, so one instance can serve concurrent requests behind an
//! `Arc` without locking.

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::PipelineConfig;
use crate::correct::SpellCorrector;
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::matcher::{MatchCandidate, SymptomMatcher};
use crate::normalize::{self, Normalizer};
use crate::tips::{SymptomTipResult, TipResolver};
use crate::wire::{TipsRequest, TipsResponse};

/// Intermediate results of one run, for debugging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub corrected: String,
    pub candidates: Vec<MatchCandidate>,
    pub results: Vec<SymptomTipResult>,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: Catalog,
    corrector: SpellCorrector,
    normalizer: Normalizer,
    config: PipelineConfig,
}

impl Pipeline {
    /// Assemble a pipeline from loaded reference data.
    ///
    /// Words of the symptom names are added to the lexicon so that an exact
    /// symptom name is never rewritten by the corrector.
    pub fn new(catalog: Catalog, mut lexicon: Lexicon, config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let missing: Vec<String> = catalog
            .match_names()
            .iter()
            .flat_map(|name| normalize::words(name))
            .filter(|w| !lexicon.contains(w))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            debug!(words = missing.len(), "adding symptom name words to the lexicon");
            lexicon.load_iter(missing.iter().map(|w| (w.as_str(), 1)));
        }

        // Every symptom name must fit in one phrase window.
        let normalizer = Normalizer::new(
            catalog.max_name_words(),
            config.min_phrase_chars.min(catalog.min_name_chars()),
        );
        let corrector = SpellCorrector::new(lexicon, config.correction);

        Ok(Self {
            catalog,
            corrector,
            normalizer,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.corrector.lexicon()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Symptoms and tips found in `raw_text`. Empty when nothing matches.
    pub fn process(&self, raw_text: &str) -> Vec<SymptomTipResult> {
        self.explain(raw_text).results
    }

    pub fn process_request(&self, request: &TipsRequest) -> TipsResponse {
        TipsResponse {
            symptoms: self.process(&request.text),
        }
    }

    /// Run every stage and keep the intermediate values.
    pub fn explain(&self, raw_text: &str) -> Explanation {
        let corrected = self.corrector.correct_sentence(raw_text);
        debug!(input = raw_text, corrected = %corrected, "spelling corrected");

        let lowered = Normalizer::lowercase(&corrected);
        let matcher = SymptomMatcher::new(self.catalog.match_names(), self.config.match_threshold);

        let candidates = matcher.extract_symptoms(self.normalizer.phrases(&lowered));
        debug!(candidates = ?candidates, "symptom phrases extracted");

        let rows = matcher.match_rows(candidates.iter().map(|c| c.matched_symptom_name.as_str()));
        let results = TipResolver::new(&self.catalog, self.config.empty_tips).resolve(&rows);
        debug!(symptoms = results.len(), "tips resolved");

        Explanation {
            corrected,
            candidates,
            results,
        }
    }
}
