//! symptips - typo-tolerant symptom lookup
//!
//! Maps a free-text health complaint to catalogued symptoms and their tips.
//! A request runs through four stages:
//!
//! 1. spelling correction against a lexicon (`correct`, backed by `symspell`
//!    for the frequency strategy)
//! 2. lowercasing and phrase enumeration (`normalize`)
//! 3. weighted-ratio fuzzy matching against symptom names (`fuzz`, `matcher`)
//! 4. tip lookup for the matched catalog rows (`tips`)
//!
//! Examples
//!
//! - Runtime loading (the usual case):
//!
//! ```ignore
//! use symptips::{Catalog, Lexicon, LexiconFormat, Pipeline, PipelineConfig};
//!
//! let catalog = Catalog::from_csv_paths("symptoms.csv", "tips.csv")?;
//! let lexicon = Lexicon::from_path("words.txt", LexiconFormat::WordList)?;
//! let pipeline = Pipeline::new(catalog, lexicon, PipelineConfig::default())?;
//! for result in pipeline.process("I have acn and it hurts") {
//!     println!("{}: {:?}", result.symptom_name, result.tips);
//! }
//! ```
//!
//! - Compile-time lexicon embedding:
//!
//! ```ignore
//! use symptips::include_lexicon;
//!
//! let lexicon = include_lexicon!("data/words.txt");
//! ```

pub mod catalog;
pub mod config;
pub mod correct;
pub mod error;
pub mod fuzz;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod symspell;
pub mod tips;
pub mod wire;

pub use catalog::{Catalog, Symptom, SymptomId, TipSet};
pub use config::{CorrectionStrategy, PipelineConfig};
pub use correct::SpellCorrector;
pub use error::{Error, Result};
pub use lexicon::{Lexicon, LexiconFormat};
pub use matcher::{MatchCandidate, SymptomMatcher};
pub use pipeline::{Explanation, Pipeline};
pub use symspell::{Suggestion, SymSpell, Verbosity};
pub use tips::{EmptyTipsPolicy, SymptomTipResult, TipResolver};
pub use wire::{TipsRequest, TipsResponse};

/// Re-export the compile-time lexicon macro from the proc-macro crate.
///
/// The expansion refers to `::symptips::Lexicon` and `::phf`, so callers need
/// `phf` (with the `macros` feature) among their own dependencies.
pub use symptips_macros::include_lexicon;
