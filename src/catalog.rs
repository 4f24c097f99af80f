//! Reference data store: the symptom catalog joined with its tips.
//!
//! The catalog is built once from two tabular sources that share a symptom
//! identifier and is read-only afterwards:
//!
//! - symptoms: `Symptom_ID,Symptom`
//! - tips: `Symptom_ID,Tip1,Tip2,...` (every column other than the identifier
//!   is a tip slot, in column order)
//!
//! The join is inner: a symptom without a tips row, or a tips row without a
//! symptom, is left out.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::normalize;

/// Identifier shared by the symptoms and tips tables.
pub type SymptomId = u64;

const ID_COLUMN: &str = "Symptom_ID";
const NAME_COLUMN: &str = "Symptom";

/// A canonical, catalog-defined symptom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symptom {
    pub id: SymptomId,
    pub name: String,
}

/// The tips stored for one symptom identifier. Absent slots are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipSet {
    pub symptom_id: SymptomId,
    pub tips: Vec<String>,
}

/// Strongly-typed, joined symptom catalog.
///
/// Row order is the order of the symptoms source; matching ties resolve to
/// the earliest row, so the order is significant.
#[derive(Debug, Clone)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    /// Lowercased names as word tokens joined by single spaces, index-aligned
    /// with `symptoms`. Matching runs on these.
    match_names: Vec<String>,
    tips: HashMap<SymptomId, Vec<String>>,
}

impl Catalog {
    /// Inner-join symptoms with tip sets on the identifier.
    ///
    /// Multiple tip sets for one identifier are concatenated in input order.
    /// Duplicate identifiers, and names equal once lowercased and stripped of
    /// punctuation, keep the first row. An empty join result is an error.
    pub fn join<S, T>(symptoms: S, tip_sets: T) -> Result<Self>
    where
        S: IntoIterator<Item = Symptom>,
        T: IntoIterator<Item = TipSet>,
    {
        let mut tips: HashMap<SymptomId, Vec<String>> = HashMap::new();
        for set in tip_sets {
            let slot = tips.entry(set.symptom_id).or_default();
            slot.extend(
                set.tips
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
            );
        }

        let mut rows = Vec::new();
        let mut match_names = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut unmatched = 0usize;

        for symptom in symptoms {
            if !tips.contains_key(&symptom.id) {
                unmatched += 1;
                continue;
            }
            let key = match_name(&symptom.name);
            if key.is_empty() {
                warn!(
                    id = symptom.id,
                    name = %symptom.name,
                    "skipping symptom without words in its name"
                );
                continue;
            }
            if !seen_ids.insert(symptom.id) {
                warn!(id = symptom.id, "skipping duplicate symptom identifier");
                continue;
            }
            if !seen_names.insert(key.clone()) {
                warn!(id = symptom.id, name = %symptom.name, "skipping duplicate symptom name");
                continue;
            }
            match_names.push(key);
            rows.push(Symptom {
                id: symptom.id,
                name: symptom.name.trim().to_string(),
            });
        }

        // Tip rows whose identifier never made it into the catalog are dropped.
        tips.retain(|id, _| seen_ids.contains(id));

        if rows.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if unmatched > 0 {
            warn!(unmatched, "symptoms without a tips row were left out of the catalog");
        }
        info!(symptoms = rows.len(), "symptom catalog loaded");

        Ok(Self {
            symptoms: rows,
            match_names,
            tips,
        })
    }

    /// Build a catalog from two CSV sources.
    pub fn from_csv_readers<S, T>(symptoms: S, tips: T) -> Result<Self>
    where
        S: io::Read,
        T: io::Read,
    {
        Self::join(read_symptoms(symptoms)?, read_tip_sets(tips)?)
    }

    /// Build a catalog from two CSV files on disk.
    pub fn from_csv_paths(symptoms: impl AsRef<Path>, tips: impl AsRef<Path>) -> Result<Self> {
        let symptoms = std::fs::File::open(symptoms)?;
        let tips = std::fs::File::open(tips)?;
        Self::from_csv_readers(io::BufReader::new(symptoms), io::BufReader::new(tips))
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn symptom(&self, index: usize) -> Option<&Symptom> {
        self.symptoms.get(index)
    }

    /// Match names in catalog order, tokenized like candidate phrases.
    pub fn match_names(&self) -> &[String] {
        &self.match_names
    }

    /// Tips for an identifier; empty when the identifier has no stored tips.
    pub fn tips_for(&self, id: SymptomId) -> &[String] {
        self.tips.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Longest symptom name, counted in words.
    pub fn max_name_words(&self) -> usize {
        self.match_names
            .iter()
            .map(|n| normalize::words(n).count())
            .max()
            .unwrap_or(1)
    }

    /// Shortest match name, counted in chars.
    pub fn min_name_chars(&self) -> usize {
        self.match_names
            .iter()
            .map(|n| n.chars().count())
            .min()
            .unwrap_or(0)
    }
}

/// The form a name is matched in: lowercased word tokens joined by single
/// spaces, so "Run-down" and "Shortness of Breath (Dyspnea)" line up with
/// the phrases built from user text.
fn match_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    normalize::words(&lowered).collect::<Vec<_>>().join(" ")
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn column_index(
    headers: &csv::StringRecord,
    source_name: &'static str,
    column: &'static str,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or(Error::MissingColumn {
            source_name,
            column,
        })
}

fn parse_id(
    record: &csv::StringRecord,
    idx: usize,
    source_name: &'static str,
) -> Result<SymptomId> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse().map_err(|_| Error::InvalidIdentifier {
        source_name,
        row: record.position().map_or(0, |p| p.line() as usize),
        value: raw.to_string(),
    })
}

/// Read `(Symptom_ID, Symptom)` rows.
pub fn read_symptoms<R: io::Read>(reader: R) -> Result<Vec<Symptom>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let id_idx = column_index(&headers, "symptoms", ID_COLUMN)?;
    let name_idx = column_index(&headers, "symptoms", NAME_COLUMN)?;

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let id = parse_id(&record, id_idx, "symptoms")?;
        let name = record.get(name_idx).unwrap_or("").to_string();
        out.push(Symptom { id, name });
    }
    Ok(out)
}

/// Read `(Symptom_ID, Tip1, Tip2, ...)` rows. Blank cells are absent tips.
pub fn read_tip_sets<R: io::Read>(reader: R) -> Result<Vec<TipSet>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let id_idx = column_index(&headers, "tips", ID_COLUMN)?;

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let symptom_id = parse_id(&record, id_idx, "tips")?;
        let tips = record
            .iter()
            .enumerate()
            .filter(|(i, cell)| *i != id_idx && !cell.is_empty())
            .map(|(_, cell)| cell.to_string())
            .collect();
        out.push(TipSet { symptom_id, tips });
    }
    Ok(out)
}
