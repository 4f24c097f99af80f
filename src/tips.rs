//! Tip resolution for matched catalog rows.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// What to emit for a matched symptom that has no tips.
///
/// The symptom itself is always kept in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTipsPolicy {
    /// An empty tips list.
    #[default]
    Empty,
    /// A single "No tips found for '<symptom>'." tip.
    Placeholder,
}

/// One matched symptom and its advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomTipResult {
    #[serde(rename = "symptom")]
    pub symptom_name: String,
    pub tips: Vec<String>,
}

pub fn placeholder_tip(symptom_name: &str) -> String {
    format!("No tips found for '{symptom_name}'.")
}

#[derive(Debug, Clone, Copy)]
pub struct TipResolver<'c> {
    catalog: &'c Catalog,
    policy: EmptyTipsPolicy,
}

impl<'c> TipResolver<'c> {
    pub fn new(catalog: &'c Catalog, policy: EmptyTipsPolicy) -> Self {
        Self { catalog, policy }
    }

    /// One result per distinct index, in input order. Indices outside the
    /// catalog are ignored.
    pub fn resolve(&self, indices: &[usize]) -> Vec<SymptomTipResult> {
        let mut out: Vec<SymptomTipResult> = Vec::with_capacity(indices.len());
        for &index in indices {
            let Some(symptom) = self.catalog.symptom(index) else {
                continue;
            };
            if out.iter().any(|r| r.symptom_name == symptom.name) {
                continue;
            }
            let mut tips: Vec<String> = self
                .catalog
                .tips_for(symptom.id)
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect();
            if tips.is_empty() && self.policy == EmptyTipsPolicy::Placeholder {
                tips.push(placeholder_tip(&symptom.name));
            }
            out.push(SymptomTipResult {
                symptom_name: symptom.name.clone(),
                tips,
            });
        }
        out
    }
}
