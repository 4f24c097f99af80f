//! JSON request/response shapes for front ends.

use serde::{Deserialize, Serialize};

use crate::tips::SymptomTipResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsRequest {
    #[serde(default)]
    pub text: String,
}

impl TipsRequest {
    /// Parse a request body. A malformed body or missing `text` is an empty
    /// request, never an error.
    pub fn from_json(body: &str) -> Self {
        match serde_json::from_str::<Self>(body) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "malformed request body, treating as empty");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsResponse {
    pub symptoms: Vec<SymptomTipResult>,
}
