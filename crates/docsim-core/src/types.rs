//! Wire types for the comparison service.
//!
//! These mirror the JSON bodies exchanged over `POST /compare`. A
//! deserialized `CompareResponse` is still untrusted until it has
//! passed [`crate::contract::parse_success`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Successful comparison verdict.
///
/// The similarity fields may each be absent; the renderer leaves the
/// previous display untouched for anything the service omits. Unknown
/// fields in the body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub text_similarity: Option<f64>,
    pub handwriting_similarity: Option<f64>,
    /// Weighted composite of the other two, computed by the service
    /// from the submitted `weight_text`. Opaque to the client; never
    /// recomputed here.
    pub similarity_index: Option<f64>,
    #[serde(default)]
    pub variations: DocumentVariations,
    #[serde(default)]
    pub text_consistency: TextConsistency,
    /// Per-feature handwriting scores. Pass-through, not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_scores: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

/// Page-range variations per document, in service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentVariations {
    #[serde(default)]
    pub document1: Vec<Variation>,
    #[serde(default)]
    pub document2: Vec<Variation>,
}

/// Adjacent-segment coherence per document, in service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConsistency {
    #[serde(default)]
    pub doc1: Vec<ConsistencySegment>,
    #[serde(default)]
    pub doc2: Vec<ConsistencySegment>,
}

/// A detected structural difference between two adjacent page ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub from_page: u32,
    pub to_page: u32,
    #[serde(default)]
    pub changes: Vec<VariationChange>,
}

/// One change within a variation. Only `description` is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationChange {
    /// Feature that moved, e.g. "confidence" or "symbol_density".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<f64>,
    pub description: String,
}

/// Two adjacent extracted segments and the semantic coherence between
/// them. The text is document content extracted by the service and
/// must never be treated as markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_index: Option<usize>,
    pub segment_text: String,
    pub next_segment_text: String,
    pub similarity_score: f64,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
