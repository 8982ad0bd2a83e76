//! Pure projection of a validated result onto a render model.
//!
//! [`ResultView::project`] is a pure function: the same response
//! always projects to the same view, with no side effects. The browser
//! layer only materializes what it finds here.

use crate::types::{CompareResponse, ConsistencySegment, Variation};

/// Placeholder rendered when a document has no variations.
pub const NO_VARIATIONS_TEXT: &str = "No significant variations detected";

/// Placeholder rendered when a document has no flagged inconsistencies.
pub const NO_INCONSISTENCIES_TEXT: &str = "No semantic inconsistencies detected";

/// Format a [0, 1] similarity as a display percentage, one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Fill stop for the weight control, in percent of its track.
pub fn fill_stop(weight: f64) -> f64 {
    weight * 100.0
}

/// Coherence tier of a consistency segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityTier {
    Low,
    Medium,
    High,
}

impl SimilarityTier {
    /// `[0, 0.3)` low, `[0.3, 0.7)` medium, `[0.7, 1]` high.
    pub fn classify(score: f64) -> Self {
        if score < 0.3 {
            SimilarityTier::Low
        } else if score < 0.7 {
            SimilarityTier::Medium
        } else {
            SimilarityTier::High
        }
    }

    /// CSS class the badge carries.
    pub fn css_class(self) -> &'static str {
        match self {
            SimilarityTier::Low => "similarity-low",
            SimilarityTier::Medium => "similarity-medium",
            SimilarityTier::High => "similarity-high",
        }
    }
}

/// Everything the renderer needs, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// `None` leaves the previous display untouched.
    pub text_similarity: Option<String>,
    pub handwriting_similarity: Option<String>,
    pub similarity_index: Option<String>,
    pub document1_variations: Vec<VariationView>,
    pub document2_variations: Vec<VariationView>,
    pub doc1_consistency: Vec<ConsistencyView>,
    pub doc2_consistency: Vec<ConsistencyView>,
    pub report_url: Option<String>,
}

/// One variation block.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationView {
    /// Header line, e.g. "Pages 2 → 3".
    pub page_range: String,
    /// One bullet line per change, service order.
    pub changes: Vec<String>,
}

/// One consistency row.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyView {
    pub segment_text: String,
    pub next_segment_text: String,
    /// Badge text, e.g. "42.0% similar".
    pub badge: String,
    pub tier: SimilarityTier,
}

impl ResultView {
    pub fn project(response: &CompareResponse) -> Self {
        Self {
            text_similarity: response.text_similarity.map(format_percent),
            handwriting_similarity: response.handwriting_similarity.map(format_percent),
            similarity_index: response.similarity_index.map(format_percent),
            document1_variations: project_variations(&response.variations.document1),
            document2_variations: project_variations(&response.variations.document2),
            doc1_consistency: project_segments(&response.text_consistency.doc1),
            doc2_consistency: project_segments(&response.text_consistency.doc2),
            report_url: response.report_url.clone(),
        }
    }
}

fn project_variations(variations: &[Variation]) -> Vec<VariationView> {
    variations.iter().map(VariationView::from_variation).collect()
}

fn project_segments(segments: &[ConsistencySegment]) -> Vec<ConsistencyView> {
    segments.iter().map(ConsistencyView::from_segment).collect()
}

impl VariationView {
    fn from_variation(variation: &Variation) -> Self {
        Self {
            page_range: format!("Pages {} → {}", variation.from_page, variation.to_page),
            changes: variation
                .changes
                .iter()
                .map(|change| format!("• {}", change.description))
                .collect(),
        }
    }
}

impl ConsistencyView {
    fn from_segment(segment: &ConsistencySegment) -> Self {
        Self {
            segment_text: segment.segment_text.clone(),
            next_segment_text: segment.next_segment_text.clone(),
            badge: format!("{} similar", format_percent(segment.similarity_score)),
            tier: SimilarityTier::classify(segment.similarity_score),
        }
    }
}
