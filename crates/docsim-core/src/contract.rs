//! Wire contract for the comparison service.
//!
//! One endpoint, one success shape, one error envelope. Nothing that
//! came over the network reaches the renderer without passing through
//! here first.

use thiserror::Error;

use crate::types::{CompareResponse, ErrorEnvelope, Variation};

/// Comparison endpoint, relative to the API base.
pub const COMPARE_PATH: &str = "/compare";

/// Multipart field name for the first document.
pub const FIELD_FILE1: &str = "file1";
/// Multipart field name for the second document.
pub const FIELD_FILE2: &str = "file2";
/// Multipart field name for the text/handwriting blend weight.
pub const FIELD_WEIGHT_TEXT: &str = "weight_text";

/// Declared MIME type an upload slot accepts.
pub const PDF_MIME: &str = "application/pdf";

/// Shown when a non-2xx body carries no usable envelope.
pub const GENERIC_REQUEST_ERROR: &str = "An error occurred";

/// Shown for transport-level failures.
pub const GENERIC_NETWORK_ERROR: &str = "An error occurred during analysis";

/// Failure taxonomy for one submission round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    /// Transport failed before a usable response arrived. The
    /// client-side timeout lands here as well.
    #[error("{0}")]
    Network(String),

    /// The service answered non-2xx. `message` is the server's own
    /// text when the envelope parsed, the generic fallback otherwise.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The service answered 2xx with a payload that does not match the
    /// contract. Kept distinct from generic failure so it surfaces
    /// under its own message.
    #[error("Unexpected response from the comparison service: {0}")]
    Contract(#[from] ContractViolation),
}

/// Why a 2xx payload was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("body is not a valid comparison result: {0}")]
    MalformedBody(String),

    #[error("{field} is {value}, outside [0, 1]")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} contains a zero page index")]
    ZeroPageIndex { field: &'static str },
}

/// Parse and validate a 2xx response body.
pub fn parse_success(body: &str) -> Result<CompareResponse, ContractViolation> {
    let response: CompareResponse =
        serde_json::from_str(body).map_err(|e| ContractViolation::MalformedBody(e.to_string()))?;
    validate(&response)?;
    Ok(response)
}

/// Structural checks serde cannot express: similarity ranges and page
/// indices. `from_page <= to_page` is left to the service.
pub fn validate(response: &CompareResponse) -> Result<(), ContractViolation> {
    check_unit_range("text_similarity", response.text_similarity)?;
    check_unit_range("handwriting_similarity", response.handwriting_similarity)?;
    check_unit_range("similarity_index", response.similarity_index)?;

    check_pages("variations.document1", &response.variations.document1)?;
    check_pages("variations.document2", &response.variations.document2)?;

    let segments = response
        .text_consistency
        .doc1
        .iter()
        .chain(response.text_consistency.doc2.iter());
    for segment in segments {
        check_unit_range(
            "text_consistency.similarity_score",
            Some(segment.similarity_score),
        )?;
    }

    Ok(())
}

/// Interpret a non-2xx response body.
pub fn parse_error_body(status: u16, body: &str) -> CompareError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| GENERIC_REQUEST_ERROR.to_string());
    CompareError::Request { status, message }
}

/// Parse the weight control's raw value. `None` when the control holds
/// something outside the contract's "0".."1" range.
pub fn parse_weight(raw: &str) -> Option<f64> {
    let weight: f64 = raw.trim().parse().ok()?;
    (0.0..=1.0).contains(&weight).then_some(weight)
}

fn check_unit_range(field: &'static str, value: Option<f64>) -> Result<(), ContractViolation> {
    match value {
        // NaN fails `contains` and lands here as well.
        Some(v) if !(0.0..=1.0).contains(&v) => {
            Err(ContractViolation::OutOfRange { field, value: v })
        }
        _ => Ok(()),
    }
}

fn check_pages(field: &'static str, variations: &[Variation]) -> Result<(), ContractViolation> {
    for variation in variations {
        if variation.from_page == 0 || variation.to_page == 0 {
            return Err(ContractViolation::ZeroPageIndex { field });
        }
    }
    Ok(())
}
