//! Contract and projection core for the docsim comparison client.
//!
//! Everything here is platform-independent: the wire types exchanged
//! with the comparison service, the validator that gates untrusted
//! payloads, the pure projection of a validated result into a render
//! model, and the submission lifecycle. The browser layer in
//! `docsim-wasm` stays thin on top of this crate, which keeps the
//! interesting logic testable with plain `cargo test`.

pub mod contract;
pub mod state;
pub mod types;
pub mod view;

pub use contract::{CompareError, ContractViolation};
pub use state::SubmissionPhase;
pub use types::{
    CompareResponse, ConsistencySegment, DocumentVariations, ErrorEnvelope, TextConsistency,
    Variation, VariationChange,
};
pub use view::{ConsistencyView, ResultView, SimilarityTier, VariationView};
