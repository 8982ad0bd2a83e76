//! Submission lifecycle.

/// Where the current submission stands.
///
/// `Rendered` is not terminal: the next submission re-enters
/// `Submitting`, and its render overwrites the previous result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Rendered,
}

impl SubmissionPhase {
    /// Try to start a submission. Returns `false` while one is already
    /// in flight; disabling the submit control alone does not stop
    /// programmatic submit events.
    pub fn begin(&mut self) -> bool {
        if *self == SubmissionPhase::Submitting {
            return false;
        }
        *self = SubmissionPhase::Submitting;
        true
    }

    /// A validated result was rendered.
    pub fn complete(&mut self) {
        *self = SubmissionPhase::Rendered;
    }

    /// Any failure returns to `Idle`.
    pub fn fail(&mut self) {
        *self = SubmissionPhase::Idle;
    }

    pub fn is_submitting(self) -> bool {
        self == SubmissionPhase::Submitting
    }
}
