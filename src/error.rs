//! Error types.
//!
//! Two layers:
//!
//! - `AnalysisError` — typed failures from the numeric core. The batch pass
//!   matches on these to decide skip-and-log vs abort.
//! - `AppError` — what the binary boundary sees: an exit code plus a message.

use thiserror::Error;

/// Failure modes of the numeric pipeline.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Windowing produced zero usable points (all samples saturated, or the
    /// first sample was already non-positive).
    #[error("fit window is empty (left_lim={left_lim}, pos_len={pos_len})")]
    WindowEmpty { left_lim: usize, pos_len: usize },

    /// Fewer windowed samples than free parameters.
    #[error("under-determined fit: {n} windowed points for 3 free parameters")]
    TooFewPoints { n: usize },

    /// The optimizer exhausted its iteration budget.
    #[error("fit did not converge within {budget} iterations")]
    NoConvergence { budget: usize },

    /// A converged parameter sits on a box bound, which signals a poorly
    /// chosen prior rather than a trustworthy optimum.
    #[error("fitted parameter {param} saturated its bound at {value}")]
    BoundSaturated { param: &'static str, value: f64 },

    /// Two sequences that must be index-aligned differ in length.
    #[error("mismatched sequence lengths: {left} vs {right}")]
    MismatchedLength { left: usize, right: usize },

    /// A group has no data to aggregate or summarize.
    #[error("group '{label}' has no data")]
    EmptyGroup { label: String },
}

impl AnalysisError {
    /// Whether the batch pass may skip this run and keep going.
    ///
    /// Per-run fit failures are recoverable; structural problems (misaligned
    /// inputs, empty groups) violate the loader contract and abort.
    pub fn is_fit_failure(&self) -> bool {
        matches!(
            self,
            AnalysisError::WindowEmpty { .. }
                | AnalysisError::TooFewPoints { .. }
                | AnalysisError::NoConvergence { .. }
                | AnalysisError::BoundSaturated { .. }
        )
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        // Exit codes: 3 = recoverable analysis failure surfaced at top level,
        // 4 = structural/contract failure.
        let code = if err.is_fit_failure() { 3 } else { 4 };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
