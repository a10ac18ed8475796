//! errors — unified error type for posterior post-processing.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`SvarError`], and result alias,
//! [`SvarResult`], shared by the regime filter/smoother, the structural
//! routines (shocks, impulse responses, sign normalization), and the batch
//! driver.
//!
//! Key behaviors
//! -------------
//! - Report shape problems (`DimensionMismatch`, `EmptyCollection`) before any
//!   recursion starts.
//! - Report numeric degeneracies that are local to a single draw
//!   (`DegenerateLikelihood`, `SingularImpact`, `ZeroOwnResponse`,
//!   `InvalidRegimeIndex`); [`SvarError::is_draw_level`] lets the batch driver
//!   record these per slot and keep going.
//! - Report batch-fatal failures (`SingularReference`, invalid options,
//!   thread-pool construction) that must surface immediately.
//!
//! Conventions
//! -----------
//! - Indices are 0-based (draw `s`, regime `m`, time `t`).
//! - `what` fields name the offending input in plain words (e.g. `"X columns"`).
//! - Foreign errors are funneled through `From<anyhow::Error>` into
//!   [`SvarError::Anyhow`].

/// Result alias for every fallible routine in the crate.
pub type SvarResult<T> = Result<T, SvarError>;

/// Unified error type for posterior post-processing.
///
/// Variants are grouped by the stage that raises them. Only the variants
/// listed in [`SvarError::is_draw_level`] are recoverable at draw
/// granularity; all others abort the batch call.
#[derive(Debug, Clone, PartialEq)]
pub enum SvarError {
    // ---- Input shapes ----
    /// Two inputs disagree on a dimension.
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },

    /// A collection that must be non-empty is empty (no draws, no regimes, T = 0).
    EmptyCollection { what: &'static str },

    /// A probability vector/matrix entry is negative, non-finite, or its rows
    /// do not sum to one.
    InvalidProbability { what: &'static str, index: usize, value: f64 },

    /// A residual scale entry is non-finite or not strictly positive.
    InvalidScale { index: usize, value: f64 },

    // ---- Options ----
    /// Lag order must be at least one and fit inside the coefficient matrix.
    InvalidLagOrder { p: usize, k: usize, n: usize },

    /// Sign search requested for a dimension above the configured cap.
    SignSearchTooLarge { n: usize, max: usize },

    /// Worker pool could not be built.
    ThreadPool { reason: String },

    // ---- Per-draw numerics ----
    /// All regime weights vanished at time `t` during filtering.
    DegenerateLikelihood { t: usize },

    /// Most-probable-regime selection produced an index outside `[0, M)`.
    InvalidRegimeIndex { t: usize, index: usize, regimes: usize },

    /// A draw's impact matrix is not invertible.
    SingularImpact,

    /// Standardisation requested but a horizon-0 own response is zero.
    ZeroOwnResponse { shock: usize, value: f64 },

    // ---- Batch-fatal numerics ----
    /// Shared reference matrix is not invertible.
    SingularReference,

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

impl SvarError {
    /// Whether this failure is confined to one draw.
    ///
    /// Draw-level failures are stored in the draw's result slot while the
    /// remaining draws continue; every other variant aborts the batch.
    pub fn is_draw_level(&self) -> bool {
        matches!(
            self,
            SvarError::DegenerateLikelihood { .. }
                | SvarError::InvalidRegimeIndex { .. }
                | SvarError::SingularImpact
                | SvarError::ZeroOwnResponse { .. }
        )
    }
}

impl std::error::Error for SvarError {}

impl From<anyhow::Error> for SvarError {
    fn from(err: anyhow::Error) -> Self {
        SvarError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for SvarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input shapes ----
            SvarError::DimensionMismatch { what, expected, actual } => {
                write!(f, "Dimension mismatch in {what}: expected {expected}, got {actual}.")
            }
            SvarError::EmptyCollection { what } => {
                write!(f, "Collection {what} must not be empty.")
            }
            SvarError::InvalidProbability { what, index, value } => {
                write!(f, "Invalid probability in {what} at index {index}: {value}")
            }
            SvarError::InvalidScale { index, value } => {
                write!(
                    f,
                    "Residual scale must be finite and strictly positive; got {value} at index {index}."
                )
            }

            // ---- Options ----
            SvarError::InvalidLagOrder { p, k, n } => {
                write!(
                    f,
                    "Lag order {p} is invalid for {n} variables and {k} regressors (need 1 <= p and N*p <= K)."
                )
            }
            SvarError::SignSearchTooLarge { n, max } => {
                write!(
                    f,
                    "Sign search over 2^{n} candidates exceeds the configured maximum dimension {max}."
                )
            }
            SvarError::ThreadPool { reason } => {
                write!(f, "Failed to build worker pool: {reason}")
            }

            // ---- Per-draw numerics ----
            SvarError::DegenerateLikelihood { t } => {
                write!(f, "All regime weights vanished at t = {t}; filtering is degenerate.")
            }
            SvarError::InvalidRegimeIndex { t, index, regimes } => {
                write!(f, "Selected regime {index} at t = {t} is outside [0, {regimes}).")
            }
            SvarError::SingularImpact => {
                write!(f, "Impact matrix of the draw is singular.")
            }
            SvarError::ZeroOwnResponse { shock, value } => {
                write!(
                    f,
                    "Cannot standardise: horizon-0 own response of shock {shock} is {value}."
                )
            }

            // ---- Batch-fatal numerics ----
            SvarError::SingularReference => {
                write!(f, "Reference matrix for sign normalization is singular.")
            }

            // ---- Anyhow catchall ----
            SvarError::Anyhow(msg) => write!(f, "Svar Error: {msg}"),

            // ---- Fallback ----
            SvarError::UnknownError => write!(f, "Svar Error: Unknown error occurred"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Classification of draw-level vs batch-fatal variants.
    // - `Display` payload embedding and the `anyhow` conversion.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the driver's recoverability split matches the documented policy.
    //
    // Given
    // -----
    // - One representative of each draw-level and batch-fatal group.
    //
    // Expect
    // ------
    // - Numeric degeneracies local to a draw are draw-level.
    // - Shape and reference failures are not.
    fn is_draw_level_splits_recoverable_from_fatal() {
        assert!(SvarError::DegenerateLikelihood { t: 3 }.is_draw_level());
        assert!(SvarError::SingularImpact.is_draw_level());
        assert!(SvarError::ZeroOwnResponse { shock: 0, value: 0.0 }.is_draw_level());
        assert!(SvarError::InvalidRegimeIndex { t: 0, index: 2, regimes: 2 }.is_draw_level());

        assert!(!SvarError::SingularReference.is_draw_level());
        assert!(
            !SvarError::DimensionMismatch { what: "X columns", expected: 3, actual: 2 }
                .is_draw_level()
        );
        assert!(!SvarError::ThreadPool { reason: "x".into() }.is_draw_level());
    }

    #[test]
    // Purpose
    // -------
    // Verify that `Display` embeds variant payloads.
    //
    // Given
    // -----
    // - `DimensionMismatch` and `DegenerateLikelihood` values.
    //
    // Expect
    // ------
    // - Messages contain the offending names and numbers.
    fn display_embeds_payload() {
        let msg = SvarError::DimensionMismatch { what: "X columns", expected: 5, actual: 4 }
            .to_string();
        assert!(msg.contains("X columns"));
        assert!(msg.contains('5'));
        assert!(msg.contains('4'));

        let msg = SvarError::DegenerateLikelihood { t: 17 }.to_string();
        assert!(msg.contains("17"));
    }

    #[test]
    // Purpose
    // -------
    // Check that foreign errors are carried as `Anyhow` with their message.
    //
    // Given
    // -----
    // - An `anyhow::Error` built from a string.
    //
    // Expect
    // ------
    // - Conversion yields `SvarError::Anyhow` holding that message.
    fn from_anyhow_preserves_message() {
        let err: SvarError = anyhow::anyhow!("backend failed").into();
        assert_eq!(err, SvarError::Anyhow("backend failed".to_string()));
    }
}
