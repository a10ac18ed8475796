//! Batch options — execution strategy and degeneracy handling.
//!
//! Purpose
//! -------
//! Collect the knobs shared by every batch operation: how the draw loop is
//! executed ([`Execution`]) and how the regime filter treats periods whose
//! weights all vanish ([`DegeneracyPolicy`]).
//!
//! Conventions
//! -----------
//! - `Execution::Parallel { threads: None }` runs on rayon's global pool;
//!   `Some(n)` builds a dedicated pool with `n` workers per call.
//! - Operation-specific settings live with their component (`IrfOptions`,
//!   `SignOptions`).
use crate::regimes::filter::DegeneracyPolicy;

/// How the draw loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Draws processed in order on the calling thread.
    Sequential,
    /// Draws processed by a rayon pool; `threads: None` uses the global pool.
    Parallel { threads: Option<usize> },
}

impl Default for Execution {
    fn default() -> Self {
        Execution::Parallel { threads: None }
    }
}

/// BatchOptions — configuration shared by every batch operation.
///
/// Fields
/// ------
/// - `execution`: [`Execution`]
///   Sequential loop or rayon pool.
/// - `degeneracy`: [`DegeneracyPolicy`]
///   Filter behavior when all regime weights vanish (probability paths only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    pub execution: Execution,
    pub degeneracy: DegeneracyPolicy,
}

impl BatchOptions {
    pub fn new(execution: Execution, degeneracy: DegeneracyPolicy) -> BatchOptions {
        BatchOptions { execution, degeneracy }
    }

    /// Sequential execution with the default degeneracy policy.
    pub fn sequential() -> BatchOptions {
        BatchOptions { execution: Execution::Sequential, ..BatchOptions::default() }
    }
}
