//! Batch driver — run one task per draw, sequentially or on a rayon pool.
//!
//! Purpose
//! -------
//! Map a per-draw task over a slice of inputs and gather the results into a
//! draw-indexed [`BatchOutput`]. Tasks only borrow shared inputs, so the
//! parallel loop needs no locks; each worker writes its own slot.
//!
//! Key behaviors
//! -------------
//! - `Execution::Sequential` iterates on the calling thread.
//! - `Execution::Parallel { threads: None }` uses rayon's global pool;
//!   `Some(n)` builds a dedicated pool with `n` workers for the call.
//! - Draw-level failures are logged and stored in their slot; the first
//!   batch-fatal failure (in draw order) is returned instead of an output.
use crate::{
    batch::{options::Execution, output::BatchOutput},
    errors::{SvarError, SvarResult},
};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Executes per-draw tasks under an [`Execution`] strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchDriver {
    execution: Execution,
}

impl BatchDriver {
    pub fn new(execution: Execution) -> BatchDriver {
        BatchDriver { execution }
    }

    /// Run `task(s, &items[s])` for every draw `s`.
    ///
    /// Parameters
    /// ----------
    /// - `items`: `&[I]`
    ///   Per-draw inputs, shared read-only across workers.
    /// - `task`: `Fn(usize, &I) -> SvarResult<T>`
    ///   Pure per-draw computation.
    ///
    /// Returns
    /// -------
    /// `SvarResult<BatchOutput<T>>`
    ///   One slot per item, in input order.
    ///
    /// Errors
    /// ------
    /// - `SvarError::ThreadPool` if a dedicated pool cannot be built.
    /// - The first batch-fatal error returned by any task.
    pub fn run<I, T, F>(&self, items: &[I], task: F) -> SvarResult<BatchOutput<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(usize, &I) -> SvarResult<T> + Sync,
    {
        let slots: Vec<SvarResult<T>> = match self.execution {
            Execution::Sequential => {
                items.iter().enumerate().map(|(s, item)| task(s, item)).collect()
            }
            Execution::Parallel { threads: None } => {
                items.par_iter().enumerate().map(|(s, item)| task(s, item)).collect()
            }
            Execution::Parallel { threads: Some(threads) } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SvarError::ThreadPool { reason: e.to_string() })?;
                pool.install(|| {
                    items.par_iter().enumerate().map(|(s, item)| task(s, item)).collect()
                })
            }
        };

        let fatal = slots
            .iter()
            .find_map(|slot| slot.as_ref().err().filter(|e| !e.is_draw_level()));
        if let Some(fatal) = fatal {
            return Err(fatal.clone());
        }

        let output = BatchOutput::from_slots(slots);
        for (s, err) in output.failures() {
            warn!(draw = s, error = %err, "draw failed");
        }
        debug!(draws = output.len(), succeeded = output.succeeded(), "batch finished");
        Ok(output)
    }
}
