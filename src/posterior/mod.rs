//! posterior — draw, panel, and dimension containers.
//!
//! Purpose
//! -------
//! Define the inputs consumed from the upstream sampler: the posterior draw
//! collection ([`PosteriorDraw`], [`MarkovChain`], [`ResidualScale`]) and the
//! observation panel ([`ObservationPanel`]), plus the batch-entry shape
//! validation ([`Dims`]) that every batch operation runs before computing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Draws are produced and validated for content by the sampler; this module
//!   only checks shapes (and probability/scale sanity where a constructor is
//!   involved).
//! - All containers are plain owned `ndarray` values, borrowed read-only by
//!   the numeric routines.

pub mod dims;
pub mod draws;
pub mod panel;

pub use self::dims::Dims;
pub use self::draws::{MarkovChain, PosteriorDraw, ResidualScale};
pub use self::panel::ObservationPanel;
