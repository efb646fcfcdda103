//! Strike effectiveness engine.
//!
//! Evaluates every scenario of a parameter sweep (intercept windows,
//! area kill, effectiveness coefficient) and reduces the results into
//! per-aircraft summaries.

pub mod area_kill;
pub mod compose;
pub mod density;
pub mod geometry;
pub mod inputs;
pub mod intercept;
pub mod newton;
pub mod reduce;
pub mod sweep;

pub use envelope_core as core;
pub use compose::compose;
pub use reduce::{reduce, Reducer, SweepSummary};
pub use sweep::{enumerate_scenarios, evaluate, run_sweep};
