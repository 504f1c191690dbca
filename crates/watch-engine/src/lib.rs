//! # watch-engine
//!
//! The credit-metered check cycle: a periodic sweep that selects every
//! eligible domain, batches oracle queries, and settles each result
//! atomically (status write, credit deduction, history row).
//!
//! The engine runs in the API process on a fixed timer and shares the
//! persistent store with the interactive endpoints; it holds no
//! request-scoped state and re-reads everything it needs on each run.

mod engine;

pub use engine::{CheckEngine, EngineConfig, SweepSummary};
