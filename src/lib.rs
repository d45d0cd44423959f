//! Evolutionary solver for the circular Traveling Salesman Problem.
//!
//! Given a table of city coordinates, the solver searches for a short
//! closed tour visiting every city exactly once. It does not guarantee
//! optimality.
//!
//! - **Representation**: closed tours of `n + 1` city indices over a
//!   precomputed integer distance matrix.
//! - **Operators**: tournament selection, four permutation crossovers
//!   (OX, PMX, CX, PBX) and six mutations.
//! - **Loop**: elitism plus generational replacement, with a per-generation
//!   best-tour history.
//!
//! # Architecture
//!
//! The engine performs no I/O. Dataset loading, plotting and parameter
//! sweeps live with the caller, which talks to the engine only through
//! [`ga::EvolutionEngine::run`]. All randomness flows through an explicit
//! random source, so a run is reproducible from its seed.
//!
//! Progress is reported through the `log` facade; install any logger to
//! see it.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{TspError, TspResult};
