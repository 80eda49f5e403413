//! Discrete-demand newsvendor objectives under ambiguity.
//!
//! This crate computes the two robust objectives of the newsvendor model with
//! a first-moment-constrained ambiguity set, following Cinfrignini, Petturiti
//! and Stabile, *Newsvendor problem with discrete demand and constrained
//! first moment under ambiguity* (2024):
//!
//! - the **lower expected profit** (maximin criterion), built from the
//!   reference distribution and the Möbius inverse of the lower-envelope
//!   capacity ν*;
//! - the **upper expected loss** (minimax criterion), built from the Choquet
//!   integral of a piecewise-linear loss against the complementary capacity
//!   ν**, integrated exactly over a finite domain decomposition.
//!
//! Both objectives mix the reference expectation with the capacity term via
//! epsilon-contamination. Everything here is a pure function of its inputs:
//! no I/O, no shared state, deterministic results.

pub mod decomposition;
pub mod error;
pub mod loss;
pub mod mobius;
pub mod model;
pub mod optimize;
pub mod profit;

pub use decomposition::{CostRates, Decomposition, Interval, DEFAULT_TAIL_WIDTH};
pub use error::{Error, Result};
pub use loss::{choquet_loss, expected_loss, upper_loss};
pub use mobius::{lower_mass, upper_mass, FocalSet, MassFunction};
pub use model::DemandModel;
pub use optimize::{minimize, Minimizer};
pub use profit::{lower_profit, lower_profit_curve, ProfitParams};
