//! # Force Field Module
//!
//! Stateless building blocks of pair potentials: the evaluator contract every potential law
//! implements, the bundled laws, the symmetric per type-pair parameter table, the energy shifting
//! policy applied at the cutoff, and the TOML parameter file format.
//!
//! ## Key Components
//!
//! - [`evaluator`] - The [`evaluator::PairEvaluator`] trait and its result type
//! - [`potentials`] - Lennard-Jones (and WCA), Gauss, diameter-shifted LJ, Yukawa, and screened
//!   Coulomb laws
//! - [`table`] - Packed upper-triangular storage keyed by unordered type pairs
//! - [`shift`] - No shift, hard shift, and XPLOR smoothing
//! - [`params`] - Loading pair parameters from TOML

pub mod evaluator;
pub mod params;
pub mod potentials;
pub mod shift;
pub mod table;
