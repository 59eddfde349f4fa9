//! # Engine Module
//!
//! Stateful force computation built on the [`crate::core`] models and potential laws.
//!
//! - [`pair`] drives a [`crate::core::forcefield::evaluator::PairEvaluator`] over a neighbor
//!   list and owns the per-type-pair parameter table.
//! - [`neighbor`] provides the [`neighbor::NeighborSource`] abstraction and a brute-force list.
//! - [`accumulator`] holds the per-particle force, energy, and virial output.
//! - [`external`] evaluates single-particle external fields.
//! - [`error`] collects the failures the engine reports.

pub mod accumulator;
pub mod error;
pub mod external;
pub mod neighbor;
pub mod pair;
