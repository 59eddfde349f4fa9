//! # pairforce
//!
//! Pairwise force, potential energy, and virial evaluation for particle simulations in periodic
//! boxes.
//!
//! - **[`core`]** holds stateless data: particle and box snapshots, the potential laws, the
//!   symmetric type-pair parameter table, and the cutoff shifting modes.
//! - **[`engine`]** holds the stateful computation: the pair accumulation loop, neighbor lists,
//!   per-particle result buffers, and external fields.
//!
//! A minimal computation builds a [`engine::pair::PotentialPair`] for one potential law, fills its
//! table, and calls [`engine::pair::PotentialPair::compute`] once per timestep.

pub mod core;
pub mod engine;
