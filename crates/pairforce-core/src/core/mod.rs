//! # Core Module
//!
//! Stateless data and mathematics shared by the force computations: the particle and box
//! snapshots in [`models`], and the pair potential laws, parameter tables, and cutoff treatment
//! in [`forcefield`].

pub mod forcefield;
pub mod models;
