//! Read-only particle and box data consumed by the force computations.

pub mod particle;
pub mod simulation_box;
