#![allow(dead_code)]

use nalgebra::Vector3;
use pairforce::core::forcefield::potentials::{LennardJones, LennardJonesParams};
use pairforce::core::models::particle::ParticleData;
use pairforce::core::models::simulation_box::SimulationBox;
use pairforce::engine::neighbor::{NeighborList, StorageMode};
use pairforce::engine::pair::PotentialPair;

pub const BOX_LENGTH: f64 = 8.0;
pub const CELLS_PER_AXIS: usize = 5;
pub const R_CUT: f64 = 2.5;

/// `(type1, type2, epsilon, sigma)` for the two-type test mixture.
pub const LJ_MIXTURE: [(usize, usize, f64, f64); 3] = [
    (0, 0, 1.0, 1.0),
    (0, 1, 0.8, 1.1),
    (1, 1, 0.5, 0.9),
];

/// A jittered simple cubic lattice of two alternating types filling a cubic box.
///
/// The jitter is deterministic so every test sees the same configuration.
pub fn jittered_lattice() -> ParticleData {
    let sim_box = SimulationBox::cubic(BOX_LENGTH).unwrap();
    let spacing = BOX_LENGTH / CELLS_PER_AXIS as f64;
    let mut positions = Vec::new();
    let mut types = Vec::new();

    for ix in 0..CELLS_PER_AXIS {
        for iy in 0..CELLS_PER_AXIS {
            for iz in 0..CELLS_PER_AXIS {
                let n = positions.len() as f64;
                let jitter = Vector3::new(
                    0.15 * (1.3 * n).sin(),
                    0.15 * (2.1 * n + 0.4).sin(),
                    0.15 * (0.7 * n + 1.1).cos(),
                );
                let cell = Vector3::new(ix as f64, iy as f64, iz as f64);
                positions.push(sim_box.lo() + (cell.add_scalar(0.5)) * spacing + jitter);
                types.push((ix + iy + iz) % 2);
            }
        }
    }

    ParticleData::new(
        sim_box,
        vec!["A".to_string(), "B".to_string()],
        positions,
        types,
    )
    .unwrap()
}

pub fn lj_mixture(storage_mode: StorageMode) -> PotentialPair<LennardJones, NeighborList> {
    let mut pair = PotentialPair::new(2, NeighborList::new(R_CUT, 0.3, storage_mode));
    for (type1, type2, epsilon, sigma) in LJ_MIXTURE {
        pair.set_params(type1, type2, LennardJonesParams::new(epsilon, sigma))
            .unwrap();
        pair.set_rcut(type1, type2, R_CUT).unwrap();
    }
    pair
}

/// Unshifted Lennard-Jones `(energy, force_divr)` for the mixture pair `(type1, type2)`.
pub fn lj_reference(type1: usize, type2: usize, rsq: f64) -> (f64, f64) {
    let (_, _, epsilon, sigma) = LJ_MIXTURE
        .iter()
        .copied()
        .find(|&(a, b, _, _)| (a, b) == (type1.min(type2), type1.max(type2)))
        .unwrap();
    let sr6 = (sigma * sigma / rsq).powi(3);
    let energy = 4.0 * epsilon * (sr6 * sr6 - sr6);
    let force_divr = 24.0 * epsilon * (2.0 * sr6 * sr6 - sr6) / rsq;
    (energy, force_divr)
}

/// Squared minimum-image distance of every unordered pair inside `r_cut`.
pub fn pairs_within(particles: &ParticleData, r_cut: f64) -> Vec<(usize, usize, f64)> {
    let sim_box = particles.sim_box();
    let mut pairs = Vec::new();
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dr = sim_box.minimum_image(particles.position(i) - particles.position(j));
            let rsq = dr.norm_squared();
            if rsq < r_cut * r_cut {
                pairs.push((i, j, rsq));
            }
        }
    }
    pairs
}
