//! Energies of particles interacting with external fields.
//!
//! A simulation split over several domains holds only its local particles, so the total energy
//! of a field is the sum over every domain. That final sum is delegated to an
//! [`EnergyReduction`] supplied by the caller; single-domain runs use [`LocalReduction`].

use super::error::EngineError;
use crate::core::models::particle::ParticleData;
use crate::core::models::simulation_box::SimulationBox;
use nalgebra::{Unit, Vector3};
use tracing::{debug, instrument};

/// Combines a locally computed scalar with the values of all cooperating domains.
pub trait EnergyReduction {
    fn reduce(&self, local: f64) -> f64;
}

/// Reduction for a simulation that lives in a single domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReduction;

impl EnergyReduction for LocalReduction {
    #[inline]
    fn reduce(&self, local: f64) -> f64 {
        local
    }
}

impl<F: Fn(f64) -> f64> EnergyReduction for F {
    #[inline]
    fn reduce(&self, local: f64) -> f64 {
        self(local)
    }
}

pub trait ExternalPotential {
    /// Energy of one particle in the field.
    ///
    /// `trial` is set when evaluating a proposed configuration rather than the current one.
    /// Potentials that can return infinity should return zero for the current configuration.
    /// `type_id` must be below [`n_types`](Self::n_types).
    fn particle_energy(
        &self,
        sim_box: &SimulationBox,
        type_id: usize,
        position: &Vector3<f64>,
        charge: f64,
        trial: bool,
    ) -> f64;

    /// Number of particle types the field has parameters for.
    fn n_types(&self) -> usize;

    /// Total field energy over all domains.
    ///
    /// Fails with [`EngineError::TypeCountMismatch`] if the particles use more types than the
    /// field knows about.
    #[instrument(skip_all, name = "external_total_energy", fields(n = particles.len()))]
    fn total_energy(
        &self,
        particles: &ParticleData,
        reduction: &dyn EnergyReduction,
        trial: bool,
    ) -> Result<f64, EngineError> {
        if particles.n_types() > self.n_types() {
            return Err(EngineError::TypeCountMismatch {
                particles: particles.n_types(),
                potential: self.n_types(),
            });
        }
        let sim_box = particles.sim_box();
        let local: f64 = (0..particles.len())
            .map(|i| {
                self.particle_energy(
                    sim_box,
                    particles.type_of(i),
                    particles.position(i),
                    particles.charge(i),
                    trial,
                )
            })
            .sum();
        let total = reduction.reduce(local);
        debug!(local, total, "External field energy reduced.");
        Ok(total)
    }
}

/// A uniform field along a plane normal: `E_i = α[type_i] · n̂·(r_i - r_0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearField {
    plane_origin: Vector3<f64>,
    plane_normal: Unit<Vector3<f64>>,
    alpha: Vec<f64>,
}

impl LinearField {
    /// A field with all per-type strengths set to zero.
    pub fn new(
        n_types: usize,
        plane_origin: Vector3<f64>,
        plane_normal: Vector3<f64>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            plane_origin,
            plane_normal: normalize(plane_normal)?,
            alpha: vec![0.0; n_types],
        })
    }

    pub fn plane_origin(&self) -> &Vector3<f64> {
        &self.plane_origin
    }

    pub fn set_plane_origin(&mut self, origin: Vector3<f64>) {
        self.plane_origin = origin;
    }

    pub fn plane_normal(&self) -> &Vector3<f64> {
        self.plane_normal.as_ref()
    }

    /// Sets the normal; it is stored normalized.
    pub fn set_plane_normal(&mut self, normal: Vector3<f64>) -> Result<(), EngineError> {
        self.plane_normal = normalize(normal)?;
        Ok(())
    }

    pub fn alpha(&self, type_id: usize) -> Result<f64, EngineError> {
        self.alpha
            .get(type_id)
            .copied()
            .ok_or(EngineError::UnknownType {
                type_id,
                n_types: self.alpha.len(),
            })
    }

    pub fn set_alpha(&mut self, type_id: usize, alpha: f64) -> Result<(), EngineError> {
        let n_types = self.alpha.len();
        let slot = self
            .alpha
            .get_mut(type_id)
            .ok_or(EngineError::UnknownType { type_id, n_types })?;
        *slot = alpha;
        Ok(())
    }
}

fn normalize(normal: Vector3<f64>) -> Result<Unit<Vector3<f64>>, EngineError> {
    Unit::try_new(normal, f64::EPSILON).ok_or(EngineError::InvalidPlaneNormal {
        x: normal.x,
        y: normal.y,
        z: normal.z,
    })
}

impl ExternalPotential for LinearField {
    fn n_types(&self) -> usize {
        self.alpha.len()
    }

    #[inline]
    fn particle_energy(
        &self,
        _sim_box: &SimulationBox,
        type_id: usize,
        position: &Vector3<f64>,
        _charge: f64,
        _trial: bool,
    ) -> f64 {
        self.alpha[type_id] * self.plane_normal.dot(&(position - self.plane_origin))
    }
}
