use nalgebra::Vector3;

/// Per-particle force, potential energy, and virial produced by one force computation.
///
/// Buffers are owned by the computing potential and zeroed at the start of every computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForceAccumulators {
    forces: Vec<Vector3<f64>>,
    energies: Vec<f64>,
    virials: Vec<f64>,
}

impl ForceAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zeroed(n: usize) -> Self {
        Self {
            forces: vec![Vector3::zeros(); n],
            energies: vec![0.0; n],
            virials: vec![0.0; n],
        }
    }

    /// Resizes to `n` particles and zeroes every entry.
    pub fn reset(&mut self, n: usize) {
        self.forces.clear();
        self.forces.resize(n, Vector3::zeros());
        self.energies.clear();
        self.energies.resize(n, 0.0);
        self.virials.clear();
        self.virials.resize(n, 0.0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    #[inline]
    pub(crate) fn add(&mut self, i: usize, force: Vector3<f64>, energy: f64, virial: f64) {
        self.forces[i] += force;
        self.energies[i] += energy;
        self.virials[i] += virial;
    }

    /// Adds another buffer of the same length entry by entry.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.forces.iter_mut().zip(&other.forces) {
            *a += b;
        }
        for (a, b) in self.energies.iter_mut().zip(&other.energies) {
            *a += b;
        }
        for (a, b) in self.virials.iter_mut().zip(&other.virials) {
            *a += b;
        }
    }

    #[inline]
    pub fn force(&self, i: usize) -> &Vector3<f64> {
        &self.forces[i]
    }

    #[inline]
    pub fn energy(&self, i: usize) -> f64 {
        self.energies[i]
    }

    #[inline]
    pub fn virial(&self, i: usize) -> f64 {
        self.virials[i]
    }

    pub fn forces(&self) -> &[Vector3<f64>] {
        &self.forces
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn virials(&self) -> &[f64] {
        &self.virials
    }

    pub fn total_energy(&self) -> f64 {
        self.energies.iter().sum()
    }

    pub fn total_virial(&self) -> f64 {
        self.virials.iter().sum()
    }

    pub fn net_force(&self) -> Vector3<f64> {
        self.forces.iter().sum()
    }
}
