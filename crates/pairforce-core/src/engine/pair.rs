use super::accumulator::ForceAccumulators;
use super::error::EngineError;
use super::neighbor::{NeighborSource, StorageMode};
use crate::core::forcefield::evaluator::{PairEvaluator, PairInteraction};
use crate::core::forcefield::params::{PairParameterFile, is_valid_radius};
use crate::core::forcefield::shift::ShiftMode;
use crate::core::forcefield::table::{TypePairEntry, TypePairTable};
use crate::core::models::particle::ParticleData;
use nalgebra::Vector3;
use std::marker::PhantomData;
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const MIN_PARTICLES_PER_TASK: usize = 256;

/// Pair force computation for one potential law.
///
/// Holds the per type-pair cutoffs and parameters, the shift mode, and the neighbor list, and
/// fills a [`ForceAccumulators`] buffer with the force, energy, and virial of every particle.
/// The evaluator `E` is a type parameter so the pair loop is compiled separately for each law.
///
/// When the neighbor list stores each pair once ([`StorageMode::Half`]), a single evaluation
/// credits both particles.
pub struct PotentialPair<E: PairEvaluator, N: NeighborSource> {
    nlist: N,
    shift_mode: ShiftMode,
    table: TypePairTable<TypePairEntry<E::Params>>,
    accumulators: ForceAccumulators,
    last_computed: Option<u64>,
    log_name: String,
    _evaluator: PhantomData<fn() -> E>,
}

impl<E: PairEvaluator, N: NeighborSource> PotentialPair<E, N> {
    pub fn new(n_types: usize, nlist: N) -> Self {
        Self {
            nlist,
            shift_mode: ShiftMode::None,
            table: TypePairTable::new(n_types),
            accumulators: ForceAccumulators::new(),
            last_computed: None,
            log_name: format!("pair_{}_energy", E::NAME),
            _evaluator: PhantomData,
        }
    }

    /// Name of the potential law, e.g. `"lj"`.
    pub fn name(&self) -> &'static str {
        E::NAME
    }

    pub fn n_types(&self) -> usize {
        self.table.n_types()
    }

    pub fn table(&self) -> &TypePairTable<TypePairEntry<E::Params>> {
        &self.table
    }

    pub fn neighbor_list(&self) -> &N {
        &self.nlist
    }

    pub fn neighbor_list_mut(&mut self) -> &mut N {
        self.last_computed = None;
        &mut self.nlist
    }

    pub fn shift_mode(&self) -> ShiftMode {
        self.shift_mode
    }

    /// Results of the most recent computation.
    pub fn accumulators(&self) -> &ForceAccumulators {
        &self.accumulators
    }

    pub fn last_computed_timestep(&self) -> Option<u64> {
        self.last_computed
    }

    /// Forgets the cached timestep so the next [`compute`](Self::compute) runs again.
    pub fn invalidate(&mut self) {
        self.last_computed = None;
    }

    /// Sets the parameters for `(type1, type2)` and `(type2, type1)`.
    pub fn set_params(
        &mut self,
        type1: usize,
        type2: usize,
        params: E::Params,
    ) -> Result<(), EngineError> {
        self.table.get_mut(type1, type2)?.params = params;
        debug!(type1, type2, potential = E::NAME, "Pair parameters set.");
        self.invalidate();
        Ok(())
    }

    /// Sets the cutoff radius of `(type1, type2)`; it is stored squared.
    pub fn set_rcut(&mut self, type1: usize, type2: usize, rcut: f64) -> Result<(), EngineError> {
        check_radius("r_cut", rcut, type1, type2)?;
        self.table.get_mut(type1, type2)?.rcutsq = rcut * rcut;
        if rcut == 0.0 {
            warn!(type1, type2, "Zero cutoff disables this type pair.");
        }
        debug!(type1, type2, rcut, "Pair cutoff set.");
        self.invalidate();
        Ok(())
    }

    pub fn set_ron(&mut self, type1: usize, type2: usize, ron: f64) -> Result<(), EngineError> {
        check_radius("r_on", ron, type1, type2)?;
        let entry = self.table.get_mut(type1, type2)?;
        entry.ronsq = ron * ron;
        if entry.ronsq == entry.rcutsq {
            warn!(
                type1,
                type2,
                ron,
                "XPLOR onset equals the cutoff; no smoothing will be applied."
            );
        }
        debug!(type1, type2, ron, "XPLOR onset set.");
        self.invalidate();
        Ok(())
    }

    pub fn set_shift_mode(&mut self, mode: ShiftMode) {
        debug!(%mode, potential = E::NAME, "Shift mode set.");
        self.shift_mode = mode;
        self.invalidate();
    }

    /// Installs every entry of a parameter file and its shift mode.
    ///
    /// All type names are resolved before the table is touched, so a failing file leaves the
    /// potential unchanged.
    pub fn apply_parameter_file(
        &mut self,
        file: &PairParameterFile<E::Params>,
        type_names: &[String],
    ) -> Result<(), EngineError> {
        if type_names.len() != self.n_types() {
            return Err(EngineError::TypeCountMismatch {
                particles: type_names.len(),
                potential: self.n_types(),
            });
        }
        let resolved = file.resolve(type_names)?;
        for pair in resolved {
            self.set_params(pair.type1, pair.type2, pair.params)?;
            self.set_rcut(pair.type1, pair.type2, pair.r_cut)?;
            if let Some(r_on) = pair.r_on {
                self.set_ron(pair.type1, pair.type2, r_on)?;
            }
        }
        self.set_shift_mode(file.shift_mode);
        Ok(())
    }

    /// Largest cutoff over all type pairs.
    pub fn max_rcut(&self) -> f64 {
        self.table
            .values()
            .map(|entry| entry.rcutsq)
            .fold(0.0, f64::max)
            .sqrt()
    }

    pub fn provided_log_quantities(&self) -> Vec<String> {
        vec![self.log_name.clone()]
    }

    /// Computes (if needed) and returns the named quantity for `timestep`.
    pub fn log_value(
        &mut self,
        quantity: &str,
        timestep: u64,
        particles: &ParticleData,
    ) -> Result<f64, EngineError> {
        if quantity != self.log_name {
            return Err(EngineError::InvalidLogQuantity {
                quantity: quantity.to_string(),
                provided: self.provided_log_quantities(),
            });
        }
        self.compute(timestep, particles)?;
        Ok(self.accumulators.total_energy())
    }

    /// Computes forces for `timestep` unless they are already up to date.
    pub fn compute(&mut self, timestep: u64, particles: &ParticleData) -> Result<(), EngineError> {
        if self.last_computed == Some(timestep) {
            trace!(timestep, "Pair forces already computed for this timestep.");
            return Ok(());
        }
        self.compute_forces(timestep, particles)?;
        self.last_computed = Some(timestep);
        Ok(())
    }

    /// Recomputes forces, energies, and virials of every particle.
    ///
    /// On error the results of the previous computation are left in place.
    #[instrument(skip_all, name = "pair_compute_forces", fields(potential = E::NAME, timestep = timestep))]
    pub fn compute_forces(
        &mut self,
        timestep: u64,
        particles: &ParticleData,
    ) -> Result<(), EngineError> {
        self.check_system(particles)?;

        self.nlist.compute(timestep, particles);
        if self.nlist.len() != particles.len() {
            return Err(EngineError::ParticleCountMismatch {
                particles: particles.len(),
                neighbor_list: self.nlist.len(),
            });
        }

        let kernel = PairKernel {
            particles,
            table: &self.table,
            shift_mode: self.shift_mode,
            third_law: self.nlist.storage_mode() == StorageMode::Half,
        };

        self.accumulators.reset(particles.len());

        #[cfg(feature = "parallel")]
        {
            if particles.len() >= 2 * MIN_PARTICLES_PER_TASK {
                kernel.accumulate_parallel::<E, _>(&self.nlist, &mut self.accumulators);
            } else {
                kernel.accumulate_serial::<E, _>(&self.nlist, &mut self.accumulators);
            }
        }

        #[cfg(not(feature = "parallel"))]
        kernel.accumulate_serial::<E, _>(&self.nlist, &mut self.accumulators);

        debug!(
            energy = self.accumulators.total_energy(),
            virial = self.accumulators.total_virial(),
            "Pair forces computed."
        );
        Ok(())
    }

    fn check_system(&self, particles: &ParticleData) -> Result<(), EngineError> {
        if particles.n_types() > self.n_types() {
            return Err(EngineError::TypeCountMismatch {
                particles: particles.n_types(),
                potential: self.n_types(),
            });
        }

        let r_cut = self.max_rcut();
        let (axis, half_length) = particles.sim_box().min_half_length();
        if half_length < r_cut {
            return Err(EngineError::BoxTooSmall {
                axis,
                half_length,
                r_cut,
            });
        }
        Ok(())
    }
}

fn check_radius(
    field: &'static str,
    value: f64,
    type1: usize,
    type2: usize,
) -> Result<(), EngineError> {
    if is_valid_radius(value) {
        Ok(())
    } else {
        Err(EngineError::InvalidRadius {
            field,
            value,
            type1,
            type2,
        })
    }
}

/// Read-only inputs of the pair loop, shared by every particle.
struct PairKernel<'a, P> {
    particles: &'a ParticleData,
    table: &'a TypePairTable<TypePairEntry<P>>,
    shift_mode: ShiftMode,
    third_law: bool,
}

impl<P: Sync> PairKernel<'_, P> {
    fn accumulate_serial<E, N>(&self, nlist: &N, out: &mut ForceAccumulators)
    where
        E: PairEvaluator<Params = P>,
        N: NeighborSource,
    {
        for i in 0..self.particles.len() {
            self.accumulate::<E>(i, nlist.neighbors(i), out);
        }
    }

    /// Splits the particle loop over rayon workers.
    ///
    /// Each worker folds into a private full-length buffer, since the third law writes to
    /// arbitrary `j`. The partial buffers are summed into `out`, which must already be zeroed.
    #[cfg(feature = "parallel")]
    fn accumulate_parallel<E, N>(&self, nlist: &N, out: &mut ForceAccumulators)
    where
        E: PairEvaluator<Params = P>,
        N: NeighborSource,
    {
        let n = self.particles.len();
        let partial = (0..n)
            .into_par_iter()
            .with_min_len(MIN_PARTICLES_PER_TASK)
            .fold(
                || ForceAccumulators::zeroed(n),
                |mut acc, i| {
                    self.accumulate::<E>(i, nlist.neighbors(i), &mut acc);
                    acc
                },
            )
            .reduce_with(|mut a, b| {
                a.merge(&b);
                a
            });
        if let Some(partial) = partial {
            out.merge(&partial);
        }
    }

    /// Adds the interactions of particle `i` with its listed neighbors to `out`.
    #[inline]
    fn accumulate<E: PairEvaluator<Params = P>>(
        &self,
        i: usize,
        neighbors: &[usize],
        out: &mut ForceAccumulators,
    ) {
        let particles = self.particles;
        let sim_box = particles.sim_box();
        let ri = particles.position(i);
        let typei = particles.type_of(i);
        let di = if E::NEEDS_DIAMETER {
            particles.diameter(i)
        } else {
            0.0
        };
        let qi = if E::NEEDS_CHARGE {
            particles.charge(i)
        } else {
            0.0
        };

        let mut fi = Vector3::zeros();
        let mut pei = 0.0;
        let mut viriali = 0.0;

        for &j in neighbors {
            let dx = sim_box.minimum_image(ri - particles.position(j));
            let rsq = dx.norm_squared();

            let entry = self.table.get(typei, particles.type_of(j));
            if rsq >= entry.rcutsq {
                continue;
            }

            let mut eval = E::new(rsq, entry.rcutsq, &entry.params);
            if E::NEEDS_DIAMETER {
                eval.set_diameter(di, particles.diameter(j));
            }
            if E::NEEDS_CHARGE {
                eval.set_charge(qi, particles.charge(j));
            }

            let energy_shift = self.shift_mode.energy_shift(entry.rcutsq, entry.ronsq);
            let Some(raw) = eval.eval_force_and_energy(energy_shift) else {
                continue;
            };
            let PairInteraction { force_divr, energy } =
                self.shift_mode.apply(raw, rsq, entry.rcutsq, entry.ronsq);

            // Sign convention: positive for repulsive pairs.
            let pair_virial = (1.0 / 6.0) * rsq * force_divr;
            let force = dx * force_divr;

            fi += force;
            pei += 0.5 * energy;
            viriali += pair_virial;

            if self.third_law {
                out.add(j, -force, 0.5 * energy, pair_virial);
            }
        }

        out.add(i, fi, pei, viriali);
    }
}
