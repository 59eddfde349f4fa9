use crate::core::models::particle::ParticleData;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Whether each interacting pair is stored once or from both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageMode {
    /// Each unordered pair `{i, j}` appears exactly once, in the list of one of the two particles.
    #[default]
    Half,
    /// Each pair appears twice, as `j` in the list of `i` and as `i` in the list of `j`.
    Full,
}

/// Source of candidate interaction partners for a force computation.
pub trait NeighborSource: Send + Sync {
    /// Brings the list up to date for `timestep`. Repeated calls for the same timestep are no-ops.
    fn compute(&mut self, timestep: u64, particles: &ParticleData);

    fn storage_mode(&self) -> StorageMode;

    /// Number of particles the list covers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn neighbors(&self, i: usize) -> &[usize];
}

/// Brute-force O(N²) neighbor list using the minimum-image convention.
///
/// Particles are neighbors when their separation is below `r_cut + r_buff`. The list is rebuilt
/// on every new timestep.
#[derive(Debug, Clone)]
pub struct NeighborList {
    r_cut: f64,
    r_buff: f64,
    storage_mode: StorageMode,
    lists: Vec<Vec<usize>>,
    last_timestep: Option<u64>,
}

impl NeighborList {
    pub fn new(r_cut: f64, r_buff: f64, storage_mode: StorageMode) -> Self {
        Self {
            r_cut,
            r_buff,
            storage_mode,
            lists: Vec::new(),
            last_timestep: None,
        }
    }

    pub fn set_storage_mode(&mut self, storage_mode: StorageMode) {
        self.storage_mode = storage_mode;
        self.last_timestep = None;
    }

    pub fn set_r_cut(&mut self, r_cut: f64, r_buff: f64) {
        self.r_cut = r_cut;
        self.r_buff = r_buff;
        self.last_timestep = None;
    }

    /// Drops the cached build so the next `compute` rebuilds even on the same timestep.
    pub fn force_update(&mut self) {
        self.last_timestep = None;
    }

    pub fn r_list(&self) -> f64 {
        self.r_cut + self.r_buff
    }

    pub fn num_pairs(&self) -> usize {
        let entries: usize = self.lists.iter().map(Vec::len).sum();
        match self.storage_mode {
            StorageMode::Half => entries,
            StorageMode::Full => entries / 2,
        }
    }

    #[instrument(skip_all, name = "neighbor_list_build", fields(n = particles.len()))]
    fn build(&mut self, particles: &ParticleData) {
        let n = particles.len();
        let r_list_sq = self.r_list().powi(2);
        let sim_box = particles.sim_box();

        self.lists.clear();
        self.lists.resize_with(n, Vec::new);

        for (i, j) in (0..n).tuple_combinations() {
            let dr = sim_box.minimum_image(particles.position(i) - particles.position(j));
            if dr.norm_squared() < r_list_sq {
                self.lists[i].push(j);
                if self.storage_mode == StorageMode::Full {
                    self.lists[j].push(i);
                }
            }
        }
        debug!(pairs = self.num_pairs(), "Neighbor list rebuilt.");
    }
}

impl NeighborSource for NeighborList {
    fn compute(&mut self, timestep: u64, particles: &ParticleData) {
        if self.last_timestep == Some(timestep) && self.lists.len() == particles.len() {
            return;
        }
        self.build(particles);
        self.last_timestep = Some(timestep);
    }

    fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    fn len(&self) -> usize {
        self.lists.len()
    }

    fn neighbors(&self, i: usize) -> &[usize] {
        &self.lists[i]
    }
}
