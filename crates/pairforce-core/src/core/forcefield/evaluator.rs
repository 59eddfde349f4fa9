//! The contract every pair potential law implements.
//!
//! An evaluator is built fresh for each interacting pair from the squared separation, the squared
//! cutoff of the type pair, and that type pair's parameters. It owns no state beyond those inputs,
//! so evaluations of different pairs are independent and can run on any thread.

/// Scalar result of one pair evaluation.
///
/// `force_divr` is the force magnitude divided by the separation, so that the force on particle
/// `i` is `force_divr * (r_i - r_j)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairInteraction {
    pub force_divr: f64,
    pub energy: f64,
}

impl PairInteraction {
    pub fn new(force_divr: f64, energy: f64) -> Self {
        Self { force_divr, energy }
    }
}

pub trait PairEvaluator: Sized {
    /// Per type-pair parameters of the law.
    type Params: Clone + Default + Send + Sync;

    /// Short name used in log quantity names, e.g. `"lj"` for `pair_lj_energy`.
    const NAME: &'static str;

    /// Whether [`set_diameter`](Self::set_diameter) must be called before evaluation.
    const NEEDS_DIAMETER: bool = false;

    /// Whether [`set_charge`](Self::set_charge) must be called before evaluation.
    const NEEDS_CHARGE: bool = false;

    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self;

    #[inline]
    fn set_diameter(&mut self, _di: f64, _dj: f64) {}

    #[inline]
    fn set_charge(&mut self, _qi: f64, _qj: f64) {}

    /// Evaluates the law.
    ///
    /// Returns `None` when the pair does not interact (outside the cutoff or the law is switched
    /// off for these parameters). With `energy_shift` set, the returned energy must be exactly
    /// zero at `rsq == rcutsq`.
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction>;
}
