use super::evaluator::{PairEvaluator, PairInteraction};
use serde::Deserialize;

fn default_alpha() -> f64 {
    1.0
}

/// Parameters of the 12-6 Lennard-Jones law.
///
/// `alpha` scales the attractive term; `alpha = 0` gives a purely repulsive wall.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct LennardJonesParams {
    pub epsilon: f64,
    pub sigma: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl LennardJonesParams {
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self {
            epsilon,
            sigma,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Repulsive (`lj1`) and attractive (`lj2`) prefactors.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64) {
        let sigma6 = self.sigma.powi(6);
        let lj1 = 4.0 * self.epsilon * sigma6 * sigma6;
        let lj2 = self.alpha * 4.0 * self.epsilon * sigma6;
        (lj1, lj2)
    }
}

/// `V(r) = 4ε[(σ/r)¹² - α(σ/r)⁶]`.
///
/// The WCA potential is this law with `r_cut = 2^(1/6)σ` and energy shifting.
#[derive(Debug, Clone, Copy)]
pub struct LennardJones {
    rsq: f64,
    rcutsq: f64,
    lj1: f64,
    lj2: f64,
}

impl LennardJones {
    /// Cutoff at the potential minimum, which turns the law into WCA when shifted.
    pub fn wca_cutoff(sigma: f64) -> f64 {
        2.0_f64.powf(1.0 / 6.0) * sigma
    }
}

impl PairEvaluator for LennardJones {
    type Params = LennardJonesParams;
    const NAME: &'static str = "lj";

    #[inline]
    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self {
        let (lj1, lj2) = params.coefficients();
        Self {
            rsq,
            rcutsq,
            lj1,
            lj2,
        }
    }

    #[inline]
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction> {
        if self.rsq >= self.rcutsq || self.lj1 == 0.0 {
            return None;
        }
        let r2inv = 1.0 / self.rsq;
        let r6inv = r2inv * r2inv * r2inv;
        let force_divr = r2inv * r6inv * (12.0 * self.lj1 * r6inv - 6.0 * self.lj2);
        let mut energy = r6inv * (self.lj1 * r6inv - self.lj2);

        if energy_shift {
            let rcut2inv = 1.0 / self.rcutsq;
            let rcut6inv = rcut2inv * rcut2inv * rcut2inv;
            energy -= rcut6inv * (self.lj1 * rcut6inv - self.lj2);
        }
        Some(PairInteraction { force_divr, energy })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct GaussParams {
    pub epsilon: f64,
    pub sigma: f64,
}

/// `V(r) = ε exp(-r²/2σ²)`.
#[derive(Debug, Clone, Copy)]
pub struct Gauss {
    rsq: f64,
    rcutsq: f64,
    params: GaussParams,
}

impl PairEvaluator for Gauss {
    type Params = GaussParams;
    const NAME: &'static str = "gauss";

    #[inline]
    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self {
        Self {
            rsq,
            rcutsq,
            params: *params,
        }
    }

    #[inline]
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction> {
        if self.rsq >= self.rcutsq || self.params.sigma == 0.0 {
            return None;
        }
        let GaussParams { epsilon, sigma } = self.params;
        let sigma_sq = sigma * sigma;
        let exp_val = (-0.5 * self.rsq / sigma_sq).exp();

        let force_divr = epsilon / sigma_sq * exp_val;
        let mut energy = epsilon * exp_val;
        if energy_shift {
            energy -= epsilon * (-0.5 * self.rcutsq / sigma_sq).exp();
        }
        Some(PairInteraction { force_divr, energy })
    }
}

/// Lennard-Jones evaluated at `r - Δ`, with `Δ = (d_i + d_j)/2 - 1`.
///
/// Lets particles of different diameters share one set of LJ parameters.
#[derive(Debug, Clone, Copy)]
pub struct ShiftedLennardJones {
    rsq: f64,
    rcutsq: f64,
    lj1: f64,
    lj2: f64,
    delta: f64,
}

impl PairEvaluator for ShiftedLennardJones {
    type Params = LennardJonesParams;
    const NAME: &'static str = "slj";
    const NEEDS_DIAMETER: bool = true;

    #[inline]
    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self {
        let (lj1, lj2) = params.coefficients();
        Self {
            rsq,
            rcutsq,
            lj1,
            lj2,
            delta: 0.0,
        }
    }

    #[inline]
    fn set_diameter(&mut self, di: f64, dj: f64) {
        self.delta = 0.5 * (di + dj) - 1.0;
    }

    #[inline]
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction> {
        if self.rsq >= self.rcutsq || self.lj1 == 0.0 {
            return None;
        }
        let rinv = 1.0 / self.rsq.sqrt();
        let r = 1.0 / rinv;
        let rmdinv = 1.0 / (r - self.delta);
        let rmd2inv = rmdinv * rmdinv;
        let rmd6inv = rmd2inv * rmd2inv * rmd2inv;

        let force_divr = rinv * rmdinv * rmd6inv * (12.0 * self.lj1 * rmd6inv - 6.0 * self.lj2);
        let mut energy = rmd6inv * (self.lj1 * rmd6inv - self.lj2);

        if energy_shift {
            let rcmdinv = 1.0 / (self.rcutsq.sqrt() - self.delta);
            let rcmd2inv = rcmdinv * rcmdinv;
            let rcmd6inv = rcmd2inv * rcmd2inv * rcmd2inv;
            energy -= rcmd6inv * (self.lj1 * rcmd6inv - self.lj2);
        }
        Some(PairInteraction { force_divr, energy })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct YukawaParams {
    pub epsilon: f64,
    pub kappa: f64,
}

/// `V(r) = ε exp(-κr)/r`.
#[derive(Debug, Clone, Copy)]
pub struct Yukawa {
    rsq: f64,
    rcutsq: f64,
    params: YukawaParams,
}

#[inline]
fn screened(prefactor: f64, kappa: f64, rsq: f64) -> (f64, f64) {
    let r = rsq.sqrt();
    let rinv = 1.0 / r;
    let exp_val = (-kappa * r).exp();
    let force_divr = prefactor * exp_val * (rinv + kappa) / rsq;
    let energy = prefactor * exp_val * rinv;
    (force_divr, energy)
}

impl PairEvaluator for Yukawa {
    type Params = YukawaParams;
    const NAME: &'static str = "yukawa";

    #[inline]
    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self {
        Self {
            rsq,
            rcutsq,
            params: *params,
        }
    }

    #[inline]
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction> {
        if self.rsq >= self.rcutsq || self.params.epsilon == 0.0 {
            return None;
        }
        let YukawaParams { epsilon, kappa } = self.params;
        let (force_divr, mut energy) = screened(epsilon, kappa, self.rsq);
        if energy_shift {
            energy -= screened(epsilon, kappa, self.rcutsq).1;
        }
        Some(PairInteraction { force_divr, energy })
    }
}

/// Parameters of the screened (Debye-Hückel) Coulomb law.
///
/// `prefactor` carries the unit system, e.g. `e²/4πε₀ε_r` in the simulation's energy·length
/// units. `kappa = 0` recovers the bare Coulomb law.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ScreenedCoulombParams {
    pub prefactor: f64,
    #[serde(default)]
    pub kappa: f64,
}

/// `V(r) = A q_i q_j exp(-κr)/r`.
#[derive(Debug, Clone, Copy)]
pub struct ScreenedCoulomb {
    rsq: f64,
    rcutsq: f64,
    params: ScreenedCoulombParams,
    qiqj: f64,
}

impl PairEvaluator for ScreenedCoulomb {
    type Params = ScreenedCoulombParams;
    const NAME: &'static str = "coulomb";
    const NEEDS_CHARGE: bool = true;

    #[inline]
    fn new(rsq: f64, rcutsq: f64, params: &Self::Params) -> Self {
        Self {
            rsq,
            rcutsq,
            params: *params,
            qiqj: 0.0,
        }
    }

    #[inline]
    fn set_charge(&mut self, qi: f64, qj: f64) {
        self.qiqj = qi * qj;
    }

    #[inline]
    fn eval_force_and_energy(&self, energy_shift: bool) -> Option<PairInteraction> {
        let prefactor = self.params.prefactor * self.qiqj;
        if self.rsq >= self.rcutsq || prefactor == 0.0 {
            return None;
        }
        let kappa = self.params.kappa;
        let (force_divr, mut energy) = screened(prefactor, kappa, self.rsq);
        if energy_shift {
            energy -= screened(prefactor, kappa, self.rcutsq).1;
        }
        Some(PairInteraction { force_divr, energy })
    }
}
