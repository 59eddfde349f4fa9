use super::evaluator::PairInteraction;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown shift mode '{0}' (expected 'none', 'shift' or 'xplor')")]
pub struct ParseShiftModeError(pub String);

/// How pair energies are treated at the cutoff.
///
/// The mode is global to a potential: it is chosen once per computation and applies to every type
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftMode {
    /// Energies are used as the law defines them and jump at the cutoff.
    #[default]
    None,
    /// Every type pair is shifted so its energy is zero at the cutoff.
    Shift,
    /// XPLOR smoothing between `r_on` and `r_cut`. Type pairs with `r_on > r_cut` are shifted
    /// instead.
    Xplor,
}

impl ShiftMode {
    /// Whether the evaluator should be asked for a shifted energy for a type pair.
    #[inline]
    pub fn energy_shift(self, rcutsq: f64, ronsq: f64) -> bool {
        match self {
            ShiftMode::None => false,
            ShiftMode::Shift => true,
            ShiftMode::Xplor => ronsq > rcutsq,
        }
    }

    /// Applies any post-evaluation smoothing to a raw evaluator result.
    #[inline]
    pub fn apply(
        self,
        raw: PairInteraction,
        rsq: f64,
        rcutsq: f64,
        ronsq: f64,
    ) -> PairInteraction {
        match self {
            ShiftMode::Xplor if rsq >= ronsq && ronsq <= rcutsq => {
                xplor_smooth(raw, rsq, rcutsq, ronsq)
            }
            _ => raw,
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftMode::None => "none",
            ShiftMode::Shift => "shift",
            ShiftMode::Xplor => "xplor",
        };
        f.write_str(name)
    }
}

impl FromStr for ShiftMode {
    type Err = ParseShiftModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no-shift" | "no_shift" => Ok(ShiftMode::None),
            "shift" => Ok(ShiftMode::Shift),
            "xplor" => Ok(ShiftMode::Xplor),
            _ => Err(ParseShiftModeError(s.to_string())),
        }
    }
}

/// XPLOR switching of an unshifted pair interaction for `ronsq <= rsq < rcutsq`.
///
/// The switching function `S(r)` is one at `r_on` and zero at `r_cut` with vanishing slope at
/// both ends. Energy becomes `S·V` and the force picks up the `-dS/dr · V` term.
///
/// The caller guarantees `ronsq < rcutsq`.
#[inline]
pub fn xplor_smooth(raw: PairInteraction, rsq: f64, rcutsq: f64, ronsq: f64) -> PairInteraction {
    let window = rcutsq - ronsq;
    let xplor_denom_inv = 1.0 / (window * window * window);

    let rsq_minus_rcutsq = rsq - rcutsq;
    let s = rsq_minus_rcutsq * rsq_minus_rcutsq * (rcutsq + 2.0 * rsq - 3.0 * ronsq)
        * xplor_denom_inv;
    let ds_dr_divr = 12.0 * (rsq - ronsq) * rsq_minus_rcutsq * xplor_denom_inv;

    PairInteraction {
        force_divr: s * raw.force_divr - ds_dr_divr * raw.energy,
        energy: s * raw.energy,
    }
}
