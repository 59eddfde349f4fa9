use super::simulation_box::SimulationBox;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParticleDataError {
    #[error("Expected {expected} values for '{field}', found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Particle {index} has type {type_id}, but only {n_types} types are defined")]
    TypeOutOfRange {
        index: usize,
        type_id: usize,
        n_types: usize,
    },
    #[error("A particle system requires at least one particle type")]
    NoTypes,
}

/// Read-only snapshot of the particles a force computation acts on.
///
/// Per-particle attributes are kept as parallel arrays. Diameter and charge are optional and are
/// only read when the active potential asks for them; a missing array reads as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleData {
    positions: Vec<Vector3<f64>>,
    types: Vec<usize>,
    diameters: Option<Vec<f64>>,
    charges: Option<Vec<f64>>,
    type_names: Vec<String>,
    sim_box: SimulationBox,
}

impl ParticleData {
    pub fn new(
        sim_box: SimulationBox,
        type_names: Vec<String>,
        positions: Vec<Vector3<f64>>,
        types: Vec<usize>,
    ) -> Result<Self, ParticleDataError> {
        if type_names.is_empty() {
            return Err(ParticleDataError::NoTypes);
        }
        check_len("types", positions.len(), types.len())?;
        if let Some((index, &type_id)) = types
            .iter()
            .enumerate()
            .find(|(_, t)| **t >= type_names.len())
        {
            return Err(ParticleDataError::TypeOutOfRange {
                index,
                type_id,
                n_types: type_names.len(),
            });
        }

        Ok(Self {
            positions,
            types,
            diameters: None,
            charges: None,
            type_names,
            sim_box,
        })
    }

    pub fn with_diameters(mut self, diameters: Vec<f64>) -> Result<Self, ParticleDataError> {
        check_len("diameters", self.positions.len(), diameters.len())?;
        self.diameters = Some(diameters);
        Ok(self)
    }

    pub fn with_charges(mut self, charges: Vec<f64>) -> Result<Self, ParticleDataError> {
        check_len("charges", self.positions.len(), charges.len())?;
        self.charges = Some(charges);
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn n_types(&self) -> usize {
        self.type_names.len()
    }

    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    pub fn type_id(&self, name: &str) -> Option<usize> {
        self.type_names.iter().position(|n| n == name)
    }

    #[inline]
    pub fn sim_box(&self) -> &SimulationBox {
        &self.sim_box
    }

    #[inline]
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    #[inline]
    pub fn types(&self) -> &[usize] {
        &self.types
    }

    #[inline]
    pub fn position(&self, i: usize) -> &Vector3<f64> {
        &self.positions[i]
    }

    #[inline]
    pub fn type_of(&self, i: usize) -> usize {
        self.types[i]
    }

    #[inline]
    pub fn diameter(&self, i: usize) -> f64 {
        self.diameters.as_ref().map_or(0.0, |d| d[i])
    }

    #[inline]
    pub fn charge(&self, i: usize) -> f64 {
        self.charges.as_ref().map_or(0.0, |q| q[i])
    }

    /// Replaces all positions, e.g. after an external integration step.
    pub fn set_positions(&mut self, positions: Vec<Vector3<f64>>) -> Result<(), ParticleDataError> {
        check_len("positions", self.positions.len(), positions.len())?;
        self.positions = positions;
        Ok(())
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), ParticleDataError> {
    if expected != found {
        return Err(ParticleDataError::LengthMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}
