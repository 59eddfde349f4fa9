use thiserror::Error;

use crate::core::forcefield::params::ParamLoadError;
use crate::core::forcefield::table::TableError;
use crate::core::models::particle::ParticleDataError;
use crate::core::models::simulation_box::BoxError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid type pair: {source}")]
    InvalidType {
        #[from]
        source: TableError,
    },

    #[error("'{quantity}' is not a valid log quantity (provided: {provided:?})")]
    InvalidLogQuantity {
        quantity: String,
        provided: Vec<String>,
    },

    #[error(
        "Box half-length {half_length} along axis {axis} is smaller than the largest cutoff {r_cut}"
    )]
    BoxTooSmall {
        axis: usize,
        half_length: f64,
        r_cut: f64,
    },

    #[error("Particle system has {particles} particles but the neighbor list covers {neighbor_list}")]
    ParticleCountMismatch {
        particles: usize,
        neighbor_list: usize,
    },

    #[error("Particle system has {particles} types but the potential was built for {potential}")]
    TypeCountMismatch { particles: usize, potential: usize },

    #[error("Invalid {field} {value} for type pair ({type1}, {type2}): must be finite and non-negative")]
    InvalidRadius {
        field: &'static str,
        value: f64,
        type1: usize,
        type2: usize,
    },

    #[error("Type id {type_id} is out of range for {n_types} types")]
    UnknownType { type_id: usize, n_types: usize },

    #[error("Plane normal ({x}, {y}, {z}) cannot be normalized")]
    InvalidPlaneNormal { x: f64, y: f64, z: f64 },

    #[error("Failed to load pair parameters: {source}")]
    Parameters {
        #[from]
        source: ParamLoadError,
    },

    #[error("Invalid particle data: {source}")]
    ParticleData {
        #[from]
        source: ParticleDataError,
    },

    #[error("Invalid simulation box: {source}")]
    Box {
        #[from]
        source: BoxError,
    },
}
