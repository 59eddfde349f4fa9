use super::shift::ShiftMode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown particle type '{name}' in pair parameters")]
    UnknownType { name: String },
    #[error("Invalid {field} {value} for pair ({type1}, {type2}): must be finite and non-negative")]
    InvalidRadius {
        field: &'static str,
        value: f64,
        type1: String,
        type2: String,
    },
}

/// Cutoff and XPLOR onset radii must be finite and non-negative.
#[inline]
pub(crate) fn is_valid_radius(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// One `[[pair]]` table of a parameter file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PairEntryConfig<P> {
    pub types: [String; 2],
    pub r_cut: f64,
    #[serde(default)]
    pub r_on: Option<f64>,
    pub params: P,
}

/// Pair potential settings as written in a TOML file.
///
/// ```toml
/// shift_mode = "xplor"
///
/// [[pair]]
/// types = ["A", "A"]
/// r_cut = 2.5
/// r_on = 2.0
/// params = { epsilon = 1.0, sigma = 1.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "P: serde::de::DeserializeOwned"))]
pub struct PairParameterFile<P> {
    #[serde(default)]
    pub shift_mode: ShiftMode,
    #[serde(default, rename = "pair")]
    pub pairs: Vec<PairEntryConfig<P>>,
}

/// A parameter file entry with type names resolved to indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPair<P> {
    pub type1: usize,
    pub type2: usize,
    pub r_cut: f64,
    pub r_on: Option<f64>,
    pub params: P,
}

impl<P: DeserializeOwned> PairParameterFile<P> {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamLoadError> {
        toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: "<string>".to_string(),
            source: e,
        })
    }
}

impl<P: Clone> PairParameterFile<P> {
    /// Maps every entry's type names onto indices into `type_names`.
    ///
    /// Fails on the first unknown name or invalid radius, before anything is returned.
    pub fn resolve(&self, type_names: &[String]) -> Result<Vec<ResolvedPair<P>>, ParamLoadError> {
        let lookup = |name: &str| {
            type_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| ParamLoadError::UnknownType {
                    name: name.to_string(),
                })
        };

        self.pairs
            .iter()
            .map(|entry| {
                let [name1, name2] = &entry.types;
                let radii = std::iter::once(("r_cut", entry.r_cut))
                    .chain(entry.r_on.map(|r_on| ("r_on", r_on)));
                for (field, value) in radii {
                    if !is_valid_radius(value) {
                        return Err(ParamLoadError::InvalidRadius {
                            field,
                            value,
                            type1: name1.clone(),
                            type2: name2.clone(),
                        });
                    }
                }
                Ok(ResolvedPair {
                    type1: lookup(name1)?,
                    type2: lookup(name2)?,
                    r_cut: entry.r_cut,
                    r_on: entry.r_on,
                    params: entry.params.clone(),
                })
            })
            .collect()
    }
}
