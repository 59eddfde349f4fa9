use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("Type pair ({type1}, {type2}) is out of range for {n_types} particle types")]
    InvalidType {
        type1: usize,
        type2: usize,
        n_types: usize,
    },
}

/// Maps an unordered pair of type indices onto a slot of a packed upper-triangular array.
///
/// `(a, b)` and `(b, a)` always map to the same slot, and the slots of an `n`-type system are
/// exactly `0..n * (n + 1) / 2`.
#[inline]
pub fn type_pair_index(type1: usize, type2: usize, n_types: usize) -> usize {
    let (i, j) = if type1 > type2 {
        (type2, type1)
    } else {
        (type1, type2)
    };
    j + i * n_types - i * (i + 1) / 2
}

#[inline]
pub fn num_type_pairs(n_types: usize) -> usize {
    n_types * (n_types + 1) / 2
}

/// Per type-pair cutoff, XPLOR onset and potential parameters.
///
/// Both radii are stored squared since every consumer compares against squared separations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TypePairEntry<P> {
    pub rcutsq: f64,
    pub ronsq: f64,
    pub params: P,
}

/// Symmetric storage for values keyed by unordered pairs of particle types.
///
/// The table is sized once from the number of particle types and never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePairTable<T> {
    n_types: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> TypePairTable<T> {
    pub fn new(n_types: usize) -> Self {
        Self {
            n_types,
            data: vec![T::default(); num_type_pairs(n_types)],
        }
    }
}

impl<T> TypePairTable<T> {
    #[inline]
    pub fn n_types(&self) -> usize {
        self.n_types
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn checked_index(&self, type1: usize, type2: usize) -> Result<usize, TableError> {
        if type1 >= self.n_types || type2 >= self.n_types {
            return Err(TableError::InvalidType {
                type1,
                type2,
                n_types: self.n_types,
            });
        }
        Ok(type_pair_index(type1, type2, self.n_types))
    }

    /// Stores `value` for both `(type1, type2)` and `(type2, type1)`.
    pub fn set(&mut self, type1: usize, type2: usize, value: T) -> Result<(), TableError> {
        let idx = self.checked_index(type1, type2)?;
        self.data[idx] = value;
        Ok(())
    }

    pub fn get_mut(&mut self, type1: usize, type2: usize) -> Result<&mut T, TableError> {
        let idx = self.checked_index(type1, type2)?;
        Ok(&mut self.data[idx])
    }

    pub fn try_get(&self, type1: usize, type2: usize) -> Result<&T, TableError> {
        let idx = self.checked_index(type1, type2)?;
        Ok(&self.data[idx])
    }

    /// Unchecked-by-contract read used in the pair loop.
    ///
    /// # Panics
    ///
    /// Panics if either type index is not below [`n_types`](Self::n_types).
    #[inline]
    pub fn get(&self, type1: usize, type2: usize) -> &T {
        debug_assert!(type1 < self.n_types && type2 < self.n_types);
        &self.data[type_pair_index(type1, type2, self.n_types)]
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
