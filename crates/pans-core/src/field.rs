//! Mesh-resident fields: one value per control volume.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use std::ops::Index;

/// Per-cell vector field (gradients, velocities).
pub type VectorField = Vec<Vector3<Real>>;

/// Per-cell second-rank tensor field. Entry `(i, j)` of a velocity gradient
/// holds `d u_j / d x_i`.
pub type TensorField = Vec<Matrix3<Real>>;

/// Per-cell scalar field.
///
/// Fields are plain dense vectors indexed by cell; the closure never stores
/// boundary-face values (boundary conditions belong to the host solver).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarField {
    values: Vec<Real>,
}

impl ScalarField {
    pub fn from_vec(values: Vec<Real>) -> Self {
        Self { values }
    }

    pub fn uniform(n_cells: usize, value: Real) -> Self {
        Self {
            values: vec![value; n_cells],
        }
    }

    pub fn zeros(n_cells: usize) -> Self {
        Self::uniform(n_cells, 0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Real] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Real> {
        self.values.iter()
    }

    /// Smallest value, `None` for an empty field. NaN entries are skipped.
    pub fn min(&self) -> Option<Real> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(Real::min)
    }

    /// Largest value, `None` for an empty field. NaN entries are skipped.
    pub fn max(&self) -> Option<Real> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(Real::max)
    }

    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Fail with `SizeMismatch` unless the field has exactly `n_cells` entries.
    pub fn ensure_len(&self, n_cells: usize, what: &'static str) -> CoreResult<()> {
        if self.values.len() == n_cells {
            Ok(())
        } else {
            Err(CoreError::SizeMismatch {
                what,
                expected: n_cells,
                got: self.values.len(),
            })
        }
    }

    /// Cell-wise map evaluated in parallel.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Real) -> Real + Sync + Send,
    {
        Self {
            values: self.values.par_iter().map(|&v| f(v)).collect(),
        }
    }

    /// Raise every value below `floor` (and every non-finite value) to `floor`.
    ///
    /// Returns the number of cells that were modified.
    pub fn bound(&mut self, floor: Real) -> usize {
        self.values
            .par_iter_mut()
            .map(|v| {
                if !v.is_finite() || *v < floor {
                    *v = floor;
                    1
                } else {
                    0
                }
            })
            .sum()
    }
}

impl Index<usize> for ScalarField {
    type Output = Real;

    fn index(&self, cell: usize) -> &Real {
        &self.values[cell]
    }
}

impl From<Vec<Real>> for ScalarField {
    fn from(values: Vec<Real>) -> Self {
        Self::from_vec(values)
    }
}

impl FromIterator<Real> for ScalarField {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl FromParallelIterator<Real> for ScalarField {
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = Real>,
    {
        Self {
            values: par_iter.into_par_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_counts_clipped_cells() {
        let mut f = ScalarField::from_vec(vec![1.0, -2.0, 0.0, Real::NAN, 3.0]);
        let clipped = f.bound(1e-10);
        assert_eq!(clipped, 3);
        assert!(f.all_finite());
        assert_eq!(f.min(), Some(1e-10));
    }

    #[test]
    fn min_max_skip_nan() {
        let f = ScalarField::from_vec(vec![Real::NAN, 2.0, -1.0]);
        assert_eq!(f.min(), Some(-1.0));
        assert_eq!(f.max(), Some(2.0));
        assert_eq!(ScalarField::default().min(), None);
    }

    #[test]
    fn map_preserves_order() {
        let f = ScalarField::from_vec((0..100).map(|i| i as Real).collect());
        let g = f.map(|v| 2.0 * v);
        assert_eq!(g[37], 74.0);
        assert_eq!(g.len(), 100);
    }
}
