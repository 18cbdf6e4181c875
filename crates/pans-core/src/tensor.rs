//! Velocity-gradient invariants used by eddy-viscosity closures.
//!
//! For a gradient tensor `G` with `G[(i, j)] = d u_j / d x_i`:
//!
//! ```text
//! S2     = 2 |symm(G)|^2
//! GbyNu  = G : dev(G + G^T)
//! div u  = tr(G)
//! ```

use crate::numeric::Real;
use nalgebra::Matrix3;

#[inline]
pub fn symm(t: &Matrix3<Real>) -> Matrix3<Real> {
    (t + t.transpose()) * 0.5
}

#[inline]
pub fn two_symm(t: &Matrix3<Real>) -> Matrix3<Real> {
    t + t.transpose()
}

/// Deviatoric part: `t - tr(t)/3 I`.
#[inline]
pub fn dev(t: &Matrix3<Real>) -> Matrix3<Real> {
    t - Matrix3::identity() * (t.trace() / 3.0)
}

/// Double inner product `a : b = a_ij b_ij`.
#[inline]
pub fn double_dot(a: &Matrix3<Real>, b: &Matrix3<Real>) -> Real {
    a.component_mul(b).sum()
}

#[inline]
pub fn mag_sqr(t: &Matrix3<Real>) -> Real {
    double_dot(t, t)
}

/// Strain-rate invariant `S2 = 2 |symm(gradU)|^2`.
#[inline]
pub fn strain_rate_sqr(grad_u: &Matrix3<Real>) -> Real {
    2.0 * mag_sqr(&symm(grad_u))
}

/// Production per unit eddy viscosity, `gradU : dev(twoSymm(gradU))`.
#[inline]
pub fn production_by_nu(grad_u: &Matrix3<Real>) -> Real {
    double_dot(grad_u, &dev(&two_symm(grad_u)))
}

#[inline]
pub fn divergence(grad_u: &Matrix3<Real>) -> Real {
    grad_u.trace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_shear(rate: Real) -> Matrix3<Real> {
        // u_x = rate * y  =>  d u_x / d y = rate  =>  entry (1, 0)
        let mut g = Matrix3::zeros();
        g[(1, 0)] = rate;
        g
    }

    #[test]
    fn simple_shear_invariants() {
        let g = simple_shear(3.0);
        assert!((strain_rate_sqr(&g) - 9.0).abs() < 1e-12);
        assert!((production_by_nu(&g) - 9.0).abs() < 1e-12);
        assert_eq!(divergence(&g), 0.0);
    }

    #[test]
    fn dev_is_traceless() {
        let t = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0);
        assert!(dev(&t).trace().abs() < 1e-12);
    }

    #[test]
    fn pure_rotation_has_no_strain() {
        let mut g = Matrix3::zeros();
        g[(1, 0)] = 1.0;
        g[(0, 1)] = -1.0;
        assert!(strain_rate_sqr(&g).abs() < 1e-12);
        assert!(production_by_nu(&g).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn strain_invariant_is_non_negative(
            entries in prop::collection::vec(-100.0_f64..100.0, 9)
        ) {
            let g = Matrix3::from_row_slice(&entries);
            prop_assert!(strain_rate_sqr(&g) >= 0.0);
        }
    }
}
