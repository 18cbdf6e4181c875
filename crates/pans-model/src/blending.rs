//! Field-level evaluation of the SST blending functions.

use crate::error::ModelResult;
use crate::sst::SstBase;
use pans_core::{CoreError, Real, SMALL, ScalarField, VectorField};
use rayon::prelude::*;

/// Cell fields the blending functions read.
#[derive(Clone, Copy, Debug)]
pub struct BlendingInputs<'a> {
    pub k_u: &'a ScalarField,
    pub omega_u: &'a ScalarField,
    pub wall_distance: &'a [Real],
    pub nu: &'a ScalarField,
    pub cd_k_omega: &'a ScalarField,
}

impl BlendingInputs<'_> {
    fn ensure_len(&self) -> ModelResult<usize> {
        let n = self.k_u.len();
        self.omega_u.ensure_len(n, "omegaU")?;
        self.nu.ensure_len(n, "molecular viscosity")?;
        self.cd_k_omega.ensure_len(n, "CDkOmega")?;
        ensure_wall_distance(self.wall_distance, n)?;
        Ok(n)
    }
}

fn ensure_wall_distance(wall_distance: &[Real], n: usize) -> ModelResult<()> {
    if wall_distance.len() != n {
        return Err(CoreError::SizeMismatch {
            what: "wall distance",
            expected: n,
            got: wall_distance.len(),
        }
        .into());
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct BlendingFields {
    pub f1: ScalarField,
    /// `F2`, or `F2 * F3` with the roughness correction enabled.
    pub f23: ScalarField,
}

/// Evaluate F1 and F23 over all cells.
pub fn evaluate(base: &SstBase, inputs: &BlendingInputs<'_>) -> ModelResult<BlendingFields> {
    let n = inputs.ensure_len()?;
    let f1 = (0..n)
        .into_par_iter()
        .map(|i| {
            base.f1(
                inputs.k_u[i],
                inputs.omega_u[i],
                inputs.wall_distance[i],
                inputs.nu[i],
                inputs.cd_k_omega[i],
            )
        })
        .collect();
    let f23 = f23(base, inputs.k_u, inputs.omega_u, inputs.wall_distance, inputs.nu)?;
    Ok(BlendingFields { f1, f23 })
}

/// Evaluate only the limiter blend, used after the transport solves.
pub fn f23(
    base: &SstBase,
    k_u: &ScalarField,
    omega_u: &ScalarField,
    wall_distance: &[Real],
    nu: &ScalarField,
) -> ModelResult<ScalarField> {
    let n = k_u.len();
    omega_u.ensure_len(n, "omegaU")?;
    nu.ensure_len(n, "molecular viscosity")?;
    ensure_wall_distance(wall_distance, n)?;
    Ok((0..n)
        .into_par_iter()
        .map(|i| base.f23(k_u[i], omega_u[i], wall_distance[i], nu[i]))
        .collect())
}

/// Cross-diffusion `CDkOmega = 2 alphaOmega2 (grad kU . grad omegaU) / omegaU`.
pub fn cross_diffusion(
    alpha_omega2: Real,
    grad_k_u: &VectorField,
    grad_omega_u: &VectorField,
    omega_u: &ScalarField,
) -> ModelResult<ScalarField> {
    let n = omega_u.len();
    for (what, len) in [
        ("grad kU", grad_k_u.len()),
        ("grad omegaU", grad_omega_u.len()),
    ] {
        if len != n {
            return Err(CoreError::SizeMismatch {
                what,
                expected: n,
                got: len,
            }
            .into());
        }
    }
    Ok((0..n)
        .into_par_iter()
        .map(|i| 2.0 * alpha_omega2 * grad_k_u[i].dot(&grad_omega_u[i]) / omega_u[i].max(SMALL))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn fields_are_bounded() {
        let base = SstBase::default();
        let k = ScalarField::from_vec(vec![0.0, 1e-6, 1e-2, 10.0]);
        let w = ScalarField::from_vec(vec![1e-15, 1.0, 100.0, 1e4]);
        let y = [0.0, 1e-5, 0.1, 10.0];
        let nu = ScalarField::uniform(4, 1.5e-5);
        let cd = ScalarField::from_vec(vec![-1.0, 0.0, 1e-3, 1e3]);

        let fields = evaluate(
            &base,
            &BlendingInputs {
                k_u: &k,
                omega_u: &w,
                wall_distance: &y,
                nu: &nu,
                cd_k_omega: &cd,
            },
        )
        .unwrap();

        for v in fields.f1.iter().chain(fields.f23.iter()) {
            assert!(v.is_finite());
            assert!((0.0..=1.0).contains(v));
        }
    }

    #[test]
    fn cross_diffusion_is_signed() {
        let gk = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let gw = vec![Vector3::new(2.0, 0.0, 0.0), Vector3::new(-2.0, 0.0, 0.0)];
        let w = ScalarField::uniform(2, 4.0);
        let cd = cross_diffusion(0.856, &gk, &gw, &w).unwrap();
        assert!((cd[0] - 2.0 * 0.856 * 2.0 / 4.0).abs() < 1e-12);
        assert!((cd[1] + cd[0]).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_errors() {
        let base = SstBase::default();
        let k = ScalarField::zeros(3);
        let w = ScalarField::zeros(2);
        let nu = ScalarField::zeros(3);
        assert!(f23(&base, &k, &w, &[0.0; 3], &nu).is_err());
    }
}
