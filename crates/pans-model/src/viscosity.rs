//! Eddy-viscosity corrector.

use crate::coeffs::Limits;
use crate::error::ModelResult;
use crate::sst::SstBase;
use pans_core::{Real, ScalarField, clamp_or_lo};
use rayon::prelude::*;

/// Result of one eddy-viscosity update.
#[derive(Clone, Debug)]
pub struct NutUpdate {
    pub nut: ScalarField,
    /// Cells where the raw value left `[nutMin, nutMax]` (or was not finite).
    pub clipped: usize,
}

/// `nut = a1 kU / max(a1 omegaU, b1 F23 sqrt(S2))`, clipped to the configured range.
pub fn correct_nut(
    base: &SstBase,
    limits: &Limits,
    k_u: &ScalarField,
    omega_u: &ScalarField,
    f23: &ScalarField,
    s2: &ScalarField,
) -> ModelResult<NutUpdate> {
    let n = k_u.len();
    omega_u.ensure_len(n, "omegaU")?;
    f23.ensure_len(n, "F23")?;
    s2.ensure_len(n, "S2")?;

    let cells: Vec<(Real, bool)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let raw = base.nut(k_u[i], omega_u[i], f23[i], s2[i]);
            let nut = clamp_or_lo(raw, limits.nut_min, limits.nut_max);
            (nut, nut != raw)
        })
        .collect();

    let clipped = cells.iter().filter(|(_, c)| *c).count();
    Ok(NutUpdate {
        nut: cells.into_iter().map(|(v, _)| v).collect(),
        clipped,
    })
}
