use crate::CoreError;

/// Floating-point type of every field value and coefficient.
pub type Real = f64;

/// Smallest magnitude treated as "non-zero" in turbulence denominators.
pub const SMALL: Real = 1e-15;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Validate that a configuration scalar is finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// Clamp `v` into `[lo, hi]`, mapping NaN to `lo`.
///
/// `f64::clamp` propagates NaN; limiters in the closure must never do that.
#[inline]
pub fn clamp_or_lo(v: Real, lo: Real, hi: Real) -> Real {
    if v.is_nan() { lo } else { v.max(lo).min(hi) }
}

#[inline]
pub fn pow4(v: Real) -> Real {
    let sq = v * v;
    sq * sq
}
