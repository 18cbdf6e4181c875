// pans-core/src/units.rs

use uom::si::f64::{Length as UomLength, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Volume = UomVolume;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

/// Length in metres, the unit every mesh-resident length field is stored in.
#[inline]
pub fn meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

/// Volume in cubic metres.
#[inline]
pub fn cubic_meters(v: Volume) -> f64 {
    use uom::si::volume::cubic_meter;
    v.get::<cubic_meter>()
}

/// Edge length of the cube with the same volume.
#[inline]
pub fn cube_root(v: Volume) -> Length {
    m(cubic_meters(v).cbrt())
}

pub mod constants {
    /// von Karman constant
    pub const KAPPA: f64 = 0.41;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_trip_si() {
        assert_eq!(meters(m(2.0)), 2.0);
        assert_eq!(cubic_meters(m3(8.0)), 8.0);
    }

    #[test]
    fn cube_root_of_volume() {
        let l = cube_root(m3(8.0));
        assert!((meters(l) - 2.0).abs() < 1e-12);
    }
}
