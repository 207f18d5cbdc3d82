// pf-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let l = m(2.0);
        let a = m2(3.0);
        assert_eq!(l.value, 2.0);
        assert_eq!(a.value, 3.0);
        let product: Area = l * l;
        assert_eq!(product.value, 4.0);
    }
}
