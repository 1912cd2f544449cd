//! Numeric value generators.

use crate::provider::FieldProvider;
use factory_core::{Bounds, Value};

/// Bases of the default integer distribution.
pub const MAGNITUDE_LADDER: [i64; 7] = [0, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// Largest integer with as many digits as `base` (9 for base 0).
pub fn magnitude_ceiling(base: i64) -> i64 {
    if base <= 0 {
        9
    } else {
        10_i64.pow(base.ilog10() + 1) - 1
    }
}

/// Round to 2 decimal places.
///
/// Magnitudes too large to scale have no fractional digits and are returned
/// unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Generate an integer for an integer-range column.
///
/// Without an explicit range a base is drawn from [`MAGNITUDE_LADDER`] and
/// the value is uniform between the base and the largest number of the same
/// digit count.
pub fn generate_int<P: FieldProvider>(provider: &mut P, bounds: &Bounds<i64>) -> Value {
    let (min, max) = match bounds.explicit() {
        Some(range) => range,
        None => {
            let base = *provider.random_element(&MAGNITUDE_LADDER);
            (base, magnitude_ceiling(base))
        }
    };
    Value::Int(provider.random_int(min, max))
}

/// Generate a float for a float-range column, rounded to 2 decimals.
///
/// Without an explicit range the value is uniform in `[0.0, 1.0]`.
pub fn generate_float<P: FieldProvider>(provider: &mut P, bounds: &Bounds<f64>) -> Value {
    let (min, max) = bounds.explicit().unwrap_or((0.0, 1.0));
    Value::Float(round2(provider.random_float(min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CatalogProvider;
    use factory_core::Locale;

    #[test]
    fn test_magnitude_ceiling() {
        assert_eq!(magnitude_ceiling(0), 9);
        assert_eq!(magnitude_ceiling(10), 99);
        assert_eq!(magnitude_ceiling(1_000), 9_999);
        assert_eq!(magnitude_ceiling(1_000_000), 9_999_999);
    }

    #[test]
    fn test_default_int_keeps_base_digit_count() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        for _ in 0..500 {
            let Value::Int(v) = generate_int(&mut provider, &Bounds::default()) else {
                panic!("Expected Int value");
            };
            assert!((0..=9_999_999).contains(&v));
            let digits = v.to_string().len();
            let base = if digits == 1 { 0 } else { 10_i64.pow(digits as u32 - 1) };
            assert!(MAGNITUDE_LADDER.contains(&base), "value {v}");
        }
    }

    #[test]
    fn test_equal_bounds_use_default() {
        let mut a = CatalogProvider::seeded(Locale::EnUs, 3);
        let mut b = CatalogProvider::seeded(Locale::EnUs, 3);
        let equal = Bounds::new(Some(5), Some(5));
        assert_eq!(
            generate_int(&mut a, &equal),
            generate_int(&mut b, &Bounds::default())
        );
    }

    #[test]
    fn test_int_range_inverted_bounds() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        for _ in 0..100 {
            let v = generate_int(&mut provider, &Bounds::new(Some(80), Some(18)));
            let v = v.as_i64().unwrap();
            assert!((18..=80).contains(&v));
        }
    }

    #[test]
    fn test_float_range_rounded() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        for _ in 0..100 {
            let Value::Float(v) = generate_float(&mut provider, &Bounds::new(Some(10.0), Some(20.0)))
            else {
                panic!("Expected Float value");
            };
            assert!((10.0..=20.0).contains(&v));
            assert_eq!(round2(v), v);
        }
    }

    #[test]
    fn test_float_range_wider_than_f64_span() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        let bounds = Bounds::new(Some(-1e308), Some(1e308));
        for _ in 0..100 {
            let v = generate_float(&mut provider, &bounds).as_f64().unwrap();
            assert!(v.is_finite());
            assert!((-1e308..=1e308).contains(&v));
        }

        let extreme = Bounds::new(Some(f64::MAX), Some(f64::MIN));
        let v = generate_float(&mut provider, &extreme).as_f64().unwrap();
        assert!(v.is_finite());
    }

    #[test]
    fn test_round2_keeps_huge_values() {
        assert_eq!(round2(1e308), 1e308);
        assert_eq!(round2(-f64::MAX), -f64::MAX);
        assert_eq!(round2(2.345_1), 2.35);
    }

    #[test]
    fn test_float_default_unit_interval() {
        let mut provider = CatalogProvider::seeded(Locale::PtBr, 5);
        for _ in 0..100 {
            let v = generate_float(&mut provider, &Bounds::default())
                .as_f64()
                .unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
