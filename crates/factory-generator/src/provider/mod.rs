//! Field providers: locale-aware sources of primitive values.
//!
//! A [`FieldProvider`] is the only place randomness comes from. The generator
//! holds one provider per column plus one for the locale context, each
//! created through [`FieldProvider::seeded`], so a provider must be fully
//! deterministic for a given `(locale, seed)`.

pub mod catalog;
pub mod documents;

pub use catalog::CatalogProvider;

use chrono::{Duration, NaiveDate};
use factory_core::{Locale, Value};
use rand::Rng;

/// Locale-aware source of realistic primitive values.
///
/// Implementors supply the locale content ([`generate`](Self::generate),
/// [`email`](Self::email), [`email_domain`](Self::email_domain)) and their
/// random source; the numeric helpers have default implementations on top of
/// [`rng`](Self::rng).
pub trait FieldProvider {
    /// Random source backing this provider.
    type Rng: Rng;

    /// Create a provider for `locale` seeded with `seed`.
    fn seeded(locale: Locale, seed: u64) -> Self
    where
        Self: Sized;

    /// Locale of generated values.
    fn locale(&self) -> Locale;

    /// Mutable access to the random source.
    fn rng(&mut self) -> &mut Self::Rng;

    /// Generate one value for the primitive `name`.
    ///
    /// Returns `None` when this provider has no such primitive.
    fn generate(&mut self, name: &str) -> Option<Value>;

    /// A generic email address, unrelated to any name.
    fn email(&mut self) -> String;

    /// A free-mail domain such as `gmail.com`.
    fn email_domain(&mut self) -> String;

    /// Uniform integer in `[min, max]`.
    fn random_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng().gen_range(min..=max)
    }

    /// Uniform float in `[min, max]`.
    ///
    /// Spans wider than `f64::MAX` are interpolated between the bounds.
    fn random_float(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        if (max - min).is_finite() {
            return self.rng().gen_range(min..=max);
        }
        let u: f64 = self.rng().gen();
        (min * (1.0 - u) + max * u).clamp(min, max)
    }

    /// Uniformly chosen element of a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `choices` is empty.
    fn random_element<'a, T>(&mut self, choices: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        let idx = self.rng().gen_range(0..choices.len());
        &choices[idx]
    }

    /// `true` with probability `true_chance` percent.
    fn boolean(&mut self, true_chance: f64) -> bool {
        let p = (true_chance / 100.0).clamp(0.0, 1.0);
        self.rng().gen_bool(p)
    }

    /// Uniform date in the closed interval `[start, end]`.
    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days();
        if span <= 0 {
            return start;
        }
        let offset = self.rng().gen_range(0..=span);
        start
            .checked_add_signed(Duration::days(offset))
            .unwrap_or(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_inclusive() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = provider.random_int(1, 3);
            assert!((1..=3).contains(&v));
            seen_min |= v == 1;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_random_float_full_f64_range() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 42);
        for _ in 0..200 {
            let v = provider.random_float(f64::MIN, f64::MAX);
            assert!(v.is_finite());
        }
        let v = provider.random_float(-1e308, 1e308);
        assert!((-1e308..=1e308).contains(&v));
    }

    #[test]
    fn test_boolean_extremes() {
        let mut provider = CatalogProvider::seeded(Locale::EnUs, 1);
        assert!((0..100).all(|_| provider.boolean(100.0)));
        assert!((0..100).all(|_| !provider.boolean(0.0)));
    }

    #[test]
    fn test_date_between_closed_interval() {
        let mut provider = CatalogProvider::seeded(Locale::PtBr, 7);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        for _ in 0..100 {
            let d = provider.date_between(start, end);
            assert!(d >= start && d <= end);
        }
        assert_eq!(provider.date_between(end, end), end);
    }

    #[test]
    fn test_random_element() {
        let mut provider = CatalogProvider::seeded(Locale::PtBr, 3);
        let choices = ["a", "b", "c"];
        for _ in 0..20 {
            assert!(choices.contains(provider.random_element(&choices)));
        }
    }
}
