//! Built-in field provider backed by the `fake` locale catalogues.

use super::documents::{generate_cnpj, generate_cpf, generate_ein, generate_ssn};
use super::FieldProvider;
use crate::generators::email::slugify;
use factory_core::{Locale, Value};
use fake::faker::internet::raw::FreeEmailProvider;
use fake::faker::job::raw::Title as JobTitle;
use fake::faker::name::raw::{FirstName, LastName, Name, NameWithTitle};
use fake::faker::phone_number::raw::{CellNumber, PhoneNumber};
use fake::locales::{EN, PT_BR};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draw one `String` from a `fake` faker in the provider's locale.
macro_rules! localized {
    ($provider:expr, $faker:ident) => {
        match $provider.locale {
            Locale::PtBr => $faker(PT_BR).fake_with_rng::<String, _>(&mut $provider.rng),
            Locale::EnUs => $faker(EN).fake_with_rng::<String, _>(&mut $provider.rng),
        }
    };
}

/// Seeded provider over the `fake` catalogues of the active locale.
///
/// Primitives: `name`, `first_name`, `last_name`, `email`, `job`, `time`,
/// `phone_number`, `free_email_domain`, plus `cpf`, `cnpj` and
/// `cellphone_number` for pt_BR and `ssn`, `ein` for en_US.
///
/// Every faker draws from the provider's own `StdRng`, so output depends only
/// on `(locale, seed)` and the call sequence.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    locale: Locale,
    rng: StdRng,
}

impl CatalogProvider {
    fn first_name(&mut self) -> String {
        localized!(self, FirstName)
    }

    fn last_name(&mut self) -> String {
        localized!(self, LastName)
    }

    /// Full name, one in ten with an honorific.
    fn name(&mut self) -> String {
        if self.rng.gen_ratio(1, 10) {
            localized!(self, NameWithTitle)
        } else {
            localized!(self, Name)
        }
    }

    fn time(&mut self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.rng.gen_range(0..24),
            self.rng.gen_range(0..60),
            self.rng.gen_range(0..60)
        )
    }
}

impl FieldProvider for CatalogProvider {
    type Rng = StdRng;

    fn seeded(locale: Locale, seed: u64) -> Self {
        Self {
            locale,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn generate(&mut self, name: &str) -> Option<Value> {
        let text = match (name, self.locale) {
            ("name", _) => self.name(),
            ("first_name", _) => self.first_name(),
            ("last_name", _) => self.last_name(),
            ("email", _) => self.email(),
            ("free_email_domain", _) => self.email_domain(),
            ("job", _) => localized!(self, JobTitle),
            ("time", _) => self.time(),
            ("phone_number", _) => localized!(self, PhoneNumber),
            ("cellphone_number", Locale::PtBr) => {
                CellNumber(PT_BR).fake_with_rng::<String, _>(&mut self.rng)
            }
            ("cpf", Locale::PtBr) => generate_cpf(&mut self.rng),
            ("cnpj", Locale::PtBr) => generate_cnpj(&mut self.rng),
            ("ssn", Locale::EnUs) => generate_ssn(&mut self.rng),
            ("ein", Locale::EnUs) => generate_ein(&mut self.rng),
            _ => return None,
        };
        Some(Value::Text(text))
    }

    /// ASCII username from a last name plus a number, at a free-mail domain.
    fn email(&mut self) -> String {
        let user = slugify(&self.last_name()).to_lowercase().replace(' ', "");
        let number = self.rng.gen_range(1..1000);
        let domain = self.email_domain();
        format!("{user}{number}@{domain}")
    }

    fn email_domain(&mut self) -> String {
        localized!(self, FreeEmailProvider)
    }
}
