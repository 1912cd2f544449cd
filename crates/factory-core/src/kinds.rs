//! Column kinds, locales and per-kind parameter validation.

use crate::schema::SchemaError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Raw, not yet validated column parameters.
pub type Params = BTreeMap<String, serde_json::Value>;

/// Kinds that may appear more than once in a schema (auto-suffixed).
pub const REPETITIVE_KINDS: &[&str] = &["age", "price", "date", "time", "boolean", "phoneNumber"];

const PT_BR_KINDS: &[&str] = &[
    "id",
    "name",
    "email",
    "age",
    "cpf",
    "cnpj",
    "price",
    "phoneNumber",
    "job",
    "date",
    "time",
    "boolean",
];

const EN_US_KINDS: &[&str] = &[
    "id",
    "name",
    "email",
    "age",
    "ssn",
    "ein",
    "price",
    "phoneNumber",
    "job",
    "date",
    "time",
    "boolean",
];

/// Default probability (in percent) of a boolean column being true.
pub const DEFAULT_TRUE_CHANCE: f64 = 50.0;

/// Supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese
    #[serde(rename = "pt_BR")]
    PtBr,
    /// American English
    #[serde(rename = "en_US")]
    EnUs,
}

impl Locale {
    /// Locale tag, e.g. `pt_BR`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PtBr => "pt_BR",
            Self::EnUs => "en_US",
        }
    }

    /// Kind tokens this locale accepts, in declaration order.
    pub fn allowed_kinds(&self) -> &'static [&'static str] {
        match self {
            Self::PtBr => PT_BR_KINDS,
            Self::EnUs => EN_US_KINDS,
        }
    }

    /// Check whether `kind` is available in this locale.
    pub fn supports(&self, kind: &str) -> bool {
        self.allowed_kinds().contains(&kind)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt_BR" => Ok(Self::PtBr),
            "en_US" => Ok(Self::EnUs),
            other => Err(SchemaError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Optional lower and upper bound of a ranged column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds<T> {
    /// Lower bound
    pub min: Option<T>,
    /// Upper bound
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Create bounds from optional endpoints.
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// The explicit `(low, high)` range, if any.
    ///
    /// Returns `None` when either bound is unset or both are equal, in which
    /// case the kind's default distribution applies. Inverted bounds are
    /// swapped.
    pub fn explicit(&self) -> Option<(T, T)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min != max => {
                if min > max {
                    Some((max, min))
                } else {
                    Some((min, max))
                }
            }
            _ => None,
        }
    }
}

/// Semantic kind of a column, with its validated parameters.
///
/// Kinds that need dedicated generation rules have their own variant; every
/// other kind is a [`ColumnKind::Primitive`] delegated to the field provider
/// by token.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Row ordinal (0-based)
    Id,
    /// Person name
    Name,
    /// Email, derived from the row's name when one precedes it
    Email,
    /// Integer range
    Age(Bounds<i64>),
    /// Float range, rounded to 2 decimals
    Price(Bounds<f64>),
    /// Calendar date range
    Date(Bounds<NaiveDate>),
    /// 0/1 flag with a true probability in percent
    Boolean {
        /// Probability of `1`, in `[0, 100]`
        true_chance: f64,
    },
    /// Locale-specific phone number
    PhoneNumber,
    /// Any other kind, generated by the provider primitive of the same name
    Primitive(String),
}

impl ColumnKind {
    /// Validate `params` for `token` and build the kind.
    ///
    /// The caller is responsible for checking locale availability first.
    pub fn from_token(token: &str, params: &Params) -> Result<Self, SchemaError> {
        let kind = match token {
            "id" => Self::Id,
            "name" => Self::Name,
            "email" => Self::Email,
            "phoneNumber" => Self::PhoneNumber,
            "age" => {
                let mut reader = ParamReader::new(token, params);
                let min = reader.take_int(&["min", "min_age"])?;
                let max = reader.take_int(&["max", "max_age"])?;
                reader.finish()?;
                return Ok(Self::Age(Bounds::new(min, max)));
            }
            "price" => {
                let mut reader = ParamReader::new(token, params);
                let min = reader.take_number(&["min", "min_price"])?;
                let max = reader.take_number(&["max", "max_price"])?;
                reader.finish()?;
                return Ok(Self::Price(Bounds::new(min, max)));
            }
            "date" => {
                let mut reader = ParamReader::new(token, params);
                let min = reader.take_date(&["min", "min_date"])?;
                let max = reader.take_date(&["max", "max_date"])?;
                reader.finish()?;
                return Ok(Self::Date(Bounds::new(min, max)));
            }
            "boolean" => {
                let mut reader = ParamReader::new(token, params);
                let true_chance = reader
                    .take_number(&["true_chance"])?
                    .unwrap_or(DEFAULT_TRUE_CHANCE);
                if !(0.0..=100.0).contains(&true_chance) {
                    return Err(SchemaError::InvalidParameterRange {
                        kind: token.to_string(),
                        param: "true_chance".to_string(),
                        value: true_chance.to_string(),
                    });
                }
                reader.finish()?;
                return Ok(Self::Boolean { true_chance });
            }
            other => Self::Primitive(other.to_string()),
        };

        ParamReader::new(token, params).finish()?;
        Ok(kind)
    }

    /// Kind token, e.g. `phoneNumber`.
    pub fn token(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Age(_) => "age",
            Self::Price(_) => "price",
            Self::Date(_) => "date",
            Self::Boolean { .. } => "boolean",
            Self::PhoneNumber => "phoneNumber",
            Self::Primitive(token) => token,
        }
    }

    /// Whether this kind may be declared more than once.
    pub fn is_repetitive(&self) -> bool {
        REPETITIVE_KINDS.contains(&self.token())
    }

    /// Human-readable parameter summary, empty when the kind has none.
    pub fn describe_params(&self) -> String {
        fn opt<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "None".to_string())
        }

        match self {
            Self::Age(b) => format!("min={}, max={}", opt(&b.min), opt(&b.max)),
            Self::Price(b) => format!("min={}, max={}", opt(&b.min), opt(&b.max)),
            Self::Date(b) => format!("min={}, max={}", opt(&b.min), opt(&b.max)),
            Self::Boolean { true_chance } => format!("true_chance={true_chance}"),
            _ => String::new(),
        }
    }
}

/// Consumes recognised keys from a parameter map and rejects leftovers.
struct ParamReader<'a> {
    kind: &'a str,
    remaining: BTreeMap<String, &'a serde_json::Value>,
}

impl<'a> ParamReader<'a> {
    fn new(kind: &'a str, params: &'a Params) -> Self {
        Self {
            kind,
            remaining: params.iter().map(|(k, v)| (k.clone(), v)).collect(),
        }
    }

    /// Remove the first present alias; `null` counts as unset.
    fn take(&mut self, aliases: &[&str]) -> Option<(String, &'a serde_json::Value)> {
        let mut found = None;
        for alias in aliases {
            if let Some(value) = self.remaining.remove(*alias) {
                if found.is_none() && !value.is_null() {
                    found = Some((alias.to_string(), value));
                }
            }
        }
        found
    }

    fn type_error(&self, param: String, expected: &str) -> SchemaError {
        SchemaError::InvalidParameterType {
            kind: self.kind.to_string(),
            param,
            expected: expected.to_string(),
        }
    }

    fn take_int(&mut self, aliases: &[&str]) -> Result<Option<i64>, SchemaError> {
        match self.take(aliases) {
            None => Ok(None),
            Some((param, value)) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.type_error(param, "int")),
        }
    }

    fn take_number(&mut self, aliases: &[&str]) -> Result<Option<f64>, SchemaError> {
        match self.take(aliases) {
            None => Ok(None),
            Some((param, value)) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.type_error(param, "int or float")),
        }
    }

    fn take_date(&mut self, aliases: &[&str]) -> Result<Option<NaiveDate>, SchemaError> {
        match self.take(aliases) {
            None => Ok(None),
            Some((param, value)) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| self.type_error(param, "str (YYYY-MM-DD)"))?;
                parse_date(text).map(Some)
            }
        }
    }

    fn finish(self) -> Result<(), SchemaError> {
        match self.remaining.keys().next() {
            Some(param) => Err(SchemaError::UnknownParameter {
                kind: self.kind.to_string(),
                param: param.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, SchemaError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| SchemaError::InvalidDateFormat(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_locale_kind_sets() {
        assert!(Locale::PtBr.supports("cpf"));
        assert!(!Locale::PtBr.supports("ssn"));
        assert!(Locale::EnUs.supports("ein"));
        assert!(!Locale::EnUs.supports("cnpj"));
        assert!(matches!(
            "fr_FR".parse::<Locale>(),
            Err(SchemaError::UnsupportedLocale(_))
        ));
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PtBr);
    }

    #[test]
    fn test_bounds_explicit() {
        assert_eq!(Bounds::new(Some(5), Some(1)).explicit(), Some((1, 5)));
        assert_eq!(Bounds::new(Some(3), Some(3)).explicit(), None);
        assert_eq!(Bounds::new(Some(3), None).explicit(), None);
        assert_eq!(Bounds::<i64>::default().explicit(), None);
    }

    #[test]
    fn test_age_params() {
        let kind = ColumnKind::from_token("age", &params(json!({"min": 18, "max": 30}))).unwrap();
        assert_eq!(kind, ColumnKind::Age(Bounds::new(Some(18), Some(30))));

        let alias = ColumnKind::from_token("age", &params(json!({"min_age": 18}))).unwrap();
        assert_eq!(alias, ColumnKind::Age(Bounds::new(Some(18), None)));

        let err = ColumnKind::from_token("age", &params(json!({"min": 1.5}))).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameterType { .. }));
    }

    #[test]
    fn test_price_accepts_int_and_float() {
        let kind =
            ColumnKind::from_token("price", &params(json!({"min": 1, "max": 9.5}))).unwrap();
        assert_eq!(kind, ColumnKind::Price(Bounds::new(Some(1.0), Some(9.5))));

        let err = ColumnKind::from_token("price", &params(json!({"max": "10"}))).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameterType { .. }));
    }

    #[test]
    fn test_date_params() {
        let kind = ColumnKind::from_token(
            "date",
            &params(json!({"min": "2020-01-01", "max": null})),
        )
        .unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(kind, ColumnKind::Date(Bounds::new(expected, None)));

        let err = ColumnKind::from_token("date", &params(json!({"min": "01/02/2020"})))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDateFormat(_)));

        let err = ColumnKind::from_token("date", &params(json!({"min": 20200101}))).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameterType { .. }));
    }

    #[test]
    fn test_boolean_true_chance() {
        let kind = ColumnKind::from_token("boolean", &Params::new()).unwrap();
        assert_eq!(kind, ColumnKind::Boolean { true_chance: 50.0 });

        let err = ColumnKind::from_token("boolean", &params(json!({"true_chance": 101})))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameterRange { .. }));

        let err = ColumnKind::from_token("boolean", &params(json!({"true_chance": "high"})))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameterType { .. }));
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = ColumnKind::from_token("job", &params(json!({"min": 1}))).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownParameter { .. }));

        let err = ColumnKind::from_token("age", &params(json!({"step": 1}))).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownParameter { .. }));
    }

    #[test]
    fn test_repetitive_kinds() {
        assert!(ColumnKind::PhoneNumber.is_repetitive());
        assert!(ColumnKind::Primitive("time".to_string()).is_repetitive());
        assert!(!ColumnKind::Name.is_repetitive());
        assert!(!ColumnKind::Primitive("job".to_string()).is_repetitive());
    }
}
