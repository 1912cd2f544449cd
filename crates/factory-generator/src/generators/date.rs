//! Date value generators.

use crate::provider::FieldProvider;
use chrono::{Months, NaiveDate};
use factory_core::{Bounds, Value};

/// Length of the default date window, ending at the reference date.
pub const DEFAULT_WINDOW_YEARS: u32 = 10;

/// Generate a date for a date-range column.
///
/// Without an explicit range the date falls within the
/// [`DEFAULT_WINDOW_YEARS`] years up to and including `reference`.
pub fn generate_date<P: FieldProvider>(
    provider: &mut P,
    bounds: &Bounds<NaiveDate>,
    reference: NaiveDate,
) -> Value {
    let (start, end) = bounds.explicit().unwrap_or_else(|| {
        let start = reference
            .checked_sub_months(Months::new(DEFAULT_WINDOW_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        (start, reference)
    });
    Value::Date(provider.date_between(start, end))
}
