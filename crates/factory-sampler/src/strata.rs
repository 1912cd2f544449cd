//! Row grouping and proportional allocation.

use factory_core::{Row, Value};
use std::collections::HashMap;
use std::sync::Arc;

static MISSING: Value = Value::Null;

/// Rows sharing one value of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    /// Shared column value
    pub key: &'a Value,
    /// Member rows, in table order
    pub rows: Vec<&'a Arc<Row>>,
}

/// Group `rows` by their value in `column`, in order of first appearance.
///
/// Rows without the column fall into the null group.
pub fn group_rows<'a>(rows: &'a [Arc<Row>], column: &str) -> Vec<Group<'a>> {
    let mut positions: HashMap<&'a Value, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for row in rows {
        let key = row.get(column).unwrap_or(&MISSING);
        let idx = *positions.entry(key).or_insert_with(|| {
            groups.push(Group {
                key,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].rows.push(row);
    }
    groups
}

/// Split `n` across groups of the given sizes proportionally.
///
/// Each share is `size / total * n` rounded half to even. The rounding
/// discrepancy is added to (or taken from) the first group with the largest
/// share, never going below zero.
pub fn allocate_proportionally(sizes: &[usize], n: usize) -> Vec<usize> {
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return vec![0; sizes.len()];
    }

    let mut shares: Vec<i64> = sizes
        .iter()
        .map(|&size| (size as f64 / total as f64 * n as f64).round_ties_even() as i64)
        .collect();

    let diff = n as i64 - shares.iter().sum::<i64>();
    if diff != 0 {
        let largest = shares
            .iter()
            .enumerate()
            .fold(0, |best, (i, &share)| if share > shares[best] { i } else { best });
        shares[largest] = (shares[largest] + diff).max(0);
    }

    shares.into_iter().map(|share| share as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: &str) -> Arc<Row> {
        Arc::new(Row::from([("g".to_string(), Value::from(group))]))
    }

    #[test]
    fn test_group_rows_first_appearance_order() {
        let rows = vec![row("b"), row("a"), row("b"), row("c"), row("a")];
        let groups = group_rows(&rows, "g");
        let keys: Vec<&Value> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![&Value::from("b"), &Value::from("a"), &Value::from("c")]);
        assert_eq!(groups[0].rows.len(), 2);
        assert!(Arc::ptr_eq(groups[1].rows[1], &rows[4]));
    }

    #[test]
    fn test_missing_column_groups_as_null() {
        let rows = vec![row("x"), Arc::new(Row::new())];
        let groups = group_rows(&rows, "g");
        assert_eq!(groups[1].key, &Value::Null);
    }

    #[test]
    fn test_allocate_seventy_thirty() {
        assert_eq!(allocate_proportionally(&[70, 30], 10), vec![7, 3]);
    }

    #[test]
    fn test_allocate_moves_discrepancy_to_largest() {
        // 2/3 rounds to 1 three times; the surplus comes off the first group
        assert_eq!(allocate_proportionally(&[1, 1, 1], 2), vec![0, 1, 1]);
        // 0.5 rounds to 0 (half to even); the shortfall goes to the first group
        assert_eq!(allocate_proportionally(&[5, 5], 1), vec![1, 0]);
        // 2.5 -> 2, 1.5 -> 2, 1.0 -> 1
        assert_eq!(allocate_proportionally(&[5, 3, 2], 5), vec![2, 2, 1]);
    }

    #[test]
    fn test_allocation_sums_to_n() {
        for n in 1..40 {
            let shares = allocate_proportionally(&[13, 7, 7, 3, 1], n);
            assert_eq!(shares.iter().sum::<usize>(), n, "n = {n}");
        }
    }
}
