//! Conjunctive WHERE predicates over a record's non-null columns.

use crate::error::{Error, Result};
use crate::value::Value;

/// `col = ? AND col = ?` text plus the values bound to its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub clause: String,
    pub params: Vec<Value>,
}

impl Predicate {
    /// True when every value was null, so nothing constrains the rows.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of `AND`-joined terms.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Build a predicate matching every column whose value is not null.
///
/// Column order is preserved and repeated names are kept as-is. An all-null
/// input yields an empty predicate; callers decide what that means.
pub fn build_predicate<S: AsRef<str>>(columns: &[S], values: &[Value]) -> Result<Predicate> {
    if columns.len() != values.len() {
        return Err(Error::ColumnMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut terms = Vec::new();
    let mut params = Vec::new();
    for (column, value) in columns.iter().zip(values) {
        if value.is_null() {
            continue;
        }
        terms.push(format!("{} = ?", column.as_ref()));
        params.push(value.clone());
    }

    Ok(Predicate {
        clause: terms.join(" AND "),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_non_null_columns() {
        let predicate = build_predicate(
            &["id", "name"],
            &[Value::Integer(1), Value::Text("Ann".to_string())],
        )
        .unwrap();
        assert_eq!(predicate.clause, "id = ? AND name = ?");
        assert_eq!(
            predicate.params,
            [Value::Integer(1), Value::Text("Ann".to_string())]
        );
        assert_eq!(predicate.len(), 2);
    }

    #[test]
    fn skips_nulls() {
        let predicate = build_predicate(
            &["id", "name", "age"],
            &[Value::Null, Value::Text("Ann".to_string()), Value::Null],
        )
        .unwrap();
        assert_eq!(predicate.clause, "name = ?");
        assert_eq!(predicate.len(), 1);
    }

    #[test]
    fn all_null_is_empty() {
        let predicate = build_predicate(&["id", "name"], &[Value::Null, Value::Null]).unwrap();
        assert!(predicate.is_empty());
        assert_eq!(predicate.clause, "");
    }

    #[test]
    fn repeated_columns_are_kept() {
        let predicate = build_predicate(
            &["id", "id"],
            &[Value::Integer(1), Value::Integer(2)],
        )
        .unwrap();
        assert_eq!(predicate.clause, "id = ? AND id = ?");
    }

    #[test]
    fn term_count_matches_non_null_values() {
        let columns = ["a", "b", "c", "d"];
        let rows = [
            [Value::Null, Value::Null, Value::Null, Value::Null],
            [Value::Integer(1), Value::Null, Value::Boolean(false), Value::Null],
            [
                Value::Real(0.5),
                Value::Text(String::new()),
                Value::Blob(vec![]),
                Value::Integer(0),
            ],
        ];
        for values in &rows {
            let predicate = build_predicate(&columns, values).unwrap();
            let non_null = values.iter().filter(|v| !v.is_null()).count();
            assert_eq!(predicate.len(), non_null);
            let terms = if predicate.clause.is_empty() {
                0
            } else {
                predicate.clause.split(" AND ").count()
            };
            assert_eq!(terms, non_null);
        }
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = build_predicate(&["id", "name"], &[Value::Integer(1)]).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnMismatch {
                columns: 2,
                values: 1
            }
        ));
    }
}
