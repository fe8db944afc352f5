//! `CREATE TABLE IF NOT EXISTS` synthesis.
//!
//! A table is described either by the record's own schema fragment, passed
//! through untouched, or by the fields of a plain struct mapped through
//! [`map_type`]. Re-running either statement against an existing table is a
//! no-op and never changes its shape.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::reflect::{self, Field};
use crate::statement::SqlQuery;
use crate::types::map_type;

pub fn create_table_sql(name: &str, columns: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {name} ({columns})")
}

/// Wrap the record's declared schema. The fragment is not validated; a
/// malformed one fails when executed.
pub fn create_table<R: Record + ?Sized>(record: &R) -> Result<SqlQuery> {
    let schema = record.schema().ok_or_else(|| Error::MissingSchema {
        table: record.name().to_string(),
    })?;
    Ok(SqlQuery::new(create_table_sql(record.name(), schema)))
}

/// Derive the column list from a struct's fields.
///
/// The first field without a column type aborts synthesis; nothing partial is
/// returned. Column types follow the value passed in, so an `Option` field
/// holding `None` has no type and fails with `UnsupportedType`: pass an
/// example with every optional field set to `Some`. A struct with no
/// serialized fields fails with [`Error::NoColumns`].
pub fn create_table_from_value<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<SqlQuery> {
    let fields = reflect::fields(value)?;
    if fields.is_empty() {
        return Err(Error::NoColumns {
            table: name.to_string(),
        });
    }
    let columns = column_definitions(&fields)?;
    Ok(SqlQuery::new(create_table_sql(name, &columns.join(", "))))
}

fn column_definitions(fields: &[Field]) -> Result<Vec<String>> {
    fields
        .iter()
        .map(|field| {
            let data_type = map_type(field.kind).map_err(|_| Error::UnsupportedType {
                kind: field.kind,
                field: Some(field.name.to_string()),
            })?;
            Ok(format!("{} {}", field.name, data_type))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordBuf;
    use crate::types::ScalarKind;

    #[derive(Serialize)]
    struct Account {
        id: i64,
        owner: String,
        balance: f64,
        frozen: bool,
        level: u8,
    }

    #[derive(Serialize)]
    struct Session {
        token: String,
        started: Option<i64>,
    }

    #[test]
    fn wraps_explicit_schema() {
        let record = RecordBuf::new("users").with_schema("id INTEGER PRIMARY KEY, name TEXT");
        let query = create_table(&record).unwrap();
        assert_eq!(
            query.statement,
            "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT)"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn explicit_schema_is_not_validated() {
        let record = RecordBuf::new("broken").with_schema("this is not sql");
        let query = create_table(&record).unwrap();
        assert_eq!(query.statement, "CREATE TABLE IF NOT EXISTS broken (this is not sql)");
    }

    #[test]
    fn missing_schema_is_an_error() {
        let err = create_table(&RecordBuf::new("users")).unwrap_err();
        assert!(matches!(err, Error::MissingSchema { table } if table == "users"));
    }

    #[test]
    fn derives_columns_from_struct() {
        let account = Account {
            id: 1,
            owner: "Ann".to_string(),
            balance: 10.5,
            frozen: false,
            level: 3,
        };
        let query = create_table_from_value("accounts", &account).unwrap();
        assert_eq!(
            query.statement,
            "CREATE TABLE IF NOT EXISTS accounts \
             (id INTEGER, owner TEXT, balance REAL, frozen INTEGER, level INTEGER)"
        );
    }

    #[test]
    fn column_count_matches_field_count() {
        let query = create_table_from_value(
            "sessions",
            &Session {
                token: "t".to_string(),
                started: Some(5),
            },
        )
        .unwrap();
        let body = query
            .statement
            .split_once('(')
            .and_then(|(_, rest)| rest.strip_suffix(')'))
            .unwrap();
        assert_eq!(body.split(", ").count(), 2);
        assert!(body.ends_with("started INTEGER"));
    }

    #[test]
    fn none_field_has_no_column_type() {
        let err = create_table_from_value(
            "sessions",
            &Session {
                token: "t".to_string(),
                started: None,
            },
        )
        .unwrap_err();
        match err {
            Error::UnsupportedType { kind, field } => {
                assert_eq!(kind, ScalarKind::None);
                assert_eq!(field.as_deref(), Some("started"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn char_field_is_unsupported() {
        #[derive(Serialize)]
        struct Grade {
            student: String,
            letter: char,
        }
        let err = create_table_from_value(
            "grades",
            &Grade {
                student: "Ann".to_string(),
                letter: 'A',
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedType {
                kind: ScalarKind::Char,
                ..
            }
        ));
    }

    #[test]
    fn u64_column_type_ignores_magnitude() {
        #[derive(Serialize)]
        struct Counter {
            id: i64,
            hits: u64,
        }
        let small = create_table_from_value("counters", &Counter { id: 1, hits: 5 }).unwrap();
        let large = create_table_from_value(
            "counters",
            &Counter {
                id: 1,
                hits: u64::MAX,
            },
        )
        .unwrap();
        assert_eq!(
            large.statement,
            "CREATE TABLE IF NOT EXISTS counters (id INTEGER, hits INTEGER)"
        );
        assert_eq!(small, large);
    }

    #[test]
    fn fieldless_structs_are_rejected() {
        #[derive(Serialize)]
        struct Marker;
        #[derive(Serialize)]
        struct Empty {}
        #[derive(Serialize)]
        struct AllSkipped {
            #[serde(skip)]
            #[allow(dead_code)]
            cache: Vec<u8>,
        }

        assert!(matches!(
            create_table_from_value("markers", &Marker),
            Err(Error::NotAStruct {
                kind: ScalarKind::Unit
            })
        ));
        assert!(matches!(
            create_table_from_value("empty", &Empty {}),
            Err(Error::NoColumns { table }) if table == "empty"
        ));
        assert!(matches!(
            create_table_from_value("skipped", &AllSkipped { cache: vec![] }),
            Err(Error::NoColumns { .. })
        ));
    }

    #[test]
    fn non_struct_is_rejected() {
        let err = create_table_from_value("numbers", &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::NotAStruct { .. }));
    }
}
