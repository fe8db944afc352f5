use std::path::PathBuf;

use thiserror::Error;

use crate::types::ScalarKind;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by schema/statement synthesis and the record store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create storage root {path}")]
    StorageRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database {path}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("no open database connection")]
    NotConnected,

    #[error("expected a struct with named fields, found {kind}")]
    NotAStruct { kind: ScalarKind },

    #[error("unsupported column type {kind}{}", field_suffix(.field))]
    UnsupportedType {
        kind: ScalarKind,
        field: Option<String>,
    },

    #[error("record has {columns} columns but {values} values")]
    ColumnMismatch { columns: usize, values: usize },

    #[error("record for table `{table}` has no non-null value to filter on")]
    EmptyPredicate { table: String },

    #[error("table `{table}` would have no columns")]
    NoColumns { table: String },

    #[error("record for table `{table}` does not declare a schema")]
    MissingSchema { table: String },

    #[error("update writes table `{new}` but the identifying record names `{old}`")]
    TableMismatch { old: String, new: String },

    #[error("field `{field}` value {value} does not fit a signed 64-bit integer")]
    IntegerOverflow { field: String, value: u64 },

    #[error("failed to serialize value: {0}")]
    Serialize(String),

    #[error(transparent)]
    Engine(#[from] rusqlite::Error),
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" for field `{name}`"),
        None => String::new(),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Serialize(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_names_field_when_known() {
        let err = Error::UnsupportedType {
            kind: ScalarKind::Seq,
            field: Some("tags".to_string()),
        };
        assert_eq!(err.to_string(), "unsupported column type seq for field `tags`");

        let err = Error::UnsupportedType {
            kind: ScalarKind::Char,
            field: None,
        };
        assert_eq!(err.to_string(), "unsupported column type char");
    }
}
