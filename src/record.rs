use serde::Serialize;

use crate::error::Result;
use crate::reflect;
use crate::value::Value;

/// A row-shaped value the store knows how to persist.
///
/// `columns` and `values` must have the same length; statement synthesis
/// fails with [`crate::Error::ColumnMismatch`] otherwise. A [`Value::Null`]
/// entry is left out of WHERE predicates built from the record.
pub trait Record {
    /// Table name.
    fn name(&self) -> &str;

    /// Column definitions used verbatim inside `CREATE TABLE ... (<schema>)`.
    fn schema(&self) -> Option<&str> {
        None
    }

    fn columns(&self) -> Vec<&str>;

    fn values(&self) -> Vec<Value>;
}

impl<R: Record + ?Sized> Record for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn schema(&self) -> Option<&str> {
        (**self).schema()
    }

    fn columns(&self) -> Vec<&str> {
        (**self).columns()
    }

    fn values(&self) -> Vec<Value> {
        (**self).values()
    }
}

/// Owned, general-purpose [`Record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBuf {
    name: String,
    schema: Option<String>,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl RecordBuf {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build from parallel column/value lists. Lengths are not checked here.
    pub fn from_parts(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: columns.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
        }
    }

    /// Capture the fields of a plain struct as columns and values.
    pub fn from_struct<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> Result<Self> {
        let fields = reflect::fields(value)?;
        let mut columns = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());
        for field in &fields {
            values.push(field.value()?);
            columns.push(field.name.to_string());
        }
        Ok(Self {
            name: name.into(),
            schema: None,
            columns,
            values,
        })
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Append a column and its value
    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
        self
    }

    pub fn with_null(self, column: &str) -> Self {
        self.with_value(column, Value::Null)
    }
}

impl Record for RecordBuf {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    fn values(&self) -> Vec<Value> {
        self.values.clone()
    }
}
