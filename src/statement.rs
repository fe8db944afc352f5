//! Parameterized statement synthesis.
//!
//! Every builder returns a fresh [`SqlQuery`] whose `params` line up with the
//! `?` placeholders in `statement`, left to right.

use crate::config::EmptyFilter;
use crate::error::{Error, Result};
use crate::predicate::{build_predicate, Predicate};
use crate::record::Record;
use crate::value::Value;

/// SQL statement with positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Vec<Value>,
}

impl SqlQuery {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

/// A record's columns and values, checked to be the same length.
struct Row<'r> {
    table: &'r str,
    columns: Vec<&'r str>,
    values: Vec<Value>,
}

impl<'r> Row<'r> {
    fn of<R: Record + ?Sized>(record: &'r R) -> Result<Self> {
        let columns = record.columns();
        let values = record.values();
        if columns.len() != values.len() {
            return Err(Error::ColumnMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            table: record.name(),
            columns,
            values,
        })
    }

    fn predicate(&self) -> Result<Predicate> {
        build_predicate(&self.columns, &self.values)
    }
}

/// ` WHERE <predicate>`, or nothing for an empty predicate under
/// [`EmptyFilter::MatchAll`].
fn where_clause(table: &str, predicate: &Predicate, empty_filter: EmptyFilter) -> Result<String> {
    if !predicate.is_empty() {
        return Ok(format!(" WHERE {}", predicate.clause));
    }
    match empty_filter {
        EmptyFilter::MatchAll => Ok(String::new()),
        EmptyFilter::Reject => Err(Error::EmptyPredicate {
            table: table.to_string(),
        }),
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `INSERT INTO <name> (<cols>) VALUES (?, ...)`; a record without columns
/// inserts `DEFAULT VALUES`.
pub fn insert<R: Record + ?Sized>(record: &R) -> Result<SqlQuery> {
    let row = Row::of(record)?;
    if row.columns.is_empty() {
        return Ok(SqlQuery::new(format!("INSERT INTO {} DEFAULT VALUES", row.table)));
    }
    let statement = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        row.table,
        row.columns.join(", "),
        placeholders(row.columns.len())
    );
    Ok(SqlQuery::new(statement).with_params(row.values))
}

/// Replace every column of the rows identified by `old` with the values of
/// `new`.
///
/// Parameters are `new`'s values in column order followed by `old`'s non-null
/// values.
pub fn update<O, N>(old: &O, new: &N, empty_filter: EmptyFilter) -> Result<SqlQuery>
where
    O: Record + ?Sized,
    N: Record + ?Sized,
{
    let target = Row::of(new)?;
    if target.columns.is_empty() {
        return Err(Error::NoColumns {
            table: target.table.to_string(),
        });
    }
    let identity = Row::of(old)?;
    if identity.table != target.table {
        return Err(Error::TableMismatch {
            old: identity.table.to_string(),
            new: target.table.to_string(),
        });
    }

    let predicate = identity.predicate()?;
    let filter = where_clause(target.table, &predicate, empty_filter)?;
    let assignments = target
        .columns
        .iter()
        .map(|column| format!("{column}=?"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut params = target.values;
    params.extend(predicate.params);
    Ok(SqlQuery::new(format!("UPDATE {} SET {}{}", target.table, assignments, filter))
        .with_params(params))
}

pub fn select_all<R: Record + ?Sized>(record: &R) -> SqlQuery {
    SqlQuery::new(format!("SELECT * FROM {}", record.name()))
}

pub fn select_filtered<R: Record + ?Sized>(record: &R, empty_filter: EmptyFilter) -> Result<SqlQuery> {
    let row = Row::of(record)?;
    let predicate = row.predicate()?;
    let filter = where_clause(row.table, &predicate, empty_filter)?;
    Ok(SqlQuery::new(format!("SELECT * FROM {}{}", row.table, filter)).with_params(predicate.params))
}

/// `DELETE FROM <name> WHERE <predicate>`. With [`EmptyFilter::MatchAll`] an
/// all-null record deletes every row.
pub fn delete<R: Record + ?Sized>(record: &R, empty_filter: EmptyFilter) -> Result<SqlQuery> {
    let row = Row::of(record)?;
    let predicate = row.predicate()?;
    let filter = where_clause(row.table, &predicate, empty_filter)?;
    Ok(SqlQuery::new(format!("DELETE FROM {}{}", row.table, filter)).with_params(predicate.params))
}

/// `DROP TABLE <name>`; fails at execution if the table does not exist.
pub fn drop_table<R: Record + ?Sized>(record: &R) -> SqlQuery {
    SqlQuery::new(format!("DROP TABLE {}", record.name()))
}
