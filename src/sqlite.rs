use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EmptyFilter, SqliteConfig};
use crate::error::{Error, Result};
use crate::record::{Record, RecordBuf};
use crate::schema;
use crate::statement::{self, SqlQuery};
use crate::value::Value;

/// Rows returned by a select, fully read from the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value of `column` in row `row`
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<Value>> {
        self.rows.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Vec<Value>;
    type IntoIter = std::vec::IntoIter<Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Record operations bound to one borrowed connection or transaction.
pub struct Session<'c> {
    conn: &'c Connection,
    empty_filter: EmptyFilter,
}

impl<'c> Session<'c> {
    fn new(conn: &'c Connection, empty_filter: EmptyFilter) -> Self {
        Self { conn, empty_filter }
    }

    fn execute(&self, query: &SqlQuery) -> Result<usize> {
        debug!(sql = %query.statement, params = query.params.len(), "executing statement");
        Ok(self
            .conn
            .execute(&query.statement, params_from_iter(&query.params))?)
    }

    fn query(&self, query: &SqlQuery) -> Result<ResultSet> {
        debug!(sql = %query.statement, params = query.params.len(), "running query");
        let mut stmt = self.conn.prepare(&query.statement)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();
        let rows = stmt
            .query_map(params_from_iter(&query.params), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ResultSet { columns, rows })
    }

    /// Create the record's table from its declared schema.
    pub fn create_table<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.execute(&schema::create_table(record)?)?;
        Ok(())
    }

    /// Create `table` with one column per field of `value`.
    pub fn create_table_from_value<T: Serialize + ?Sized>(&self, table: &str, value: &T) -> Result<()> {
        self.execute(&schema::create_table_from_value(table, value)?)?;
        Ok(())
    }

    pub fn insert<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.execute(&statement::insert(record)?)?;
        Ok(())
    }

    /// Insert the fields of `value` as one row of `table`.
    pub fn insert_from_value<T: Serialize + ?Sized>(&self, table: &str, value: &T) -> Result<()> {
        self.insert(&RecordBuf::from_struct(table, value)?)
    }

    /// Delete rows matching the record's non-null columns. Returns the number
    /// of rows removed, which may be zero.
    pub fn delete<R: Record + ?Sized>(&self, record: &R) -> Result<usize> {
        self.execute(&statement::delete(record, self.empty_filter)?)
    }

    pub fn drop_table<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.execute(&statement::drop_table(record))?;
        Ok(())
    }

    /// Overwrite rows identified by `old` with every column of `new`.
    pub fn update<O, N>(&self, old: &O, new: &N) -> Result<usize>
    where
        O: Record + ?Sized,
        N: Record + ?Sized,
    {
        self.execute(&statement::update(old, new, self.empty_filter)?)
    }

    pub fn select_all<R: Record + ?Sized>(&self, record: &R) -> Result<ResultSet> {
        self.query(&statement::select_all(record))
    }

    pub fn select_filtered<R: Record + ?Sized>(&self, record: &R) -> Result<ResultSet> {
        self.query(&statement::select_filtered(record, self.empty_filter)?)
    }
}

/// Connection-holding entry point: one database file per open name.
pub struct SqliteStore {
    config: SqliteConfig,
    connection: Option<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Create a closed store with the given config
    pub fn new(config: SqliteConfig) -> Self {
        Self {
            config,
            connection: None,
            path: None,
        }
    }

    /// Open a store backed by a private in-memory database.
    pub fn open_in_memory(config: SqliteConfig) -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(Self {
            config,
            connection: Some(connection),
            path: None,
        })
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// File backing the open database, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open `<root>/<name>.<extension>`, creating the root directory first.
    ///
    /// A connection that is already open is closed and replaced.
    pub fn open(&mut self, name: &str) -> Result<()> {
        let root = &self.config.root;
        std::fs::create_dir_all(root).map_err(|source| Error::StorageRoot {
            path: root.clone(),
            source,
        })?;

        let path = self.config.database_path(name);
        info!(path = %path.display(), "opening sqlite database");
        let connection = Connection::open(&path).map_err(|source| Error::Connection {
            path: path.clone(),
            source,
        })?;

        self.connection = Some(connection);
        self.path = Some(path);
        Ok(())
    }

    /// Release the connection. Closing a closed store does nothing.
    pub fn close(&mut self) -> Result<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };
        if let Some(path) = self.path.take() {
            info!(path = %path.display(), "closing sqlite database");
        }
        connection.close().map_err(|(_, err)| Error::Engine(err))
    }

    fn session(&self) -> Result<Session<'_>> {
        let conn = self.connection.as_ref().ok_or(Error::NotConnected)?;
        Ok(Session::new(conn, self.config.empty_filter))
    }

    /// Run `f` inside a transaction, committing on `Ok` and rolling back on
    /// `Err`.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Session<'_>) -> Result<T>,
    {
        let empty_filter = self.config.empty_filter;
        let conn = self.connection.as_mut().ok_or(Error::NotConnected)?;
        let tx = conn.transaction()?;
        let value = f(&Session::new(&tx, empty_filter))?;
        tx.commit()?;
        Ok(value)
    }

    pub fn create_table<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.session()?.create_table(record)
    }

    pub fn create_table_from_value<T: Serialize + ?Sized>(&self, table: &str, value: &T) -> Result<()> {
        self.session()?.create_table_from_value(table, value)
    }

    pub fn insert<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.session()?.insert(record)
    }

    pub fn insert_from_value<T: Serialize + ?Sized>(&self, table: &str, value: &T) -> Result<()> {
        self.session()?.insert_from_value(table, value)
    }

    pub fn delete<R: Record + ?Sized>(&self, record: &R) -> Result<usize> {
        self.session()?.delete(record)
    }

    pub fn drop_table<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.session()?.drop_table(record)
    }

    pub fn update<O, N>(&self, old: &O, new: &N) -> Result<usize>
    where
        O: Record + ?Sized,
        N: Record + ?Sized,
    {
        self.session()?.update(old, new)
    }

    pub fn select_all<R: Record + ?Sized>(&self, record: &R) -> Result<ResultSet> {
        self.session()?.select_all(record)
    }

    pub fn select_filtered<R: Record + ?Sized>(&self, record: &R) -> Result<ResultSet> {
        self.session()?.select_filtered(record)
    }
}
