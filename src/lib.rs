//! Generic record access over SQLite.
//!
//! # Intention
//!
//! - Let callers describe a table once (name, schema, columns, values) and get
//!   create/insert/update/delete/select without writing SQL per type.
//! - Keep statement synthesis pure so it can be tested without a database.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - No query planning, relationship mapping, migrations or pooling.

pub mod config;
pub mod error;
pub mod predicate;
pub mod record;
pub mod reflect;
pub mod schema;
pub mod sqlite;
pub mod statement;
pub mod types;
pub mod value;

pub use config::{EmptyFilter, SqliteConfig};
pub use error::{Error, Result};
pub use predicate::{build_predicate, Predicate};
pub use record::{Record, RecordBuf};
pub use sqlite::{ResultSet, Session, SqliteStore};
pub use statement::SqlQuery;
pub use types::{map_type, DataType, ScalarKind};
pub use value::Value;
