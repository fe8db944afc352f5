//! Scalar kind to SQLite column type mapping.

use std::fmt;

use crate::error::{Error, Result};

/// The shape of a serialized field value, as seen while enumerating a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Bool,
    Char,
    Str,
    Bytes,
    Unit,
    None,
    Seq,
    Tuple,
    Map,
    Struct,
    Enum,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::Str => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Unit => "unit",
            ScalarKind::None => "none",
            ScalarKind::Seq => "seq",
            ScalarKind::Tuple => "tuple",
            ScalarKind::Map => "map",
            ScalarKind::Struct => "struct",
            ScalarKind::Enum => "enum",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQLite column storage types produced by [`map_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
    Text,
}

impl DataType {
    pub fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Map a scalar kind to its column type.
///
/// SQLite has no boolean storage class, so `bool` maps to INTEGER and is bound
/// as 0/1. 128-bit integers do not fit SQLite's 64-bit INTEGER and are rejected
/// along with every non-scalar kind.
pub fn map_type(kind: ScalarKind) -> Result<DataType> {
    match kind {
        ScalarKind::I8
        | ScalarKind::I16
        | ScalarKind::I32
        | ScalarKind::I64
        | ScalarKind::U8
        | ScalarKind::U16
        | ScalarKind::U32
        | ScalarKind::U64 => Ok(DataType::Integer),
        ScalarKind::F32 | ScalarKind::F64 => Ok(DataType::Real),
        ScalarKind::Str => Ok(DataType::Text),
        ScalarKind::Bool => Ok(DataType::Integer),
        other => Err(Error::UnsupportedType {
            kind: other,
            field: None,
        }),
    }
}
