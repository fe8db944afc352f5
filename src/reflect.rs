//! Field enumeration for plain structs.
//!
//! Any `Serialize` struct is walked with a dedicated serializer that records
//! each field's name, scalar kind and value in declaration order. Serde
//! attributes (`rename`, `skip`) are honoured because they shape what the
//! derive emits.

use serde::ser::{self, Impossible, Serialize};

use crate::error::{Error, Result};
use crate::types::ScalarKind;
use crate::value::Value;

/// One named field of a struct.
///
/// The kind alone decides the column type; the captured value is checked for
/// bindability only when it is read with [`Field::value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: ScalarKind,
    raw: Raw,
}

#[derive(Debug, Clone, PartialEq)]
enum Raw {
    Value(Value),
    Unsigned(u64),
}

impl Field {
    /// The field's value as bound to a statement.
    ///
    /// A `u64` above `i64::MAX` fails with [`Error::IntegerOverflow`].
    pub fn value(&self) -> Result<Value> {
        match &self.raw {
            Raw::Value(value) => Ok(value.clone()),
            Raw::Unsigned(v) => i64::try_from(*v)
                .map(Value::Integer)
                .map_err(|_| Error::IntegerOverflow {
                    field: self.name.to_string(),
                    value: *v,
                }),
        }
    }
}

/// Enumerate the fields of `value`, which must serialize as a struct.
pub fn fields<T: Serialize + ?Sized>(value: &T) -> Result<Vec<Field>> {
    value.serialize(StructSerializer)
}

struct StructSerializer;

fn not_a_struct<T>(kind: ScalarKind) -> Result<T> {
    Err(Error::NotAStruct { kind })
}

impl ser::Serializer for StructSerializer {
    type Ok = Vec<Field>;
    type Error = Error;
    type SerializeSeq = Impossible<Vec<Field>, Error>;
    type SerializeTuple = Impossible<Vec<Field>, Error>;
    type SerializeTupleStruct = Impossible<Vec<Field>, Error>;
    type SerializeTupleVariant = Impossible<Vec<Field>, Error>;
    type SerializeMap = Impossible<Vec<Field>, Error>;
    type SerializeStruct = StructFields;
    type SerializeStructVariant = Impossible<Vec<Field>, Error>;

    fn serialize_bool(self, _: bool) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Bool)
    }
    fn serialize_i8(self, _: i8) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::I8)
    }
    fn serialize_i16(self, _: i16) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::I16)
    }
    fn serialize_i32(self, _: i32) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::I32)
    }
    fn serialize_i64(self, _: i64) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::I64)
    }
    fn serialize_i128(self, _: i128) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::I128)
    }
    fn serialize_u8(self, _: u8) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::U8)
    }
    fn serialize_u16(self, _: u16) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::U16)
    }
    fn serialize_u32(self, _: u32) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::U32)
    }
    fn serialize_u64(self, _: u64) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::U64)
    }
    fn serialize_u128(self, _: u128) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::U128)
    }
    fn serialize_f32(self, _: f32) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::F32)
    }
    fn serialize_f64(self, _: f64) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::F64)
    }
    fn serialize_char(self, _: char) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Char)
    }
    fn serialize_str(self, _: &str) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Str)
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Bytes)
    }
    fn serialize_none(self) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::None)
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Unit)
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Unit)
    }
    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Enum)
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok> {
        not_a_struct(ScalarKind::Enum)
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq> {
        not_a_struct(ScalarKind::Seq)
    }
    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple> {
        not_a_struct(ScalarKind::Tuple)
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        not_a_struct(ScalarKind::Tuple)
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        not_a_struct(ScalarKind::Enum)
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap> {
        not_a_struct(ScalarKind::Map)
    }
    fn serialize_struct(self, _: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructFields {
            fields: Vec::with_capacity(len),
        })
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant> {
        not_a_struct(ScalarKind::Enum)
    }
}

struct StructFields {
    fields: Vec<Field>,
}

impl ser::SerializeStruct for StructFields {
    type Ok = Vec<Field>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let (kind, raw) = value.serialize(FieldSerializer { field: key })?;
        self.fields.push(Field {
            name: key,
            kind,
            raw,
        });
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.fields)
    }
}

/// Serializes a single field into its kind and value.
struct FieldSerializer {
    field: &'static str,
}

impl FieldSerializer {
    fn unsupported<T>(&self, kind: ScalarKind) -> Result<T> {
        Err(Error::UnsupportedType {
            kind,
            field: Some(self.field.to_string()),
        })
    }
}

type Scalar = (ScalarKind, Raw);

impl ser::Serializer for FieldSerializer {
    type Ok = Scalar;
    type Error = Error;
    type SerializeSeq = Impossible<Scalar, Error>;
    type SerializeTuple = Impossible<Scalar, Error>;
    type SerializeTupleStruct = Impossible<Scalar, Error>;
    type SerializeTupleVariant = Impossible<Scalar, Error>;
    type SerializeMap = Impossible<Scalar, Error>;
    type SerializeStruct = Impossible<Scalar, Error>;
    type SerializeStructVariant = Impossible<Scalar, Error>;

    fn serialize_bool(self, v: bool) -> Result<Scalar> {
        Ok((ScalarKind::Bool, Raw::Value(Value::Boolean(v))))
    }
    fn serialize_i8(self, v: i8) -> Result<Scalar> {
        Ok((ScalarKind::I8, Raw::Value(Value::from(v))))
    }
    fn serialize_i16(self, v: i16) -> Result<Scalar> {
        Ok((ScalarKind::I16, Raw::Value(Value::from(v))))
    }
    fn serialize_i32(self, v: i32) -> Result<Scalar> {
        Ok((ScalarKind::I32, Raw::Value(Value::from(v))))
    }
    fn serialize_i64(self, v: i64) -> Result<Scalar> {
        Ok((ScalarKind::I64, Raw::Value(Value::from(v))))
    }
    fn serialize_i128(self, _: i128) -> Result<Scalar> {
        self.unsupported(ScalarKind::I128)
    }
    fn serialize_u8(self, v: u8) -> Result<Scalar> {
        Ok((ScalarKind::U8, Raw::Value(Value::from(v))))
    }
    fn serialize_u16(self, v: u16) -> Result<Scalar> {
        Ok((ScalarKind::U16, Raw::Value(Value::from(v))))
    }
    fn serialize_u32(self, v: u32) -> Result<Scalar> {
        Ok((ScalarKind::U32, Raw::Value(Value::from(v))))
    }
    fn serialize_u64(self, v: u64) -> Result<Scalar> {
        Ok((ScalarKind::U64, Raw::Unsigned(v)))
    }
    fn serialize_u128(self, _: u128) -> Result<Scalar> {
        self.unsupported(ScalarKind::U128)
    }
    fn serialize_f32(self, v: f32) -> Result<Scalar> {
        Ok((ScalarKind::F32, Raw::Value(Value::from(v))))
    }
    fn serialize_f64(self, v: f64) -> Result<Scalar> {
        Ok((ScalarKind::F64, Raw::Value(Value::from(v))))
    }
    fn serialize_char(self, v: char) -> Result<Scalar> {
        Ok((ScalarKind::Char, Raw::Value(Value::Text(v.to_string()))))
    }
    fn serialize_str(self, v: &str) -> Result<Scalar> {
        Ok((ScalarKind::Str, Raw::Value(Value::from(v))))
    }
    fn serialize_bytes(self, v: &[u8]) -> Result<Scalar> {
        Ok((ScalarKind::Bytes, Raw::Value(Value::Blob(v.to_vec()))))
    }
    fn serialize_none(self) -> Result<Scalar> {
        Ok((ScalarKind::None, Raw::Value(Value::Null)))
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Scalar> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Scalar> {
        Ok((ScalarKind::Unit, Raw::Value(Value::Null)))
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<Scalar> {
        Ok((ScalarKind::Unit, Raw::Value(Value::Null)))
    }
    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Result<Scalar> {
        self.unsupported(ScalarKind::Enum)
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Scalar> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Scalar> {
        self.unsupported(ScalarKind::Enum)
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq> {
        self.unsupported(ScalarKind::Seq)
    }
    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple> {
        self.unsupported(ScalarKind::Tuple)
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.unsupported(ScalarKind::Tuple)
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.unsupported(ScalarKind::Enum)
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap> {
        self.unsupported(ScalarKind::Map)
    }
    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self::SerializeStruct> {
        self.unsupported(ScalarKind::Struct)
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.unsupported(ScalarKind::Enum)
    }
}
