//! Static record schemas.
//!
//! Wire records that feed the generic metric mapper are declared with the
//! [`record!`](crate::record) macro. It emits the serde struct, a static
//! [`RecordSchema`] describing every field in declaration order, and a
//! [`Record`] impl that yields the field values in that same order. The mapper
//! walks the schema without an instance and the values with one; both see the
//! fields in the order they were declared.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};

/// Kind of a single record field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Numeric leaf, turned into a metric family.
    Numeric,
    /// Boolean leaf.
    Flag,
    /// Free-form string leaf.
    Text,
    /// Identity of the enclosing record; feeds the composite name label.
    Name,
    /// A single nested record.
    Nested(fn() -> &'static RecordSchema),
    /// A sequence of nested records sharing one schema.
    Repeated(fn() -> &'static RecordSchema),
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "numeric",
            FieldKind::Flag => "flag",
            FieldKind::Text => "text",
            FieldKind::Name => "name",
            FieldKind::Nested(_) => "nested",
            FieldKind::Repeated(_) => "repeated",
        }
    }
}

/// Static description of one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Path segment used in derived metric names.
    pub segment: &'static str,
    /// Element name on the wire.
    pub xml_name: &'static str,
    pub kind: FieldKind,
}

/// Static description of a record shape.
#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl RecordSchema {
    /// Look up a field by its path segment.
    pub fn field(&self, segment: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.segment == segment)
    }

    /// Number of numeric leaves reachable from this schema, counting each
    /// repeated element schema once.
    pub fn numeric_leaf_count(&self) -> usize {
        self.fields
            .iter()
            .map(|field| match field.kind {
                FieldKind::Numeric => 1,
                FieldKind::Nested(schema) | FieldKind::Repeated(schema) => {
                    schema().numeric_leaf_count()
                }
                _ => 0,
            })
            .sum()
    }
}

/// Value of one field of a record instance.
#[derive(Debug)]
pub enum FieldValue<'a> {
    Numeric(f64),
    Flag(bool),
    Text(&'a str),
    Name(&'a str),
    Nested(&'a dyn Record),
    Repeated(Vec<&'a dyn Record>),
}

impl FieldValue<'_> {
    pub fn kind_str(&self) -> &'static str {
        match self {
            FieldValue::Numeric(_) => "numeric",
            FieldValue::Flag(_) => "flag",
            FieldValue::Text(_) => "text",
            FieldValue::Name(_) => "name",
            FieldValue::Nested(_) => "nested",
            FieldValue::Repeated(_) => "repeated",
        }
    }
}

/// A record instance whose shape is described by a static schema.
pub trait Record: fmt::Debug + Send + Sync {
    /// Schema of the implementing type.
    fn schema() -> &'static RecordSchema
    where
        Self: Sized;

    /// Schema of this instance, usable through `dyn Record`.
    fn record_schema(&self) -> &'static RecordSchema;

    /// Field values in schema order.
    fn fields(&self) -> Vec<FieldValue<'_>>;
}

/// Decoding of one `record!` field from the wire.
///
/// Numeric leaves accept an empty element as zero; every other field kind
/// decodes with its plain serde impl.
pub trait WireField: Sized {
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;
}

impl WireField for f64 {
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_f64(deserializer)
    }
}

impl WireField for bool {
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer)
    }
}

impl WireField for String {
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)
    }
}

impl<T: for<'a> Deserialize<'a>> WireField for Vec<T> {
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::deserialize(deserializer)
    }
}

/// `deserialize_with` target emitted by [`record!`](crate::record).
#[doc(hidden)]
pub fn decode_field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: WireField,
{
    T::decode(deserializer)
}

/// Decode a number, reading an empty or blank element as `0.0`.
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_str(LenientNumber)
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or an empty element")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        trimmed
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

/// Declare a wire record together with its static schema.
///
/// Each field is written `ident: kind => "xmlName" [as "Segment"]` where kind
/// is one of `numeric`, `flag`, `text`, `name`, `nested(Type)` or
/// `repeated(Type)`. The segment defaults to the element name. Numeric fields
/// decode an empty element as zero. Crates invoking the macro need `serde` as
/// a dependency and this crate under the name `sonus_client`.
///
/// ```ignore
/// record! {
///     pub struct PeerStats {
///         name: name => "name",
///         inbound_sessions: numeric => "inboundSessions" as "InboundSessions",
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $kind:ident $(($inner:ty))? => $xml:literal $(as $segment:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $xml, deserialize_with = "::sonus_client::schema::decode_field")]
                pub $field: $crate::__record_type!($kind $(($inner))?),
            )*
        }

        impl $crate::schema::WireField for $name {
            fn decode<'de, D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                <Self as ::serde::Deserialize>::deserialize(deserializer)
            }
        }

        impl $crate::schema::Record for $name {
            fn schema() -> &'static $crate::schema::RecordSchema {
                static SCHEMA: $crate::schema::RecordSchema = $crate::schema::RecordSchema {
                    name: stringify!($name),
                    fields: &[
                        $(
                            $crate::schema::FieldSchema {
                                segment: $crate::__record_segment!($xml $(, $segment)?),
                                xml_name: $xml,
                                kind: $crate::__record_kind!($kind $(($inner))?),
                            },
                        )*
                    ],
                };
                &SCHEMA
            }

            fn record_schema(&self) -> &'static $crate::schema::RecordSchema {
                <Self as $crate::schema::Record>::schema()
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::schema::FieldValue<'_>> {
                ::std::vec![
                    $( $crate::__record_value!($kind $(($inner))?, &self.$field), )*
                ]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_type {
    (numeric) => { f64 };
    (flag) => { bool };
    (text) => { ::std::string::String };
    (name) => { ::std::string::String };
    (nested($inner:ty)) => { $inner };
    (repeated($inner:ty)) => { ::std::vec::Vec<$inner> };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_kind {
    (numeric) => { $crate::schema::FieldKind::Numeric };
    (flag) => { $crate::schema::FieldKind::Flag };
    (text) => { $crate::schema::FieldKind::Text };
    (name) => { $crate::schema::FieldKind::Name };
    (nested($inner:ty)) => {
        $crate::schema::FieldKind::Nested(<$inner as $crate::schema::Record>::schema)
    };
    (repeated($inner:ty)) => {
        $crate::schema::FieldKind::Repeated(<$inner as $crate::schema::Record>::schema)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_value {
    (numeric, $value:expr) => { $crate::schema::FieldValue::Numeric(*$value) };
    (flag, $value:expr) => { $crate::schema::FieldValue::Flag(*$value) };
    (text, $value:expr) => { $crate::schema::FieldValue::Text($value.as_str()) };
    (name, $value:expr) => { $crate::schema::FieldValue::Name($value.as_str()) };
    (nested($inner:ty), $value:expr) => { $crate::schema::FieldValue::Nested($value) };
    (repeated($inner:ty), $value:expr) => {
        $crate::schema::FieldValue::Repeated(
            $value
                .iter()
                .map(|item| item as &dyn $crate::schema::Record)
                .collect(),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_segment {
    ($xml:literal) => { $xml };
    ($xml:literal, $segment:literal) => { $segment };
}
