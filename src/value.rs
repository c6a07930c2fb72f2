//! Runtime-value boundary for assertions.
//!
//! Rust has no runtime reflection, so the comparison engine never sees user
//! types directly. Instead, the [`ToValue`] trait converts anything the caller
//! hands to an assertion into a [`Value`]: a tagged variant ([`Kind`]) plus the
//! name of the concrete source type. The equality engine and the formatter
//! operate only on this closed representation.
//!
//! Conversions collapse indirection: references, `Box`, `Rc`, and `Arc`
//! convert as their pointee, `String` as `str`, `Vec<T>` as `[T]`. Two values
//! that reach the engine under different type names are never equal, which is
//! what distinguishes `42i32` from `42i64` and `42` from `"42"`.

use std::any::{self, Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};

/// A runtime value as seen by the comparison engine.
///
/// Carries the concrete type name captured at the conversion boundary next to
/// the structural payload. Construct one through [`ToValue`], or through
/// [`Value::record`] / [`Value::custom`] when implementing `ToValue` for your
/// own types.
#[derive(Debug, Clone)]
pub struct Value {
    type_name: &'static str,
    kind: Kind,
}

/// The structural payload of a [`Value`].
#[derive(Debug, Clone)]
pub enum Kind {
    /// True absence of a value: `None`, `()`.
    Nil,
    Bool(bool),
    Int(i128),
    Uint(u128),
    /// Kept separate from `Uint` so byte sequences can render as hex pairs.
    Byte(u8),
    Float(f64),
    Char(char),
    Str(String),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    /// Key-value pairs; compared as a set, not a sequence.
    Map(Vec<(Value, Value)>),
    /// A named composite compared field by field.
    Record { fields: Vec<(&'static str, Value)> },
    /// A timestamp; compared by instant, not by offset representation.
    Time(DateTime<FixedOffset>),
    /// A value whose type supplies its own equality via [`Equiv`].
    Custom(CustomValue),
}

impl Value {
    pub(crate) fn new(type_name: &'static str, kind: Kind) -> Self {
        Self { type_name, kind }
    }

    /// The concrete type name captured when this value was converted.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Build a record value for a user struct.
    ///
    /// The type parameter supplies the record's name for type-sensitive
    /// comparison and for diagnostics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attest::{ToValue, Value};
    ///
    /// struct Point { x: i32, y: i32 }
    ///
    /// impl ToValue for Point {
    ///     fn to_value(&self) -> Value {
    ///         Value::record::<Self>([("x", self.x.to_value()), ("y", self.y.to_value())])
    ///     }
    /// }
    /// ```
    pub fn record<T>(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self::new(
            any::type_name::<T>(),
            Kind::Record {
                fields: fields.into_iter().collect(),
            },
        )
    }

    /// Build a value that compares through the type's own [`Equiv`] method.
    ///
    /// The custom method is the final answer whenever both sides hold the same
    /// concrete type; fields it does not examine are ignored. Against any
    /// other type the comparison falls back to the usual
    /// different-types-are-unequal rule.
    pub fn custom<T: Equiv + fmt::Debug>(v: T) -> Self {
        let repr = format!("{v:?}");
        let payload = Rc::new(v);
        let this = Rc::clone(&payload);
        Self::new(
            any::type_name::<T>(),
            Kind::Custom(CustomValue {
                id: TypeId::of::<T>(),
                payload,
                eq: Rc::new(move |other: &dyn Any| {
                    other.downcast_ref::<T>().is_some_and(|o| this.equiv(o))
                }),
                repr,
            }),
        )
    }

}

/// Opt-in custom equality: "compare me to another instance of my own type".
///
/// When a type implements `Equiv` and converts itself with [`Value::custom`],
/// the equality engine dispatches to [`Equiv::equiv`] instead of structural
/// comparison.
pub trait Equiv: Any {
    fn equiv(&self, other: &Self) -> bool;
}

/// A value carrying its own equality method.
///
/// Holds the original value behind `dyn Any` so the method can be applied to
/// the other side of a comparison after an exact-concrete-type check.
#[derive(Clone)]
pub struct CustomValue {
    id: TypeId,
    payload: Rc<dyn Any>,
    eq: Rc<dyn Fn(&dyn Any) -> bool>,
    repr: String,
}

impl CustomValue {
    /// True iff `other` holds the same concrete type and the stored equality
    /// method accepts it.
    pub(crate) fn matches(&self, other: &CustomValue) -> bool {
        self.id == other.id && (self.eq)(other.payload.as_ref())
    }

    pub(crate) fn repr(&self) -> &str {
        &self.repr
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue").field("repr", &self.repr).finish()
    }
}

/// Conversion into the engine's [`Value`] representation.
///
/// Implemented for primitives, strings, sequences, maps, tuples, options,
/// timestamps, and `serde_json::Value`. Implement it for your own types with
/// [`Value::record`] or [`Value::custom`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

// Indirections convert as their pointee.

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! signed_to_value {
    ($($t:ty),*) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::new(any::type_name::<$t>(), Kind::Int(*self as i128))
            }
        })*
    };
}

macro_rules! unsigned_to_value {
    ($($t:ty),*) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::new(any::type_name::<$t>(), Kind::Uint(*self as u128))
            }
        })*
    };
}

signed_to_value!(i8, i16, i32, i64, i128, isize);
unsigned_to_value!(u16, u32, u64, u128, usize);

impl ToValue for u8 {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<u8>(), Kind::Byte(*self))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<f32>(), Kind::Float(f64::from(*self)))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<f64>(), Kind::Float(*self))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<bool>(), Kind::Bool(*self))
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<char>(), Kind::Char(*self))
    }
}

// All stringy types share the `str` type name so `String` and `&str` holding
// the same text compare equal.

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<str>(), Kind::Str(self.to_owned()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        self.as_str().to_value()
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::new(any::type_name::<()>(), Kind::Nil)
    }
}

// `None` is the nil-like slot. It keeps the full `Option<T>` type name, so a
// missing `Vec<i32>` and a missing `String` stay distinct; `Some(v)` converts
// transparently as `v`.
impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            None => Value::new(any::type_name::<Option<T>>(), Kind::Nil),
            Some(v) => v.to_value(),
        }
    }
}

// `Vec<T>` and `&[T]` share the `[T]` type name; a fixed-size array keeps its
// own, so `[1, 2]` and `vec![1, 2]` are different concrete types.

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<[T]>(),
            Kind::Seq(self.iter().map(ToValue::to_value).collect()),
        )
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<[T; N]>(),
            Kind::Seq(self.iter().map(ToValue::to_value).collect()),
        )
    }
}

impl<A: ToValue, B: ToValue> ToValue for (A, B) {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<(A, B)>(),
            Kind::Tuple(vec![self.0.to_value(), self.1.to_value()]),
        )
    }
}

impl<A: ToValue, B: ToValue, C: ToValue> ToValue for (A, B, C) {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<(A, B, C)>(),
            Kind::Tuple(vec![self.0.to_value(), self.1.to_value(), self.2.to_value()]),
        )
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<HashMap<K, V, S>>(),
            Kind::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect()),
        )
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::new(
            any::type_name::<BTreeMap<K, V>>(),
            Kind::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect()),
        )
    }
}

// Timestamps normalize to a fixed offset under one shared type name; equality
// is by instant, so the same moment in two zones compares equal.
impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value {
        Value::new("chrono::DateTime", Kind::Time(self.fixed_offset()))
    }
}

// A whole JSON tree converts under one type name, so two JSON documents
// compare structurally while JSON scalars stay distinct from native ones.
impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        let name = any::type_name::<serde_json::Value>();
        let kind = match self {
            serde_json::Value::Null => Kind::Nil,
            serde_json::Value::Bool(b) => Kind::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Kind::Int(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Kind::Uint(u128::from(u))
                } else {
                    Kind::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Kind::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Kind::Seq(items.iter().map(ToValue::to_value).collect())
            }
            serde_json::Value::Object(entries) => Kind::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Value::new(name, Kind::Str(k.clone())), v.to_value()))
                    .collect(),
            ),
        };
        Value::new(name, kind)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_keeps_the_option_type_name() {
        let v = None::<Vec<i32>>.to_value();
        assert!(matches!(v.kind(), Kind::Nil));
        assert!(v.type_name().contains("Option"));
        assert!(v.type_name().contains("i32"));
    }

    #[test]
    fn some_converts_transparently() {
        let v = Some(42i32).to_value();
        assert_eq!(v.type_name(), "i32");
        assert!(matches!(v.kind(), Kind::Int(42)));
    }

    #[test]
    fn string_family_shares_one_type_name() {
        let owned = String::from("hello").to_value();
        let borrowed = "hello".to_value();
        let cow = Cow::Borrowed("hello").to_value();
        assert_eq!(owned.type_name(), borrowed.type_name());
        assert_eq!(borrowed.type_name(), cow.type_name());
    }

    #[test]
    fn vec_and_slice_share_one_type_name() {
        let v = vec![1i32, 2].to_value();
        let s = [1i32, 2][..].to_value();
        assert_eq!(v.type_name(), s.type_name());
    }

    #[test]
    fn array_keeps_its_own_type_name() {
        let arr = [1i32, 2].to_value();
        let v = vec![1i32, 2].to_value();
        assert_ne!(arr.type_name(), v.type_name());
    }

    #[test]
    fn indirection_converts_as_pointee() {
        let boxed = Box::new(42i32).to_value();
        assert_eq!(boxed.type_name(), "i32");
        let referenced = (&&42i32).to_value();
        assert_eq!(referenced.type_name(), "i32");
    }

    #[test]
    fn bytes_convert_to_byte_kind() {
        let v = b"ab".to_vec().to_value();
        match v.kind() {
            Kind::Seq(items) => {
                assert!(items.iter().all(|i| matches!(i.kind(), Kind::Byte(_))));
            }
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn json_tree_converts_under_one_type_name() {
        let v = serde_json::json!({"a": [1, "x", null]}).to_value();
        let name = v.type_name();
        match v.kind() {
            Kind::Map(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0.type_name(), name);
            }
            other => panic!("expected Map, got {other:?}"),
        }
    }
}
