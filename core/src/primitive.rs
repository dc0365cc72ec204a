//! Present/absent wrapper for value-typed fields.
//!
//! # Design
//! The Tx API encodes "the parser found a value" as an object with a single
//! `Value` property and "no data" as a missing field. That shape differs from
//! a bare `null`, so `Option<T>` cannot carry it: `OptionalValue<T>` has its
//! own serde impls and every model field holding one is marked
//! `#[serde(default, skip_serializing_if = "OptionalValue::is_absent")]`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TxError;

const VALUE_KEY: &str = "Value";

/// A value the server may or may not have produced.
///
/// Serializes as `{"Value": <T>}` when present. When absent the enclosing
/// struct omits the field entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionalValue<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> OptionalValue<T> {
    pub fn present(value: T) -> Self {
        OptionalValue::Present(value)
    }

    pub fn has_value(&self) -> bool {
        matches!(self, OptionalValue::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        !self.has_value()
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            OptionalValue::Present(v) => Some(v),
            OptionalValue::Absent => None,
        }
    }

    /// Borrow the wrapped value, failing with `TxError::AbsentValue` when the
    /// server sent nothing.
    pub fn value(&self) -> Result<&T, TxError> {
        self.get().ok_or(TxError::AbsentValue)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            OptionalValue::Present(v) => Some(v),
            OptionalValue::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OptionalValue<U> {
        match self {
            OptionalValue::Present(v) => OptionalValue::Present(f(v)),
            OptionalValue::Absent => OptionalValue::Absent,
        }
    }
}

impl<T> From<T> for OptionalValue<T> {
    fn from(value: T) -> Self {
        OptionalValue::Present(value)
    }
}

impl<T: Serialize> Serialize for OptionalValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionalValue::Present(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(VALUE_KEY, v)?;
                map.end()
            }
            // Only reached outside a struct field; struct fields skip absent values.
            OptionalValue::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionalValueVisitor(PhantomData))
    }
}

struct OptionalValueVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalValueVisitor<T> {
    type Value = OptionalValue<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with an optional `Value` property")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut out = OptionalValue::Absent;
        while let Some(key) = map.next_key::<KeyName>()? {
            match key {
                KeyName::Value => out = OptionalValue::Present(map.next_value()?),
                KeyName::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(out)
    }
}

/// Property name inside the wrapper object; anything but `Value` is skipped.
enum KeyName {
    Value,
    Other,
}

impl<'de> Deserialize<'de> for KeyName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = KeyName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a property name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<KeyName, E> {
                Ok(if v == VALUE_KEY { KeyName::Value } else { KeyName::Other })
            }
        }

        deserializer.deserialize_identifier(KeyVisitor)
    }
}
