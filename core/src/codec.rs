//! JSON codecs for the Tx wire format.
//!
//! # Design
//! The wire conventions (PascalCase names, omitted null fields, enums as
//! strings) are compiled into each model through derive attributes, so there
//! is no shared serializer configuration to pass around. This module holds
//! the pieces derive cannot express on its own:
//! - `lenient_int`: integer fields the server sometimes emits as `5.0`.
//! - `wire_enum!`: closed enums whose wire string differs from the variant.
//! - `open_string!`: string newtypes with named constants that accept any
//!   value the server sends.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::TxError;

/// Serialize a request body.
///
/// serde_json never HTML-escapes and only escapes what JSON requires, which
/// is the relaxed escaping the API expects.
pub fn to_body<T: Serialize>(value: &T) -> Result<String, TxError> {
    serde_json::to_string(value).map_err(|e| TxError::Serialization(e.to_string()))
}

pub fn from_body<T: DeserializeOwned>(body: &str) -> Result<T, TxError> {
    serde_json::from_str(body).map_err(|e| TxError::Deserialization(e.to_string()))
}

/// A wire string that names no variant of a `wire_enum!` type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid {type_name}")]
pub struct UnknownWireName {
    pub type_name: &'static str,
    pub value: String,
}

/// Integer fields that tolerate floating-point numerals.
///
/// Use as `#[serde(with = "lenient_int")]`, or the `option` / `optional`
/// submodules for `Option<int>` and `OptionalValue<int>` fields. Floats are
/// truncated toward zero. Encoding emits the integer unchanged.
pub mod lenient_int {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::primitive::OptionalValue;

    /// Integer decoded through the lenient rules.
    pub struct Lenient<T>(pub T);

    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

    impl<'de, T> Deserialize<'de> for Lenient<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(LenientVisitor(PhantomData))
        }
    }

    struct LenientVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for LenientVisitor<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        type Value = Lenient<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "an integer or a number with a fractional part")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            T::try_from(v)
                .map(Lenient)
                .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            T::try_from(v)
                .map(Lenient)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            let truncated = v.trunc();
            if !truncated.is_finite() || truncated < -I64_UPPER || truncated >= I64_UPPER {
                return Err(E::invalid_value(Unexpected::Float(v), &self));
            }
            T::try_from(truncated as i64)
                .map(Lenient)
                .map_err(|_| E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + TryFrom<u64>,
    {
        Lenient::<T>::deserialize(deserializer).map(|v| v.0)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            T: Serialize,
        {
            value.serialize(serializer)
        }

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: TryFrom<i64> + TryFrom<u64>,
        {
            Option::<Lenient<T>>::deserialize(deserializer).map(|v| v.map(|l| l.0))
        }
    }

    pub mod optional {
        use super::*;

        pub fn serialize<S, T>(value: &OptionalValue<T>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            T: Serialize,
        {
            value.serialize(serializer)
        }

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<OptionalValue<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: TryFrom<i64> + TryFrom<u64>,
        {
            OptionalValue::<Lenient<T>>::deserialize(deserializer).map(|v| v.map(|l| l.0))
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_name {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $wire:literal) => {
        $wire
    };
}

/// Declare a closed enum serialized by wire name.
///
/// Variants may declare a wire string with `Variant = "wire"`; the rest use
/// their own name. The first variant is the zero value: an empty string or
/// `null` decodes to it. Any other unknown string is an error.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $wire:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];
            const WIRE_NAMES: &'static [&'static str] = &[ $( $crate::__wire_name!($variant $(, $wire)?), )+ ];

            pub fn wire_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $crate::__wire_name!($variant $(, $wire)?), )+
                }
            }

            pub fn from_wire(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.wire_name() == value)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.wire_name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::codec::UnknownWireName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Ok(Self::default());
                }
                Self::from_wire(s).ok_or_else(|| $crate::codec::UnknownWireName {
                    type_name: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.wire_name())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct WireVisitor;

                impl<'de> ::serde::de::Visitor<'de> for WireVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        write!(f, "one of {:?}", $name::WIRE_NAMES)
                    }

                    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> Result<$name, E> {
                        if v.is_empty() {
                            return Ok($name::default());
                        }
                        $name::from_wire(v).ok_or_else(|| E::unknown_variant(v, $name::WIRE_NAMES))
                    }

                    fn visit_unit<E: ::serde::de::Error>(self) -> Result<$name, E> {
                        Ok($name::default())
                    }
                }

                deserializer.deserialize_any(WireVisitor)
            }
        }
    };
}

/// Declare a string newtype with named constants.
///
/// The server's set of values evolves independently of this crate, so any
/// string is accepted and preserved.
#[macro_export]
macro_rules! open_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$cmeta:meta])* $konst:ident = $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(::std::borrow::Cow<'static, str>);

        impl $name {
            $( $(#[$cmeta])* pub const $konst: $name = $name(::std::borrow::Cow::Borrowed($value)); )*

            pub fn new(value: impl Into<String>) -> Self {
                $name(::std::borrow::Cow::Owned(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::OptionalValue;
    use serde::Deserialize;

    crate::wire_enum! {
        enum Version {
            Unset = "",
            V1 = "1.0",
            V2 = "2.0",
            Latest,
        }
    }

    crate::open_string! {
        struct Color {
            RED = "Red",
        }
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Counts {
        #[serde(with = "lenient_int")]
        total: i32,
        #[serde(default, with = "lenient_int::option", skip_serializing_if = "Option::is_none")]
        maybe: Option<u8>,
        #[serde(default, with = "lenient_int::optional", skip_serializing_if = "OptionalValue::is_absent")]
        wrapped: OptionalValue<i64>,
    }

    #[test]
    fn lenient_int_accepts_float_numerals() {
        let c: Counts = serde_json::from_str(r#"{"Total":5.0,"Maybe":7.9,"Wrapped":{"Value":-3.7}}"#).unwrap();
        assert_eq!(c.total, 5);
        assert_eq!(c.maybe, Some(7));
        assert_eq!(c.wrapped, OptionalValue::Present(-3));
    }

    #[test]
    fn lenient_int_accepts_plain_integers() {
        let c: Counts = serde_json::from_str(r#"{"Total":5,"Wrapped":{"Value":5}}"#).unwrap();
        assert_eq!(c.total, 5);
        assert_eq!(c.maybe, None);
        assert_eq!(c.wrapped, OptionalValue::Present(5));
    }

    #[test]
    fn lenient_int_rejects_out_of_range_and_strings() {
        assert!(serde_json::from_str::<Counts>(r#"{"Total":1e40}"#).is_err());
        assert!(serde_json::from_str::<Counts>(r#"{"Total":1,"Maybe":300}"#).is_err());
        assert!(serde_json::from_str::<Counts>(r#"{"Total":"5"}"#).is_err());
    }

    #[test]
    fn lenient_int_encodes_plain_integer() {
        let c = Counts {
            total: 12,
            maybe: None,
            wrapped: OptionalValue::Absent,
        };
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"Total":12}"#);
    }

    #[test]
    fn wire_enum_uses_declared_names() {
        assert_eq!(serde_json::to_string(&Version::V2).unwrap(), r#""2.0""#);
        assert_eq!(serde_json::to_string(&Version::Latest).unwrap(), r#""Latest""#);
        let v: Version = serde_json::from_str(r#""1.0""#).unwrap();
        assert_eq!(v, Version::V1);
    }

    #[test]
    fn wire_enum_empty_string_is_zero_value() {
        let v: Version = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(v, Version::Unset);
        assert_eq!("".parse::<Version>().unwrap(), Version::Unset);
    }

    #[test]
    fn wire_enum_rejects_unknown_and_member_names() {
        assert!(serde_json::from_str::<Version>(r#""3.0""#).is_err());
        // Matching is on the wire name, not the variant name.
        assert!(serde_json::from_str::<Version>(r#""V1""#).is_err());
        // Case-sensitive.
        assert!(serde_json::from_str::<Version>(r#""latest""#).is_err());
        let err = "nope".parse::<Version>().unwrap_err();
        assert_eq!(err.type_name, "Version");
    }

    #[test]
    fn open_string_accepts_anything() {
        let c: Color = serde_json::from_str(r#""Ultraviolet""#).unwrap();
        assert_eq!(c.as_str(), "Ultraviolet");
        let red: Color = serde_json::from_str(r#""Red""#).unwrap();
        assert_eq!(red, Color::RED);
        assert_eq!(serde_json::to_string(&Color::RED).unwrap(), r#""Red""#);
    }

    #[test]
    fn body_helpers_map_errors() {
        let err = from_body::<Counts>("not json").unwrap_err();
        assert!(matches!(err, TxError::Deserialization(_)));
        assert_eq!(to_body(&vec![1, 2]).unwrap(), "[1,2]");
    }

    #[test]
    fn body_does_not_html_escape() {
        let body = to_body(&"<b>Müller & Söhne</b>").unwrap();
        assert_eq!(body, "\"<b>Müller & Söhne</b>\"");
    }
}
