//! Narrowing of loosely typed driver values
//!
//! Both transports hand back `serde_json::Value`. Facades narrow each value
//! to the type the interface declares; a value of the wrong shape is
//! reported rather than coerced.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Conversion from a driver value to an interface type
pub trait FromDriverValue: Sized {
    /// Type name used in error reports
    const EXPECTED: &'static str;

    fn from_driver_value(value: &Value) -> Option<Self>;
}

/// Conversion from an interface type to a driver argument
pub trait ToDriverValue {
    fn to_driver_value(&self) -> Value;
}

impl FromDriverValue for () {
    const EXPECTED: &'static str = "nothing";

    fn from_driver_value(_: &Value) -> Option<Self> {
        Some(())
    }
}

impl FromDriverValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_driver_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromDriverValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_driver_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromDriverValue for f64 {
    const EXPECTED: &'static str = "number";

    // Non-finite doubles arrive by name
    fn from_driver_value(value: &Value) -> Option<Self> {
        value.as_f64().or_else(|| match value.as_str()? {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        })
    }
}

macro_rules! integer_value {
    ($($t:ty),+) => {
        $(
            impl FromDriverValue for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn from_driver_value(value: &Value) -> Option<Self> {
                    value.as_i64().and_then(|i| <$t>::try_from(i).ok())
                }
            }

            impl ToDriverValue for $t {
                fn to_driver_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )+
    };
}

integer_value!(i16, i32, i64, u8);

impl FromDriverValue for String {
    const EXPECTED: &'static str = "string";

    fn from_driver_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromDriverValue for DateTime<Utc> {
    const EXPECTED: &'static str = "ISO 8601 date";

    fn from_driver_value(value: &Value) -> Option<Self> {
        DateTime::parse_from_rfc3339(value.as_str()?)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

impl<T: FromDriverValue> FromDriverValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_driver_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_driver_value).collect()
    }
}

impl<T: ToDriverValue + ?Sized> ToDriverValue for &T {
    fn to_driver_value(&self) -> Value {
        (**self).to_driver_value()
    }
}

impl ToDriverValue for bool {
    fn to_driver_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToDriverValue for f64 {
    fn to_driver_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToDriverValue for str {
    fn to_driver_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToDriverValue for String {
    fn to_driver_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToDriverValue for DateTime<Utc> {
    fn to_driver_value(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Declare an ASCOM integer-valued enum together with its value conversions
macro_rules! ascom_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_i32(self) -> i32 {
                self as i32
            }
        }

        impl $crate::value::FromDriverValue for $name {
            const EXPECTED: &'static str = stringify!($name);

            fn from_driver_value(value: &serde_json::Value) -> Option<Self> {
                value
                    .as_i64()
                    .and_then(|i| i32::try_from(i).ok())
                    .and_then(Self::from_i32)
            }
        }

        impl $crate::value::ToDriverValue for $name {
            fn to_driver_value(&self) -> serde_json::Value {
                serde_json::Value::from(self.as_i32())
            }
        }
    };
}
