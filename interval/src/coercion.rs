// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per slot coercion. A [`ComponentCoercer`] turns one raw value (string token, number,
//! or arbitrary JSON) into a typed value, or rejects it.
//!
//! [`ComponentType`] is the logical type descriptor that an adapter is declared with.
//! [`ComponentType::Str`] is the sentinel for "no coercion", the raw value is passed
//! through as is. The built in types are `int`, `float` and `bool`. Your own types can
//! be plugged in w/ [`ComponentType::custom`].

use std::{fmt::{Debug, Display, Formatter},
          str::FromStr,
          sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};

use crate::UnknownComponentTypeError;

/// Validates and converts a single interval component.
///
/// Implementations must be pure and reentrant, since one instance is shared by every
/// slot (and every thread) that declares the same [`ComponentType`]. They must also be
/// idempotent: coercing an already coerced value returns it unchanged.
pub trait ComponentCoercer: Debug + Send + Sync {
    /// # Errors
    ///
    /// Returns a human readable reason when `raw` can't be converted.
    fn coerce(&self, raw: &Value) -> Result<Value, String>;

    /// JSON schema fragment describing the values this coercer produces.
    fn schema(&self) -> Value { json!({}) }
}

pub type SharedCoercer = Arc<dyn ComponentCoercer>;

/// Logical type of an interval component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentType {
    #[default]
    Str,
    Int,
    Float,
    Bool,
    Custom(CustomComponentType),
}

/// A named, user supplied [`ComponentCoercer`]. Two custom types w/ the same name are
/// considered the same type, and share one coercer instance in an adapter. A custom
/// type is never the same as a built in one, even if it is named eg `"int"`.
#[derive(Debug, Clone)]
pub struct CustomComponentType {
    pub name: String,
    pub coercer: SharedCoercer,
}

impl ComponentType {
    pub fn custom(name: impl Into<String>, coercer: impl ComponentCoercer + 'static) -> Self {
        ComponentType::Custom(CustomComponentType {
            name: name.into(),
            coercer: Arc::new(coercer),
        })
    }

    /// Identity used to de-duplicate coercers.
    #[must_use]
    pub fn key(&self) -> ComponentTypeKey<'_> {
        match self {
            ComponentType::Custom(it) => ComponentTypeKey::Custom(&it.name),
            _ => ComponentTypeKey::Builtin(self.name()),
        }
    }

    /// The lowercase name of a built in type, or the name of a custom one.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ComponentType::Str => "str",
            ComponentType::Int => "int",
            ComponentType::Float => "float",
            ComponentType::Bool => "bool",
            ComponentType::Custom(it) => &it.name,
        }
    }

    #[must_use]
    pub fn is_passthrough(&self) -> bool { matches!(self, ComponentType::Str) }

    /// `None` for [`ComponentType::Str`].
    #[must_use]
    pub fn build_coercer(&self) -> Option<SharedCoercer> {
        match self {
            ComponentType::Str => None,
            ComponentType::Int => Some(Arc::new(IntCoercer)),
            ComponentType::Float => Some(Arc::new(FloatCoercer)),
            ComponentType::Bool => Some(Arc::new(BoolCoercer)),
            ComponentType::Custom(it) => Some(it.coercer.clone()),
        }
    }
}

/// Built in and custom names live in separate key spaces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComponentTypeKey<'a> {
    Builtin(&'a str),
    Custom(&'a str),
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool { self.key() == other.key() }
}

impl Eq for ComponentType {}

impl Display for ComponentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

impl FromStr for ComponentType {
    type Err = UnknownComponentTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "str" | "string" => Ok(ComponentType::Str),
            "int" | "integer" => Ok(ComponentType::Int),
            "float" | "number" => Ok(ComponentType::Float),
            "bool" | "boolean" => Ok(ComponentType::Bool),
            _ => Err(UnknownComponentTypeError {
                name: input.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ComponentType {
    type Error = UnknownComponentTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self { value.name().to_string() }
}

/// Integers that fit in `i64`. Accepts integral floats (eg: `5.0`) and strings.
#[derive(Debug, Copy, Clone, Default)]
pub struct IntCoercer;

impl ComponentCoercer for IntCoercer {
    fn coerce(&self, raw: &Value) -> Result<Value, String> {
        match raw {
            Value::Number(number) => number_to_i64(number).map(Value::from),
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("'{text}' is not a valid integer")),
            other => Err(format!("expected an integer, got {}", describe(other))),
        }
    }

    fn schema(&self) -> Value { json!({"type": "integer"}) }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn number_to_i64(number: &Number) -> Result<i64, String> {
    if let Some(it) = number.as_i64() {
        return Ok(it);
    }
    if number.is_u64() {
        return Err(format!("integer {number} does not fit in 64 bits"));
    }
    match number.as_f64() {
        Some(it) if it.fract() == 0.0 && it >= i64::MIN as f64 && it < i64::MAX as f64 => {
            Ok(it as i64)
        }
        _ => Err(format!("{number} is not an integer")),
    }
}

/// Finite 64 bit floats. Accepts any JSON number and strings.
#[derive(Debug, Copy, Clone, Default)]
pub struct FloatCoercer;

impl ComponentCoercer for FloatCoercer {
    fn coerce(&self, raw: &Value) -> Result<Value, String> {
        let it = match raw {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| format!("{number} is not a valid float"))?,
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{text}' is not a valid float"))?,
            other => return Err(format!("expected a float, got {}", describe(other))),
        };
        Number::from_f64(it)
            .map(Value::Number)
            .ok_or_else(|| format!("{it} is not a finite float"))
    }

    fn schema(&self) -> Value { json!({"type": "number"}) }
}

/// Booleans. Accepts `0` / `1` and the usual spellings of yes and no.
#[derive(Debug, Copy, Clone, Default)]
pub struct BoolCoercer;

impl ComponentCoercer for BoolCoercer {
    fn coerce(&self, raw: &Value) -> Result<Value, String> {
        match raw {
            Value::Bool(it) => Ok(Value::Bool(*it)),
            Value::Number(number) => match number.as_i64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err(format!("{number} is not a valid boolean")),
            },
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "f" | "no" | "n" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(format!("'{text}' is not a valid boolean")),
            },
            other => Err(format!("expected a boolean, got {}", describe(other))),
        }
    }

    fn schema(&self) -> Value { json!({"type": "boolean"}) }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(json!(5), json!(5))]
    #[test_case(json!(-5), json!(-5))]
    #[test_case(json!(" 42 "), json!(42))]
    #[test_case(json!(3.0), json!(3))]
    fn test_int_accepts(raw: Value, expected: Value) {
        assert_eq!(IntCoercer.coerce(&raw), Ok(expected));
    }

    #[test_case(json!(2.5))]
    #[test_case(json!("text"))]
    #[test_case(json!("1.5"))]
    #[test_case(json!(true))]
    #[test_case(json!([1]))]
    #[test_case(json!(u64::MAX))]
    fn test_int_rejects(raw: Value) {
        assert!(IntCoercer.coerce(&raw).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(FloatCoercer.coerce(&json!(2)), Ok(json!(2.0)));
        assert_eq!(FloatCoercer.coerce(&json!("0.25")), Ok(json!(0.25)));
        assert!(FloatCoercer.coerce(&json!("inf")).is_err());
        assert!(FloatCoercer.coerce(&json!("abc")).is_err());
        assert!(FloatCoercer.coerce(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_bool() {
        assert_eq!(BoolCoercer.coerce(&json!("Yes")), Ok(json!(true)));
        assert_eq!(BoolCoercer.coerce(&json!(0)), Ok(json!(false)));
        assert_eq!(BoolCoercer.coerce(&json!(false)), Ok(json!(false)));
        assert!(BoolCoercer.coerce(&json!(2)).is_err());
        assert!(BoolCoercer.coerce(&json!("maybe")).is_err());
    }

    #[test]
    fn test_coercers_are_idempotent() {
        let cases: [(&dyn ComponentCoercer, Value); 3] = [
            (&IntCoercer, json!("7")),
            (&FloatCoercer, json!("7.5")),
            (&BoolCoercer, json!("on")),
        ];
        for (coercer, raw) in cases {
            let once = coercer.coerce(&raw).unwrap();
            let twice = coercer.coerce(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_component_type_from_str() {
        assert_eq!("int".parse::<ComponentType>(), Ok(ComponentType::Int));
        assert_eq!(" Float ".parse::<ComponentType>(), Ok(ComponentType::Float));
        assert_eq!("string".parse::<ComponentType>(), Ok(ComponentType::Str));
        assert_eq!(
            "complex".parse::<ComponentType>(),
            Err(UnknownComponentTypeError {
                name: "complex".into()
            })
        );
    }

    #[test]
    fn test_component_type_serde() {
        let it: ComponentType = serde_json::from_value(json!("bool")).unwrap();
        assert_eq!(it, ComponentType::Bool);
        assert_eq!(serde_json::to_value(ComponentType::Int).unwrap(), json!("int"));
        assert!(serde_json::from_value::<ComponentType>(json!("nope")).is_err());
    }

    #[test]
    fn test_str_has_no_coercer() {
        assert!(ComponentType::Str.build_coercer().is_none());
        assert!(ComponentType::Str.is_passthrough());
        assert!(ComponentType::Int.build_coercer().is_some());
    }

    #[test]
    fn test_custom_types_compare_by_name() {
        let a = ComponentType::custom("unit", IntCoercer);
        let b = ComponentType::custom("unit", FloatCoercer);
        assert_eq!(a, b);
        assert_ne!(a, ComponentType::Int);
        assert_eq!(a.to_string(), "unit");
    }

    #[test]
    fn test_custom_type_named_like_a_builtin_is_distinct() {
        let it = ComponentType::custom("int", FloatCoercer);
        assert_ne!(it, ComponentType::Int);
        assert_eq!(it.key(), ComponentTypeKey::Custom("int"));
        assert_eq!(ComponentType::Int.key(), ComponentTypeKey::Builtin("int"));
        assert_eq!(it.to_string(), "int");
    }
}
