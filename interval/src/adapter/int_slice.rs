// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;

use crate::{Interval, IntervalAdapter, IntervalError, IntervalResult, Slot};

/// An interval whose components are all integers. Use it as a field type in your own
/// serde models: it deserializes from any shape that [`IntervalAdapter::int`] accepts,
/// and serializes to the compact `start:stop[:step]` string.
///
/// A slice w/out a `stop` (eg `IntSlice::new(Some(1), None, None)`) serializes to
/// `"1:"`, which does not deserialize back, since compact text input requires `stop`.
///
/// ```
/// use interval_adapter::IntSlice;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Selection {
///     rows: IntSlice,
/// }
///
/// let it: Selection = serde_json::from_str(r#"{"rows": " 2 : 8 "}"#).unwrap();
/// assert_eq!(it.rows, IntSlice::new(Some(2), Some(8), None));
/// assert_eq!(serde_json::to_string(&it).unwrap(), r#"{"rows":"2:8"}"#);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntSlice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl IntSlice {
    #[must_use]
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }
}

impl From<IntSlice> for Interval {
    fn from(it: IntSlice) -> Self { Interval::from_ints(it.start, it.stop, it.step) }
}

impl TryFrom<Interval> for IntSlice {
    type Error = IntervalError;

    fn try_from(it: Interval) -> IntervalResult<Self> {
        let component = |slot: Slot| -> IntervalResult<Option<i64>> {
            match it.get(slot) {
                None => Ok(None),
                Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                    IntervalError::component(slot, format!("{value} is not an integer"))
                }),
            }
        };
        Ok(Self {
            start: component(Slot::Start)?,
            stop: component(Slot::Stop)?,
            step: component(Slot::Step)?,
        })
    }
}

impl Serialize for IntSlice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IntervalAdapter::int()
            .serialize(&Interval::from(*self))
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IntSlice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        IntervalAdapter::int()
            .validate(raw)
            .and_then(IntSlice::try_from)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Model {
        s: IntSlice,
    }

    #[test_case(json!(":5"), IntSlice::new(None, Some(5), None) ; "text")]
    #[test_case(json!({"stop": 5}), IntSlice::new(None, Some(5), None) ; "mapping")]
    #[test_case(json!([null, 5]), IntSlice::new(None, Some(5), None) ; "sequence")]
    #[test_case(json!("1:10:2"), IntSlice::new(Some(1), Some(10), Some(2)) ; "all three")]
    #[test_case(json!(["1", "4"]), IntSlice::new(Some(1), Some(4), None) ; "string items")]
    fn test_deserialize(raw: Value, expected: IntSlice) {
        let it: Model = serde_json::from_value(json!({"s": raw})).unwrap();
        assert_eq!(it.s, expected);
    }

    #[test_case(json!("5") ; "no colon")]
    #[test_case(json!("a:b") ; "not ints")]
    #[test_case(json!(5) ; "number")]
    #[test_case(json!({"begin": 1}) ; "bad key")]
    fn test_deserialize_errors(raw: Value) {
        assert!(serde_json::from_value::<Model>(json!({"s": raw})).is_err());
    }

    #[test]
    fn test_serialize() {
        let it = Model {
            s: IntSlice::new(Some(-3), None, Some(-1)),
        };
        assert_eq!(serde_json::to_value(&it).unwrap(), json!({"s": "-3::-1"}));
    }

    #[test]
    fn test_stop_less_slice_does_not_deserialize_back() {
        let it = Model {
            s: IntSlice::new(Some(1), None, None),
        };
        let text = serde_json::to_string(&it).unwrap();
        assert_eq!(text, r#"{"s":"1:"}"#);
        assert!(serde_json::from_str::<Model>(&text).is_err());
    }

    #[test]
    fn test_try_from_interval_rejects_non_integers() {
        let it = Interval::new(None, Some(json!(2.5)), None);
        let Err(IntervalError::Component { slot, .. }) = IntSlice::try_from(it) else {
            panic!("expected a component error");
        };
        assert_eq!(slot, Slot::Stop);
    }
}
