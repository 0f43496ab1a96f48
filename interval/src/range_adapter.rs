// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Integer ranges, the companion to [`crate::IntervalAdapter`].
//!
//! An [`IntRange`] always has all three components: an absent `start` means `0` and an
//! absent `step` means `1`. Only strings (and native [`IntRange`]s) are accepted as
//! input. On the way out the defaults are dropped again, so `0..5` becomes `":5"`.

use std::ops::Range;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::{Value, json};

use crate::{INT_RANGE_SYNTAX_PATTERN, IntervalError, IntervalResult,
            IntervalSyntaxError, RequiredSlots, Slot, format_interval_syntax,
            parse_interval_syntax};

pub const DEFAULT_RANGE_START: i64 = 0;
pub const DEFAULT_RANGE_STEP: i64 = 1;

/// Half open integer range w/ a non zero step. `start > stop` is allowed, it is just
/// empty unless `step` is negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    /// # Errors
    ///
    /// Returns an error if `step` is zero.
    pub fn new(start: i64, stop: i64, step: i64) -> IntervalResult<Self> {
        if step == 0 {
            return Err(IntervalError::component(
                Slot::Step,
                "range step must not be zero",
            ));
        }
        Ok(Self { start, stop, step })
    }

    #[must_use]
    pub fn start(&self) -> i64 { self.start }

    #[must_use]
    pub fn stop(&self) -> i64 { self.stop }

    #[must_use]
    pub fn step(&self) -> i64 { self.step }

    /// Number of values this range yields.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        let (distance, step) = if self.step > 0 {
            (i128::from(self.stop) - i128::from(self.start), i128::from(self.step))
        } else {
            (i128::from(self.start) - i128::from(self.stop), -i128::from(self.step))
        };
        if distance <= 0 {
            0
        } else {
            ((distance + step - 1) / step) as usize
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn iter(&self) -> impl Iterator<Item = i64> + use<> {
        let Self { start, step, .. } = *self;
        (0..self.len()).map_while(move |index| {
            i64::try_from(index)
                .ok()
                .and_then(|index| index.checked_mul(step))
                .and_then(|offset| start.checked_add(offset))
        })
    }
}

impl From<Range<i64>> for IntRange {
    fn from(it: Range<i64>) -> Self {
        Self {
            start: it.start,
            stop: it.end,
            step: DEFAULT_RANGE_STEP,
        }
    }
}

/// Input shapes accepted by [`RangeAdapter::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum RangeInput {
    Native(IntRange),
    Text(String),
    Other(Value),
}

impl From<IntRange> for RangeInput {
    fn from(it: IntRange) -> Self { RangeInput::Native(it) }
}

impl From<&str> for RangeInput {
    fn from(it: &str) -> Self { RangeInput::Text(it.to_string()) }
}

impl From<String> for RangeInput {
    fn from(it: String) -> Self { RangeInput::Text(it) }
}

impl From<Value> for RangeInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => RangeInput::Text(text),
            other => RangeInput::Other(other),
        }
    }
}

/// Validates, serializes and describes [`IntRange`] fields.
#[derive(Debug, Copy, Clone, Default)]
pub struct RangeAdapter;

impl RangeAdapter {
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is neither a string nor an [`IntRange`].
    /// - The string is not valid syntax, is missing `stop`, or has non integer tokens.
    /// - The step is zero.
    pub fn validate(input: impl Into<RangeInput>) -> IntervalResult<IntRange> {
        match input.into() {
            RangeInput::Native(it) => Ok(it),
            RangeInput::Text(text) => {
                tracing::trace!(message = "validate range text", input = %text);
                let (start, stop, step) = parse_interval_syntax(
                    &text,
                    |it: &str| it.parse::<i64>(),
                    RequiredSlots::STOP_ONLY,
                )?;
                let stop = stop.ok_or_else(|| IntervalSyntaxError::MissingSlot {
                    input: text.clone(),
                    slot: Slot::Stop,
                })?;
                IntRange::new(
                    start.unwrap_or(DEFAULT_RANGE_START),
                    stop,
                    step.unwrap_or(DEFAULT_RANGE_STEP),
                )
            }
            RangeInput::Other(value) => {
                tracing::trace!(message = "reject unsupported range shape", input = %value);
                Err(IntervalError::shape("Expected a range or str"))
            }
        }
    }

    /// Canonical string w/ the default `start` and `step` left out.
    #[must_use]
    pub fn serialize(range: &IntRange) -> String {
        let start = (range.start != DEFAULT_RANGE_START).then_some(&range.start);
        let step = (range.step != DEFAULT_RANGE_STEP).then_some(&range.step);
        format_interval_syntax(start, Some(&range.stop), step)
    }

    #[must_use]
    pub fn json_schema() -> Value {
        json!({
            "type": "string",
            "pattern": INT_RANGE_SYNTAX_PATTERN,
            "description": "An integer range expressed as `[start]:stop[:step]`.",
            "examples": [":5", "1:10:2"],
        })
    }
}

impl Serialize for IntRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&RangeAdapter::serialize(self))
    }
}

impl<'de> Deserialize<'de> for IntRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        RangeAdapter::validate(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Model {
        r: IntRange,
    }

    fn range(start: i64, stop: i64, step: i64) -> IntRange {
        IntRange::new(start, stop, step).unwrap()
    }

    #[test_case(":5", range(0, 5, 1) ; "stop only")]
    #[test_case(" : 5", range(0, 5, 1) ; "leading whitespace")]
    #[test_case("1:5", range(1, 5, 1) ; "start stop")]
    #[test_case(" 1\t:\n5 : ", range(1, 5, 1) ; "blank step")]
    #[test_case("1:10:2", range(1, 10, 2) ; "all three")]
    #[test_case("10:0:-3", range(10, 0, -3) ; "negative step")]
    fn test_validate(input: &str, expected: IntRange) {
        assert_eq!(RangeAdapter::validate(input), Ok(expected));
    }

    #[test]
    fn test_validate_native() {
        assert_eq!(RangeAdapter::validate(IntRange::from(0..5)), Ok(range(0, 5, 1)));
    }

    #[test_case(json!(123), ErrorKind::Shape ; "int")]
    #[test_case(json!([1, 5]), ErrorKind::Shape ; "sequence")]
    #[test_case(json!("5"), ErrorKind::Syntax ; "no colon")]
    #[test_case(json!("random text"), ErrorKind::Syntax ; "random text")]
    #[test_case(json!("random:text:with colons"), ErrorKind::Syntax ; "non ints")]
    #[test_case(json!("1:2:3:4"), ErrorKind::Syntax ; "three colons")]
    #[test_case(json!("1::2"), ErrorKind::Syntax ; "missing stop")]
    #[test_case(json!("1:5:0"), ErrorKind::Component ; "zero step")]
    fn test_validate_errors(input: Value, kind: ErrorKind) {
        let it = RangeAdapter::validate(input);
        assert_eq!(it.map_err(|err| err.kind()), Err(kind));
    }

    #[test_case(range(0, 5, 1), ":5")]
    #[test_case(range(1, 5, 1), "1:5")]
    #[test_case(range(1, 4, 2), "1:4:2")]
    #[test_case(range(0, 9, 3), ":9:3")]
    fn test_serialize(it: IntRange, expected: &str) {
        assert_eq!(RangeAdapter::serialize(&it), expected);
        assert_eq!(
            serde_json::to_value(Model { r: it }).unwrap(),
            json!({"r": expected})
        );
    }

    #[test]
    fn test_model_round_trip() {
        let it: Model = serde_json::from_value(json!({"r": "1:10:2"})).unwrap();
        let text = serde_json::to_string(&it).unwrap();
        assert_eq!(serde_json::from_str::<Model>(&text).unwrap(), it);
    }

    #[test_case(range(0, 5, 1), vec![0, 1, 2, 3, 4])]
    #[test_case(range(1, 10, 3), vec![1, 4, 7])]
    #[test_case(range(5, 0, -2), vec![5, 3, 1])]
    #[test_case(range(5, 1, 1), vec![])]
    fn test_iter_and_len(it: IntRange, expected: Vec<i64>) {
        assert_eq!(it.len(), expected.len());
        assert_eq!(it.is_empty(), expected.is_empty());
        assert_eq!(it.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_json_schema() {
        let schema = RangeAdapter::json_schema();
        assert_eq!(schema["type"], json!("string"));
        assert!(schema.get("pattern").is_some());
    }
}
