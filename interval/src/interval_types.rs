// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The value model shared by the syntax codec and the adapters.
//!
//! - [`Interval`] is the typed result of validation, three optional components just
//!   like a native slice.
//! - [`RawTriple`] is the untyped intermediate that every input shape is reduced to
//!   before per slot coercion.
//! - [`IntervalInput`] is the closed set of input shapes accepted by
//!   [`crate::IntervalAdapter::validate`].
//! - [`SerializedInterval`] is what [`crate::IntervalAdapter::serialize`] emits.

use std::ops::{Range, RangeFrom, RangeTo};

use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

/// One of the three positions in an interval.
#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Start,
    Stop,
    Step,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Start, Slot::Stop, Slot::Step];
}

/// A start / stop / step interval. Each component is independently optional, and there
/// is no ordering constraint between `start` and `stop` (eg: `5:1` is representable).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interval {
    pub start: Option<Value>,
    pub stop: Option<Value>,
    pub step: Option<Value>,
}

impl Interval {
    #[must_use]
    pub fn new(start: Option<Value>, stop: Option<Value>, step: Option<Value>) -> Self {
        Self { start, stop, step }
    }

    #[must_use]
    pub fn from_ints(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self {
            start: start.map(Value::from),
            stop: stop.map(Value::from),
            step: step.map(Value::from),
        }
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Value> {
        match slot {
            Slot::Start => self.start.as_ref(),
            Slot::Stop => self.stop.as_ref(),
            Slot::Step => self.step.as_ref(),
        }
    }

    /// Returns `None` if any present component is not an integer that fits in `i64`.
    #[must_use]
    pub fn as_i64_triple(&self) -> Option<(Option<i64>, Option<i64>, Option<i64>)> {
        fn to_i64(it: Option<&Value>) -> Option<Option<i64>> {
            match it {
                None => Some(None),
                Some(value) => value.as_i64().map(Some),
            }
        }
        Some((
            to_i64(self.start.as_ref())?,
            to_i64(self.stop.as_ref())?,
            to_i64(self.step.as_ref())?,
        ))
    }
}

impl From<Range<i64>> for Interval {
    fn from(it: Range<i64>) -> Self { Self::from_ints(Some(it.start), Some(it.end), None) }
}

impl From<RangeTo<i64>> for Interval {
    fn from(it: RangeTo<i64>) -> Self { Self::from_ints(None, Some(it.end), None) }
}

impl From<RangeFrom<i64>> for Interval {
    fn from(it: RangeFrom<i64>) -> Self { Self::from_ints(Some(it.start), None, None) }
}

impl From<(Option<i64>, Option<i64>, Option<i64>)> for Interval {
    fn from((start, stop, step): (Option<i64>, Option<i64>, Option<i64>)) -> Self {
        Self::from_ints(start, stop, step)
    }
}

/// Untyped `(start, stop, step)` produced by shape dispatch. A JSON `null` is
/// normalized to an absent slot on the way in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTriple {
    pub start: Option<Value>,
    pub stop: Option<Value>,
    pub step: Option<Value>,
}

impl RawTriple {
    #[must_use]
    pub fn new(start: Option<Value>, stop: Option<Value>, step: Option<Value>) -> Self {
        Self {
            start: start.and_then(non_null),
            stop: stop.and_then(non_null),
            step: step.and_then(non_null),
        }
    }
}

impl From<Interval> for RawTriple {
    fn from(it: Interval) -> Self { Self::new(it.start, it.stop, it.step) }
}

fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        it => Some(it),
    }
}

/// Every input shape the adapter understands. Anything that can't be classified lands
/// in [`IntervalInput::Other`] and is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalInput {
    Native(Interval),
    Mapping(Map<String, Value>),
    Text(String),
    Sequence(Vec<Value>),
    Other(Value),
}

impl From<Value> for IntervalInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => IntervalInput::Mapping(map),
            Value::String(text) => IntervalInput::Text(text),
            Value::Array(items) => IntervalInput::Sequence(items),
            other => IntervalInput::Other(other),
        }
    }
}

impl From<Interval> for IntervalInput {
    fn from(it: Interval) -> Self { IntervalInput::Native(it) }
}

impl From<&str> for IntervalInput {
    fn from(it: &str) -> Self { IntervalInput::Text(it.to_string()) }
}

impl From<String> for IntervalInput {
    fn from(it: String) -> Self { IntervalInput::Text(it) }
}

impl From<Vec<Value>> for IntervalInput {
    fn from(it: Vec<Value>) -> Self { IntervalInput::Sequence(it) }
}

impl From<Map<String, Value>> for IntervalInput {
    fn from(it: Map<String, Value>) -> Self { IntervalInput::Mapping(it) }
}

/// Output of serialization. Either the compact `start:stop[:step]` string (only when
/// every component is absent or a plain number) or a three field object that preserves
/// arbitrary component values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SerializedInterval {
    Compact(String),
    Structured {
        start: Option<Value>,
        stop: Option<Value>,
        step: Option<Value>,
    },
}
