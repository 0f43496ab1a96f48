// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, convert::Infallible, str::FromStr, sync::LazyLock};

use serde_json::{Map, Number, Value, json};

use crate::{ComponentCoercer, ComponentType, ComponentTypeKey, INTERVAL_SYNTAX_PATTERN,
            Interval, IntervalAdapterConfig, IntervalError, IntervalInput,
            IntervalResult, RawTriple, RequiredSlots, SerializedInterval,
            SharedCoercer, Slot, format_interval_syntax, parse_interval_syntax};

/// Shared adapter w/ every slot declared as [`ComponentType::Int`].
static INT_ADAPTER: LazyLock<IntervalAdapter> =
    LazyLock::new(|| IntervalAdapter::new(IntervalAdapterConfig::new(ComponentType::Int)));

/// The validated entry and exit point for interval typed fields.
///
/// An adapter is built once from an [`IntervalAdapterConfig`] and is immutable after
/// that, so it can be shared across threads and used for any number of
/// [`IntervalAdapter::validate`] and [`IntervalAdapter::serialize`] calls.
///
/// ```
/// use interval_adapter::{ComponentType, Interval, IntervalAdapter, IntervalAdapterConfig};
/// use serde_json::json;
///
/// let adapter = IntervalAdapter::new(IntervalAdapterConfig::new(ComponentType::Int));
/// let it = adapter.validate(" 1 : 10 : 2 ").unwrap();
/// assert_eq!(it, Interval::from_ints(Some(1), Some(10), Some(2)));
/// assert_eq!(adapter.to_json_value(&it), json!("1:10:2"));
/// ```
#[derive(Debug, Clone)]
pub struct IntervalAdapter {
    config: IntervalAdapterConfig,
    start_coercer: Option<SharedCoercer>,
    stop_coercer: Option<SharedCoercer>,
    step_coercer: Option<SharedCoercer>,
}

impl Default for IntervalAdapter {
    fn default() -> Self { Self::new(IntervalAdapterConfig::default()) }
}

impl From<IntervalAdapterConfig> for IntervalAdapter {
    fn from(config: IntervalAdapterConfig) -> Self { Self::new(config) }
}

impl IntervalAdapter {
    /// Build one coercer per distinct declared type, and hand out shared references to
    /// the slots that need them.
    #[must_use]
    pub fn new(config: IntervalAdapterConfig) -> Self {
        let (start_coercer, stop_coercer, step_coercer) = {
            let mut coercers: HashMap<ComponentTypeKey<'_>, SharedCoercer> = HashMap::new();
            for it in config.declared_types() {
                if let Some(coercer) = it.build_coercer() {
                    coercers.entry(it.key()).or_insert(coercer);
                }
            }

            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🔧 Configure interval adapter",
                default_type = %config.default_type,
                distinct_coercers = coercers.len(),
                config = ?config
            );

            let default_coercer = coercers.get(&config.default_type.key()).cloned();
            let pick = |maybe_type: Option<&ComponentType>| match maybe_type {
                Some(it) if !it.is_passthrough() => coercers.get(&it.key()).cloned(),
                _ => default_coercer.clone(),
            };

            (
                pick(config.start_type.as_ref()),
                pick(config.stop_type.as_ref()),
                pick(config.step_type.as_ref()),
            )
        };

        Self {
            config,
            start_coercer,
            stop_coercer,
            step_coercer,
        }
    }

    /// The shared adapter for all integer intervals.
    #[must_use]
    pub fn int() -> &'static IntervalAdapter { &INT_ADAPTER }

    #[must_use]
    pub fn config(&self) -> &IntervalAdapterConfig { &self.config }

    #[must_use]
    pub fn coercer(&self, slot: Slot) -> Option<&SharedCoercer> {
        match slot {
            Slot::Start => self.start_coercer.as_ref(),
            Slot::Stop => self.stop_coercer.as_ref(),
            Slot::Step => self.step_coercer.as_ref(),
        }
    }

    /// Accepts any [`IntervalInput`] shape, reduces it to a [`RawTriple`], then runs
    /// each present slot through its coercer.
    ///
    /// | Shape      | Rule                                                            |
    /// |------------|-----------------------------------------------------------------|
    /// | `Native`   | components are coerced like any other shape                     |
    /// | `Mapping`  | keys must be a subset of `start`, `stop`, `step`                |
    /// | `Text`     | `[start]:stop[:step]`, `stop` is mandatory                      |
    /// | `Sequence` | 1 to 3 items, mapped to `start`, `stop`, `step` in that order   |
    /// | `Other`    | rejected                                                        |
    ///
    /// # Errors
    ///
    /// Returns the first failure found, see [`IntervalError`].
    pub fn validate(&self, input: impl Into<IntervalInput>) -> IntervalResult<Interval> {
        let raw = match input.into() {
            IntervalInput::Native(it) => {
                tracing::trace!(message = "validate native interval", input = ?it);
                RawTriple::from(it)
            }
            IntervalInput::Mapping(map) => {
                tracing::trace!(message = "validate mapping", input = ?map);
                raw_triple_from_mapping(map)?
            }
            IntervalInput::Text(text) => {
                tracing::trace!(message = "validate text", input = %text);
                raw_triple_from_text(&text)?
            }
            IntervalInput::Sequence(items) => {
                tracing::trace!(message = "validate sequence", input = ?items);
                raw_triple_from_sequence(items)?
            }
            IntervalInput::Other(value) => {
                tracing::trace!(message = "reject unsupported shape", input = %value);
                return Err(IntervalError::shape(
                    "Expected an interval, sequence, mapping or str",
                ));
            }
        };

        self.coerce(raw)
    }

    fn coerce(&self, raw: RawTriple) -> IntervalResult<Interval> {
        Ok(Interval {
            start: coerce_slot(Slot::Start, raw.start, self.start_coercer.as_deref())?,
            stop: coerce_slot(Slot::Stop, raw.stop, self.stop_coercer.as_deref())?,
            step: coerce_slot(Slot::Step, raw.step, self.step_coercer.as_deref())?,
        })
    }

    /// Compact `start:stop[:step]` string when every component is absent or a plain
    /// number, otherwise the structured three field form. There is no partial
    /// compaction.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn serialize(&self, interval: &Interval) -> SerializedInterval {
        match (
            as_plain_number(interval.start.as_ref()),
            as_plain_number(interval.stop.as_ref()),
            as_plain_number(interval.step.as_ref()),
        ) {
            (Some(start), Some(stop), Some(step)) => {
                SerializedInterval::Compact(format_interval_syntax(start, stop, step))
            }
            _ => SerializedInterval::Structured {
                start: interval.start.clone(),
                stop: interval.stop.clone(),
                step: interval.step.clone(),
            },
        }
    }

    #[must_use]
    pub fn to_json_value(&self, interval: &Interval) -> Value {
        match self.serialize(interval) {
            SerializedInterval::Compact(it) => Value::String(it),
            SerializedInterval::Structured { start, stop, step } => {
                json!({"start": start, "stop": stop, "step": step})
            }
        }
    }

    /// JSON schema for the union of accepted shapes. The per field schemas of the
    /// object branch come from each slot's coercer, or `{}` (any value) if there's none.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        let slot_schema =
            |it: Option<&SharedCoercer>| it.map_or_else(|| json!({}), |it| it.schema());

        json!({
            "anyOf": [
                {"type": "string", "pattern": INTERVAL_SYNTAX_PATTERN},
                {"type": "array", "minItems": 1, "maxItems": 3},
                {
                    "type": "object",
                    "properties": {
                        "start": slot_schema(self.start_coercer.as_ref()),
                        "stop": slot_schema(self.stop_coercer.as_ref()),
                        "step": slot_schema(self.step_coercer.as_ref()),
                    },
                    "additionalProperties": false,
                },
            ]
        })
    }
}

/// `Some(None)` for an absent slot, `Some(Some(_))` for a number, `None` otherwise.
fn as_plain_number(component: Option<&Value>) -> Option<Option<&Number>> {
    match component {
        None => Some(None),
        Some(Value::Number(it)) => Some(Some(it)),
        Some(_) => None,
    }
}

fn coerce_slot(
    slot: Slot,
    raw: Option<Value>,
    coercer: Option<&dyn ComponentCoercer>,
) -> IntervalResult<Option<Value>> {
    match (raw, coercer) {
        (Some(value), Some(coercer)) => coercer.coerce(&value).map(Some).map_err(|reason| {
            tracing::trace!(message = "component rejected", slot = %slot, reason = %reason);
            IntervalError::component(slot, reason)
        }),
        (it, _) => Ok(it),
    }
}

fn raw_triple_from_mapping(mut map: Map<String, Value>) -> IntervalResult<RawTriple> {
    if let Some(key) = map.keys().find(|it| Slot::from_str(it).is_err()) {
        return Err(IntervalError::shape(format!(
            r#"Invalid key '{key}' for interval, can only accept "start"/"stop"/"step""#
        )));
    }
    Ok(RawTriple::new(
        map.remove("start"),
        map.remove("stop"),
        map.remove("step"),
    ))
}

/// The tokens are kept as strings, the slot coercers do the typing.
fn raw_triple_from_text(text: &str) -> IntervalResult<RawTriple> {
    let (start, stop, step) = parse_interval_syntax(
        text,
        |it| Ok::<_, Infallible>(Value::String(it.to_string())),
        RequiredSlots::STOP_ONLY,
    )?;
    Ok(RawTriple::new(start, stop, step))
}

fn raw_triple_from_sequence(items: Vec<Value>) -> IntervalResult<RawTriple> {
    let len = items.len();
    if !(1..=3).contains(&len) {
        return Err(IntervalError::shape(format!(
            "A sequence input to an interval must have 1-3 elements, got {len}"
        )));
    }
    let mut it = items.into_iter();
    Ok(RawTriple::new(it.next(), it.next(), it.next()))
}
