// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fine grained errors for the interval syntax parser and the adapters, using [miette]
//! and [thiserror].
//!
//! All failures surface through [`IntervalError`] at the adapter boundary. Use
//! [`IntervalError::kind`] to branch on the category of failure:
//! - [`ErrorKind::Syntax`] - malformed `[start]:[stop][:step]` string.
//! - [`ErrorKind::Shape`] - the input's overall structure is not supported.
//! - [`ErrorKind::Component`] - one slot's value was rejected by its coercion.

use crate::Slot;

/// Convenience alias used by every fallible public API in this crate.
pub type IntervalResult<T> = Result<T, IntervalError>;

/// The three categories of validation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ErrorKind {
    Syntax,
    Shape,
    Component,
}

/// Errors produced by [`crate::parse_interval_syntax`].
#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum IntervalSyntaxError {
    #[error("Expected 1 or 2 ':' in interval '{input}', found {found}")]
    #[diagnostic(
        code(interval_adapter::syntax::colon_count),
        help("Use the form `[start]:[stop][:step]`, eg: `1:10:2`, `:5` or `2:`")
    )]
    ColonCount { input: String, found: usize },

    #[error("Missing required {slot} in interval '{input}'")]
    #[diagnostic(code(interval_adapter::syntax::missing_slot))]
    MissingSlot { input: String, slot: Slot },

    #[error("Could not convert {slot} '{token}' in interval '{input}': {reason}")]
    #[diagnostic(code(interval_adapter::syntax::converter))]
    Converter {
        input: String,
        slot: Slot,
        token: String,
        reason: String,
    },
}

/// Errors produced by [`crate::IntervalAdapter`] and [`crate::RangeAdapter`].
#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] IntervalSyntaxError),

    #[error("Invalid interval shape: {reason}")]
    #[diagnostic(
        code(interval_adapter::shape),
        help(
            "Pass a `start:stop[:step]` string, a sequence of 1-3 items, or a mapping \
             w/ `start`, `stop`, `step` keys"
        )
    )]
    Shape { reason: String },

    #[error("Invalid interval {slot}: {reason}")]
    #[diagnostic(code(interval_adapter::component))]
    Component { slot: Slot, reason: String },
}

impl IntervalError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntervalError::Syntax(_) => ErrorKind::Syntax,
            IntervalError::Shape { .. } => ErrorKind::Shape,
            IntervalError::Component { .. } => ErrorKind::Component,
        }
    }

    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        IntervalError::Shape {
            reason: reason.into(),
        }
    }

    pub(crate) fn component(slot: Slot, reason: impl Into<String>) -> Self {
        IntervalError::Component {
            slot,
            reason: reason.into(),
        }
    }
}

/// Returned when a component type name (eg: from a config file or a CLI flag) is not
/// one of the built in types.
#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Unknown component type '{name}'")]
#[diagnostic(
    code(interval_adapter::config::unknown_component_type),
    help("Built in component types are: `str`, `int`, `float`, `bool`")
)]
pub struct UnknownComponentTypeError {
    pub name: String,
}
