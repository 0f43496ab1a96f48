// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # interval_adapter
//!
//! Typed slice and range fields for [serde] models, w/ the compact
//! `[start]:[stop][:step]` syntax as their wire format.
//!
//! - [`syntax`] parses and formats the compact syntax. It knows nothing about types,
//!   every token goes through a converter that you pass in.
//! - [`IntervalAdapter`] accepts a native [`Interval`], a `{"start", "stop", "step"}`
//!   mapping, a compact string, or a 1 to 3 element sequence, and normalizes all of
//!   them into the same [`Interval`]. Each component is coerced per its declared
//!   [`ComponentType`].
//! - [`IntSlice`] is a ready made integer slice field type.
//! - [`RangeAdapter`] and [`IntRange`] do the same for integer ranges, which always
//!   have a `stop` and a non zero `step`.
//!
//! Output is the compact string when every component is absent or a plain number,
//! and the structured three field object otherwise.
//!
//! ```
//! use interval_adapter::{IntervalAdapter, IntervalAdapterConfig, ComponentType};
//! use serde_json::json;
//!
//! let adapter = IntervalAdapter::new(
//!     IntervalAdapterConfig::new(ComponentType::Int).step_type(ComponentType::Float),
//! );
//! let a = adapter.validate(":10:0.5").unwrap();
//! let b = adapter.validate(json!({"stop": 10, "step": "0.5"})).unwrap();
//! let c = adapter.validate(json!([null, "10", 0.5])).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//! assert_eq!(adapter.to_json_value(&a), json!(":10:0.5"));
//! ```
//!
//! The `interval` binary wraps all of this in a CLI, see [`CLIArg`].

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod adapter;
pub mod cli;
pub mod coercion;
pub mod interval_error;
pub mod interval_types;
pub mod log;
pub mod range_adapter;
pub mod syntax;

// Re-export.
pub use adapter::*;
pub use cli::*;
pub use coercion::*;
pub use interval_error::*;
pub use interval_types::*;
pub use range_adapter::*;
pub use syntax::*;
