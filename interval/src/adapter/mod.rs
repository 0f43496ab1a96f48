// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Typed wrappers around the [`mod@crate::syntax`] codec.
//!
//! 1. [`IntervalAdapter`] is configured once w/ an [`IntervalAdapterConfig`] and then
//!    validates, serializes and describes (JSON schema) interval fields.
//! 2. [`IntSlice`] plugs the shared integer adapter into serde models.

// Attach sources.
pub mod adapter_config;
pub mod int_slice;
pub mod interval_adapter;

// Re-export.
pub use adapter_config::*;
pub use int_slice::*;
pub use interval_adapter::*;
