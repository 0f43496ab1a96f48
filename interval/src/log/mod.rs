// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging is **disabled** by default. The library only emits [tracing] events, it
//! never installs a subscriber. Call [`try_initialize_logging_global`] from a binary
//! (or a test) w/ a [`TracingConfig`] to see them.

// Attach sources.
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
