// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure parse / format functions for the textual interval grammar:
//!
//! ```text
//! interval := [ws] [start] ws? ':' ws? [stop] (ws? ':' ws? [step])? [ws]
//! ```
//!
//! 1. [`parse_interval_syntax()`] splits a string into three optional tokens and runs a
//!    converter on the ones that are present.
//! 2. [`format_interval_syntax()`] produces the unique canonical form, eg: `1:5`, `:5`,
//!    `1:10:2`.
//!
//! Nothing in here knows about typed validation, see [`crate::IntervalAdapter`] for
//! that.

// Attach sources.
pub mod format_interval_syntax;
pub mod parse_interval_syntax;
pub mod syntax_constants;

// Re-export.
pub use format_interval_syntax::*;
pub use parse_interval_syntax::*;
pub use syntax_constants::*;
