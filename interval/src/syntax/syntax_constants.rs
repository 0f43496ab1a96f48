// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const SLOT_SEPARATOR: &str = ":";
pub const SLOT_SEPARATOR_CHAR: char = ':';

/// Minimum and maximum number of [`SLOT_SEPARATOR`]s in a valid interval string.
pub const MIN_SEPARATOR_COUNT: usize = 1;
pub const MAX_SEPARATOR_COUNT: usize = 2;

/// Matches strings that have 1 or 2 colons and a non blank `stop` token. Used in JSON
/// schema output.
pub const INTERVAL_SYNTAX_PATTERN: &str = r"^[^:]*:\s*[^:\s][^:]*(:[^:]*)?$";

/// Same shape as [`INTERVAL_SYNTAX_PATTERN`], but every token must be an integer.
pub const INT_RANGE_SYNTAX_PATTERN: &str =
    r"^\s*([+-]?\d+)?\s*:\s*[+-]?\d+\s*(:\s*([+-]?\d+)?\s*)?$";
