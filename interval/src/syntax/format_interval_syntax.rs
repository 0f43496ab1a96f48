// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Display;

use crate::syntax::SLOT_SEPARATOR;

/// Produce the canonical `start:stop` (or `start:stop:step` when `step` is present)
/// string. Absent components render as nothing between the colons, and no whitespace
/// is added, eg: `(None, Some(5), None)` -> `":5"`.
pub fn format_interval_syntax<N: Display>(
    start: Option<&N>,
    stop: Option<&N>,
    step: Option<&N>,
) -> String {
    let mut acc = String::new();
    push_component(&mut acc, start);
    acc.push_str(SLOT_SEPARATOR);
    push_component(&mut acc, stop);
    if step.is_some() {
        acc.push_str(SLOT_SEPARATOR);
        push_component(&mut acc, step);
    }
    acc
}

fn push_component<N: Display>(acc: &mut String, component: Option<&N>) {
    if let Some(it) = component {
        acc.push_str(&it.to_string());
    }
}
