// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Display;

use nom::{IResult, Parser,
          bytes::complete::{tag, take_while},
          multi::separated_list1};

use crate::{IntervalSyntaxError, Slot,
            syntax::{MAX_SEPARATOR_COUNT, MIN_SEPARATOR_COUNT, SLOT_SEPARATOR,
                     SLOT_SEPARATOR_CHAR}};

/// Which slots must be non blank for [`parse_interval_syntax()`] to succeed. `step` is
/// always optional.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RequiredSlots {
    pub start: bool,
    pub stop: bool,
}

impl RequiredSlots {
    /// `start` is optional, `stop` is mandatory. This is what both adapters use, so that
    /// a bare value w/ no colon is never mistaken for an interval.
    pub const STOP_ONLY: RequiredSlots = RequiredSlots {
        start: false,
        stop: true,
    };
}

/// The converted `(start, stop, step)`. Blank tokens are `None`.
pub type ParsedSlots<T> = (Option<T>, Option<T>, Option<T>);

/// Parse `"[start]:[stop][:step]"` and apply `converter` to each non blank token.
///
/// - Whitespace (including tabs and newlines) around tokens and colons is ignored.
/// - A token that is blank after trimming is absent (`None`).
///
/// # Errors
///
/// Returns an error if:
/// - The input has zero, or more than two colons.
/// - A slot marked as required in `required` is blank.
/// - `converter` rejects a token. The error names the slot that failed.
pub fn parse_interval_syntax<T, E: Display>(
    input: &str,
    converter: impl Fn(&str) -> Result<T, E>,
    required: RequiredSlots,
) -> Result<ParsedSlots<T>, IntervalSyntaxError> {
    let [start, stop, step] = split_into_tokens(input)?;

    for (slot, token, is_required) in [
        (Slot::Start, start, required.start),
        (Slot::Stop, stop, required.stop),
    ] {
        if is_required && token.is_none() {
            return Err(IntervalSyntaxError::MissingSlot {
                input: input.to_string(),
                slot,
            });
        }
    }

    let convert = |slot: Slot, token: Option<&str>| -> Result<Option<T>, IntervalSyntaxError> {
        token
            .map(|it| {
                converter(it).map_err(|err| IntervalSyntaxError::Converter {
                    input: input.to_string(),
                    slot,
                    token: it.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    };

    Ok((
        convert(Slot::Start, start)?,
        convert(Slot::Stop, stop)?,
        convert(Slot::Step, step)?,
    ))
}

/// Split the input on colons, and trim each token. Always returns three slots, the
/// last one is `None` when there's only one colon.
fn split_into_tokens(input: &str) -> Result<[Option<&str>; 3], IntervalSyntaxError> {
    let colon_count_error = |found: usize| IntervalSyntaxError::ColonCount {
        input: input.to_string(),
        found,
    };

    let Ok((_remainder, raw_tokens)) = parse_raw_tokens(input) else {
        return Err(colon_count_error(input.matches(SLOT_SEPARATOR_CHAR).count()));
    };

    let separator_count = raw_tokens.len().saturating_sub(1);
    if !(MIN_SEPARATOR_COUNT..=MAX_SEPARATOR_COUNT).contains(&separator_count) {
        return Err(colon_count_error(separator_count));
    }

    let mut it = raw_tokens.into_iter().map(normalize_token);
    Ok([
        it.next().flatten(),
        it.next().flatten(),
        it.next().flatten(),
    ])
}

/// Matches zero or more chars that aren't a colon, separated by colons. Consumes the
/// whole input, since every char is either a separator or part of a token.
#[rustfmt::skip]
fn parse_raw_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(
        /* separator (discarded) */ tag(SLOT_SEPARATOR),
        /* output token, may be empty */ take_while(|it: char| it != SLOT_SEPARATOR_CHAR),
    )
    .parse(input)
}

fn normalize_token(raw: &str) -> Option<&str> {
    let it = raw.trim();
    (!it.is_empty()).then_some(it)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;
    use test_case::test_case;

    fn as_string(it: &str) -> Result<String, Infallible> { Ok(it.to_string()) }

    fn as_int(it: &str) -> Result<i64, std::num::ParseIntError> { it.parse() }

    fn strings(
        start: Option<&str>,
        stop: Option<&str>,
        step: Option<&str>,
    ) -> ParsedSlots<String> {
        (
            start.map(String::from),
            stop.map(String::from),
            step.map(String::from),
        )
    }

    #[test]
    fn test_parse_raw_tokens() {
        assert_eq!(parse_raw_tokens("1:5"), Ok(("", vec!["1", "5"])));
        assert_eq!(parse_raw_tokens(":"), Ok(("", vec!["", ""])));
        assert_eq!(parse_raw_tokens(" a : b :c"), Ok(("", vec![" a ", " b ", "c"])));
        assert_eq!(parse_raw_tokens(""), Ok(("", vec![""])));
    }

    #[test_case("1:5", strings(Some("1"), Some("5"), None) ; "start stop")]
    #[test_case(":5", strings(None, Some("5"), None) ; "stop only")]
    #[test_case("1:", strings(Some("1"), None, None) ; "start only")]
    #[test_case("1:10:2", strings(Some("1"), Some("10"), Some("2")) ; "all three")]
    #[test_case("::", strings(None, None, None) ; "all blank")]
    #[test_case(" 1\t:\n5 : ", strings(Some("1"), Some("5"), None) ; "whitespace everywhere")]
    #[test_case("random:text:with colons", strings(Some("random"), Some("text"), Some("with colons")) ; "inner spaces kept")]
    fn test_parse_optional_slots(input: &str, expected: ParsedSlots<String>) {
        let it = parse_interval_syntax(input, as_string, RequiredSlots::default());
        assert_eq!(it, Ok(expected));
    }

    #[test_case("5", 0 ; "no colon")]
    #[test_case("", 0 ; "empty")]
    #[test_case("random text", 0 ; "text")]
    #[test_case("1:2:3:4", 3 ; "three colons")]
    #[test_case(":::", 3 ; "only colons")]
    fn test_parse_wrong_colon_count(input: &str, found: usize) {
        let it = parse_interval_syntax(input, as_string, RequiredSlots::default());
        assert_eq!(
            it,
            Err(IntervalSyntaxError::ColonCount {
                input: input.to_string(),
                found,
            })
        );
    }

    #[test]
    fn test_parse_required_stop() {
        assert_eq!(
            parse_interval_syntax(":5", as_int, RequiredSlots::STOP_ONLY),
            Ok((None, Some(5), None))
        );
        assert_eq!(
            parse_interval_syntax("1::2", as_int, RequiredSlots::STOP_ONLY),
            Err(IntervalSyntaxError::MissingSlot {
                input: "1::2".into(),
                slot: Slot::Stop,
            })
        );
        assert_eq!(
            parse_interval_syntax("1: \t", as_int, RequiredSlots::STOP_ONLY),
            Err(IntervalSyntaxError::MissingSlot {
                input: "1: \t".into(),
                slot: Slot::Stop,
            })
        );
    }

    #[test]
    fn test_parse_required_start() {
        let required = RequiredSlots {
            start: true,
            stop: false,
        };
        assert_eq!(
            parse_interval_syntax("3:", as_int, required),
            Ok((Some(3), None, None))
        );
        assert_eq!(
            parse_interval_syntax(":3", as_int, required),
            Err(IntervalSyntaxError::MissingSlot {
                input: ":3".into(),
                slot: Slot::Start,
            })
        );
    }

    #[test]
    fn test_parse_converter_error_names_slot() {
        let it = parse_interval_syntax("1:x:2", as_int, RequiredSlots::STOP_ONLY);
        let Err(IntervalSyntaxError::Converter { slot, token, .. }) = it else {
            panic!("expected a converter error, got {it:?}");
        };
        assert_eq!(slot, Slot::Stop);
        assert_eq!(token, "x");

        let it = parse_interval_syntax("1:5: two ", as_int, RequiredSlots::STOP_ONLY);
        let Err(IntervalSyntaxError::Converter { slot, token, .. }) = it else {
            panic!("expected a converter error, got {it:?}");
        };
        assert_eq!(slot, Slot::Step);
        assert_eq!(token, "two");
    }

    #[test]
    fn test_parse_whitespace_tolerance() {
        assert_eq!(
            parse_interval_syntax(" 1 : 5 ", as_int, RequiredSlots::STOP_ONLY),
            parse_interval_syntax("1:5", as_int, RequiredSlots::STOP_ONLY)
        );
    }
}
