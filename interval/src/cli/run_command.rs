// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::{Context, IntoDiagnostic};
use serde_json::Value;

use crate::{CLIArg, CLICommand, IntervalAdapter, IntervalAdapterConfig, IntervalInput,
            RangeAdapter, TypeOption};

/// Runs a parsed command, and returns what should be printed to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The config file can't be loaded.
/// - `--json` input isn't valid JSON.
/// - Validation fails.
pub fn run_command(cli_arg: &CLIArg) -> miette::Result<String> {
    match &cli_arg.command {
        CLICommand::Validate {
            input,
            json,
            type_options,
        } => {
            let adapter = IntervalAdapter::new(try_build_config(type_options)?);
            let raw: IntervalInput = if *json {
                serde_json::from_str::<Value>(input)
                    .into_diagnostic()
                    .wrap_err("Input is not valid JSON")?
                    .into()
            } else {
                input.as_str().into()
            };
            let interval = adapter.validate(raw)?;
            // % is Display, ? is Debug.
            tracing::debug!(message = "🔍 validated", input = %input, interval = ?interval);
            to_pretty_json(&adapter.to_json_value(&interval))
        }

        CLICommand::Range { input } => {
            let range = RangeAdapter::validate(input.as_str())?;
            tracing::debug!(message = "🔢 validated range", input = %input, range = ?range);
            Ok(RangeAdapter::serialize(&range))
        }

        CLICommand::Schema {
            range,
            type_options,
        } => {
            let schema = if *range {
                RangeAdapter::json_schema()
            } else {
                IntervalAdapter::new(try_build_config(type_options)?).json_schema()
            };
            to_pretty_json(&schema)
        }
    }
}

/// Starts from the config file (if any), then applies the flags on top.
///
/// # Errors
///
/// Returns an error if the config file can't be read or parsed.
pub fn try_build_config(type_options: &TypeOption) -> miette::Result<IntervalAdapterConfig> {
    let mut config = match &type_options.config {
        Some(path) => IntervalAdapterConfig::try_load_from_file(path)?,
        None => IntervalAdapterConfig::default(),
    };

    if let Some(it) = &type_options.default_type {
        config.default_type = it.clone();
    }
    if let Some(it) = &type_options.start_type {
        config.start_type = Some(it.clone());
    }
    if let Some(it) = &type_options.stop_type {
        config.stop_type = Some(it.clone());
    }
    if let Some(it) = &type_options.step_type {
        config.step_type = Some(it.clone());
    }

    Ok(config)
}

fn to_pretty_json(value: &Value) -> miette::Result<String> {
    serde_json::to_string_pretty(value)
        .into_diagnostic()
        .wrap_err("Could not format output as JSON")
}
