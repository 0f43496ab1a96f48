// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

use clap::Parser;
use interval_adapter::{CLIArg, log::{TracingConfig, try_initialize_logging_global},
                       run_command};

fn main() -> miette::Result<()> {
    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    if should_log {
        try_initialize_logging_global(TracingConfig::new_file(
            cli_arg.global_options.log_file.clone(),
            tracing_core::LevelFilter::DEBUG,
        ))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let res = run_command(&cli_arg);

    match &res {
        Ok(output) => println!("{output}"),
        Err(report) => {
            tracing::error!(message = "Could not run interval", error = ?report);
        }
    }

    should_log.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    res.map(|_| ())
}
