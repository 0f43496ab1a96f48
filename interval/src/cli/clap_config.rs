// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser, Subcommand};

use crate::ComponentType;

/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
/// - <https://developerlife.com/2023/09/17/tuify-clap/>
#[derive(Debug, Parser)]
#[command(bin_name = "interval")]
#[command(about = "📐 Validate, normalize and describe `[start]:[stop][:step]` intervals")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file (`log.txt` unless `--log-file` is given) for debugging"
    )]
    pub enable_logging: bool,

    #[arg(global = true, long, value_name = "path", help = "Path of the log file")]
    pub log_file: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(
        about = "🔍 Validate an interval and print its serialized form as JSON\n💡 Eg: `interval validate ' 1 : 10 : 2 ' --default-type int`"
    )]
    Validate {
        #[arg(value_name = "input", help = "Interval string, or JSON when `--json` is set")]
        input: String,

        #[arg(long, help = "Treat the input as JSON (string, array, or object)")]
        json: bool,

        #[command(flatten)]
        type_options: TypeOption,
    },

    #[clap(about = "🔢 Validate an integer range and print its canonical form\n💡 Eg: `interval range 0:5`")]
    Range {
        #[arg(value_name = "input")]
        input: String,
    },

    #[clap(about = "📜 Print the JSON schema of the accepted input shapes")]
    Schema {
        #[arg(long, help = "Print the schema for integer ranges instead")]
        range: bool,

        #[command(flatten)]
        type_options: TypeOption,
    },
}

/// Component types, either from flags or from a JSON config file. Flags win over the
/// file.
#[derive(Debug, Args, Default)]
pub struct TypeOption {
    #[arg(long, value_name = "path", help = "JSON file w/ an interval adapter config")]
    pub config: Option<String>,

    #[arg(long, value_name = "type", help = "Type of every slot: str, int, float, bool")]
    pub default_type: Option<ComponentType>,

    #[arg(long, value_name = "type")]
    pub start_type: Option<ComponentType>,

    #[arg(long, value_name = "type")]
    pub stop_type: Option<ComponentType>,

    #[arg(long, value_name = "type")]
    pub step_type: Option<ComponentType>,
}
