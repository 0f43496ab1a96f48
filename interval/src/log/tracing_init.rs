// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use miette::{Context, IntoDiagnostic};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::log::{DisplayPreference, TracingConfig, WriterConfig};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Install a global subscriber built from `options`. Does nothing if the level filter
/// is [`LevelFilter::OFF`] or there's nowhere to write to.
///
/// # Errors
///
/// Returns an error if:
/// - The log file can't be created.
/// - A global subscriber has already been installed.
pub fn try_initialize_logging_global(options: impl Into<TracingConfig>) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    // Early return if logging is off.
    if it.get_level_filter() == LevelFilter::OFF || it.writer_config == WriterConfig::None {
        return Ok(());
    }

    let layers = try_create_layers(&it)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Returns the layers. This does not initialize the tracing system, see
/// [`try_initialize_logging_global`] for that.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut return_it: Vec<Box<DynLayer<Registry>>> = vec![Box::new(level_filter)];

    if let Some(layer) = create_display_layer(level_filter, &writer_config) {
        return_it.push(layer);
    }

    if let Some(layer) = try_create_file_layer(level_filter, &writer_config)? {
        return_it.push(layer);
    }

    Ok(return_it)
}

#[must_use]
pub fn create_display_layer(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<Registry>>> {
    let (WriterConfig::Display(display_pref) | WriterConfig::DisplayAndFile(display_pref, _)) =
        writer_config
    else {
        return None;
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let layer: Box<DynLayer<Registry>> = match display_pref {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    };

    Some(layer)
}

/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<Registry>>>> {
    let (WriterConfig::File(file_path) | WriterConfig::DisplayAndFile(_, file_path)) =
        writer_config
    else {
        return Ok(None);
    };

    let file = try_create_file_appender(file_path)?;
    let layer: Box<DynLayer<Registry>> = Box::new(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    );

    Ok(Some(layer))
}

/// Note that if you wrap this up in a non blocking writer, the log lines may not be
/// flushed before the process exits.
fn try_create_file_appender(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access folder of {}. It might not exist, or you don't have the required permissions.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or you don't have the required permissions.",
            path.display()
        )
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .into_diagnostic()
        .wrap_err(format!("Could not create log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_create_display_layer() {
        let writer_config = WriterConfig::Display(DisplayPreference::Stderr);
        assert!(create_display_layer(LevelFilter::DEBUG, &writer_config).is_some());
        assert!(create_display_layer(LevelFilter::DEBUG, &WriterConfig::None).is_none());
    }

    #[test]
    fn test_try_create_file_layer() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("interval_file_layer.log");
        let writer_config = WriterConfig::File(file_path.to_string_lossy().to_string());
        let layer = try_create_file_layer(LevelFilter::DEBUG, &writer_config).unwrap();
        assert!(layer.is_some());
        assert!(file_path.exists());
    }

    #[test]
    fn test_try_create_file_layer_under_a_file_is_an_error() {
        let dir = tempdir().unwrap();
        // A regular file can't be used as the parent folder of the log file.
        let not_a_folder = dir.path().join("not_a_folder");
        std::fs::write(&not_a_folder, "").unwrap();
        let file_path = not_a_folder.join("interval.log");
        let writer_config = WriterConfig::File(file_path.to_string_lossy().to_string());
        assert!(try_create_file_layer(LevelFilter::DEBUG, &writer_config).is_err());
    }

    #[test]
    fn test_try_create_both_layers() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("interval_both_layers.log");
        let config = TracingConfig {
            writer_config: WriterConfig::DisplayAndFile(
                DisplayPreference::Stdout,
                file_path.to_string_lossy().to_string(),
            ),
            level_filter: LevelFilter::INFO,
        };
        let layers = try_create_layers(&config).unwrap();
        // Level filter + display + file.
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_logging_off_is_a_no_op() {
        assert!(try_initialize_logging_global(LevelFilter::OFF).is_ok());
    }
}
