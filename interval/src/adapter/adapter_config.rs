// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};

use crate::ComponentType;

/// Declares the component types of an interval field. This is the only input to
/// [`crate::IntervalAdapter::new`].
///
/// - `default_type` applies to every slot that doesn't have an override. It defaults
///   to [`ComponentType::Str`], which means no coercion.
/// - `start_type`, `stop_type`, `step_type` are per slot overrides. An override of
///   [`ComponentType::Str`] is the same as no override.
///
/// It can be loaded from JSON, eg: `{"default_type": "int", "step_type": "float"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalAdapterConfig {
    #[serde(default)]
    pub default_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_type: Option<ComponentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_type: Option<ComponentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<ComponentType>,
}

impl IntervalAdapterConfig {
    #[must_use]
    pub fn new(default_type: ComponentType) -> Self {
        Self {
            default_type,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn start_type(mut self, it: ComponentType) -> Self {
        self.start_type = Some(it);
        self
    }

    #[must_use]
    pub fn stop_type(mut self, it: ComponentType) -> Self {
        self.stop_type = Some(it);
        self
    }

    #[must_use]
    pub fn step_type(mut self, it: ComponentType) -> Self {
        self.step_type = Some(it);
        self
    }

    /// Every declared type, in `default, start, stop, step` order, including duplicates.
    pub fn declared_types(&self) -> impl Iterator<Item = &ComponentType> {
        std::iter::once(&self.default_type).chain(
            [&self.start_type, &self.stop_type, &self.step_type]
                .into_iter()
                .flatten(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if:
    /// - The file can't be read.
    /// - The file isn't valid JSON, has unknown keys, or names an unknown type.
    pub fn try_load_from_file(path: impl AsRef<Path>) -> miette::Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(ConfigErrorCouldNot::ReadFile {
                path: path.display().to_string(),
            })?;

        let it: Self = serde_json::from_str(&content)
            .into_diagnostic()
            .wrap_err(ConfigErrorCouldNot::ParseFile {
                path: path.display().to_string(),
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "📑 Loaded interval adapter config",
            path = %path.display(),
            config = ?it
        );

        Ok(it)
    }
}

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum ConfigErrorCouldNot {
    #[error("📑 Could not read interval adapter config file: '{path}'")]
    ReadFile { path: String },

    #[error("🔍 Could not parse interval adapter config file: '{path}'")]
    ParseFile { path: String },
}
