//! Settings loading for the `sevlog` front end.
//!
//! Pipeline:
//! 1. Read the YAML file (if any) into [`Settings`]
//! 2. Overlay command-line / environment overrides
//! 3. Parse level, format and sink strings
//! 4. Open file sinks and produce a [`Config`]

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::store::Config;
use crate::error::ConfigError;
use crate::format::FormatMask;
use crate::level::Level;
use crate::sink::{Sink, SinkList};

// ============================================================================
// Sink specifications
// ============================================================================

/// Textual description of a sink: `stderr`, `stdout`, `null`, or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkSpec {
    Stderr,
    Stdout,
    Null,
    File(PathBuf),
}

impl SinkSpec {
    /// Opens the destination.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SinkOpen`] if a file sink cannot be opened.
    pub fn open(&self) -> Result<Sink, ConfigError> {
        match self {
            Self::Stderr => Ok(Sink::stderr()),
            Self::Stdout => Ok(Sink::stdout()),
            Self::Null => Ok(Sink::noop()),
            Self::File(path) => Sink::from_file(path).map_err(|source| ConfigError::SinkOpen {
                path: path.clone(),
                source,
            }),
        }
    }
}

impl FromStr for SinkSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ConfigError::InvalidValue {
                field: "sink".to_owned(),
                value: s.to_owned(),
                expected: "stderr, stdout, null or a file path".to_owned(),
            }),
            "stderr" | "-" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            "null" => Ok(Self::Null),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

// ============================================================================
// Settings file
// ============================================================================

/// Raw settings as written in a YAML file.
///
/// ```yaml
/// threshold: debug
/// format: [time, tag, message]
/// sinks: [stderr, ./app.log]
/// ```
///
/// Every key is optional; missing keys keep the logger defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Threshold level name or integer.
    pub threshold: Option<String>,
    /// Field names; `[all]` and `[none]` are accepted.
    pub format: Option<Vec<String>>,
    /// Sink specifications in write order.
    pub sinks: Option<Vec<String>>,
}

impl Settings {
    /// Parses settings from YAML text. `path` is only used for messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for malformed YAML or unknown keys.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist and
    /// [`ConfigError::ParseError`] if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_yaml(&text, path)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Applies overrides; `Some` values replace the file's.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.threshold.is_some() {
            self.threshold = overrides.threshold;
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        if overrides.sinks.is_some() {
            self.sinks = overrides.sinks;
        }
        self
    }

    /// Parses the threshold, defaulting to `ERROR`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown level name.
    pub fn threshold(&self) -> Result<Level, ConfigError> {
        self.threshold
            .as_deref()
            .map_or_else(|| Ok(Level::default()), str::parse)
    }

    /// Parses the format field list, defaulting to all fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown field name.
    pub fn format(&self) -> Result<FormatMask, ConfigError> {
        let Some(fields) = &self.format else {
            return Ok(FormatMask::default());
        };
        fields.iter().try_fold(FormatMask::NONE, |mask, name| {
            Ok(mask | name.parse::<FormatMask>()?)
        })
    }

    /// Parses the sink specifications. `None` means no sinks were given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty specification.
    pub fn sink_specs(&self) -> Result<Option<Vec<SinkSpec>>, ConfigError> {
        self.sinks
            .as_ref()
            .map(|specs| {
                specs
                    .iter()
                    .map(|s| s.parse::<SinkSpec>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
    }

    /// Resolves everything into a [`Config`], opening file sinks.
    ///
    /// # Errors
    ///
    /// Returns the first parse or open failure.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let threshold = self.threshold()?;
        let format = self.format()?;
        let sinks = match self.sink_specs()? {
            Some(specs) => Some(open_all(&specs)?),
            None => None,
        };
        Ok(Config {
            threshold,
            format,
            sinks,
        })
    }
}

fn open_all(specs: &[SinkSpec]) -> Result<SinkList, ConfigError> {
    specs
        .iter()
        .map(|spec| spec.open().map(Arc::new))
        .collect::<Result<Vec<_>, _>>()
        .map(SinkList::from)
}
