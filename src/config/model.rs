// src/config/model.rs

use serde::Deserialize;

use crate::exec::ExecOptions;
use crate::types::CaptureMode;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [exec]
/// capture = "interleaved"
/// timeout = "30s"
/// drain_grace = "2s"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Executor behaviour from `[exec]`.
    #[serde(default)]
    pub exec: ExecSection,
}

/// `[exec]` section, with durations still in their textual form.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExecSection {
    /// `"completion"` (default) or `"interleaved"`.
    #[serde(default)]
    pub capture: CaptureMode,

    /// Optional deadline for the child process, e.g. `"30s"`.
    ///
    /// When absent the process runs until it exits on its own.
    #[serde(default)]
    pub timeout: Option<String>,

    /// How long drainers may keep reading after a timed-out child was killed.
    #[serde(default)]
    pub drain_grace: Option<String>,
}

/// Validated configuration.
///
/// Construct via `TryFrom<RawConfigFile>` (see `validate.rs`) so that every
/// duration has been parsed and checked.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub exec: ExecOptions,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(exec: ExecOptions) -> Self {
        Self { exec }
    }
}
