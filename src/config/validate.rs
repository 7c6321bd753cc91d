// src/config/validate.rs

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, ExecSection, RawConfigFile};
use crate::errors::{Result, RuncapError};
use crate::exec::ExecOptions;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RuncapError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let exec = exec_options_from_section(&raw.exec)?;
        Ok(ConfigFile::new_unchecked(exec))
    }
}

/// Convert an `[exec]` section into executor options, parsing durations.
pub fn exec_options_from_section(section: &ExecSection) -> Result<ExecOptions> {
    let mut options = ExecOptions {
        capture: section.capture,
        ..ExecOptions::default()
    };

    if let Some(ref raw) = section.timeout {
        let timeout = parse_duration(raw)?;
        if timeout.is_zero() {
            return Err(RuncapError::ConfigError(
                "[exec].timeout must be greater than zero".to_string(),
            ));
        }
        options.timeout = Some(timeout);
    }

    if let Some(ref raw) = section.drain_grace {
        options.drain_grace = parse_duration(raw)?;
    }

    Ok(options)
}
