// src/types.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which of the child's output pipes a piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the two captured streams are combined into a single text.
///
/// - `Completion`: each stream is buffered on its own and the buffers are
///   concatenated in the order the drainers reached end-of-stream (default).
///   Only within-stream order is meaningful.
/// - `Interleaved`: every line goes through one ordered channel tagged with
///   its stream, so the combined text follows the order lines were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    #[default]
    Completion,
    Interleaved,
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completion" => Ok(CaptureMode::Completion),
            "interleaved" => Ok(CaptureMode::Interleaved),
            other => Err(format!(
                "invalid capture mode: {other} (expected \"completion\" or \"interleaved\")"
            )),
        }
    }
}
