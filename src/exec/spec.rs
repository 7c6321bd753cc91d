// src/exec/spec.rs

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

/// Immutable description of one external command invocation.
///
/// The child always inherits the full environment of the current process;
/// there is no way to add or remove individual variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name (resolved via `PATH`) or path.
    pub program: String,

    /// Arguments passed verbatim, without any shell interpretation.
    pub args: Vec<String>,

    /// Working directory for the child; `None` inherits ours.
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory. An empty path means "inherit", which is
    /// how script hosts encode an unset option.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.working_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    /// Build the Tokio command with both output streams piped and stdin
    /// closed.
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_working_dir_means_inherit() {
        let spec = CommandSpec::new("ls").current_dir("");
        assert_eq!(spec.working_dir, None);

        let spec = CommandSpec::new("ls").current_dir("/tmp");
        assert_eq!(spec.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn args_are_kept_in_order() {
        let spec = CommandSpec::new("echo")
            .arg("a b")
            .args(["--flag", "$HOME"]);
        assert_eq!(spec.args, vec!["a b", "--flag", "$HOME"]);
    }
}
