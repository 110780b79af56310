//! Command Runner - Blocking execution of the external training command
//!
//! `Launcher` only talks to a `CommandRunner`, so the batch loop can be driven
//! by a scripted runner in tests instead of a real `torchrun`.

use std::fmt;
use std::process::Command;

/// Program plus its argument vector, each argument passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What the launcher learns about a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    /// `None` when terminated by a signal or never started.
    pub code: Option<i32>,
    pub diagnostic: String,
}

impl RunOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
            diagnostic: String::new(),
        }
    }

    pub fn failed(code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            diagnostic: diagnostic.into(),
        }
    }
}

pub trait CommandRunner {
    /// Run `spec` to completion.
    fn run(&mut self, spec: &CommandSpec) -> RunOutcome;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, spec: &CommandSpec) -> RunOutcome {
        (**self).run(spec)
    }
}

/// Runs commands as real child processes sharing the launcher's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> RunOutcome {
        match Command::new(&spec.program).args(&spec.args).status() {
            Ok(status) if status.success() => RunOutcome::succeeded(),
            Ok(status) => RunOutcome::failed(
                status.code(),
                format!("Command '{}' returned non-zero {}", spec, status),
            ),
            Err(e) => RunOutcome::failed(None, format!("failed to start '{}': {}", spec.program, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let spec = CommandSpec::new("torchrun")
            .arg("--nproc_per_node=2")
            .arg("run.py");
        assert_eq!(spec.to_string(), "torchrun --nproc_per_node=2 run.py");
    }

    #[test]
    fn test_missing_program_is_a_failure() {
        let mut runner = SystemRunner;
        let outcome = runner.run(&CommandSpec::new("coconut-launch-no-such-program"));
        assert!(!outcome.success);
        assert_eq!(outcome.code, None);
        assert!(outcome.diagnostic.contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_observed() {
        let mut runner = SystemRunner;
        assert!(runner.run(&CommandSpec::new("true")).success);

        let outcome = runner.run(&CommandSpec::new("sh").arg("-c").arg("exit 7"));
        assert!(!outcome.success);
        assert_eq!(outcome.code, Some(7));
        assert!(outcome.diagnostic.contains("exit status: 7"));
    }
}
