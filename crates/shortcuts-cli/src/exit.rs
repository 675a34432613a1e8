use shortcuts_core::EXIT_USAGE;

/// Typed non-zero exits. Commands return these as errors so that only
/// `main` calls `std::process::exit`.
#[derive(Debug)]
pub enum CommandExit {
    /// The wrapped command exited with this code.
    Code(i32),
    /// The wrapped command was killed by this signal.
    Signal(i32),
    /// `check` found problems.
    CheckFailed { problems: usize },
}

impl CommandExit {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandExit::Code(c) => *c,
            CommandExit::Signal(s) => 128 + s,
            CommandExit::CheckFailed { .. } => EXIT_USAGE,
        }
    }

    /// The wrapped command already reported its own failure.
    pub fn is_silent(&self) -> bool {
        matches!(self, CommandExit::Code(_) | CommandExit::Signal(_))
    }
}

impl std::fmt::Display for CommandExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandExit::Code(code) => write!(f, "command exited with code {code}"),
            CommandExit::Signal(sig) => write!(f, "command killed by signal {sig}"),
            CommandExit::CheckFailed { problems } => {
                write!(f, "check found {problems} problem(s)")
            }
        }
    }
}

impl std::error::Error for CommandExit {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CommandExit::Code(3).exit_code(), 3);
        assert_eq!(CommandExit::Signal(9).exit_code(), 137);
        assert_eq!(CommandExit::CheckFailed { problems: 2 }.exit_code(), 64);
    }

    #[test]
    fn only_check_failures_are_reported() {
        assert!(CommandExit::Code(1).is_silent());
        assert!(!CommandExit::CheckFailed { problems: 1 }.is_silent());
    }
}
