//! Process exit codes.

/// Exit codes for the dupscan application.
///
/// - 0: Success (scan completed; per-file failures do not change this)
/// - 1: General error (the run could not complete)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: The scan, accounting and optional deletion all completed.
    Success = 0,
    /// General error: An unexpected error stopped the run.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
        }
    }
}
