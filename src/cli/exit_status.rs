use std::process::ExitCode;

/// Process exit status of a hooklens command.
///
/// Per-file problems found during `analyze` (unparsable files, props
/// failures) are reported as warnings and do not change the status.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command did what was asked.
    Success,
    /// The command refused to act, e.g. `init` over an existing config.
    Failure,
    /// Invalid config, unusable arguments or an I/O error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
