//! The run action
//!
//! Script files are evaluated by a [`ScriptHost`]; everything else asks for a
//! rendered preview instead. Script failures are reported in the log panel and
//! never propagate out of [`run_active`].
//!
//! There is no sandbox. A script can do whatever the host runtime allows, but
//! it is interrupted once it runs past the host's time limit.

mod quickjs;

pub use quickjs::QuickJsHost;

use crate::console::{LogPanel, Severity};
use crate::workspace::{FileId, Workspace};
use std::fmt;
use std::time::Duration;

/// Errors from evaluating a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script threw; `message` is the thrown error's message
    Thrown { message: String },

    /// The script ran past the time limit and was stopped
    TimedOut(Duration),

    /// The runtime or context could not be set up
    Unavailable(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Thrown { message } => write!(f, "{}", message),
            ScriptError::TimedOut(limit) => {
                write!(f, "script interrupted after {}s time limit", limit.as_secs_f32())
            }
            ScriptError::Unavailable(reason) => write!(f, "script host unavailable: {}", reason),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Something that can execute script source
pub trait ScriptHost {
    /// Evaluate `source`. Console output produced during the run is appended to
    /// `output` in call order, even when the script then fails.
    fn evaluate(
        &mut self,
        name: &str,
        source: &str,
        output: &mut Vec<(Severity, String)>,
    ) -> Result<(), ScriptError>;
}

/// What the run action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script ran to completion
    Executed,
    /// The script failed; the error is already in the log
    Failed,
    /// Not a script: show a rendered preview of this file
    Preview(FileId),
    /// No active file
    NothingActive,
}

/// Run the active file.
///
/// The caller commits live editor text before calling this, so the record's
/// content is what runs.
pub fn run_active(
    workspace: &Workspace,
    host: &mut dyn ScriptHost,
    panel: &mut LogPanel,
) -> RunOutcome {
    let Some(file) = workspace.active_file() else {
        return RunOutcome::NothingActive;
    };

    if !file.language.is_executable() {
        tracing::debug!(name = %file.name, "previewing non-script file");
        return RunOutcome::Preview(file.id.clone());
    }

    panel.emphasis(format!("Executing {}...", file.name));
    tracing::info!(name = %file.name, "running script");

    let mut output = Vec::new();
    let result = host.evaluate(&file.name, &file.content, &mut output);
    for (severity, line) in output {
        panel.log(line, severity);
    }

    match result {
        Ok(()) => RunOutcome::Executed,
        Err(e) => {
            panel.error(format!("Error: {}", e));
            RunOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::FileId;

    /// Records what it was asked to run and replays a canned result
    struct FakeHost {
        ran: Vec<String>,
        result: Result<(), ScriptError>,
    }

    impl ScriptHost for FakeHost {
        fn evaluate(
            &mut self,
            _name: &str,
            source: &str,
            output: &mut Vec<(Severity, String)>,
        ) -> Result<(), ScriptError> {
            self.ran.push(source.to_string());
            output.push((Severity::Neutral, "out".to_string()));
            self.result.clone()
        }
    }

    #[test]
    fn test_non_script_requests_preview() {
        let ws = Workspace::with_defaults();
        let mut host = FakeHost {
            ran: Vec::new(),
            result: Ok(()),
        };
        let mut panel = LogPanel::new();
        let outcome = run_active(&ws, &mut host, &mut panel);
        assert_eq!(outcome, RunOutcome::Preview(FileId::from("1")));
        assert!(host.ran.is_empty());
        assert!(panel.is_empty());
    }

    #[test]
    fn test_failure_logs_one_error_line_after_output() {
        let mut ws = Workspace::with_defaults();
        ws.switch_to(&FileId::from("2"), None);
        let mut host = FakeHost {
            ran: Vec::new(),
            result: Err(ScriptError::Thrown {
                message: "nope".to_string(),
            }),
        };
        let mut panel = LogPanel::new();
        assert_eq!(run_active(&ws, &mut host, &mut panel), RunOutcome::Failed);

        let lines: Vec<(&str, Severity)> = panel
            .entries()
            .iter()
            .map(|e| (e.message.as_str(), e.severity))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("Executing index.js...", Severity::Emphasis),
                ("out", Severity::Neutral),
                ("Error: nope", Severity::Error),
            ]
        );
    }

    #[test]
    fn test_nothing_active() {
        let mut ws = Workspace::with_defaults();
        for raw in ["1", "2", "3"] {
            ws.delete_file(&FileId::from(raw));
        }
        let mut host = FakeHost {
            ran: Vec::new(),
            result: Ok(()),
        };
        let mut panel = LogPanel::new();
        assert_eq!(
            run_active(&ws, &mut host, &mut panel),
            RunOutcome::NothingActive
        );
    }
}
