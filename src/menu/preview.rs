use crate::config::PreviewSource;
use crate::logging::log_debug;
use crate::sanitize::keep_sgr_only;
use std::process::{Command, Stdio};

/// Result of asking the preview provider for text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Text(String),
    Failed(String),
}

impl PreviewOutcome {
    /// Text to show in the box, with non-style escape sequences removed.
    pub fn display_text(&self) -> String {
        match self {
            PreviewOutcome::Text(text) => keep_sgr_only(text.as_bytes()),
            PreviewOutcome::Failed(message) => format!(
                "The preview command failed with error message:\n\n{}",
                keep_sgr_only(message.as_bytes())
            ),
        }
    }
}

/// Runs the preview provider and remembers the last result, so repaints that
/// do not move the cursor (resizes, typing) do not rerun the command.
#[derive(Debug, Default)]
pub struct PreviewCache {
    last: Option<(String, PreviewOutcome)>,
}

impl PreviewCache {
    pub fn get(&mut self, source: &PreviewSource, argument: &str) -> PreviewOutcome {
        if let Some((cached_argument, outcome)) = &self.last {
            if cached_argument == argument {
                return outcome.clone();
            }
        }
        let outcome = run_preview(source, argument);
        self.last = Some((argument.to_string(), outcome.clone()));
        outcome
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

pub fn run_preview(source: &PreviewSource, argument: &str) -> PreviewOutcome {
    match source {
        PreviewSource::Command(template) => run_command(template, argument),
        PreviewSource::Function(preview) => match preview(argument) {
            Ok(text) => PreviewOutcome::Text(text),
            Err(err) => PreviewOutcome::Failed(format!("{err:#}")),
        },
    }
}

fn run_command(template: &str, argument: &str) -> PreviewOutcome {
    let parts = match shell_words::split(template) {
        Ok(parts) => parts,
        Err(err) => return PreviewOutcome::Failed(format!("cannot parse preview command: {err}")),
    };
    let mut parts = parts
        .into_iter()
        .map(|part| part.replace("{}", argument));
    let Some(program) = parts.next() else {
        return PreviewOutcome::Failed("the preview command is empty".to_string());
    };
    let output = match Command::new(&program)
        .args(parts)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            log_debug(&format!("preview command {program} failed to start: {err}"));
            return PreviewOutcome::Failed(err.to_string());
        }
    };
    if output.status.success() {
        PreviewOutcome::Text(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        tracing::debug!(status = ?output.status, "preview command failed");
        PreviewOutcome::Failed(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn command_output_is_trimmed() {
        let source = PreviewSource::Command("echo 'file: {}'".to_string());
        assert_eq!(
            run_preview(&source, "notes.txt"),
            PreviewOutcome::Text("file: notes.txt".to_string())
        );
    }

    #[test]
    fn failing_command_reports_stderr() {
        let source = PreviewSource::Command("sh -c 'echo broken >&2; exit 3'".to_string());
        let outcome = run_preview(&source, "x");
        assert_eq!(outcome, PreviewOutcome::Failed("broken".to_string()));
        assert_eq!(
            outcome.display_text(),
            "The preview command failed with error message:\n\nbroken"
        );
    }

    #[test]
    fn function_errors_become_failures() {
        let source = PreviewSource::Function(Arc::new(|arg: &str| {
            anyhow::ensure!(!arg.is_empty(), "nothing to preview");
            Ok(arg.to_uppercase())
        }));
        assert_eq!(run_preview(&source, "ok"), PreviewOutcome::Text("OK".into()));
        assert_eq!(
            run_preview(&source, ""),
            PreviewOutcome::Failed("nothing to preview".into())
        );
    }

    #[test]
    fn cache_reuses_result_for_same_argument() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = PreviewSource::Function(Arc::new(move |arg: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(arg.to_string())
        }));
        let mut cache = PreviewCache::default();
        cache.get(&source, "a");
        cache.get(&source, "a");
        cache.get(&source, "b");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn display_text_strips_cursor_movement() {
        let outcome = PreviewOutcome::Text("\x1b[2J\x1b[32mok\x1b[0m".to_string());
        assert_eq!(outcome.display_text(), "\x1b[32mok\x1b[0m");
    }
}
