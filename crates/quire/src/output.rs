//! Terminal reporting for commands.
//!
//! Messages for the person at the terminal go to stderr here; diagnostics go
//! through `tracing`. Only these lines are styled.

use std::path::Path;

use console::{Style, Term};
use quire_site::PipelineReport;

/// How a line is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Done,
    Attention,
    Failed,
    Address,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Done => Style::new().green(),
            Self::Attention => Style::new().yellow(),
            Self::Failed => Style::new().red(),
            Self::Address => Style::new().cyan().bold(),
        }
    }
}

/// Counts shown once a build finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildSummary {
    pub pages: usize,
    pub fragments_written: usize,
    pub fragments_removed: usize,
    pub files_copied: usize,
    pub warnings: usize,
}

impl BuildSummary {
    pub(crate) fn from_report(report: &PipelineReport) -> Self {
        Self {
            pages: report.build.pages,
            fragments_written: report.build.fragments_written,
            fragments_removed: report.build.fragments_removed,
            files_copied: report.build.assets_copied,
            warnings: report.warnings().count(),
        }
    }

    /// The summary line and its tone. Warnings turn the line yellow; the
    /// individual warnings are already logged.
    pub(crate) fn line(&self) -> (Tone, String) {
        let mut details = vec![
            format!("{} written", plural(self.fragments_written, "fragment")),
            format!("{} copied", plural(self.files_copied, "file")),
        ];
        if self.fragments_removed > 0 {
            details.push(format!("{} removed", plural(self.fragments_removed, "stale fragment")));
        }

        let mut line = format!("Built {} ({})", plural(self.pages, "page"), details.join(", "));
        if self.warnings == 0 {
            (Tone::Done, line)
        } else {
            line.push_str(&format!(" with {}", plural(self.warnings, "warning")));
            (Tone::Attention, line)
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Stderr writer for command output.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Done, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Attention, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Failed, msg);
    }

    pub(crate) fn build_summary(&self, summary: &BuildSummary) {
        let (tone, line) = summary.line();
        self.line(tone, &line);
    }

    /// Announce the listening address, with the served root when there is one.
    pub(crate) fn serving(&self, host: &str, port: u16, root: Option<&Path>) {
        let line = match root {
            Some(root) => format!("Serving {} at http://{host}:{port}", root.display()),
            None => format!("Serving at http://{host}:{port}"),
        };
        self.line(Tone::Address, &line);
    }
}
