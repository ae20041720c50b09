//! Whole-file driver: header text in, annotated header text out.

use crate::scope::{self, LineVerdict, NestingState};
use crate::signature::{PARAM_MARKER, RETURN_MARKER};

/// Counters for one annotated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub lines_in: usize,
    pub lines_out: usize,
    /// Generated lines from an earlier run that were discarded.
    pub stale_dropped: usize,
    /// Declarations that received at least one comment line.
    pub declarations_annotated: usize,
    pub params_written: usize,
    pub returns_written: usize,
}

impl TransformStats {
    pub fn annotations_written(&self) -> usize {
        self.params_written + self.returns_written
    }
}

/// Result of [`annotate_source`].
#[derive(Debug, Clone)]
pub struct Annotated {
    pub text: String,
    pub stats: TransformStats,
}

/// Annotate every class member declaration in `input`.
///
/// Line terminators are preserved as found. Generated lines take the
/// terminator of the declaration they precede, so CRLF files stay CRLF.
pub fn annotate_source(input: &str) -> Annotated {
    let mut state = NestingState::new();
    let mut stats = TransformStats::default();
    let mut text = String::with_capacity(input.len());

    for raw in input.split_inclusive('\n') {
        stats.lines_in += 1;
        let (line, eol) = split_terminator(raw);

        let (next, verdict) = scope::classify(state, line);
        state = next;

        match verdict {
            LineVerdict::Stale => {
                stats.stale_dropped += 1;
                continue;
            }
            LineVerdict::Keep => {}
            LineVerdict::Annotate(comments) => {
                let newline = if eol.is_empty() { "\n" } else { eol };
                stats.declarations_annotated += 1;
                for comment in comments.lines() {
                    let body = comment.trim_start();
                    if body.starts_with(PARAM_MARKER) {
                        stats.params_written += 1;
                    } else if body.starts_with(RETURN_MARKER) {
                        stats.returns_written += 1;
                    }
                    text.push_str(comment);
                    text.push_str(newline);
                    stats.lines_out += 1;
                }
            }
        }

        text.push_str(raw);
        stats.lines_out += 1;
    }

    Annotated { text, stats }
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}
