//! Class-scope tracking: decides which lines are direct members of a class.
//!
//! A small state machine over header lines. Once a `class Name` definition
//! line is seen, lines starting with `{` open a block and lines starting with
//! `}` close one. Only lines at depth 1, i.e. directly inside the outermost
//! class body, are offered to the signature heuristics. Inline function
//! bodies and nested classes or structs sit at depth 2 or more and are left
//! alone.
//!
//! Braces are only recognised at the start of a line (Qt/Allman style).
//! `class Foo {` on one line does not open the body.

use crate::signature::{self, PARAM_MARKER, RETURN_MARKER};

/// Nesting state threaded through one file, line by line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestingState {
    in_class: bool,
    depth: usize,
}

/// What happens to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineVerdict {
    /// A previously generated annotation; emit nothing.
    Stale,
    /// Pass the line through unchanged.
    Keep,
    /// Emit these newline-joined comment lines, then the line.
    Annotate(String),
}

impl NestingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_class(&self) -> bool {
        self.in_class
    }

    /// Number of currently open `{` blocks.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Directly inside the outermost class body.
    pub fn at_member_level(&self) -> bool {
        self.in_class && self.depth == 1
    }

    /// Update class and brace tracking for one (non-stale) line.
    fn track(mut self, line: &str) -> Self {
        if !self.in_class && is_class_definition(line) {
            self.in_class = true;
        }
        if !self.in_class {
            return self;
        }

        let was_nested = self.depth > 0;
        let trimmed = line.trim_start();
        if trimmed.starts_with('{') {
            self.depth += 1;
        } else if trimmed.starts_with('}') {
            self.depth = self.depth.saturating_sub(1);
        }
        if was_nested {
            self.in_class = self.depth > 0;
        }
        self
    }
}

/// True for lines this tool generated on an earlier run.
pub fn should_drop(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(RETURN_MARKER.trim_end()) || trimmed.starts_with(PARAM_MARKER.trim_end())
}

/// `class Name ...` that is not a forward declaration.
pub fn is_class_definition(line: &str) -> bool {
    line.trim_start().starts_with("class ") && !line.trim_end().ends_with(';')
}

/// Advance the state by one line and decide what to emit for it.
///
/// `line` must not carry its line terminator.
pub fn classify(state: NestingState, line: &str) -> (NestingState, LineVerdict) {
    if should_drop(line) {
        return (state, LineVerdict::Stale);
    }

    let state = state.track(line);
    if !state.at_member_level() || !line.contains('(') {
        return (state, LineVerdict::Keep);
    }

    let verdict = match signature::method_comments(line) {
        Some(comments) => LineVerdict::Annotate(comments),
        None => LineVerdict::Keep,
    };
    (state, verdict)
}

/// Line-level contract: `None` drops the line, otherwise the text to emit
/// (comments, a newline, then the original line).
pub fn process(state: NestingState, line: &str) -> (NestingState, Option<String>) {
    let (state, verdict) = classify(state, line);
    let emitted = match verdict {
        LineVerdict::Stale => None,
        LineVerdict::Keep => Some(line.to_string()),
        LineVerdict::Annotate(comments) => Some(format!("{}\n{}", comments, line)),
    };
    (state, emitted)
}
