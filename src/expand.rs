use crate::Diagnostic;
use anyhow::Result;
use regex::Regex;
use std::{fs, path::Path};

/// Hard bound on nested includes; an include cycle hits this and degrades to
/// an empty expansion instead of overflowing the stack.
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// Joins adjacent source lines inside the generated string literal: close the
/// quote with an escaped newline, reopen it indented on the next line.
const LINE_JOIN: &str = "\\n\"\n  \"";

pub struct Expander {
    directive: Regex,
}

impl Expander {
    pub fn new() -> Result<Self> {
        Ok(Self {
            directive: Regex::new(r#"^#include\("(.+?)"\)"#)?,
        })
    }

    /// Expands a top-level fragment into the body of one multi-line string
    /// literal. Returns `None` when the fragment itself cannot be read.
    pub fn expand_fragment(
        &self,
        dir: &Path,
        file_name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        let lines = self.expand_lines(dir, file_name, 0, diagnostics)?;

        Some(lines.join(LINE_JOIN))
    }

    fn expand_lines(
        &self,
        dir: &Path,
        file_name: &str,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Vec<String>> {
        let path = dir.join(file_name);

        if depth > MAX_INCLUDE_DEPTH {
            diagnostics.push(Diagnostic::IncludeDepthExceeded { path });
            return None;
        }

        let Ok(text) = fs::read_to_string(&path) else {
            diagnostics.push(Diagnostic::UnreadableFragment { path });
            return None;
        };

        let mut lines = vec![];
        for line in text.lines() {
            if let Some(captures) = self.directive.captures(line) {
                // Include paths resolve against the directory the expansion
                // started from, not the current file's own directory. A failed
                // include contributes nothing and the surrounding lines stand.
                if let Some(included) = self.expand_lines(dir, &captures[1], depth + 1, diagnostics)
                {
                    lines.push(format!("{}\\n", included.join(LINE_JOIN)));
                }
            } else {
                lines.push(line.to_owned());
            }
        }

        Some(lines)
    }
}
