mod expand;
mod walk;

use anyhow::{Context, Result};
use walk::collect_declaration_elements;
use std::{
    fmt::{self, Display},
    fs,
    path::PathBuf,
};

pub struct Options {
    pub declaration: String,
    pub namespace: String,
    pub route: PathBuf,
    pub output: PathBuf,
}

/// Non-fatal condition encountered while generating. The run always completes;
/// callers decide whether a partially generated header is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    DuplicateIdentifier { identifier: String, path: PathBuf },
    UnreadableFragment { path: PathBuf },
    IncludeDepthExceeded { path: PathBuf },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::DuplicateIdentifier { identifier, path } => {
                write!(f, "{identifier} repeated ... ({})", path.display())
            }
            Diagnostic::UnreadableFragment { path } => {
                write!(f, "'{}' not found", path.display())
            }
            Diagnostic::IncludeDepthExceeded { path } => {
                write!(f, "include depth limit reached at '{}'", path.display())
            }
        }
    }
}

pub struct Bundle {
    pub header: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks the fragment tree and assembles the full header text in memory.
/// I/O errors on the traversal itself are fatal; per-fragment problems are
/// returned as diagnostics.
pub fn generate(options: &Options) -> Result<Bundle> {
    let mut diagnostics = Vec::new();
    let mut elements = collect_declaration_elements(&options.route, &mut diagnostics)?;

    // The original tool always chopped the last assembled element, i.e. the
    // trailing blank-line separator. Generated headers depend on this layout.
    elements.pop();
    let declarations = elements.concat();

    let guard = format!("{}_H", options.declaration).to_uppercase();
    let header = format!(
        "#ifndef {guard}\n#define {guard}\n\nnamespace {}\n{{\n{declarations}\n}};\n\n#endif /* {guard} */\n",
        options.namespace
    );

    Ok(Bundle {
        header,
        diagnostics,
    })
}

/// Generates the header, logs every diagnostic and writes the output file.
pub fn run(options: &Options) -> Result<()> {
    let bundle = generate(options)?;

    for diagnostic in &bundle.diagnostics {
        log::warn!("{diagnostic}");
    }

    fs::write(&options.output, &bundle.header)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    log::info!(
        "Generated {} ({} declarations skipped or degraded)",
        options.output.display(),
        bundle.diagnostics.len()
    );

    Ok(())
}
