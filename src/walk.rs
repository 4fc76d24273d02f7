use crate::{expand::Expander, Diagnostic};
use anyhow::{Context, Result};
use std::{collections::HashSet, path::Path};
use walkdir::WalkDir;

// Declarations sit one level inside the namespace braces.
const INDENT: &str = "  ";

/// Walks `root` and produces the flat list of assembled elements: for each
/// eligible fragment a declaration line, a quoted-string line and a blank
/// separator, in filesystem traversal order. Traversal errors are fatal;
/// everything else degrades to a diagnostic.
pub fn collect_declaration_elements(
    root: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<String>> {
    let expander = Expander::new()?;
    let mut seen = HashSet::new();
    let mut elements = vec![];

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        // Underscore-prefixed fragments are include-only.
        if file_name.starts_with('_') {
            continue;
        }

        let dir = entry.path().parent().unwrap_or(root).to_owned();
        let Some(content) = expander.expand_fragment(&dir, &file_name, diagnostics) else {
            continue;
        };

        let identifier = derive_identifier(entry.path(), root);
        if !seen.insert(identifier.clone()) {
            diagnostics.push(Diagnostic::DuplicateIdentifier {
                identifier,
                path: entry.path().to_owned(),
            });
            continue;
        }

        elements.push(format!("{INDENT}static const char* {identifier} =\n"));
        elements.push(format!("{INDENT}\"{content}\";"));
        elements.push("\n\n".to_owned());
    }

    Ok(elements)
}

/// Derives the C identifier for a fragment from its path relative to the
/// tree root: separators become `_`, a trailing `.glsl` is stripped, any
/// remaining `.` or space becomes `_`, and only the first character is
/// lower-cased.
fn derive_identifier(path: &Path, root: &Path) -> String {
    let relative: &Path = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("_");

    let trimmed = joined.strip_suffix(".glsl").unwrap_or(&joined);
    let cleaned = trimmed.replace(['.', ' '], "_");

    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn identifier(relative: &str) -> String {
        derive_identifier(&PathBuf::from("/tree").join(relative), Path::new("/tree"))
    }

    #[test]
    fn identifier_from_plain_file() {
        assert_eq!(identifier("Phong.glsl"), "phong");
    }

    #[test]
    fn identifier_from_nested_file() {
        assert_eq!(identifier("lighting/Point.glsl"), "lighting_Point");
    }

    #[test]
    fn identifier_replaces_dots_and_spaces() {
        assert_eq!(identifier("blur pass.v2.glsl"), "blur_pass_v2");
    }

    #[test]
    fn identifier_strips_only_the_exact_glsl_suffix() {
        // An upper-cased extension is not the `.glsl` suffix, so it is kept
        // and its dot is rewritten instead.
        assert_eq!(identifier("Depth.GLSL"), "depth_GLSL");
        assert_eq!(identifier("notes.txt"), "notes_txt");
    }

    #[test]
    fn identifier_lowercases_only_the_first_character() {
        assert_eq!(identifier("ScreenQuadVert.glsl"), "screenQuadVert");
    }
}
