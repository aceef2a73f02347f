//! Spec pattern compilation
//!
//! Spec patterns follow the engine's matcher: `{a,b}` brace sets expand to
//! alternatives, and `**` only spans directories when it is a whole path
//! component (elsewhere it behaves like `*`). Each alternative is then a
//! plain glob the `glob` crate can check and match.

use std::path::{Path, PathBuf};

/// Expand and normalize a spec pattern into plain glob alternatives
pub fn alternatives(pattern: &str) -> Vec<String> {
    expand_braces(pattern)
        .iter()
        .map(|alt| normalize_globstar(alt))
        .collect()
}

/// Check every alternative of a spec pattern
pub fn check(pattern: &str) -> Result<(), glob::PatternError> {
    for alt in alternatives(pattern) {
        glob::Pattern::new(&alt)?;
    }
    Ok(())
}

/// Anchor a plain glob alternative under `root`
///
/// The root is escaped so brackets or wildcards in directory names match
/// literally. Absolute alternatives are returned unchanged.
pub fn anchor(root: &Path, alt: &str) -> String {
    if Path::new(alt).is_absolute() || root.as_os_str().is_empty() {
        return alt.to_string();
    }
    let escaped = PathBuf::from(glob::Pattern::escape(&root.to_string_lossy()));
    escaped.join(alt).to_string_lossy().into_owned()
}

fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close, commas)) = find_brace_set(pattern) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = Vec::with_capacity(commas.len() + 2);
    bounds.push(open);
    bounds.extend(commas);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|w| expand_braces(&format!("{}{}{}", prefix, &pattern[w[0] + 1..w[1]], suffix)))
        .collect()
}

/// First balanced `{...}` holding a top-level comma
fn find_brace_set(pattern: &str) -> Option<(usize, usize, Vec<usize>)> {
    let bytes = pattern.as_bytes();
    for (start, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'{') {
        let mut depth = 0usize;
        let mut commas = Vec::new();
        for (i, &b) in bytes.iter().enumerate().skip(start) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        if !commas.is_empty() {
                            return Some((start, i, commas));
                        }
                        break;
                    }
                }
                b',' if depth == 1 => commas.push(i),
                _ => {}
            }
        }
    }
    None
}

/// Collapse `**` inside a component (e.g. `**.cy.js`) to `*`
fn normalize_globstar(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|component| {
            if component == "**" || !component.contains("**") {
                return component.to_string();
            }
            let mut out = String::with_capacity(component.len());
            for c in component.chars() {
                if c == '*' && out.ends_with('*') {
                    continue;
                }
                out.push(c);
            }
            out
        })
        .collect::<Vec<_>>()
        .join("/")
}
