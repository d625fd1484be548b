//! # Error Suggestions
//!
//! Helpers that build the `hint:` text attached to configuration errors.
//! An error should tell the user what went wrong AND how to fix it.

use std::path::Path;

/// Hint for a repository root that has no `.gitmodules` file.
pub fn manifest_not_found(root: &Path) -> String {
    format!(
        "Run from the parent repository or pass --repo-root (currently {})\n  \
         hint: Set SUBMODULE_WORKFLOW_ROOT to change the default root",
        root.display()
    )
}

/// Hint for `--modules` names that are not registered in `.gitmodules`.
///
/// Suggests the closest registered name for each unknown one and lists all
/// registered names. Returns `None` when nothing is registered.
pub fn unknown_submodules(missing: &[String], known: &[&str]) -> Option<String> {
    if known.is_empty() {
        return None;
    }

    let mut hints: Vec<String> = missing
        .iter()
        .filter_map(|name| {
            find_similar(name, known).map(|s| format!("Did you mean '{s}' instead of '{name}'?"))
        })
        .collect();
    hints.push(format!("Registered submodules: {}", known.join(", ")));

    Some(hints.join("\n  hint: "))
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rolling rows are enough for submodule-name sized inputs.
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
