//! # Submodule Manifest
//!
//! Reads the `.gitmodules` file at the root of the parent repository and
//! turns each `[submodule "<name>"]` section into a [`Submodule`] entry.
//!
//! The file is owned by git and uses git's config syntax, which is a close
//! enough relative of INI that `rust-ini` parses it directly. Entries come
//! back in file order. Paths are not checked for existence here; a missing
//! or broken checkout shows up later as a git error or an unavailable status.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use log::debug;

use crate::error::{Error, Result};
use crate::suggestions;

/// Name of the manifest file git keeps at the repository root.
pub const MANIFEST_FILE: &str = ".gitmodules";

/// A single git submodule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    /// Logical name from the section header.
    pub name: String,
    /// Path as written in the manifest, relative to the parent root.
    pub relative_path: PathBuf,
    /// `relative_path` joined onto the parent root.
    pub path: PathBuf,
}

/// The submodules registered in a parent repository.
#[derive(Debug, Clone)]
pub struct Manifest {
    root: PathBuf,
    submodules: Vec<Submodule>,
}

impl Manifest {
    /// Load the manifest for the parent repository at `root`.
    ///
    /// Fails with [`Error::ManifestNotFound`] when `root` has no
    /// `.gitmodules` file.
    pub fn load(root: &Path) -> Result<Self> {
        let root = resolve_root(root)?;
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(Error::ManifestNotFound {
                hint: Some(suggestions::manifest_not_found(&root)),
                root,
            });
        }

        let content = fs::read_to_string(&manifest_path)?;
        let submodules = parse(&root, &content).map_err(|message| Error::ManifestParse {
            path: manifest_path.clone(),
            message,
        })?;
        debug!(
            "Loaded {} submodule(s) from {}",
            submodules.len(),
            manifest_path.display()
        );

        Ok(Self { root, submodules })
    }

    /// Build a manifest from already-known entries.
    pub fn from_entries(root: PathBuf, submodules: Vec<Submodule>) -> Self {
        Self { root, submodules }
    }

    /// Absolute path of the parent repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registered submodules in file order.
    pub fn submodules(&self) -> &[Submodule] {
        &self.submodules
    }

    pub fn is_empty(&self) -> bool {
        self.submodules.is_empty()
    }

    /// Look up a submodule by its logical name.
    pub fn get(&self, name: &str) -> Option<&Submodule> {
        self.submodules.iter().find(|s| s.name == name)
    }

    /// Registered names in file order.
    pub fn names(&self) -> Vec<&str> {
        self.submodules.iter().map(|s| s.name.as_str()).collect()
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    match root.canonicalize() {
        Ok(path) => Ok(path),
        Err(_) => Ok(std::path::absolute(root)?),
    }
}

/// Parse `.gitmodules` content into submodule entries rooted at `root`.
///
/// Sections without a non-empty `path` key are skipped. Keys match
/// case-insensitively and the last `path` in a section wins, as in git.
pub fn parse(root: &Path, content: &str) -> std::result::Result<Vec<Submodule>, String> {
    // Backslashes in git config values are literal path characters here.
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(&strip_comments(content), options)
        .map_err(|e| e.to_string())?;

    let mut submodules = Vec::new();
    for (section, properties) in ini.iter() {
        let Some(section) = section else {
            continue;
        };
        let Some(path) = properties
            .iter()
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case("path"))
            .map(|(_, value)| value.trim())
            .last()
            .filter(|p| !p.is_empty())
        else {
            debug!("Skipping section [{section}] without a path");
            continue;
        };

        let relative_path = PathBuf::from(path);
        submodules.push(Submodule {
            name: section_name(section),
            path: root.join(&relative_path),
            relative_path,
        });
    }

    Ok(submodules)
}

/// Remove git config comments: everything from a `#` or `;` that is not
/// inside double quotes, whether it starts the line or follows a value.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_quotes = false;
            let end = line
                .char_indices()
                .find_map(|(i, c)| match c {
                    '"' => {
                        in_quotes = !in_quotes;
                        None
                    }
                    '#' | ';' if !in_quotes => Some(i),
                    _ => None,
                })
                .unwrap_or(line.len());
            line[..end].trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `submodule "vendor/lib"` -> `vendor/lib`
fn section_name(section: &str) -> String {
    let name = match section.split_once(' ') {
        Some((_, rest)) => rest,
        None => section,
    };
    name.trim().trim_matches('"').to_string()
}
