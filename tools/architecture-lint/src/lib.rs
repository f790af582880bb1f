//! Layering lint for the `connect` crate.
//!
//! `connect` is split into three layers under `connect/src`:
//!
//! - `domain` holds records, ports and services and depends on nothing else
//!   in the crate, nor on HTTP or database crates
//! - `state` holds the slices and stores; it talks to the API only through
//!   domain ports, so it must not reach `outbound` or the HTTP and database
//!   crates
//! - `outbound` implements the ports and must not reach back into `state`
//!
//! Nothing in these layers may depend on the `seeding` wiring module.
//! The lint parses each file with `syn` and checks every path it mentions.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name the crate uses for itself in absolute paths.
const CRATE_NAME: &str = "connect";

const HTTP_CRATES: [&str; 3] = ["reqwest", "actix_web", "actix_rt"];
const DATABASE_CRATES: [&str; 3] = ["diesel", "diesel_async", "diesel_migrations"];

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `connect/src`.
    pub file: PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse {
        /// Offending file.
        file: PathBuf,
        /// Parser message.
        message: String,
    },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting layers: {err}"),
            Self::Parse { file, message } => {
                write!(f, "failed to parse {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "Layer boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `connect/src`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Lint the layer directories of the crate rooted at `crate_dir`.
///
/// `crate_dir` is the directory holding the crate's `Cargo.toml`.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = crate_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not inside a layer directory".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    State,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::State, Self::Outbound];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::State => "state",
            Self::Outbound => "outbound",
        }
    }

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }

    fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["state", "outbound", "seeding"],
            Self::State => &["outbound", "seeding"],
            Self::Outbound => &["state", "seeding"],
        }
    }

    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        match self {
            Self::Domain | Self::State => HTTP_CRATES
                .into_iter()
                .chain(DATABASE_CRATES)
                .collect(),
            Self::Outbound => BTreeSet::new(),
        }
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let forbidden_crates = layer.forbidden_crates();
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(module) = internal_root(segments)
            .and_then(|root| layer.forbidden_modules().iter().find(|m| **m == root))
        {
            messages.insert(format!(
                "{} layer must not depend on crate::{module}",
                layer.dir()
            ));
        }
        if let Some(krate) = external_root(segments).and_then(|root| forbidden_crates.get(root)) {
            messages.insert(format!(
                "{} layer must not depend on external crate `{krate}`",
                layer.dir()
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// First crate-internal module named by a path, if it names one.
fn internal_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    let index = if first == CRATE_NAME {
        1
    } else if is_relative(first) {
        segments.iter().position(|segment| !is_relative(segment))?
    } else if segments.len() > 1 {
        0
    } else {
        return None;
    };
    segments.get(index).map(String::as_str)
}

fn external_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    (!is_relative(root) && root != CRATE_NAME).then_some(root)
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource {
            file: relative,
            contents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
