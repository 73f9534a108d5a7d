//! Path discovery
//!
//! Walks a root directory and lists every HTML document under it as a
//! root-relative, `/`-prefixed path (`/index.html`, `/guide/setup.html`).
//! Concatenating one of these paths with a base URL yields the URL the file
//! is served at.

use crate::CorpusError;
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

/// File extension that marks an HTML document
const HTML_EXTENSION: &str = "html";

/// Lists all HTML files under `root`, recursively
///
/// Entries are visited in file-name order, so repeated runs over the same tree
/// produce the same sequence. Hidden files and directories (names starting with
/// `.`) are skipped. Symlinks to files are listed under the link's own name;
/// symlinked directories are not descended into.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Relative paths, each starting with `/`
/// * `Err(CorpusError::FileSystem)` - The root is missing, is not a directory,
///   or part of the tree could not be read
///
/// # Example
///
/// ```no_run
/// use html_corpus::discovery::enumerate_html_files;
/// use std::path::Path;
///
/// for path in enumerate_html_files(Path::new("public")).unwrap() {
///     println!("{}", path);
/// }
/// ```
pub fn enumerate_html_files(root: &Path) -> Result<Vec<String>, CorpusError> {
    let metadata = std::fs::metadata(root).map_err(|source| CorpusError::FileSystem {
        path: root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(CorpusError::FileSystem {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| CorpusError::FileSystem {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: err.into(),
        })?;

        if !is_file(&entry) || !is_html(entry.path()) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            paths.push(to_served_path(relative));
        }
    }

    tracing::debug!("Found {} HTML files under {}", paths.len(), root.display());

    Ok(paths)
}

/// Regular file, or a symlink resolving to one
fn is_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_html(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(HTML_EXTENSION)
}

/// Converts a root-relative filesystem path into a `/`-separated served path
fn to_served_path(relative: &Path) -> String {
    let mut served = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            served.push('/');
            served.push_str(&part.to_string_lossy());
        }
    }
    served
}
