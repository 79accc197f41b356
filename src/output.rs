//! Output directory handling
//!
//! Validates and prepares the export root, derives per-API file paths and
//! writes the YAML files.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// Make `path` absolute against `cwd` and fold `.` and `..` lexically
pub fn normalize_path(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve the requested output directory and check it is a strict
/// sub-directory of `base_dir` (the executable's directory)
pub fn resolve_output_dir(requested: &Path, base_dir: &Path, cwd: &Path) -> ExportResult<PathBuf> {
    let output = normalize_path(requested, cwd);
    let base = normalize_path(base_dir, cwd);

    if output == base || !output.starts_with(&base) {
        return Err(ExportError::InvalidOutputPath { path: output, base });
    }

    Ok(output)
}

/// Create the output directory, or empty it when it already exists
pub fn prepare_output_dir(path: &Path) -> ExportResult<()> {
    let preparation_error = |reason: String| ExportError::OutputPreparation {
        path: path.to_path_buf(),
        reason,
    };

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return fs::create_dir_all(path).map_err(|e| preparation_error(e.to_string()));
        }
        Err(e) => return Err(preparation_error(e.to_string())),
    };

    if !metadata.is_dir() {
        return Err(preparation_error(format!("{} is not a dir", path.display())));
    }

    for entry in fs::read_dir(path).map_err(|e| preparation_error(e.to_string()))? {
        let entry = entry.map_err(|e| preparation_error(e.to_string()))?;
        let entry_path = entry.path();
        let removed = if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        removed.map_err(|e| preparation_error(format!("{}: {}", entry_path.display(), e)))?;
    }

    debug!(path = %path.display(), "Output directory emptied");
    Ok(())
}

/// Create a directory and its parents; an existing directory is fine
pub fn ensure_dir(path: &Path) -> ExportResult<()> {
    fs::create_dir_all(path).map_err(|source| ExportError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

/// Join one server-supplied name onto `dir` as a single path segment
///
/// Empty names, `.`, `..`, absolute paths and anything containing a path
/// separator are rejected so that nothing lands outside `dir`.
pub fn join_segment(dir: &Path, segment: &str, kind: &str) -> ExportResult<PathBuf> {
    let mut components = Path::new(segment).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();

    if !single_normal || segment.contains(['/', '\\']) {
        return Err(ExportError::Filesystem {
            path: dir.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid {} name {:?}", kind, segment),
            ),
        });
    }

    Ok(dir.join(segment))
}

/// Directory holding one product version's YAML files
///
/// The synthetic empty version adds no path segment.
pub fn version_dir(base: &Path, product: &str, version: &str) -> ExportResult<PathBuf> {
    let dir = join_segment(base, product, "product")?;
    if version.is_empty() {
        Ok(dir)
    } else {
        join_segment(&dir, version, "version")
    }
}

/// Path of the YAML file for one API
///
/// Identifiers that would escape the version directory are rejected.
pub fn api_file_path(dir: &Path, api_id: &str) -> ExportResult<PathBuf> {
    join_segment(dir, api_id, "API")?;
    Ok(dir.join(format!("{}.yaml", api_id)))
}

/// Write YAML text to `path`, replacing any previous content
pub fn write_yaml(path: &Path, yaml: &str) -> ExportResult<()> {
    fs::write(path, yaml).map_err(|source| ExportError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}
