//! Input validation: check the HTML file and build its file:// URL.
//!
//! ## Why canonicalise?
//!
//! `Url::from_file_path` refuses relative paths, and the browser resolves a
//! file:// URL against nothing — so the path must be absolute before it
//! leaves this module. Canonicalising also surfaces dangling symlinks here,
//! as a typed error, instead of as an opaque navigation failure later.

use crate::error::RenderError;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// A validated local HTML input.
#[derive(Debug)]
pub struct ValidatedInput {
    /// Canonicalised path to the HTML file.
    pub path: PathBuf,
    /// The file:// URL the browser will navigate to.
    pub url: Url,
}

/// Validate that `path` is a readable regular file and build its file:// URL.
pub fn resolve_input(path: &Path) -> Result<ValidatedInput, RenderError> {
    if !path.exists() {
        return Err(RenderError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(RenderError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Check read permission by attempting to open.
    if let Err(e) = std::fs::File::open(path) {
        return Err(if e.kind() == std::io::ErrorKind::PermissionDenied {
            RenderError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            RenderError::FileNotFound {
                path: path.to_path_buf(),
            }
        });
    }

    let canonical = path
        .canonicalize()
        .map_err(|_| RenderError::InvalidFileUrl {
            path: path.to_path_buf(),
        })?;

    let url = Url::from_file_path(&canonical).map_err(|_| RenderError::InvalidFileUrl {
        path: canonical.clone(),
    })?;

    debug!("Resolved input: {} -> {}", canonical.display(), url);
    Ok(ValidatedInput {
        path: canonical,
        url,
    })
}
