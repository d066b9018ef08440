use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ChompError, Result};

pub const DOCUMENT_EXTENSION: &str = "fcpxml";
pub const BUNDLE_EXTENSION: &str = "fcpxmld";
pub const BUNDLE_DOCUMENT_NAME: &str = "Info.fcpxml";

/// Where the XML to read lives, and what to remove if the user asks to delete the export.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Document(PathBuf),
    Bundle { bundle: PathBuf, document: PathBuf },
}

impl InputKind {
    pub fn document(&self) -> &Path {
        match self {
            InputKind::Document(path) => path,
            InputKind::Bundle { document, .. } => document,
        }
    }

    /// The path the user originally picked: the `.fcpxmld` directory or the `.fcpxml` file.
    pub fn removal_target(&self) -> &Path {
        match self {
            InputKind::Document(path) => path,
            InputKind::Bundle { bundle, .. } => bundle,
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, InputKind::Bundle { .. })
    }

    /// `Project.fcpxmld` -> `Project.chapters.txt`, next to the export.
    pub fn default_output_path(&self) -> PathBuf {
        self.removal_target().with_extension("chapters.txt")
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

pub fn resolve_input<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let path = path.as_ref();

    if has_extension(path, BUNDLE_EXTENSION) {
        let document = path.join(BUNDLE_DOCUMENT_NAME);
        log::debug!("Expected bundle document at {}", document.display());
        if !document.is_file() {
            return Err(ChompError::InputNotFound(document));
        }
        return Ok(InputKind::Bundle {
            bundle: path.to_path_buf(),
            document,
        });
    }

    if has_extension(path, DOCUMENT_EXTENSION) {
        if !path.is_file() {
            return Err(ChompError::InputNotFound(path.to_path_buf()));
        }
        return Ok(InputKind::Document(path.to_path_buf()));
    }

    Err(ChompError::UnsupportedFileType(path.to_path_buf()))
}

/// Writes the chapter text as UTF-8, replacing any existing file.
pub fn save_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        log::warn!(
            "Output file already exists and will be overwritten: {}",
            path.display()
        );
    }
    fs::write(path, text).map_err(|e| ChompError::io(path, e))?;
    log::info!("Wrote: {}", path.display());
    Ok(())
}

/// Deletes the export: the whole bundle directory, or just the `.fcpxml` file.
pub fn remove_input(input: &InputKind) -> Result<()> {
    let target = input.removal_target();
    let removed = match input {
        InputKind::Bundle { .. } => fs::remove_dir_all(target),
        InputKind::Document(_) => fs::remove_file(target),
    };
    removed.map_err(|source| ChompError::DeletionFailure {
        path: target.to_path_buf(),
        source,
    })?;
    log::info!("Deleted {}", target.display());
    Ok(())
}
