/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Core types for step type creation.
 */

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the step type registry in the node directory.
pub const MANIFEST_FILE_NAME: &str = "setupNodes.js";

/// Error type for step type creation.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The step type name is empty or contains characters outside `[A-Za-z0-9_]`
    #[error("invalid step type name '{0}', only letters, numbers and underscores are allowed")]
    InvalidName(String),

    /// The step type extension is empty or contains characters outside `[A-Za-z0-9_]`
    #[error(
        "invalid step type extension '{0}', only letters, numbers and underscores are allowed"
    )]
    InvalidExtension(String),

    /// The template source could not be opened or read
    #[error("failed to read template source {path}")]
    TemplateSource {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The destination folder could not be created
    #[error("failed to create folder {}", path.display())]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A generated file could not be written
    #[error("failed to write file {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error type for manifest updates.
///
/// These never fail a run: by the time the manifest is touched every
/// generated file has already been written.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write manifest {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No array element to append after
    #[error("manifest is malformed: {0}")]
    Malformed(String),
}

/// One bundled template file.
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    /// Archive-relative path, always `/`-separated (e.g. `template/setup.js`)
    pub archive_path: String,

    /// Raw file content
    pub content: Cow<'static, [u8]>,
}

impl TemplateAsset {
    /// Create a new template asset.
    pub fn new(archive_path: impl Into<String>, content: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            archive_path: archive_path.into(),
            content: content.into(),
        }
    }

    /// The content decoded as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// A file produced from one template asset.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the creation root (e.g. `quiz/QuizNode.js`)
    pub relative_path: PathBuf,

    /// Rewritten content
    pub content: String,
}

/// Whether the engine may write into the destination folder.
///
/// The caller decides, typically by prompting when the folder already
/// exists. The engine never asks on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    Proceed,
    Abort,
}

impl From<bool> for OverwriteDecision {
    fn from(proceed: bool) -> Self {
        if proceed {
            OverwriteDecision::Proceed
        } else {
            OverwriteDecision::Abort
        }
    }
}

/// Options for creating a new step type.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Directory the step type folder is created in
    pub root: PathBuf,

    /// Manifest to register the step type in
    pub manifest_path: PathBuf,
}

impl CreateOptions {
    /// Options rooted at `root`, with the manifest expected at `root/setupNodes.js`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let manifest_path = root.join(MANIFEST_FILE_NAME);
        Self {
            root,
            manifest_path,
        }
    }

    /// Use a manifest somewhere other than the root directory.
    pub fn with_manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }
}
