/*
 * templates.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Template asset sources.
 *
 * The bundled template set is embedded at compile time via `include_dir`.
 * An on-disk directory with the same layout can be used instead, so the
 * template set can be swapped without rebuilding.
 */

use crate::types::{CreateError, TemplateAsset};
use include_dir::{Dir, File, include_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Archive path prefix of the template folder. Only entries below it are assets.
pub const TEMPLATE_PREFIX: &str = "template/";

/// Bundled template set.
static BUNDLED_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// A lazy, single-pass sequence of template assets.
pub type AssetIter<'a> = Box<dyn Iterator<Item = Result<TemplateAsset, CreateError>> + 'a>;

/// A read-only source of template assets.
///
/// Every call to [`TemplateSource::assets`] starts a fresh scan. Assets come
/// out in a deterministic order, and each asset's bytes are fully read before
/// the next one is produced.
pub trait TemplateSource {
    /// Short description of where the assets come from, for log output.
    fn describe(&self) -> String;

    /// Start a scan over every file below [`TEMPLATE_PREFIX`].
    fn assets(&self) -> Result<AssetIter<'_>, CreateError>;
}

/// The template set compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Archive paths of every bundled template asset, in scan order.
    pub fn archive_paths() -> Vec<String> {
        embedded_files().map(|file| archive_path(file.path())).collect()
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn describe(&self) -> String {
        "bundled templates".to_string()
    }

    fn assets(&self) -> Result<AssetIter<'_>, CreateError> {
        Ok(Box::new(embedded_files().map(|file| {
            Ok::<_, CreateError>(TemplateAsset::new(
                archive_path(file.path()),
                file.contents(),
            ))
        })))
    }
}

fn embedded_files() -> impl Iterator<Item = &'static File<'static>> {
    let mut files = Vec::new();
    collect_files(&BUNDLED_TEMPLATES, &mut files);
    files.sort_by_key(|file| archive_path(file.path()));
    files
        .into_iter()
        .filter(|file| archive_path(file.path()).starts_with(TEMPLATE_PREFIX))
}

fn collect_files(dir: &'static Dir<'static>, files: &mut Vec<&'static File<'static>>) {
    files.extend(dir.files());
    for subdir in dir.dirs() {
        collect_files(subdir, files);
    }
}

/// Join path components with `/` regardless of platform.
fn archive_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Template assets read from a directory laid out like the bundled archive.
///
/// The directory must contain a `template/` folder; anything outside it is
/// ignored.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// Read templates from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory templates are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn source_error(&self, path: Option<&Path>, source: io::Error) -> CreateError {
        CreateError::TemplateSource {
            path: path.unwrap_or(&self.root).display().to_string(),
            source,
        }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn describe(&self) -> String {
        format!("templates in {}", self.root.display())
    }

    fn assets(&self) -> Result<AssetIter<'_>, CreateError> {
        let metadata = fs::metadata(&self.root).map_err(|e| self.source_error(None, e))?;
        if !metadata.is_dir() {
            return Err(self.source_error(
                None,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        let walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();

        Ok(Box::new(walker.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf);
                    return Some(Err(self.source_error(path.as_deref(), err.into())));
                }
            };

            if entry.file_type().is_dir() {
                return None;
            }

            let relative = entry.path().strip_prefix(&self.root).ok()?;
            let archive_path = archive_path(relative);
            if !archive_path.starts_with(TEMPLATE_PREFIX) {
                return None;
            }

            debug!("Reading template asset {}", entry.path().display());
            Some(
                fs::read(entry.path())
                    .map(|content| TemplateAsset::new(archive_path, content))
                    .map_err(|e| self.source_error(Some(entry.path()), e)),
            )
        })))
    }
}
